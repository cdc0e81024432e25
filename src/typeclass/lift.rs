//! Lifting - generalizing ordinary functions over any Applicative.
//!
//! `lift` turns an ordinary function of `k` required arguments into one
//! taking `k` wrapped arguments and returning a wrapped result:
//!
//! ```text
//! result = fmap(curried_f, first_argument)
//! result = apply(result, argument_i)    for each remaining argument
//! ```
//!
//! The arity is read from the [`Partial`] binder wrapping the function;
//! [`lift_n`] states it explicitly.
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::maybe::{self, Maybe};
//! use dynars::partial::Partial;
//! use dynars::typeclass::{lift, pure};
//! use dynars::value::Value;
//!
//! maybe::install_global().unwrap();
//!
//! let add = lift(Partial::typed2(|a: i32, b: i32| a + b));
//! let result = add
//!     .apply(vec![
//!         pure::<Maybe>(Value::new(2_i32)).unwrap(),
//!         pure::<Maybe>(Value::new(3_i32)).unwrap(),
//!     ])
//!     .unwrap();
//! assert_eq!(result, pure::<Maybe>(Value::new(5_i32)).unwrap());
//! ```

use std::sync::Arc;

use crate::dispatch::{DispatchError, Registry};
use crate::partial::Partial;
use crate::value::Value;

use super::applicative::apply_with;
use super::functor::fmap_with;
use super::global;

/// An ordinary function generalized over wrapped arguments.
///
/// Built by [`lift`] / [`lift_n`]; reusable across calls.
#[derive(Debug, Clone)]
pub struct Lifter {
    registry: Arc<Registry>,
    function: Partial,
}

impl Lifter {
    /// The number of wrapped arguments a call expects.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.function.arity()
    }

    /// Applies the lifted function to wrapped arguments.
    ///
    /// With no arguments at all, the wrapped function is invoked directly
    /// and its bare result returned (the identity case for nullary
    /// composition).
    ///
    /// # Errors
    ///
    /// [`DispatchError::ArityMismatch`] when the argument count differs
    /// from the function's arity, plus any dispatch failure from the
    /// `fmap`/`apply` chain.
    pub fn apply(&self, arguments: Vec<Value>) -> Result<Value, DispatchError> {
        let mut iterator = arguments.into_iter();
        let Some(first) = iterator.next() else {
            return self.function.invoke_nullary();
        };
        let remaining = iterator.len();
        if remaining + 1 != self.function.arity() {
            return Err(DispatchError::ArityMismatch {
                operation: "lift",
                expected: self.function.arity(),
                actual: remaining + 1,
            });
        }
        let mut result = fmap_with(&self.registry, self.function.clone().into_lambda(), first)?;
        for argument in iterator {
            result = apply_with(&self.registry, result, argument)?;
        }
        Ok(result)
    }
}

/// Lifts a bound function over the global registry, reading its arity from
/// the binder.
#[must_use]
pub fn lift(function: Partial) -> Lifter {
    lift_with(global(), function)
}

/// As [`lift`], against an explicit registry.
#[must_use]
pub fn lift_with(registry: &Arc<Registry>, function: Partial) -> Lifter {
    Lifter {
        registry: Arc::clone(registry),
        function,
    }
}

/// Lifts a raw function with an explicitly stated arity over the global
/// registry.
pub fn lift_n<F>(arity: usize, function: F) -> Lifter
where
    F: Fn(Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
{
    lift(Partial::new(arity, function))
}

/// As [`lift_n`], against an explicit registry.
pub fn lift_n_with<F>(registry: &Arc<Registry>, arity: usize, function: F) -> Lifter
where
    F: Fn(Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
{
    lift_with(registry, Partial::new(arity, function))
}
