//! Applicative - lifting values and applying wrapped functions.
//!
//! Signatures: `Applicative F => pure :: a -> F a` and
//! `Applicative F => apply :: F (a -> b) -> F a -> F b`.
//!
//! `pure` dispatches on the *requested* container type rather than on an
//! argument, so it is invoked with an explicit type parameter (or tag).
//!
//! # Laws
//!
//! ```text
//! apply(pure(identity), fa) == fa
//! apply(pure(f), pure(a)) == pure(f(a))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::maybe::{self, Maybe};
//! use dynars::typeclass::{apply, pure};
//! use dynars::value::{Lambda, Value};
//!
//! maybe::install_global().unwrap();
//! let wrapped_function = pure::<Maybe>(Value::new(Lambda::typed(|n: i32| n + 1))).unwrap();
//! let result = apply(wrapped_function, Value::new(Maybe::just(Value::new(4_i32)))).unwrap();
//! assert_eq!(result, Value::new(Maybe::just(Value::new(5_i32))));
//! ```

use std::sync::Arc;

use crate::dispatch::{call, call_for, DispatchError, Registry};
use crate::value::{TypeTag, Value};

use super::{global, ops};

/// Wraps `value` into the container type `F`.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when `F` never registered `pure`.
pub fn pure<F: 'static>(value: Value) -> Result<Value, DispatchError> {
    pure_with::<F>(global(), value)
}

/// As [`pure`], against an explicit registry.
///
/// # Errors
///
/// As [`pure`].
pub fn pure_with<F: 'static>(registry: &Arc<Registry>, value: Value) -> Result<Value, DispatchError> {
    pure_for(registry, TypeTag::of::<F>(), value)
}

/// As [`pure`], with the container type given as a runtime tag.
///
/// Derived operations use this form: `filter` and the Monad-derived
/// `apply` must wrap results into the *same* concrete type they were
/// invoked on, known only as a tag.
///
/// # Errors
///
/// As [`pure`].
pub fn pure_for(
    registry: &Arc<Registry>,
    tag: TypeTag,
    value: Value,
) -> Result<Value, DispatchError> {
    call_for(registry, ops::PURE, &[tag], vec![value])
}

/// Applies a wrapped function to a wrapped value, dispatching on both
/// runtime types.
///
/// A type without a direct `apply` registration reaches the Monad
/// derivation when it has one.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when the types register neither
/// `apply` nor the Monad primitives, plus any dispatch or downcast failure
/// from the selected implementation.
pub fn apply(ff: Value, fa: Value) -> Result<Value, DispatchError> {
    apply_with(global(), ff, fa)
}

/// As [`apply`], against an explicit registry.
///
/// # Errors
///
/// As [`apply`].
pub fn apply_with(registry: &Arc<Registry>, ff: Value, fa: Value) -> Result<Value, DispatchError> {
    call(registry, ops::APPLY, vec![ff, fa])
}
