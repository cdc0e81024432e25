//! Functor - mapping a plain function over a wrapped value.
//!
//! Signature: `Functor F => fmap :: (a -> b) -> F a -> F b`.
//!
//! # Laws
//!
//! All registered `fmap` implementations must satisfy:
//!
//! ```text
//! fmap(identity, fa) == fa
//! fmap(g.compose(f), fa) == fmap(g, fmap(f, fa))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::seq::{self, Seq};
//! use dynars::typeclass::fmap;
//! use dynars::value::{Lambda, Value};
//! use dynars::seq;
//!
//! seq::install_global().unwrap();
//! let doubled = fmap(Lambda::typed(|n: i32| n * 2), Value::new(seq![1, 2, 3])).unwrap();
//! assert_eq!(doubled, Value::new(seq![2, 4, 6]));
//! ```

use std::sync::Arc;

use crate::dispatch::{call, DispatchError, Registry};
use crate::value::{Lambda, Value};

use super::{global, ops};

/// Maps `function` over the contents of `fa`, dispatching on `fa`'s
/// runtime type.
///
/// A type with a direct `fmap` registration uses it; any other Applicative
/// reaches the `apply(pure(f), fa)` derivation.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when `fa`'s type registers neither
/// `fmap` nor the primitives the derivation needs, plus any dispatch or
/// downcast failure from the selected implementation.
pub fn fmap(function: Lambda, fa: Value) -> Result<Value, DispatchError> {
    fmap_with(global(), function, fa)
}

/// As [`fmap`], against an explicit registry.
///
/// # Errors
///
/// As [`fmap`].
pub fn fmap_with(
    registry: &Arc<Registry>,
    function: Lambda,
    fa: Value,
) -> Result<Value, DispatchError> {
    call(registry, ops::FMAP, vec![Value::new(function), fa])
}
