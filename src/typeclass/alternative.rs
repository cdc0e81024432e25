//! Alternative - a monoid structure on Applicative containers.
//!
//! Signatures: `Alternative F => empty :: F a` and
//! `Alternative F => combine :: F a -> F a -> F a`.
//!
//! `empty` takes no arguments at all, so like `pure` it dispatches on the
//! requested container type.
//!
//! # Laws
//!
//! ```text
//! combine(empty(), fa) == fa == combine(fa, empty())
//! combine(combine(fa, fb), fc) == combine(fa, combine(fb, fc))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::maybe::{self, Maybe};
//! use dynars::typeclass::{combine, empty};
//! use dynars::value::Value;
//!
//! maybe::install_global().unwrap();
//! let nothing = empty::<Maybe>().unwrap();
//! let just = Value::new(Maybe::just(Value::new(1_i32)));
//! assert_eq!(combine(nothing, just.clone()).unwrap(), just);
//! ```

use std::sync::Arc;

use crate::dispatch::{call, call_for, DispatchError, Registry};
use crate::value::{TypeTag, Value};

use super::{global, ops};

/// The identity element of the container type `F`.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when `F` never registered `empty`.
pub fn empty<F: 'static>() -> Result<Value, DispatchError> {
    empty_with::<F>(global())
}

/// As [`empty`], against an explicit registry.
///
/// # Errors
///
/// As [`empty`].
pub fn empty_with<F: 'static>(registry: &Arc<Registry>) -> Result<Value, DispatchError> {
    empty_for(registry, TypeTag::of::<F>())
}

/// As [`empty`], with the container type given as a runtime tag.
///
/// # Errors
///
/// As [`empty`].
pub fn empty_for(registry: &Arc<Registry>, tag: TypeTag) -> Result<Value, DispatchError> {
    call_for(registry, ops::EMPTY, &[tag], Vec::new())
}

/// Combines two containers of the same type, dispatching on both runtime
/// types.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when the types never registered
/// `combine`, plus any failure from the selected implementation.
pub fn combine(fa: Value, fb: Value) -> Result<Value, DispatchError> {
    combine_with(global(), fa, fb)
}

/// As [`combine`], against an explicit registry.
///
/// # Errors
///
/// As [`combine`].
pub fn combine_with(registry: &Arc<Registry>, fa: Value, fb: Value) -> Result<Value, DispatchError> {
    call(registry, ops::COMBINE, vec![fa, fb])
}
