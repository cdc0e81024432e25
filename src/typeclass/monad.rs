//! Monad - sequencing computations, and the operations derived from it.
//!
//! Signature: `Monad M => flat_map :: M a -> (a -> M b) -> M b`.
//!
//! [`join`] and [`filter`] are expressed purely in terms of the
//! primitives: `join(ma) = flat_map(ma, identity)` and `filter(p, ma) =
//! flat_map(ma, |a| if p(a) { pure(a) } else { empty() })`, where `pure`
//! and `empty` resolve for `ma`'s own concrete type. `filter` therefore
//! requires a MonadPlus.
//!
//! # Laws
//!
//! ```text
//! flat_map(pure(a), f) == f(a)
//! flat_map(ma, pure) == ma
//! flat_map(flat_map(ma, f), g) == flat_map(ma, |a| flat_map(f(a), g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::seq::{self, Seq};
//! use dynars::typeclass::{filter, join};
//! use dynars::value::{Lambda, Value};
//! use dynars::seq;
//!
//! seq::install_global().unwrap();
//!
//! let evens = filter(
//!     Lambda::typed(|n: i32| n % 2 == 0),
//!     Value::new(seq![1, 2, 3, 4]),
//! )
//! .unwrap();
//! assert_eq!(evens, Value::new(seq![2, 4]));
//!
//! let nested = Value::new(Seq::from_values(vec![
//!     Value::new(seq![1, 2]),
//!     Value::new(seq![3]),
//! ]));
//! assert_eq!(join(nested).unwrap(), Value::new(seq![1, 2, 3]));
//! ```

use std::sync::Arc;

use crate::dispatch::{call, DispatchError, Registry};
use crate::value::{Lambda, Value};

use super::applicative::pure_for;
use super::alternative::empty_for;
use super::{global, ops};

/// Sequences `ma` through `function`, which maps each inner value to a new
/// container of the same type. Dispatches on `ma`'s runtime type.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when `ma`'s type never registered
/// `flat_map`, plus any failure from the implementation or `function`.
pub fn flat_map(ma: Value, function: Lambda) -> Result<Value, DispatchError> {
    flat_map_with(global(), ma, function)
}

/// As [`flat_map`], against an explicit registry.
///
/// # Errors
///
/// As [`flat_map`].
pub fn flat_map_with(
    registry: &Arc<Registry>,
    ma: Value,
    function: Lambda,
) -> Result<Value, DispatchError> {
    call(registry, ops::FLAT_MAP, vec![ma, Value::new(function)])
}

/// Removes one layer of monadic nesting: `join(ma) = flat_map(ma,
/// identity)`. The inner values must themselves be containers of the same
/// type.
///
/// # Errors
///
/// As [`flat_map`].
pub fn join(ma: Value) -> Result<Value, DispatchError> {
    join_with(global(), ma)
}

/// As [`join`], against an explicit registry.
///
/// # Errors
///
/// As [`join`].
pub fn join_with(registry: &Arc<Registry>, ma: Value) -> Result<Value, DispatchError> {
    flat_map_with(registry, ma, Lambda::identity())
}

/// Keeps the inner values satisfying `predicate`, for any MonadPlus.
///
/// The predicate must produce a `bool` value. Kept values are re-wrapped
/// with the *same* concrete type's `pure`; dropped ones become its
/// `empty`.
///
/// # Errors
///
/// [`DispatchError::NoImplementation`] when `ma`'s type lacks any of
/// `flat_map`, `pure`, or `empty`; [`DispatchError::TypeMismatch`] when
/// the predicate produces a non-`bool`.
pub fn filter(predicate: Lambda, ma: Value) -> Result<Value, DispatchError> {
    filter_with(global(), predicate, ma)
}

/// As [`filter`], against an explicit registry.
///
/// # Errors
///
/// As [`filter`].
pub fn filter_with(
    registry: &Arc<Registry>,
    predicate: Lambda,
    ma: Value,
) -> Result<Value, DispatchError> {
    let tag = ma.tag();
    let registry_for_inner = Arc::clone(registry);
    let inner = Lambda::fallible(move |argument| {
        let keep = predicate.call(argument.clone())?.extract::<bool>()?;
        if keep {
            pure_for(&registry_for_inner, tag, argument)
        } else {
            empty_for(&registry_for_inner, tag)
        }
    });
    flat_map_with(registry, ma, inner)
}
