//! `Maybe` - cleanly representing the presence or absence of a value.
//!
//! `Maybe` registers only the four MonadPlus primitives (`flat_map`,
//! `pure`, `combine`, `empty`). `fmap` and `apply` are reached through the
//! capability derivations, which makes `Maybe` the crate's working example
//! of conformance cascading from a minimal registration set.
//!
//! # Examples
//!
//! ```rust
//! use dynars::instance::maybe::{self, Maybe};
//! use dynars::typeclass::{flat_map, pure};
//! use dynars::value::{Lambda, Value};
//!
//! maybe::install_global().unwrap();
//!
//! let half = Lambda::fallible(|value| {
//!     let n = value.extract::<i32>()?;
//!     Ok(Value::new(if n % 2 == 0 {
//!         Maybe::just(Value::new(n / 2))
//!     } else {
//!         Maybe::nothing()
//!     }))
//! });
//!
//! let even = pure::<Maybe>(Value::new(8_i32)).unwrap();
//! assert_eq!(
//!     flat_map(even, half.clone()).unwrap(),
//!     Value::new(Maybe::just(Value::new(4_i32)))
//! );
//!
//! let odd = pure::<Maybe>(Value::new(7_i32)).unwrap();
//! assert_eq!(flat_map(odd, half).unwrap(), Value::new(Maybe::nothing()));
//! ```

use crate::dispatch::{expect_arity, DispatchError, Registry, Signature, TypeKey};
use crate::typeclass::{self, ops};
use crate::value::{Lambda, Value};

use super::seq::Seq;

/// A value that may or may not be present.
#[derive(Debug, Clone, PartialEq)]
pub enum Maybe {
    /// A present value.
    Just(Value),
    /// The absence of a value.
    Nothing,
}

impl Maybe {
    /// Wraps a present value.
    #[must_use]
    pub const fn just(value: Value) -> Self {
        Self::Just(value)
    }

    /// The absent value.
    #[must_use]
    pub const fn nothing() -> Self {
        Self::Nothing
    }

    /// Whether a value is present.
    #[must_use]
    pub const fn is_just(&self) -> bool {
        matches!(self, Self::Just(_))
    }

    /// Whether the value is absent.
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Borrows the wrapped value, if present.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Just(value) => Some(value),
            Self::Nothing => None,
        }
    }

    /// The wrapped value, or `default` when absent.
    #[must_use]
    pub fn value_or(self, default: Value) -> Value {
        match self {
            Self::Just(value) => value,
            Self::Nothing => default,
        }
    }

    /// The wrapped value, or `fallback()` when absent.
    #[must_use]
    pub fn value_or_else(self, fallback: impl FnOnce() -> Value) -> Value {
        match self {
            Self::Just(value) => value,
            Self::Nothing => fallback(),
        }
    }

    /// Converts from an [`Option`].
    #[must_use]
    pub fn from_option(option: Option<Value>) -> Self {
        option.map_or(Self::Nothing, Self::Just)
    }

    /// Converts into an [`Option`].
    #[must_use]
    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Just(value) => Some(value),
            Self::Nothing => None,
        }
    }

    /// An empty sequence when absent, a one-element sequence when present.
    #[must_use]
    pub fn to_seq(&self) -> Seq {
        match self {
            Self::Just(value) => Seq::from_values(vec![value.clone()]),
            Self::Nothing => Seq::new(),
        }
    }

    /// `Just` the first element of `seq`, or `Nothing` when it is empty.
    #[must_use]
    pub fn from_seq(seq: &Seq) -> Self {
        Self::from_option(seq.values().first().cloned())
    }
}

/// Registers the MonadPlus primitives for [`Maybe`] in `registry`.
///
/// Idempotent per registry.
///
/// # Errors
///
/// Propagates registration failures from the registry.
pub fn install(registry: &Registry) -> Result<(), DispatchError> {
    registry.extend("maybe", |registry| {
        registry.register(
            ops::FLAT_MAP,
            Signature::new([TypeKey::of::<Maybe>()]),
            |_, arguments| {
                let [ma, function] = expect_arity::<2>(ops::FLAT_MAP, arguments)?;
                match ma.expect_ref::<Maybe>()? {
                    Maybe::Just(value) => function.expect_ref::<Lambda>()?.call(value.clone()),
                    Maybe::Nothing => Ok(Value::new(Maybe::Nothing)),
                }
            },
        )?;
        registry.register(
            ops::PURE,
            Signature::new([TypeKey::of::<Maybe>()]),
            |_, arguments| {
                let [value] = expect_arity::<1>(ops::PURE, arguments)?;
                Ok(Value::new(Maybe::Just(value)))
            },
        )?;
        registry.register(
            ops::COMBINE,
            Signature::new([TypeKey::of::<Maybe>(), TypeKey::of::<Maybe>()]),
            |_, arguments| {
                let [first, second] = expect_arity::<2>(ops::COMBINE, arguments)?;
                if first.expect_ref::<Maybe>()?.is_just() {
                    Ok(first)
                } else {
                    Ok(second)
                }
            },
        )?;
        registry.register(
            ops::EMPTY,
            Signature::new([TypeKey::of::<Maybe>()]),
            |_, _| Ok(Value::new(Maybe::Nothing)),
        )
    })
}

/// Registers [`Maybe`] in the global registry.
///
/// # Errors
///
/// As [`install`].
pub fn install_global() -> Result<(), DispatchError> {
    install(typeclass::global())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn value_or_prefers_the_wrapped_value() {
        let just = Maybe::just(Value::new(1_i32));
        assert_eq!(just.value_or(Value::new(9_i32)), Value::new(1_i32));
        assert_eq!(
            Maybe::nothing().value_or(Value::new(9_i32)),
            Value::new(9_i32)
        );
    }

    #[rstest]
    fn value_or_else_invokes_only_when_absent() {
        let just = Maybe::just(Value::new(1_i32));
        assert_eq!(
            just.value_or_else(|| unreachable!("present value must win")),
            Value::new(1_i32)
        );
        assert_eq!(
            Maybe::nothing().value_or_else(|| Value::new(9_i32)),
            Value::new(9_i32)
        );
    }

    #[rstest]
    fn option_round_trip() {
        let just = Maybe::from_option(Some(Value::new(5_i32)));
        assert_eq!(just, Maybe::just(Value::new(5_i32)));
        assert_eq!(just.into_option(), Some(Value::new(5_i32)));
        assert_eq!(Maybe::from_option(None), Maybe::nothing());
        assert_eq!(Maybe::nothing().into_option(), None);
    }

    #[rstest]
    fn seq_round_trip_keeps_the_first_element() {
        let seq = Seq::from_values(vec![Value::new(1_i32), Value::new(2_i32)]);
        assert_eq!(Maybe::from_seq(&seq), Maybe::just(Value::new(1_i32)));
        assert_eq!(Maybe::from_seq(&Seq::new()), Maybe::nothing());

        let just = Maybe::just(Value::new(7_i32));
        assert_eq!(just.to_seq(), Seq::from_values(vec![Value::new(7_i32)]));
        assert_eq!(Maybe::nothing().to_seq(), Seq::new());
    }
}
