//! `Seq` - an immutable sequence of dynamic values.
//!
//! `Seq` registers the four MonadPlus primitives plus a direct element-wise
//! `fmap`. The direct registration is what resolution selects for a `Seq`
//! even though the Applicative derivation also matches - exact beats
//! capability - and it keeps mapping single-pass. Its `flat_map` is the
//! concatenating fold, which makes `apply` the cartesian product under the
//! Monad derivation.
//!
//! The [`seq!`](crate::seq) macro builds a `Seq` from plain Rust values:
//!
//! ```rust
//! use dynars::seq;
//! use dynars::value::Value;
//!
//! let numbers = seq![1, 2, 3];
//! assert_eq!(numbers.len(), 3);
//! assert_eq!(numbers.values()[0], Value::new(1_i32));
//! ```

use crate::dispatch::{expect_arity, DispatchError, Registry, Signature, TypeKey};
use crate::typeclass::{self, ops};
use crate::value::{Lambda, Value};

/// An immutable sequence of dynamic values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Seq {
    values: Vec<Value>,
}

impl Seq {
    /// The empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Builds a sequence from values, in order.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The elements, in order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl FromIterator<Value> for Seq {
    fn from_iter<I: IntoIterator<Item = Value>>(iterator: I) -> Self {
        Self {
            values: iterator.into_iter().collect(),
        }
    }
}

impl IntoIterator for Seq {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Builds a [`Seq`](crate::instance::seq::Seq) from plain Rust values.
///
/// Each element is wrapped with [`Value::new`](crate::value::Value::new).
///
/// # Examples
///
/// ```rust
/// use dynars::seq;
///
/// let empty = seq![];
/// assert!(empty.is_empty());
///
/// let mixed = seq![1, 2, 3];
/// assert_eq!(mixed.len(), 3);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::instance::seq::Seq::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::instance::seq::Seq::from_values(
            vec![$($crate::value::Value::new($element)),+],
        )
    };
}

/// Registers the MonadPlus primitives and the direct `fmap` for [`Seq`]
/// in `registry`.
///
/// Idempotent per registry.
///
/// # Errors
///
/// Propagates registration failures from the registry.
pub fn install(registry: &Registry) -> Result<(), DispatchError> {
    registry.extend("seq", |registry| {
        registry.register(
            ops::FMAP,
            Signature::new([TypeKey::of::<Seq>()]),
            |_, arguments| {
                let [function, fa] = expect_arity::<2>(ops::FMAP, arguments)?;
                let function = function.expect_ref::<Lambda>()?;
                let mapped = fa
                    .expect_ref::<Seq>()?
                    .iter()
                    .map(|value| function.call(value.clone()))
                    .collect::<Result<Vec<Value>, DispatchError>>()?;
                Ok(Value::new(Seq::from_values(mapped)))
            },
        )?;
        registry.register(
            ops::FLAT_MAP,
            Signature::new([TypeKey::of::<Seq>()]),
            |_, arguments| {
                let [ma, function] = expect_arity::<2>(ops::FLAT_MAP, arguments)?;
                let function = function.expect_ref::<Lambda>()?;
                let mut flattened = Vec::new();
                for value in ma.expect_ref::<Seq>()? {
                    let result = function.call(value.clone())?;
                    flattened.extend(result.expect_ref::<Seq>()?.iter().cloned());
                }
                Ok(Value::new(Seq::from_values(flattened)))
            },
        )?;
        registry.register(
            ops::PURE,
            Signature::new([TypeKey::of::<Seq>()]),
            |_, arguments| {
                let [value] = expect_arity::<1>(ops::PURE, arguments)?;
                Ok(Value::new(Seq::from_values(vec![value])))
            },
        )?;
        registry.register(
            ops::COMBINE,
            Signature::new([TypeKey::of::<Seq>(), TypeKey::of::<Seq>()]),
            |_, arguments| {
                let [first, second] = expect_arity::<2>(ops::COMBINE, arguments)?;
                let mut combined = first.expect_ref::<Seq>()?.values().to_vec();
                combined.extend(second.expect_ref::<Seq>()?.iter().cloned());
                Ok(Value::new(Seq::from_values(combined)))
            },
        )?;
        registry.register(
            ops::EMPTY,
            Signature::new([TypeKey::of::<Seq>()]),
            |_, _| Ok(Value::new(Seq::new())),
        )
    })
}

/// Registers [`Seq`] in the global registry.
///
/// # Errors
///
/// As [`install`].
pub fn install_global() -> Result<(), DispatchError> {
    install(typeclass::global())
}
