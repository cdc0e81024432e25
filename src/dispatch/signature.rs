//! Type signatures - the keys of the dispatch tables.
//!
//! A [`Signature`] is an ordered sequence of [`TypeKey`]s, one per
//! dispatch-relevant position. Resolution selects, among all signatures
//! matching the runtime types of a call, the unique one that is at least as
//! specific as every other candidate; if no such signature exists the call
//! is ambiguous.

use std::fmt;

use smallvec::SmallVec;

use crate::typeclass::Capability;
use crate::value::TypeTag;

use super::registry::Registry;

/// A type descriptor occupying one position of a [`Signature`].
///
/// Specificity at a position orders `Exact` before `Conforms` before `Any`,
/// and capabilities among themselves by implication: a key for a capability
/// that implies another (e.g. `Monad` implies `Applicative`) is the more
/// specific of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKey {
    /// Matches exactly one runtime type.
    Exact(TypeTag),
    /// Matches any type currently conforming to the capability.
    ///
    /// Conformance is evaluated against the registry at resolution time, so
    /// a `Conforms` registration starts matching a type the moment that
    /// type's own registrations establish the capability. A `Conforms` key
    /// must name a capability defined by *other* operations than the one it
    /// is registered under; a self-referential key recurses unboundedly.
    Conforms(Capability),
    /// Matches every type.
    Any,
}

impl TypeKey {
    /// The exact key for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self::Exact(TypeTag::of::<T>())
    }

    /// Whether a value of type `tag` satisfies this key.
    pub(crate) fn matches(self, registry: &Registry, tag: TypeTag) -> bool {
        match self {
            Self::Exact(expected) => expected == tag,
            Self::Conforms(capability) => capability.conforms(registry, tag),
            Self::Any => true,
        }
    }

    /// Whether this key is at least as specific as `other`, assuming both
    /// match the same runtime type.
    pub(crate) fn at_least_as_specific_as(self, other: Self) -> bool {
        match (self, other) {
            (Self::Exact(left), Self::Exact(right)) => left == right,
            (Self::Exact(_), Self::Conforms(_) | Self::Any) => true,
            (Self::Conforms(left), Self::Conforms(right)) => left.implies(right),
            (Self::Conforms(_), Self::Any) => true,
            (Self::Any, Self::Any) => true,
            (Self::Conforms(_) | Self::Any, Self::Exact(_)) | (Self::Any, Self::Conforms(_)) => {
                false
            }
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(tag) => write!(formatter, "{}", tag.name()),
            Self::Conforms(capability) => write!(formatter, "Conforms({capability})"),
            Self::Any => formatter.write_str("Any"),
        }
    }
}

/// An ordered sequence of [`TypeKey`]s keying a dispatch table entry.
///
/// # Examples
///
/// ```rust
/// use dynars::dispatch::{Signature, TypeKey};
///
/// let signature = Signature::new([TypeKey::of::<i32>(), TypeKey::Any]);
/// assert_eq!(signature.len(), 2);
/// assert_eq!(format!("{}", signature), "(i32, Any)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    keys: SmallVec<[TypeKey; 2]>,
}

impl Signature {
    /// Builds a signature from its keys, in position order.
    pub fn new(keys: impl IntoIterator<Item = TypeKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// The keys, in position order.
    #[must_use]
    pub fn keys(&self) -> &[TypeKey] {
        &self.keys
    }

    /// The number of dispatch positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the signature has no dispatch positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether every position matches the corresponding runtime tag.
    pub(crate) fn matches(&self, registry: &Registry, tags: &[TypeTag]) -> bool {
        self.keys.len() == tags.len()
            && self
                .keys
                .iter()
                .zip(tags)
                .all(|(key, tag)| key.matches(registry, *tag))
    }

    /// Whether this signature is at least as specific as `other` at every
    /// position.
    pub(crate) fn at_least_as_specific_as(&self, other: &Self) -> bool {
        self.keys.len() == other.keys.len()
            && self
                .keys
                .iter()
                .zip(other.keys.iter())
                .all(|(left, right)| left.at_least_as_specific_as(*right))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("(")?;
        for (index, key) in self.keys.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{key}")?;
        }
        formatter.write_str(")")
    }
}
