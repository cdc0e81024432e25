//! Capabilities - the algebraic hierarchy as derived membership.
//!
//! A [`Capability`] is a logical tag. No registry of "type T is a Functor"
//! exists anywhere: a type conforms to a capability exactly when the
//! operations that constitute it resolve to specific (non-fallback)
//! implementations. Registering `flat_map` and `pure` for a type is what
//! *makes* it a Monad, and - through the seeded derivations - an
//! Applicative and a Functor as well.
//!
//! Membership is monotone: registrations are append-only, so once a query
//! reports conformance it reports it for the rest of the process lifetime.

use std::fmt;

use crate::dispatch::{DispatchError, Registry};
use crate::value::TypeTag;

use super::ops;

/// The algebraic capabilities a container type can conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Supports `fmap`: lifting a plain function over wrapped values.
    Functor,
    /// A Functor additionally supporting `pure` and `apply`.
    Applicative,
    /// An Applicative additionally supporting `empty` and `combine`.
    Alternative,
    /// An Applicative additionally supporting `flat_map`.
    Monad,
    /// Both Monad and Alternative.
    MonadPlus,
}

impl Capability {
    /// Whether conformance to `self` guarantees conformance to `other`.
    ///
    /// This is the subset order the dispatch specificity rule uses: a
    /// signature keyed on the implying capability is the more specific one.
    /// The guarantees hold because the standard registry derives `fmap`
    /// for every Applicative and `apply` for every Monad.
    #[must_use]
    pub fn implies(self, other: Self) -> bool {
        self == other
            || match (self, other) {
                (Self::Applicative, Self::Functor) => true,
                (Self::Alternative | Self::Monad, Self::Applicative | Self::Functor) => true,
                (Self::MonadPlus, _) => true,
                _ => false,
            }
    }

    /// Whether `tag` currently conforms to this capability in `registry`.
    ///
    /// Conformance is "the constituent operations resolve specifically":
    ///
    /// - Functor: `fmap` for `(T)`
    /// - Applicative: `apply` for `(T, T)` and `pure` for `(T)`
    /// - Alternative: Applicative, `combine` for `(T, T)`, `empty` for `(T)`
    /// - Monad: `flat_map` for `(T)` and `pure` for `(T)`
    /// - MonadPlus: Monad and Alternative
    ///
    /// An ambiguous resolution counts as conforming - specific
    /// implementations exist - and the ambiguity itself surfaces when the
    /// operation is invoked.
    #[must_use]
    pub fn conforms(self, registry: &Registry, tag: TypeTag) -> bool {
        match self {
            Self::Functor => specific(registry, ops::FMAP, &[tag]),
            Self::Applicative => {
                specific(registry, ops::APPLY, &[tag, tag]) && specific(registry, ops::PURE, &[tag])
            }
            Self::Alternative => {
                Self::Applicative.conforms(registry, tag)
                    && specific(registry, ops::COMBINE, &[tag, tag])
                    && specific(registry, ops::EMPTY, &[tag])
            }
            Self::Monad => {
                specific(registry, ops::FLAT_MAP, &[tag]) && specific(registry, ops::PURE, &[tag])
            }
            Self::MonadPlus => {
                Self::Monad.conforms(registry, tag) && Self::Alternative.conforms(registry, tag)
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Functor => "Functor",
            Self::Applicative => "Applicative",
            Self::Alternative => "Alternative",
            Self::Monad => "Monad",
            Self::MonadPlus => "MonadPlus",
        };
        formatter.write_str(name)
    }
}

fn specific(registry: &Registry, name: &str, tags: &[TypeTag]) -> bool {
    match registry.resolve(name, tags) {
        Ok(resolved) => resolved.is_specific(),
        Err(DispatchError::AmbiguousDispatch { .. }) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn implication_is_reflexive() {
        for capability in [
            Capability::Functor,
            Capability::Applicative,
            Capability::Alternative,
            Capability::Monad,
            Capability::MonadPlus,
        ] {
            assert!(capability.implies(capability));
        }
    }

    #[rstest]
    fn implication_follows_the_hierarchy() {
        assert!(Capability::Applicative.implies(Capability::Functor));
        assert!(Capability::Monad.implies(Capability::Applicative));
        assert!(Capability::Alternative.implies(Capability::Functor));
        assert!(Capability::MonadPlus.implies(Capability::Monad));
        assert!(Capability::MonadPlus.implies(Capability::Alternative));
    }

    #[rstest]
    fn siblings_do_not_imply_each_other() {
        assert!(!Capability::Monad.implies(Capability::Alternative));
        assert!(!Capability::Alternative.implies(Capability::Monad));
        assert!(!Capability::Functor.implies(Capability::Applicative));
    }
}
