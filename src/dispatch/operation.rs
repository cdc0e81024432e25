//! Generic operations - named function slots with per-type registrations.
//!
//! An [`Operation`] owns exactly one fallback implementation, installed at
//! creation and never replaced, an append-only table of `(Signature,
//! Implementation)` pairs, and a cache of previous resolutions. Resolution
//! is a pure lookup: it never invokes anything, so capability conformance
//! can ask "is there a specific implementation?" without side effects.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::value::{TypeTag, Value};

use super::error::DispatchError;
use super::registry::Registry;
use super::signature::Signature;

/// A registered implementation of an operation.
///
/// Implementations receive the registry that resolved them so that derived
/// implementations can dispatch recursively (e.g. the Monad-derived `apply`
/// re-enters the registry for `flat_map` and `pure`).
pub type Implementation =
    Arc<dyn Fn(&Arc<Registry>, Vec<Value>) -> Result<Value, DispatchError> + Send + Sync>;

/// The outcome of a resolution: resolution always succeeds, and the marker
/// records whether a specific registration matched or the operation's
/// fallback was selected.
///
/// Capability conformance is defined as "resolution is [`Specific`]"; the
/// fallback of each core operation reports [`DispatchError::NoImplementation`]
/// only when actually invoked.
///
/// [`Specific`]: Resolved::Specific
#[derive(Clone)]
pub enum Resolved {
    /// A registered signature matched.
    Specific(Implementation),
    /// No registered signature matched; this is the operation's fallback.
    Fallback(Implementation),
}

impl Resolved {
    /// Whether a specific registration matched.
    #[must_use]
    pub const fn is_specific(&self) -> bool {
        matches!(self, Self::Specific(_))
    }

    /// The implementation to invoke.
    #[must_use]
    pub const fn implementation(&self) -> &Implementation {
        match self {
            Self::Specific(implementation) | Self::Fallback(implementation) => implementation,
        }
    }

    /// Invokes the selected implementation.
    ///
    /// # Errors
    ///
    /// Whatever the implementation returns; for the core operations'
    /// fallbacks that is [`DispatchError::NoImplementation`].
    pub fn invoke(
        &self,
        registry: &Arc<Registry>,
        arguments: Vec<Value>,
    ) -> Result<Value, DispatchError> {
        self.implementation().as_ref()(registry, arguments)
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specific(_) => formatter.write_str("Resolved::Specific"),
            Self::Fallback(_) => formatter.write_str("Resolved::Fallback"),
        }
    }
}

/// How an operation obtains the type descriptors it dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchMode {
    /// Descriptors are read from the runtime types of the arguments at the
    /// given call positions (e.g. `fmap` dispatches on argument 1,
    /// `combine` on arguments 0 and 1).
    Positional(SmallVec<[usize; 2]>),
    /// The caller supplies this many descriptors explicitly, via
    /// [`crate::dispatch::call_for`]. Used by `pure` and `empty`, which
    /// dispatch on the *requested* result type rather than on an argument.
    Explicit(usize),
}

impl DispatchMode {
    /// Dispatch on the arguments at `positions`.
    pub fn positional(positions: impl IntoIterator<Item = usize>) -> Self {
        Self::Positional(positions.into_iter().collect())
    }

    /// Dispatch on `count` explicitly supplied descriptors.
    #[must_use]
    pub const fn explicit(count: usize) -> Self {
        Self::Explicit(count)
    }

    /// The number of type descriptors in this operation's signatures.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Positional(positions) => positions.len(),
            Self::Explicit(count) => *count,
        }
    }
}

type CacheKey = SmallVec<[TypeId; 2]>;

/// A named, generic function slot.
///
/// Created once (normally at registry construction) and extended by
/// registration calls thereafter; never destroyed before process exit.
pub struct Operation {
    name: &'static str,
    arity: usize,
    mode: DispatchMode,
    fallback: Implementation,
    table: RwLock<Vec<(Signature, Implementation)>>,
    cache: RwLock<HashMap<CacheKey, Resolved>>,
}

impl Operation {
    /// Creates an operation taking `arity` call arguments, dispatching per
    /// `mode`, with the designated fallback implementation.
    pub fn new<F>(name: &'static str, arity: usize, mode: DispatchMode, fallback: F) -> Self
    where
        F: Fn(&Arc<Registry>, Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
    {
        if let DispatchMode::Positional(positions) = &mode {
            debug_assert!(
                positions.iter().all(|position| *position < arity),
                "dispatch positions must address call arguments"
            );
        }
        Self {
            name,
            arity,
            mode,
            fallback: Arc::new(fallback),
            table: RwLock::new(Vec::new()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Builder used at registry bootstrap to seed entries whose signatures
    /// are distinct by construction.
    pub(crate) fn with_entry<F>(self, signature: Signature, implementation: F) -> Self
    where
        F: Fn(&Arc<Registry>, Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
    {
        debug_assert_eq!(signature.len(), self.mode.arity());
        self.table.write().push((signature, Arc::new(implementation)));
        self
    }

    /// The operation's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The number of call arguments the operation takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// How the operation obtains its type descriptors.
    #[must_use]
    pub const fn mode(&self) -> &DispatchMode {
        &self.mode
    }

    /// Appends a registration, rejecting an exact duplicate signature.
    pub(crate) fn register(
        &self,
        signature: Signature,
        implementation: Implementation,
    ) -> Result<(), DispatchError> {
        if signature.len() != self.mode.arity() {
            return Err(DispatchError::SignatureMismatch {
                operation: self.name,
                expected: self.mode.arity(),
                actual: signature.len(),
            });
        }
        let mut table = self.table.write();
        if table.iter().any(|(registered, _)| *registered == signature) {
            return Err(DispatchError::DuplicateRegistration {
                operation: self.name,
                signature: signature.to_string(),
            });
        }
        table.push((signature, implementation));
        Ok(())
    }

    /// Pure lookup of the implementation for the given runtime types.
    ///
    /// Never invokes anything. Fails only on ambiguity; a missing
    /// registration resolves to [`Resolved::Fallback`].
    pub(crate) fn resolve(
        &self,
        registry: &Registry,
        tags: &[TypeTag],
    ) -> Result<Resolved, DispatchError> {
        if tags.len() != self.mode.arity() {
            return Err(DispatchError::SignatureMismatch {
                operation: self.name,
                expected: self.mode.arity(),
                actual: tags.len(),
            });
        }
        let key: CacheKey = tags.iter().map(TypeTag::id).collect();
        if let Some(resolved) = self.cache.read().get(&key) {
            return Ok(resolved.clone());
        }

        // Copy the table out of the lock: matching a Conforms key re-enters
        // other operations' tables, and no lock may be held across that.
        let entries: Vec<(Signature, Implementation)> = self.table.read().clone();
        let matching: Vec<&(Signature, Implementation)> = entries
            .iter()
            .filter(|(signature, _)| signature.matches(registry, tags))
            .collect();

        let resolved = if matching.is_empty() {
            Resolved::Fallback(Arc::clone(&self.fallback))
        } else if let Some((_, implementation)) = matching.iter().find(|(candidate, _)| {
            matching
                .iter()
                .all(|(other, _)| candidate.at_least_as_specific_as(other))
        }) {
            Resolved::Specific(Arc::clone(implementation))
        } else {
            // No unique most-specific candidate: report the frontier, i.e.
            // the matching signatures nothing else strictly beats.
            let frontier: Vec<String> = matching
                .iter()
                .filter(|(candidate, _)| {
                    !matching.iter().any(|(other, _)| {
                        other != candidate
                            && other.at_least_as_specific_as(candidate)
                            && !candidate.at_least_as_specific_as(other)
                    })
                })
                .map(|(signature, _)| signature.to_string())
                .collect();
            return Err(DispatchError::AmbiguousDispatch {
                operation: self.name,
                types: tags.iter().map(TypeTag::name).collect(),
                candidates: frontier,
            });
        };

        self.cache.write().insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Drops every cached resolution.
    ///
    /// Called after any registration anywhere in the registry: a new
    /// registration can change capability conformance, and with it the
    /// match set of operations it never touched.
    pub(crate) fn clear_cache(&self) {
        self.cache.write().clear();
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Operation")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("mode", &self.mode)
            .field("registrations", &self.table.read().len())
            .finish_non_exhaustive()
    }
}
