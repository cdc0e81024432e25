//! The process-wide dispatch registry.
//!
//! A [`Registry`] owns the named [`Operation`]s and is the single point of
//! registration, resolution, and invocation. The library keeps one global
//! registry (see [`crate::typeclass::global`]); isolated registries can be
//! built for tests or embedding.
//!
//! Registration is expected to complete during a single-threaded startup
//! phase, before dispatch begins; the tables are nevertheless guarded by
//! read-write locks so that a `static` registry is sound in Rust.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use static_assertions::assert_impl_all;

use crate::typeclass::Capability;
use crate::value::{TypeTag, Value};

use super::error::DispatchError;
use super::operation::{DispatchMode, Implementation, Operation, Resolved};
use super::signature::Signature;

/// A table of named generic operations.
///
/// # Examples
///
/// ```rust
/// use dynars::dispatch::{self, Signature, TypeKey};
/// use dynars::typeclass::{self, ops};
/// use dynars::value::{TypeTag, Value};
///
/// let registry = typeclass::standard();
/// registry
///     .register(ops::PURE, Signature::new([TypeKey::of::<Vec<i32>>()]), |_, args| {
///         Ok(Value::new(vec![args[0].extract::<i32>()?]))
///     })
///     .unwrap();
///
/// let wrapped = dispatch::call_for(
///     &registry,
///     ops::PURE,
///     &[TypeTag::of::<Vec<i32>>()],
///     vec![Value::new(5_i32)],
/// )
/// .unwrap();
/// assert_eq!(wrapped, Value::new(vec![5_i32]));
/// ```
pub struct Registry {
    operations: RwLock<HashMap<&'static str, Arc<Operation>>>,
    extensions: Mutex<HashSet<&'static str>>,
}

impl Registry {
    /// Creates an empty registry.
    ///
    /// Most callers want [`crate::typeclass::standard`], which seeds the
    /// core operations, or [`crate::typeclass::global`].
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::from_operations([])
    }

    /// Builds a registry from operations whose names are distinct by
    /// construction.
    pub(crate) fn from_operations(operations: impl IntoIterator<Item = Operation>) -> Arc<Self> {
        let operations = operations
            .into_iter()
            .map(|operation| (operation.name(), Arc::new(operation)))
            .collect();
        Arc::new(Self {
            operations: RwLock::new(operations),
            extensions: Mutex::new(HashSet::new()),
        })
    }

    /// Adds a new operation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateOperation`] if the name is taken.
    pub fn define(&self, operation: Operation) -> Result<(), DispatchError> {
        let mut operations = self.operations.write();
        if operations.contains_key(operation.name()) {
            return Err(DispatchError::DuplicateOperation {
                operation: operation.name(),
            });
        }
        operations.insert(operation.name(), Arc::new(operation));
        Ok(())
    }

    /// Looks up an operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] if no operation has the
    /// name.
    pub fn operation(&self, name: &str) -> Result<Arc<Operation>, DispatchError> {
        self.operations
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownOperation {
                operation: name.to_string(),
            })
    }

    /// Registers an implementation of `name` under `signature`.
    ///
    /// This is the only way external code opts a concrete type into a
    /// capability; there is no separate declaration step. Every resolution
    /// cache in the registry is invalidated, because a new registration can
    /// change capability conformance and with it the match set of other
    /// operations.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`] for an undefined name,
    /// [`DispatchError::SignatureMismatch`] when the signature length
    /// differs from the operation's dispatch arity, and
    /// [`DispatchError::DuplicateRegistration`] for an exact duplicate.
    pub fn register<F>(
        &self,
        name: &str,
        signature: Signature,
        implementation: F,
    ) -> Result<(), DispatchError>
    where
        F: Fn(&Arc<Self>, Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
    {
        let operation = self.operation(name)?;
        let implementation: Implementation = Arc::new(implementation);
        operation.register(signature, implementation)?;
        self.clear_caches();
        Ok(())
    }

    /// Pure lookup: the implementation that `call` would invoke for the
    /// given type descriptors, as a [`Resolved`] marker.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownOperation`],
    /// [`DispatchError::SignatureMismatch`], or
    /// [`DispatchError::AmbiguousDispatch`]. A missing registration is not
    /// an error here: it resolves to [`Resolved::Fallback`].
    pub fn resolve(&self, name: &str, tags: &[TypeTag]) -> Result<Resolved, DispatchError> {
        self.operation(name)?.resolve(self, tags)
    }

    /// Whether `tag` currently conforms to `capability`.
    ///
    /// Membership is derived from the operation tables; it is monotone for
    /// the life of the registry.
    #[must_use]
    pub fn conforms(&self, capability: Capability, tag: TypeTag) -> bool {
        capability.conforms(self, tag)
    }

    /// Runs `install` at most once per registry for the given name.
    ///
    /// Instance modules use this so that installation is idempotent the way
    /// import-time registration is in dynamic languages. The installer must
    /// not itself call `extend`.
    ///
    /// # Errors
    ///
    /// Propagates the installer's error; a failed installation is not
    /// recorded and may be retried.
    pub fn extend(
        &self,
        name: &'static str,
        install: impl FnOnce(&Self) -> Result<(), DispatchError>,
    ) -> Result<(), DispatchError> {
        let mut extensions = self.extensions.lock();
        if extensions.contains(name) {
            return Ok(());
        }
        install(self)?;
        extensions.insert(name);
        Ok(())
    }

    fn clear_caches(&self) {
        for operation in self.operations.read().values() {
            operation.clear_cache();
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operations = self.operations.read();
        let mut names: Vec<&str> = operations.keys().copied().collect();
        names.sort_unstable();
        formatter
            .debug_struct("Registry")
            .field("operations", &names)
            .finish_non_exhaustive()
    }
}

assert_impl_all!(Registry: Send, Sync);

/// Resolves and invokes `name` on `arguments`, dispatching on the runtime
/// types at the operation's dispatch positions.
///
/// Takes the registry by `Arc` handle so the selected implementation can
/// dispatch recursively and capture the registry in closures it builds.
///
/// # Errors
///
/// Everything [`Registry::resolve`] reports, plus
/// [`DispatchError::ArityMismatch`] for a wrong argument count,
/// [`DispatchError::MissingTypeContext`] for operations that dispatch on a
/// requested type, and whatever the implementation itself returns (an
/// erroring fallback reports [`DispatchError::NoImplementation`]).
pub fn call(
    registry: &Arc<Registry>,
    name: &str,
    arguments: Vec<Value>,
) -> Result<Value, DispatchError> {
    let operation = registry.operation(name)?;
    check_arity(&operation, &arguments)?;
    let tags: Vec<TypeTag> = match operation.mode() {
        DispatchMode::Positional(positions) => positions
            .iter()
            .map(|position| arguments[*position].tag())
            .collect(),
        DispatchMode::Explicit(_) => {
            return Err(DispatchError::MissingTypeContext {
                operation: operation.name(),
            });
        }
    };
    let resolved = operation.resolve(registry, &tags)?;
    resolved.invoke(registry, arguments)
}

/// Resolves and invokes `name` with explicitly supplied type descriptors.
///
/// This is the invocation path for operations like `pure` and `empty` that
/// dispatch on the requested result type; it also permits overriding
/// positional dispatch.
///
/// # Errors
///
/// As [`call`], with [`DispatchError::SignatureMismatch`] when the
/// descriptor count differs from the dispatch arity.
pub fn call_for(
    registry: &Arc<Registry>,
    name: &str,
    tags: &[TypeTag],
    arguments: Vec<Value>,
) -> Result<Value, DispatchError> {
    let operation = registry.operation(name)?;
    check_arity(&operation, &arguments)?;
    let resolved = operation.resolve(registry, tags)?;
    resolved.invoke(registry, arguments)
}

fn check_arity(operation: &Operation, arguments: &[Value]) -> Result<(), DispatchError> {
    if arguments.len() == operation.arity() {
        Ok(())
    } else {
        Err(DispatchError::ArityMismatch {
            operation: operation.name(),
            expected: operation.arity(),
            actual: arguments.len(),
        })
    }
}

/// Destructures an implementation's argument vector into a fixed arity.
///
/// Registered implementations are invoked with the argument count already
/// validated by [`call`]; this keeps their destructuring free of panicking
/// indexing all the same.
///
/// # Errors
///
/// Returns [`DispatchError::ArityMismatch`] when the count differs.
pub fn expect_arity<const N: usize>(
    operation: &'static str,
    arguments: Vec<Value>,
) -> Result<[Value; N], DispatchError> {
    let actual = arguments.len();
    arguments
        .try_into()
        .map_err(|_| DispatchError::ArityMismatch {
            operation,
            expected: N,
            actual,
        })
}
