//! Type classes as registered operations.
//!
//! This module provides the six core operations of the algebraic hierarchy
//! as free functions over the global registry:
//!
//! - [`fmap`]: Functor mapping
//! - [`pure`] and [`apply`]: Applicative lifting and application
//! - [`empty`] and [`combine`]: Alternative identity and combination
//! - [`flat_map`]: Monad sequencing
//!
//! together with the derived operations [`join`], [`filter`], and
//! [`lift`]/[`lift_n`], and the [`Capability`] conformance queries.
//!
//! ## Derivations
//!
//! The standard registry seeds two capability-keyed registrations, so that
//! registering a type's primitives opts it into the wider hierarchy:
//!
//! - `fmap(f, fa) = apply(pure(f), fa)` for any Applicative
//! - `apply(mf, ma) = flat_map(mf, |f| flat_map(ma, |a| pure(f(a))))` for
//!   any Monad
//!
//! A type that registers only `flat_map` and `pure` therefore already
//! supports `fmap` and `apply`, and `Capability::conforms` reports it as a
//! Functor, Applicative, and Monad. An exact registration always beats the
//! derivations.
//!
//! ## The global registry
//!
//! [`global`] lazily builds one [`standard`] registry for the process.
//! Registration is expected during startup, before concurrent dispatch;
//! every operation here also has a `*_with` variant taking an explicit
//! registry (isolated registries are useful in tests).

mod alternative;
mod applicative;
mod capability;
mod functor;
mod lift;
mod monad;

use std::sync::{Arc, OnceLock};

use crate::dispatch::{
    call, call_for, expect_arity, DispatchError, DispatchMode, Operation, Registry, Signature,
    TypeKey,
};
use crate::value::{Lambda, TypeTag, Value};

pub use alternative::{combine, combine_with, empty, empty_for, empty_with};
pub use applicative::{apply, apply_with, pure, pure_for, pure_with};
pub use capability::Capability;
pub use functor::{fmap, fmap_with};
pub use lift::{lift, lift_n, lift_n_with, lift_with, Lifter};
pub use monad::{filter, filter_with, flat_map, flat_map_with, join, join_with};

/// Names of the core operations.
///
/// Registrations and resolutions address operations by these names; they
/// are the registry keys, not Rust identifiers.
pub mod ops {
    /// Functor map. Signature: `Functor F => fmap :: (a -> b) -> F a -> F b`.
    pub const FMAP: &str = "fmap";
    /// Applicative application. Signature: `Applicative F => apply :: F (a -> b) -> F a -> F b`.
    pub const APPLY: &str = "apply";
    /// Applicative lifting. Signature: `Applicative F => pure :: a -> F a`.
    pub const PURE: &str = "pure";
    /// Alternative identity. Signature: `Alternative F => empty :: F a`.
    pub const EMPTY: &str = "empty";
    /// Alternative combination. Signature: `Alternative F => combine :: F a -> F a -> F a`.
    pub const COMBINE: &str = "combine";
    /// Monad sequencing. Signature: `Monad M => flat_map :: M a -> (a -> M b) -> M b`.
    pub const FLAT_MAP: &str = "flat_map";
}

/// Builds a fresh registry seeded with the six core operations and the
/// capability derivations.
///
/// Each operation's fallback reports
/// [`DispatchError::NoImplementation`] when invoked; resolution itself
/// never fails on a missing registration.
#[must_use]
pub fn standard() -> Arc<Registry> {
    Registry::from_operations([
        Operation::new(
            ops::FMAP,
            2,
            DispatchMode::positional([1]),
            erroring_fallback(ops::FMAP),
        )
        .with_entry(
            Signature::new([TypeKey::Conforms(Capability::Applicative)]),
            applicative_fmap,
        ),
        Operation::new(
            ops::APPLY,
            2,
            DispatchMode::positional([0, 1]),
            erroring_fallback(ops::APPLY),
        )
        .with_entry(
            Signature::new([
                TypeKey::Conforms(Capability::Monad),
                TypeKey::Conforms(Capability::Monad),
            ]),
            monad_apply,
        ),
        Operation::new(
            ops::FLAT_MAP,
            2,
            DispatchMode::positional([0]),
            erroring_fallback(ops::FLAT_MAP),
        ),
        Operation::new(
            ops::PURE,
            1,
            DispatchMode::explicit(1),
            erroring_fallback(ops::PURE),
        ),
        Operation::new(
            ops::EMPTY,
            0,
            DispatchMode::explicit(1),
            erroring_fallback(ops::EMPTY),
        ),
        Operation::new(
            ops::COMBINE,
            2,
            DispatchMode::positional([0, 1]),
            erroring_fallback(ops::COMBINE),
        ),
    ])
}

/// The process-wide registry, built on first use.
pub fn global() -> &'static Arc<Registry> {
    static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
    GLOBAL.get_or_init(standard)
}

/// Whether `tag` conforms to `capability` in the global registry.
///
/// # Examples
///
/// ```rust
/// use dynars::instance::maybe::{self, Maybe};
/// use dynars::typeclass::{conforms, Capability};
/// use dynars::value::TypeTag;
///
/// maybe::install_global().unwrap();
/// assert!(conforms(Capability::MonadPlus, TypeTag::of::<Maybe>()));
/// assert!(!conforms(Capability::Functor, TypeTag::of::<i32>()));
/// ```
#[must_use]
pub fn conforms(capability: Capability, tag: TypeTag) -> bool {
    global().conforms(capability, tag)
}

/// Whether `tag` conforms to `capability` in an explicit registry.
#[must_use]
pub fn conforms_with(registry: &Registry, capability: Capability, tag: TypeTag) -> bool {
    registry.conforms(capability, tag)
}

fn erroring_fallback(
    name: &'static str,
) -> impl Fn(&Arc<Registry>, Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static {
    move |_, arguments| {
        Err(DispatchError::NoImplementation {
            operation: name,
            types: arguments
                .iter()
                .map(|argument| argument.tag().name())
                .collect(),
        })
    }
}

/// `fmap(f, fa) = apply(pure(f), fa)`, for any Applicative.
fn applicative_fmap(
    registry: &Arc<Registry>,
    arguments: Vec<Value>,
) -> Result<Value, DispatchError> {
    let [function, fa] = expect_arity::<2>(ops::FMAP, arguments)?;
    let tag = fa.tag();
    let lifted = call_for(registry, ops::PURE, &[tag], vec![function])?;
    call(registry, ops::APPLY, vec![lifted, fa])
}

/// `apply(mf, ma) = flat_map(mf, |f| flat_map(ma, |a| pure(f(a))))`, for
/// any Monad.
fn monad_apply(registry: &Arc<Registry>, arguments: Vec<Value>) -> Result<Value, DispatchError> {
    let [mf, ma] = expect_arity::<2>(ops::APPLY, arguments)?;
    let tag = mf.tag();
    let registry_for_outer = Arc::clone(registry);
    let outer = Lambda::fallible(move |function_value| {
        let function = function_value.extract::<Lambda>()?;
        let registry_for_inner = Arc::clone(&registry_for_outer);
        let inner = Lambda::fallible(move |argument| {
            let mapped = function.call(argument)?;
            call_for(&registry_for_inner, ops::PURE, &[tag], vec![mapped])
        });
        call(&registry_for_outer, ops::FLAT_MAP, vec![ma.clone(), Value::new(inner)])
    });
    call(registry, ops::FLAT_MAP, vec![mf, Value::new(outer)])
}
