//! Generic dispatch - registering and resolving type-specific
//! implementations of named operations.
//!
//! The dispatch core is the only non-trivial machinery in the crate;
//! everything in [`crate::typeclass`] and [`crate::instance`] is a thin
//! consumer. It consists of:
//!
//! - [`Signature`] and [`TypeKey`]: dispatch-table keys with a specificity
//!   partial order (`Exact` beats `Conforms` beats `Any`)
//! - [`Operation`]: a named function slot with one permanent fallback, an
//!   append-only registration table, and a resolution cache
//! - [`Resolved`]: the specific-vs-fallback marker resolution returns
//! - [`Registry`]: the named-operation table with registration, pure
//!   resolution, resolve-then-invoke calls, and idempotent extension
//! - [`DispatchError`]: the crate-wide error taxonomy
//!
//! # Resolution
//!
//! For a call, the runtime types of the dispatched positions are matched
//! against every registered signature. An exact match wins outright; among
//! capability and wildcard matches, the unique candidate at least as
//! specific as every other wins; no unique winner is an
//! [`DispatchError::AmbiguousDispatch`] error; no match at all selects the
//! operation's fallback, which for the core operations reports
//! [`DispatchError::NoImplementation`] when invoked.

mod error;
mod operation;
mod registry;
mod signature;

pub use error::DispatchError;
pub use operation::{DispatchMode, Implementation, Operation, Resolved};
pub use registry::{call, call_for, expect_arity, Registry};
pub use signature::{Signature, TypeKey};
