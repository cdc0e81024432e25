//! Concrete container types registered with the dispatch core.
//!
//! These modules are deliberately ordinary consumers of the public
//! registration interface: nothing in [`crate::dispatch`] or
//! [`crate::typeclass`] knows they exist. Each exposes `install` (into an
//! explicit registry) and `install_global`; installation is idempotent per
//! registry.
//!
//! - [`maybe::Maybe`]: an optional value, registering the MonadPlus
//!   primitives only - `fmap` and `apply` reach it through the capability
//!   derivations
//! - [`seq::Seq`]: a sequence, registering the MonadPlus primitives plus a
//!   direct element-wise `fmap`

pub mod maybe;
pub mod seq;
