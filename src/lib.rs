//! # dynars
//!
//! A functional programming library for Rust providing runtime-registered
//! type classes and generic dispatch.
//!
//! ## Overview
//!
//! Where most Rust functional libraries resolve type classes at compile time
//! through traits, this library resolves them at runtime through a dispatch
//! registry. Free operations (`fmap`, `apply`, `flat_map`, `pure`, `empty`,
//! `combine`) are defined once, generically; concrete container types opt in
//! by registering implementations after the fact, and capability membership
//! (Functor, Applicative, Alternative, Monad, MonadPlus) is *derived* from
//! those registrations rather than declared. It includes:
//!
//! - **Dynamic Values**: `Value` and `Lambda`, the type-erased currency of
//!   all operations
//! - **Partial Application**: incremental argument binding with placeholders
//! - **Generic Dispatch**: per-operation tables keyed by type signatures,
//!   with most-specific-match resolution and ambiguity detection
//! - **Type Classes**: capability conformance computed from the registry,
//!   with derived operations (`join`, `filter`, `lift`)
//! - **Instances**: `Maybe` and `Seq` as registered container types
//!
//! ## Example
//!
//! ```rust
//! use dynars::instance::maybe::{self, Maybe};
//! use dynars::typeclass::fmap;
//! use dynars::value::{Lambda, Value};
//!
//! maybe::install_global().unwrap();
//!
//! // Maybe registers only flat_map/pure/combine/empty; fmap reaches it
//! // through the Applicative and Monad derivations.
//! let doubled = fmap(
//!     Lambda::typed(|n: i32| n * 2),
//!     Value::new(Maybe::just(Value::new(21_i32))),
//! )
//! .unwrap();
//! assert_eq!(doubled, Value::new(Maybe::just(Value::new(42_i32))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and operations.
///
/// # Usage
///
/// ```rust
/// use dynars::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dispatch::{
        DispatchError, Operation, Registry, Resolved, Signature, TypeKey,
    };
    pub use crate::instance::maybe::Maybe;
    pub use crate::instance::seq::Seq;
    pub use crate::partial::{Applied, Arg, Partial};
    pub use crate::typeclass::{
        apply, combine, conforms, empty, filter, flat_map, fmap, join, lift, lift_n, pure,
        Capability, Lifter,
    };
    pub use crate::value::{Lambda, TypeTag, Value};
}

pub mod dispatch;
pub mod instance;
pub mod partial;
pub mod typeclass;
pub mod value;
