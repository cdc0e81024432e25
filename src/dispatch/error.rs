//! Error types for registration, resolution, and invocation.
//!
//! All errors are synchronous and local: the library performs no I/O, so
//! there is no partial-failure or retry model. Resolution itself fails only
//! on ambiguity; a missing registration is reported by the operation's
//! fallback at invocation time (see [`crate::dispatch::Resolved`]).

use std::fmt;

/// Errors produced by the dispatch core and the operations built on it.
///
/// # Examples
///
/// ```rust
/// use dynars::dispatch::DispatchError;
///
/// let error = DispatchError::NoImplementation {
///     operation: "flat_map",
///     types: vec!["i32"],
/// };
/// assert_eq!(
///     format!("{}", error),
///     "flat_map: no implementation registered for (i32)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// An operation's erroring fallback was invoked: no specific
    /// implementation is registered for the argument types.
    NoImplementation {
        /// The operation that was invoked.
        operation: &'static str,
        /// Names of the dispatched argument types, when known.
        types: Vec<&'static str>,
    },
    /// Two or more registered signatures are simultaneously most specific
    /// for the requested types. This is a registration bug and is never
    /// resolved by silent precedence.
    AmbiguousDispatch {
        /// The operation being resolved.
        operation: &'static str,
        /// Names of the requested types.
        types: Vec<&'static str>,
        /// Renderings of the rival signatures.
        candidates: Vec<String>,
    },
    /// A signature was registered twice for the same operation. Tables are
    /// append-only; registrations are never replaced.
    DuplicateRegistration {
        /// The operation the registration targeted.
        operation: &'static str,
        /// Rendering of the rejected signature.
        signature: String,
    },
    /// An operation with this name already exists in the registry.
    DuplicateOperation {
        /// The colliding operation name.
        operation: &'static str,
    },
    /// No operation with this name exists in the registry.
    UnknownOperation {
        /// The requested operation name.
        operation: String,
    },
    /// An operation was invoked with the wrong number of arguments.
    ArityMismatch {
        /// The operation that was invoked.
        operation: &'static str,
        /// The number of arguments the operation takes.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },
    /// A signature or explicit tag sequence has the wrong number of type
    /// descriptors for the operation.
    SignatureMismatch {
        /// The operation involved.
        operation: &'static str,
        /// The operation's dispatch arity.
        expected: usize,
        /// The number of descriptors supplied.
        actual: usize,
    },
    /// `call` was used on an operation that dispatches on a requested type
    /// rather than an argument type; `call_for` supplies one.
    MissingTypeContext {
        /// The operation that was invoked.
        operation: &'static str,
    },
    /// A partial application was supplied more argument positions than the
    /// wrapped function's arity.
    TooManyArguments {
        /// The wrapped function's arity.
        expected: usize,
        /// The number of positions supplied in total.
        actual: usize,
    },
    /// A dynamic downcast failed.
    TypeMismatch {
        /// The type that was required.
        expected: &'static str,
        /// The type that was found.
        actual: &'static str,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImplementation { operation, types } => write!(
                formatter,
                "{operation}: no implementation registered for ({})",
                types.join(", ")
            ),
            Self::AmbiguousDispatch {
                operation,
                types,
                candidates,
            } => write!(
                formatter,
                "{operation}: ambiguous dispatch for ({}); rival signatures: {}",
                types.join(", "),
                candidates.join(" and ")
            ),
            Self::DuplicateRegistration {
                operation,
                signature,
            } => write!(
                formatter,
                "{operation}: signature {signature} is already registered"
            ),
            Self::DuplicateOperation { operation } => {
                write!(formatter, "operation {operation} is already defined")
            }
            Self::UnknownOperation { operation } => {
                write!(formatter, "operation {operation} is not defined")
            }
            Self::ArityMismatch {
                operation,
                expected,
                actual,
            } => write!(
                formatter,
                "{operation}: expected {expected} arguments, got {actual}"
            ),
            Self::SignatureMismatch {
                operation,
                expected,
                actual,
            } => write!(
                formatter,
                "{operation}: expected {expected} type descriptors, got {actual}"
            ),
            Self::MissingTypeContext { operation } => write!(
                formatter,
                "{operation}: dispatches on a requested type; use call_for"
            ),
            Self::TooManyArguments { expected, actual } => write!(
                formatter,
                "partial application of a {expected}-ary function was supplied {actual} positions"
            ),
            Self::TypeMismatch { expected, actual } => {
                write!(formatter, "expected a value of type {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_implementation_display() {
        let error = DispatchError::NoImplementation {
            operation: "apply",
            types: vec!["Maybe", "Seq"],
        };
        assert_eq!(
            format!("{error}"),
            "apply: no implementation registered for (Maybe, Seq)"
        );
    }

    #[test]
    fn test_ambiguous_dispatch_display() {
        let error = DispatchError::AmbiguousDispatch {
            operation: "combine",
            types: vec!["A", "B"],
            candidates: vec!["(A, Any)".to_string(), "(Any, B)".to_string()],
        };
        assert_eq!(
            format!("{error}"),
            "combine: ambiguous dispatch for (A, B); rival signatures: (A, Any) and (Any, B)"
        );
    }

    #[test]
    fn test_duplicate_registration_display() {
        let error = DispatchError::DuplicateRegistration {
            operation: "pure",
            signature: "(Maybe)".to_string(),
        };
        assert_eq!(
            format!("{error}"),
            "pure: signature (Maybe) is already registered"
        );
    }

    #[test]
    fn test_too_many_arguments_display() {
        let error = DispatchError::TooManyArguments {
            expected: 2,
            actual: 4,
        };
        assert_eq!(
            format!("{error}"),
            "partial application of a 2-ary function was supplied 4 positions"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let error = DispatchError::TypeMismatch {
            expected: "bool",
            actual: "i32",
        };
        assert_eq!(format!("{error}"), "expected a value of type bool, got i32");
    }
}
