//! Dynamically typed values - the common currency of all operations.
//!
//! Runtime dispatch needs arguments whose concrete type is only known at
//! runtime, so every registered operation works over [`Value`]: an immutable,
//! reference-counted, type-erased value with structural equality. Plain
//! functions travel through the same machinery as [`Lambda`], a type-erased
//! unary function from `Value` to `Value`.
//!
//! [`TypeTag`] is the runtime type descriptor the dispatch tables are keyed
//! by: a [`std::any::TypeId`] paired with a human-readable name for error
//! reporting.
//!
//! # Examples
//!
//! ```rust
//! use dynars::value::{Lambda, Value};
//!
//! let value = Value::new(5_i32);
//! assert_eq!(value.extract::<i32>().unwrap(), 5);
//!
//! let double = Lambda::typed(|n: i32| n * 2);
//! assert_eq!(double.call(value).unwrap(), Value::new(10_i32));
//! ```

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use static_assertions::assert_impl_all;

use crate::dispatch::DispatchError;

/// Object-safe supertrait bundle for values stored in a [`Value`].
///
/// Implemented automatically for every `Any + Debug + PartialEq + Send +
/// Sync` type; user code never implements it by hand.
pub trait Dynamic: Any + fmt::Debug + Send + Sync {
    /// Upcasts to [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality across the type-erasure boundary.
    ///
    /// Values of different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn Dynamic) -> bool;
}

impl<T> Dynamic for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Dynamic) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|value| self == value)
    }
}

// =============================================================================
// TypeTag
// =============================================================================

/// A runtime type descriptor: a [`TypeId`] plus the type's name.
///
/// Equality and hashing consider only the `TypeId`; the name exists for
/// signature rendering and error messages.
///
/// # Examples
///
/// ```rust
/// use dynars::value::{TypeTag, Value};
///
/// let tag = TypeTag::of::<i32>();
/// assert_eq!(Value::new(5_i32).tag(), tag);
/// assert_eq!(tag.name(), "i32");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag describing `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, as produced by [`std::any::type_name`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

// =============================================================================
// Value
// =============================================================================

/// An immutable, reference-counted, type-erased value.
///
/// Cloning a `Value` is cheap: it shares the underlying allocation. Equality
/// is structural and type-aware - two values are equal only if they hold the
/// same concrete type and their contents compare equal.
///
/// # Examples
///
/// ```rust
/// use dynars::value::Value;
///
/// let a = Value::new("hello".to_string());
/// let b = a.clone();
/// assert_eq!(a, b);
/// assert!(a.is::<String>());
/// assert!(!a.is::<i32>());
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Dynamic>,
    tag: TypeTag,
}

impl Value {
    /// Wraps a concrete value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            tag: TypeTag::of::<T>(),
        }
    }

    /// The runtime type descriptor of the contained value.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Whether the contained value is a `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.tag.id() == TypeId::of::<T>()
    }

    /// Borrows the contained value as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Borrows the contained value as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TypeMismatch`] when the contained value is
    /// not a `T`.
    pub fn expect_ref<T: 'static>(&self) -> Result<&T, DispatchError> {
        self.downcast_ref::<T>()
            .ok_or_else(|| DispatchError::TypeMismatch {
                expected: type_name::<T>(),
                actual: self.tag.name(),
            })
    }

    /// Clones the contained value out as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TypeMismatch`] when the contained value is
    /// not a `T`.
    pub fn extract<T: Clone + 'static>(&self) -> Result<T, DispatchError> {
        self.expect_ref::<T>().cloned()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.inner.dyn_eq(other.inner.as_ref())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, formatter)
    }
}

// =============================================================================
// Lambda
// =============================================================================

type LambdaFn = dyn Fn(Value) -> Result<Value, DispatchError> + Send + Sync;

/// A type-erased unary function from [`Value`] to [`Value`].
///
/// Lambdas are what operations like `fmap` and `flat_map` accept, and what
/// applicative containers hold. Equality is identity: two lambdas are equal
/// only if they share the same underlying closure (so cloning preserves
/// equality, as the applicative identity law requires).
///
/// # Examples
///
/// ```rust
/// use dynars::value::{Lambda, Value};
///
/// let length = Lambda::typed(|s: String| s.len());
/// let result = length.call(Value::new("hello".to_string())).unwrap();
/// assert_eq!(result, Value::new(5_usize));
/// ```
#[derive(Clone)]
pub struct Lambda {
    function: Arc<LambdaFn>,
}

impl Lambda {
    /// Wraps an infallible function over dynamic values.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::fallible(move |argument| Ok(function(argument)))
    }

    /// Wraps a function that may fail with a [`DispatchError`].
    ///
    /// Derived operations use this to thread dispatch failures out of
    /// nested lambdas.
    pub fn fallible<F>(function: F) -> Self
    where
        F: Fn(Value) -> Result<Value, DispatchError> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
        }
    }

    /// Wraps an ordinary typed closure, downcasting the argument and
    /// re-wrapping the result.
    ///
    /// Calling the lambda with a value of the wrong type yields
    /// [`DispatchError::TypeMismatch`].
    pub fn typed<A, B, F>(function: F) -> Self
    where
        A: Clone + 'static,
        B: Any + fmt::Debug + PartialEq + Send + Sync,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Self::fallible(move |argument| Ok(Value::new(function(argument.extract::<A>()?))))
    }

    /// The identity function.
    #[must_use]
    pub fn identity() -> Self {
        Self::fallible(Ok)
    }

    /// Composes two lambdas: `g.compose(f)` applies `f` first, then `g`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dynars::value::{Lambda, Value};
    ///
    /// let double = Lambda::typed(|n: i32| n * 2);
    /// let succ = Lambda::typed(|n: i32| n + 1);
    /// let composed = double.compose(succ);
    /// assert_eq!(composed.call(Value::new(5_i32)).unwrap(), Value::new(12_i32));
    /// ```
    #[must_use]
    pub fn compose(&self, inner: Self) -> Self {
        let outer = self.clone();
        Self::fallible(move |argument| outer.call(inner.call(argument)?))
    }

    /// Applies the lambda to an argument.
    ///
    /// # Errors
    ///
    /// Propagates whatever [`DispatchError`] the underlying closure
    /// produces.
    pub fn call(&self, argument: Value) -> Result<Value, DispatchError> {
        (self.function)(argument)
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Lambda")
    }
}

assert_impl_all!(Value: Send, Sync, Clone);
assert_impl_all!(Lambda: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn value_equality_is_structural() {
        assert_eq!(Value::new(5_i32), Value::new(5_i32));
        assert_ne!(Value::new(5_i32), Value::new(6_i32));
    }

    #[rstest]
    fn value_equality_is_type_aware() {
        // Same bit pattern, different types.
        assert_ne!(Value::new(1_i32), Value::new(1_i64));
    }

    #[rstest]
    fn value_clone_shares_and_compares_equal() {
        let original = Value::new("shared".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }

    #[rstest]
    fn extract_wrong_type_is_mismatch() {
        let value = Value::new(5_i32);
        let error = value.extract::<String>().unwrap_err();
        assert!(matches!(error, DispatchError::TypeMismatch { .. }));
    }

    #[rstest]
    fn tag_compares_by_type_identity() {
        assert_eq!(TypeTag::of::<i32>(), TypeTag::of::<i32>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i64>());
    }

    #[rstest]
    fn typed_lambda_round_trips() {
        let lambda = Lambda::typed(|n: i32| n.to_string());
        let result = lambda.call(Value::new(7_i32)).unwrap();
        assert_eq!(result, Value::new("7".to_string()));
    }

    #[rstest]
    fn typed_lambda_rejects_wrong_argument() {
        let lambda = Lambda::typed(|n: i32| n + 1);
        let error = lambda.call(Value::new("seven".to_string())).unwrap_err();
        assert!(matches!(error, DispatchError::TypeMismatch { .. }));
    }

    #[rstest]
    fn lambda_equality_is_identity() {
        let lambda = Lambda::typed(|n: i32| n + 1);
        let same = lambda.clone();
        let other = Lambda::typed(|n: i32| n + 1);
        assert_eq!(lambda, same);
        assert_ne!(lambda, other);
    }

    #[rstest]
    fn identity_returns_argument() {
        let value = Value::new(42_i32);
        assert_eq!(Lambda::identity().call(value.clone()).unwrap(), value);
    }

    #[rstest]
    fn compose_applies_inner_first() {
        let double = Lambda::typed(|n: i32| n * 2);
        let succ = Lambda::typed(|n: i32| n + 1);
        // double . succ: (5 + 1) * 2
        let result = double.compose(succ).call(Value::new(5_i32)).unwrap();
        assert_eq!(result, Value::new(12_i32));
    }
}
