//! Partial application - incremental binding of a function's arguments.
//!
//! A [`Partial`] wraps a function of fixed arity over dynamic values so that
//! it can be supplied its arguments across several calls. Each [`apply`]
//! merges newly supplied positions into the already-recorded ones and either
//! invokes the wrapped function (all positions bound) or returns a new
//! binder carrying the combined state. [`Arg::Placeholder`] defers a
//! specific position to a later call.
//!
//! Binding is pure: [`apply`] never mutates the binder it is called on, so
//! distinct partially-applied chains derived from one binder are fully
//! independent.
//!
//! [`apply`]: Partial::apply
//!
//! # Examples
//!
//! ```rust
//! use dynars::partial::{Applied, Partial};
//! use dynars::value::Value;
//!
//! let add = Partial::typed2(|a: i32, b: i32| a + b);
//! let add_five = match add.apply_values([Value::new(5_i32)]).unwrap() {
//!     Applied::Pending(partial) => partial,
//!     Applied::Done(_) => unreachable!(),
//! };
//! let result = add_five.apply_values([Value::new(3_i32)]).unwrap();
//! assert_eq!(result.done(), Some(Value::new(8_i32)));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::{expect_arity, DispatchError};
use crate::value::{Lambda, Value};

/// The wrapped function shape: all bound arguments at once, in position
/// order.
pub type Variadic = Arc<dyn Fn(Vec<Value>) -> Result<Value, DispatchError> + Send + Sync>;

/// One supplied position of an [`apply`](Partial::apply) call.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A real argument for the next unbound position.
    Given(Value),
    /// Defers the next unbound position to a later call.
    Placeholder,
}

/// The outcome of an [`apply`](Partial::apply): either the wrapped
/// function's result, or a binder awaiting the remaining arguments.
pub enum Applied {
    /// All positions were bound; the wrapped function was invoked.
    Done(Value),
    /// Positions remain unbound.
    Pending(Partial),
}

impl Applied {
    /// The result, if the wrapped function was invoked.
    #[must_use]
    pub fn done(self) -> Option<Value> {
        match self {
            Self::Done(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// The remaining binder, if positions are still unbound.
    #[must_use]
    pub fn pending(self) -> Option<Partial> {
        match self {
            Self::Done(_) => None,
            Self::Pending(partial) => Some(partial),
        }
    }
}

impl fmt::Debug for Applied {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(value) => formatter.debug_tuple("Done").field(value).finish(),
            Self::Pending(partial) => formatter.debug_tuple("Pending").field(partial).finish(),
        }
    }
}

/// A function of fixed arity under incremental argument binding.
#[derive(Clone)]
pub struct Partial {
    arity: usize,
    function: Variadic,
    slots: Vec<Option<Value>>,
}

impl Partial {
    /// Wraps a function requiring exactly `arity` positional arguments.
    pub fn new<F>(arity: usize, function: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, DispatchError> + Send + Sync + 'static,
    {
        Self {
            arity,
            function: Arc::new(function),
            slots: Vec::new(),
        }
    }

    /// Wraps an ordinary unary closure; arity 1.
    pub fn typed1<A, B, F>(function: F) -> Self
    where
        A: Clone + 'static,
        B: Any + fmt::Debug + PartialEq + Send + Sync,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Self::new(1, move |values| {
            let [a] = expect_arity::<1>("partial", values)?;
            Ok(Value::new(function(a.extract::<A>()?)))
        })
    }

    /// Wraps an ordinary binary closure; arity 2.
    pub fn typed2<A, B, C, F>(function: F) -> Self
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Any + fmt::Debug + PartialEq + Send + Sync,
        F: Fn(A, B) -> C + Send + Sync + 'static,
    {
        Self::new(2, move |values| {
            let [a, b] = expect_arity::<2>("partial", values)?;
            Ok(Value::new(function(a.extract::<A>()?, b.extract::<B>()?)))
        })
    }

    /// Wraps an ordinary ternary closure; arity 3.
    pub fn typed3<A, B, C, D, F>(function: F) -> Self
    where
        A: Clone + 'static,
        B: Clone + 'static,
        C: Clone + 'static,
        D: Any + fmt::Debug + PartialEq + Send + Sync,
        F: Fn(A, B, C) -> D + Send + Sync + 'static,
    {
        Self::new(3, move |values| {
            let [a, b, c] = expect_arity::<3>("partial", values)?;
            Ok(Value::new(function(
                a.extract::<A>()?,
                b.extract::<B>()?,
                c.extract::<C>()?,
            )))
        })
    }

    /// The wrapped function's total arity.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// How many positions are still unbound.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.arity - self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Supplies further positions.
    ///
    /// Newly supplied positions are merged left-to-right: placeholder holes
    /// recorded earlier are filled first (positions already bound to real
    /// values are skipped), then the remainder is appended. When all
    /// `arity` positions hold real values the wrapped function is invoked
    /// immediately; a binder of arity 0 therefore invokes on its first
    /// `apply`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TooManyArguments`] when the total number of
    /// supplied positions exceeds the arity, and propagates the wrapped
    /// function's error on invocation.
    pub fn apply(&self, arguments: impl IntoIterator<Item = Arg>) -> Result<Applied, DispatchError> {
        let mut slots = self.slots.clone();
        let mut incoming = arguments.into_iter().fuse();

        for slot in &mut slots {
            if slot.is_none() {
                match incoming.next() {
                    Some(Arg::Given(value)) => *slot = Some(value),
                    Some(Arg::Placeholder) => {}
                    None => break,
                }
            }
        }
        for argument in incoming {
            slots.push(match argument {
                Arg::Given(value) => Some(value),
                Arg::Placeholder => None,
            });
        }

        if slots.len() > self.arity {
            return Err(DispatchError::TooManyArguments {
                expected: self.arity,
                actual: slots.len(),
            });
        }
        if slots.len() == self.arity && slots.iter().all(Option::is_some) {
            let values: Vec<Value> = slots.into_iter().flatten().collect();
            return Ok(Applied::Done((self.function)(values)?));
        }
        Ok(Applied::Pending(Self {
            arity: self.arity,
            function: Arc::clone(&self.function),
            slots,
        }))
    }

    /// As [`apply`](Partial::apply), with every position a real argument.
    ///
    /// # Errors
    ///
    /// As [`apply`](Partial::apply).
    pub fn apply_values(
        &self,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Applied, DispatchError> {
        self.apply(values.into_iter().map(Arg::Given))
    }

    /// Curries the binder into a chain of unary [`Lambda`]s: each call
    /// binds one argument, and the final call yields the wrapped function's
    /// result. Intermediate links are lambdas wrapped as values, which is
    /// the shape applicative containers hold.
    #[must_use]
    pub fn into_lambda(self) -> Lambda {
        Lambda::fallible(move |argument| {
            match self.apply([Arg::Given(argument)])? {
                Applied::Done(value) => Ok(value),
                Applied::Pending(next) => Ok(Value::new(next.into_lambda())),
            }
        })
    }

    /// Invokes the wrapped function directly with no arguments.
    ///
    /// This is the nullary identity case `lift` relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ArityMismatch`] for a non-nullary binder,
    /// and propagates the wrapped function's error.
    pub fn invoke_nullary(&self) -> Result<Value, DispatchError> {
        if self.arity == 0 {
            (self.function)(Vec::new())
        } else {
            Err(DispatchError::ArityMismatch {
                operation: "partial",
                expected: self.arity,
                actual: 0,
            })
        }
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Partial")
            .field("arity", &self.arity)
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}
