//! Tests for Monad laws and the derived `join` over the registered
//! instances.
//!
//! 1. **Left identity**: `flat_map(pure(a), f) == f(a)`
//! 2. **Right identity**: `flat_map(ma, pure) == ma`
//! 3. **Associativity**: `flat_map(flat_map(ma, f), g) ==
//!    flat_map(ma, |a| flat_map(f(a), g))`

use dynars::instance::maybe::{self, Maybe};
use dynars::instance::seq as seq_instance;
use dynars::seq;
use dynars::typeclass::{flat_map, join, pure};
use dynars::value::{Lambda, Value};
use proptest::prelude::*;
use rstest::rstest;

fn install() {
    maybe::install_global().unwrap();
    seq_instance::install_global().unwrap();
}

fn maybe_of(option: Option<i32>) -> Value {
    Value::new(option.map_or_else(Maybe::nothing, |n| Maybe::just(Value::new(n))))
}

/// A Kleisli arrow: halves even numbers, fails on odd ones.
fn halve() -> Lambda {
    Lambda::fallible(|value| {
        let n = value.extract::<i32>()?;
        Ok(Value::new(if n % 2 == 0 {
            Maybe::just(Value::new(n / 2))
        } else {
            Maybe::nothing()
        }))
    })
}

/// A Kleisli arrow: fails on negative numbers.
fn non_negative() -> Lambda {
    Lambda::fallible(|value| {
        let n = value.extract::<i32>()?;
        Ok(Value::new(if n >= 0 {
            Maybe::just(Value::new(n))
        } else {
            Maybe::nothing()
        }))
    })
}

fn pure_maybe() -> Lambda {
    Lambda::fallible(|value| pure::<Maybe>(value))
}

proptest! {
    #[test]
    fn prop_maybe_left_identity(n in any::<i32>()) {
        install();
        let left = flat_map(pure::<Maybe>(Value::new(n)).unwrap(), halve()).unwrap();
        let right = halve().call(Value::new(n)).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_maybe_right_identity(option in any::<Option<i32>>()) {
        install();
        let ma = maybe_of(option);
        prop_assert_eq!(flat_map(ma.clone(), pure_maybe()).unwrap(), ma);
    }

    #[test]
    fn prop_maybe_associativity(option in any::<Option<i32>>()) {
        install();
        let ma = maybe_of(option);
        let left = flat_map(flat_map(ma.clone(), halve()).unwrap(), non_negative()).unwrap();
        let right = flat_map(
            ma,
            Lambda::fallible(|value| flat_map(halve().call(value)?, non_negative())),
        )
        .unwrap();
        prop_assert_eq!(left, right);
    }
}

#[rstest]
fn seq_flat_map_concatenates() {
    install();
    let twice = Lambda::fallible(|value| {
        let n = value.extract::<i32>()?;
        Ok(Value::new(seq![n, n]))
    });
    let result = flat_map(Value::new(seq![1, 2]), twice).unwrap();
    assert_eq!(result, Value::new(seq![1, 1, 2, 2]));
}

#[rstest]
fn join_flattens_exactly_one_level() {
    install();
    let nested = Value::new(seq![seq![1, 2], seq![3]]);
    assert_eq!(join(nested).unwrap(), Value::new(seq![1, 2, 3]));

    // A doubly nested sequence keeps its inner layer.
    let doubly = Value::new(seq![seq![seq![1]]]);
    assert_eq!(join(doubly).unwrap(), Value::new(seq![seq![1]]));
}

#[rstest]
fn join_on_maybe_unwraps_one_layer() {
    install();
    let nested = Value::new(Maybe::just(Value::new(Maybe::just(Value::new(2_i32)))));
    assert_eq!(
        join(nested).unwrap(),
        Value::new(Maybe::just(Value::new(2_i32)))
    );
    assert_eq!(
        join(Value::new(Maybe::just(Value::new(Maybe::nothing())))).unwrap(),
        Value::new(Maybe::nothing())
    );
}

#[rstest]
fn join_short_circuits_through_nothing() {
    install();
    // join(flat_map(Nothing, f)) == Nothing for any f.
    let absent = flat_map(Value::new(Maybe::nothing()), halve()).unwrap();
    assert_eq!(join(absent).unwrap(), Value::new(Maybe::nothing()));
}
