//! Tests for Alternative laws and the MonadPlus-derived `filter`.
//!
//! 1. **Left identity**: `combine(empty(), fa) == fa`
//! 2. **Right identity**: `combine(fa, empty()) == fa`
//! 3. **Associativity**: `combine(combine(fa, fb), fc) ==
//!    combine(fa, combine(fb, fc))`

use dynars::dispatch::DispatchError;
use dynars::instance::maybe::{self, Maybe};
use dynars::instance::seq::{self as seq_instance, Seq};
use dynars::seq;
use dynars::typeclass::{combine, empty, filter};
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

fn seq_of(values: &[i32]) -> Value {
    Value::new(values.iter().copied().map(Value::new).collect::<Seq>())
}

fn is_even() -> Lambda {
    Lambda::typed(|n: i32| n % 2 == 0)
}

proptest! {
    #[test]
    fn prop_maybe_left_identity(option in any::<Option<i32>>()) {
        install();
        let fa = maybe_of(option);
        let absent = empty::<Maybe>().unwrap();
        prop_assert_eq!(combine(absent, fa.clone()).unwrap(), fa);
    }

    #[test]
    fn prop_maybe_right_identity(option in any::<Option<i32>>()) {
        install();
        let fa = maybe_of(option);
        let absent = empty::<Maybe>().unwrap();
        prop_assert_eq!(combine(fa.clone(), absent).unwrap(), fa);
    }

    #[test]
    fn prop_maybe_associativity(
        x in any::<Option<i32>>(),
        y in any::<Option<i32>>(),
        z in any::<Option<i32>>()
    ) {
        install();
        let (fa, fb, fc) = (maybe_of(x), maybe_of(y), maybe_of(z));
        let left = combine(combine(fa.clone(), fb.clone()).unwrap(), fc.clone()).unwrap();
        let right = combine(fa, combine(fb, fc).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_seq_identities(values in prop::collection::vec(any::<i32>(), 0..10)) {
        install();
        let fa = seq_of(&values);
        let nil = empty::<Seq>().unwrap();
        prop_assert_eq!(combine(nil.clone(), fa.clone()).unwrap(), fa.clone());
        prop_assert_eq!(combine(fa.clone(), nil).unwrap(), fa);
    }
}

#[rstest]
fn maybe_combine_prefers_the_first_present_value() {
    install();
    let first = maybe_of(Some(1));
    let second = maybe_of(Some(2));
    assert_eq!(combine(first.clone(), second).unwrap(), first);
}

#[rstest]
fn seq_combine_concatenates() {
    install();
    let result = combine(Value::new(seq![1, 2]), Value::new(seq![3])).unwrap();
    assert_eq!(result, Value::new(seq![1, 2, 3]));
}

#[rstest]
fn filter_keeps_even_elements() {
    install();
    let result = filter(is_even(), Value::new(seq![1, 2, 3, 4])).unwrap();
    assert_eq!(result, Value::new(seq![2, 4]));
}

#[rstest]
fn filter_on_maybe_uses_its_own_empty() {
    install();
    assert_eq!(
        filter(is_even(), maybe_of(Some(4))).unwrap(),
        maybe_of(Some(4))
    );
    assert_eq!(
        filter(is_even(), maybe_of(Some(3))).unwrap(),
        Value::new(Maybe::nothing())
    );
    assert_eq!(
        filter(is_even(), maybe_of(None)).unwrap(),
        Value::new(Maybe::nothing())
    );
}

#[rstest]
fn filter_rejects_a_non_boolean_predicate() {
    install();
    let broken = Lambda::typed(|n: i32| n);
    let error = filter(broken, Value::new(seq![1])).unwrap_err();
    assert!(matches!(error, DispatchError::TypeMismatch { .. }));
}
