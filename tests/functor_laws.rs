//! Property-based tests for Functor laws over the registered instances.
//!
//! 1. **Identity**: `fmap(identity, fa) == fa`
//! 2. **Composition**: `fmap(g.compose(f), fa) == fmap(g, fmap(f, fa))`

use dynars::instance::maybe::{self, Maybe};
use dynars::instance::seq::{self as seq_instance, Seq};
use dynars::dispatch::DispatchError;
use dynars::seq;
use dynars::typeclass::fmap;
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

proptest! {
    #[test]
    fn prop_maybe_identity(option in any::<Option<i32>>()) {
        install();
        let fa = maybe_of(option);
        prop_assert_eq!(fmap(Lambda::identity(), fa.clone()).unwrap(), fa);
    }

    #[test]
    fn prop_maybe_composition(option in any::<Option<i32>>()) {
        install();
        let fa = maybe_of(option);
        let f = Lambda::typed(|n: i32| n.wrapping_add(1));
        let g = Lambda::typed(|n: i32| n.wrapping_mul(2));
        let left = fmap(g.clone(), fmap(f.clone(), fa.clone()).unwrap()).unwrap();
        let right = fmap(g.compose(f), fa).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_seq_identity(values in prop::collection::vec(any::<i32>(), 0..10)) {
        install();
        let fa = seq_of(&values);
        prop_assert_eq!(fmap(Lambda::identity(), fa.clone()).unwrap(), fa);
    }

    #[test]
    fn prop_seq_composition(values in prop::collection::vec(any::<i32>(), 0..10)) {
        install();
        let fa = seq_of(&values);
        let f = Lambda::typed(|n: i32| n.wrapping_sub(3));
        let g = Lambda::typed(|n: i32| n.wrapping_mul(5));
        let left = fmap(g.clone(), fmap(f.clone(), fa.clone()).unwrap()).unwrap();
        let right = fmap(g.compose(f), fa).unwrap();
        prop_assert_eq!(left, right);
    }
}

#[rstest]
fn fmap_reaches_maybe_through_the_derivations() {
    install();
    // Maybe registers no direct fmap: this exercises the Applicative
    // derivation on top of the Monad-derived apply.
    let result = fmap(Lambda::typed(|n: i32| n * 2), maybe_of(Some(21))).unwrap();
    assert_eq!(result, maybe_of(Some(42)));
}

#[rstest]
fn fmap_preserves_nothing() {
    install();
    let result = fmap(Lambda::typed(|n: i32| n * 2), maybe_of(None)).unwrap();
    assert_eq!(result, maybe_of(None));
}

#[rstest]
fn fmap_uses_the_direct_seq_registration() {
    install();
    let result = fmap(Lambda::typed(|n: i32| n + 1), Value::new(seq![1, 2, 3])).unwrap();
    assert_eq!(result, Value::new(seq![2, 3, 4]));
}

#[rstest]
fn fmap_on_an_unregistered_type_reports_no_implementation() {
    install();
    let error = fmap(Lambda::identity(), Value::new(5_i32)).unwrap_err();
    assert!(matches!(error, DispatchError::NoImplementation { .. }));
}
