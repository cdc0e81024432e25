//! Tests for the `Maybe` instance against the global registry.

use dynars::instance::maybe::{self, Maybe};
use dynars::typeclass::{conforms, flat_map, fmap, pure, Capability};
use dynars::value::{Lambda, TypeTag, Value};
use rstest::rstest;

fn install() {
    maybe::install_global().unwrap();
}

#[rstest]
fn maybe_conforms_to_the_whole_hierarchy() {
    install();
    let tag = TypeTag::of::<Maybe>();
    for capability in [
        Capability::Functor,
        Capability::Applicative,
        Capability::Alternative,
        Capability::Monad,
        Capability::MonadPlus,
    ] {
        assert!(conforms(capability, tag), "{capability} expected");
    }
}

#[rstest]
fn installation_is_idempotent() {
    install();
    // A second install is a no-op, not a duplicate registration error.
    maybe::install_global().unwrap();
}

#[rstest]
fn pure_wraps_into_just() {
    install();
    assert_eq!(
        pure::<Maybe>(Value::new(5_i32)).unwrap(),
        Value::new(Maybe::just(Value::new(5_i32)))
    );
}

#[rstest]
fn flat_map_chains_present_values() {
    install();
    let parse = Lambda::fallible(|value| {
        let text = value.extract::<String>()?;
        Ok(Value::new(text.parse::<i32>().map_or_else(
            |_| Maybe::nothing(),
            |n| Maybe::just(Value::new(n)),
        )))
    });
    let parsed = flat_map(
        Value::new(Maybe::just(Value::new("42".to_string()))),
        parse.clone(),
    )
    .unwrap();
    assert_eq!(parsed, Value::new(Maybe::just(Value::new(42_i32))));

    let unparsed = flat_map(
        Value::new(Maybe::just(Value::new("not a number".to_string()))),
        parse,
    )
    .unwrap();
    assert_eq!(unparsed, Value::new(Maybe::nothing()));
}

#[rstest]
fn flat_map_short_circuits_nothing_without_calling_the_function() {
    install();
    let must_not_run = Lambda::fallible(|_| unreachable!("Nothing short-circuits"));
    let result = flat_map(Value::new(Maybe::nothing()), must_not_run).unwrap();
    assert_eq!(result, Value::new(Maybe::nothing()));
}

#[rstest]
fn fmap_composes_with_the_accessors() {
    install();
    let doubled = fmap(
        Lambda::typed(|n: i32| n * 2),
        Value::new(Maybe::just(Value::new(4_i32))),
    )
    .unwrap();
    let maybe = doubled.extract::<Maybe>().unwrap();
    assert!(maybe.is_just());
    assert_eq!(maybe.value(), Some(&Value::new(8_i32)));
    assert_eq!(maybe.into_option(), Some(Value::new(8_i32)));
}
