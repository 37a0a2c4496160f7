//! Feature text to matched step definitions, end to end.
#![expect(clippy::expect_used, reason = "tests assert the happy path directly")]

use picklery::{
    ParameterType, ParameterTypeRegistry, ParameterValue, ParseOptions, PickleStepArgument,
    StepDefinition, StepMatchError, StepMatcher, compile, step_definition,
};
use rstest::{fixture, rstest};

const FEATURE: &str = r#"
@kitchen
Feature: Cucumber stock
  Background:
    Given the basket is empty

  Scenario Outline: Buying <count>
    When I buy <count> <colour> cucumbers
    Then the basket holds <count> cucumbers

    Examples:
      | count | colour |
      | 1     | green  |
      | 12    | red    |

  Scenario: Inventory
    Given these cucumbers:
      | colour |
      | green  |
    Then the report says "all good"
    And something nobody defined
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    EmptyBasket,
    Buy,
    Holds,
    Table,
    Report,
}

#[fixture]
fn matcher() -> StepMatcher<Step> {
    let mut registry = ParameterTypeRegistry::default();
    registry
        .define(ParameterType::new("colour", ["green|red"]).with_snippets(true))
        .expect("colour is a fresh name");
    StepMatcher::new(
        [
            step_definition!(exact "the basket is empty", Step::EmptyBasket),
            step_definition!(expression "I buy {int} {colour} cucumbers", Step::Buy),
            step_definition!(expression "the basket holds {int} cucumber(s)", Step::Holds),
            step_definition!(regex "^these cucumbers:?$", Step::Table),
            step_definition!(expression "the report says {string}", Step::Report),
        ],
        registry,
    )
}

#[rstest]
fn every_defined_step_resolves(matcher: StepMatcher<Step>) {
    let pickles = compile(FEATURE, &ParseOptions::new("stock.feature")).expect("valid feature");
    let resolved: Vec<Vec<Result<Step, String>>> = pickles
        .iter()
        .map(|pickle| {
            pickle
                .steps
                .iter()
                .map(|step| {
                    matcher
                        .match_step(step)
                        .map(|found| *found.handler())
                        .map_err(|err| err.to_string())
                })
                .collect()
        })
        .collect();
    assert_eq!(resolved.len(), 3);
    assert_eq!(
        resolved.first(),
        Some(&vec![Ok(Step::EmptyBasket), Ok(Step::Buy), Ok(Step::Holds)])
    );
    let inventory = resolved.get(2).expect("inventory pickle");
    assert_eq!(
        inventory.get(..3),
        Some(&[Ok(Step::EmptyBasket), Ok(Step::Table), Ok(Step::Report)][..])
    );
    assert!(matches!(
        inventory.get(3),
        Some(Err(message)) if message.contains("something nobody defined")
    ));
}

#[rstest]
fn outline_values_reach_the_handlers(matcher: StepMatcher<Step>) {
    let pickles = compile(FEATURE, &ParseOptions::new("stock.feature")).expect("valid feature");
    let bought: Vec<Vec<ParameterValue>> = pickles
        .iter()
        .filter_map(|pickle| pickle.steps.get(1))
        .filter_map(|step| matcher.match_step(step).ok())
        .filter(|found| *found.handler() == Step::Buy)
        .map(|found| found.values().to_vec())
        .collect();
    assert_eq!(
        bought,
        vec![
            vec![ParameterValue::Int(1), ParameterValue::Text("green".into())],
            vec![ParameterValue::Int(12), ParameterValue::Text("red".into())],
        ]
    );
}

#[rstest]
fn step_arguments_travel_with_the_pickle(matcher: StepMatcher<Step>) {
    let pickles = compile(FEATURE, &ParseOptions::new("stock.feature")).expect("valid feature");
    let table_step = pickles
        .iter()
        .flat_map(|pickle| &pickle.steps)
        .find(|step| {
            matcher
                .match_step(step)
                .is_ok_and(|found| *found.handler() == Step::Table)
        })
        .expect("table step");
    let Some(PickleStepArgument::DataTable { rows }) = &table_step.argument else {
        panic!("expected a data table, got {:?}", table_step.argument);
    };
    assert_eq!(rows, &vec![vec!["colour".to_owned()], vec!["green".to_owned()]]);
}

#[rstest]
fn undefined_steps_suggest_custom_types(matcher: StepMatcher<Step>) {
    let err = matcher.match_text("I sell 4 red cucumbers").err();
    let Some(StepMatchError::Undefined { snippet, .. }) = err else {
        panic!("expected an undefined step, got {err:?}");
    };
    assert_eq!(snippet.source, "I sell {int} {colour} cucumbers");
}

#[test]
fn definitions_built_by_hand_match_macro_built_ones() {
    let manual: StepDefinition<()> = StepDefinition::new(
        picklery::PatternSource::Exact("I rest".into()),
        (),
        picklery::SourceLocation::new(file!(), line!()),
    );
    let generated = step_definition!(exact "I rest", ());
    assert_eq!(manual.pattern, generated.pattern);
    assert_eq!(manual.location.file, generated.location.file);
}
