//! Behavioural tests for expression compilation, matching and snippets.
#![expect(clippy::expect_used, reason = "tests assert the happy path directly")]

use picklery_expressions::{
    CucumberExpression, ExpressionError, ParameterType, ParameterTypeError, ParameterTypeRegistry,
    ParameterValue, RegularExpression, build_regex_from_expression, generate_expression,
};
use rstest::{fixture, rstest};

#[fixture]
fn registry() -> ParameterTypeRegistry {
    let mut registry = ParameterTypeRegistry::default();
    registry
        .define(
            ParameterType::new("color", ["red", "green", "blue"])
                .with_transformer(|value| Ok(ParameterValue::Text(value.to_uppercase())))
                .with_snippets(true),
        )
        .expect("color is a fresh name");
    registry
}

#[rstest]
#[case("I have 1 cucumber", "1")]
#[case("I have 5 cucumbers", "5")]
fn plural_optional_captures_only_the_count(
    registry: ParameterTypeRegistry,
    #[case] text: &str,
    #[case] raw: &str,
) {
    let expression =
        CucumberExpression::new("I have {int} cucumber(s)", &registry).expect("expression compiles");
    let args = expression.match_text(text).expect("text matches");
    let raws: Vec<_> = args.iter().map(|arg| arg.raw().to_owned()).collect();
    assert_eq!(raws, vec![raw.to_owned()]);
}

#[rstest]
fn alternation_splits_on_whitespace(registry: ParameterTypeRegistry) {
    let source = build_regex_from_expression("I eat/drink a meal", &registry)
        .expect("expression compiles");
    assert_eq!(source.pattern, "^I (?:eat|drink) a meal$");
}

#[rstest]
fn custom_types_transform_their_captures(registry: ParameterTypeRegistry) {
    let expression =
        CucumberExpression::new("a {color} ball", &registry).expect("expression compiles");
    let args = expression.match_text("a green ball").expect("text matches");
    let values: Vec<_> = args.iter().map(|arg| arg.value().expect("transform succeeds")).collect();
    assert_eq!(values, vec![ParameterValue::Text("GREEN".into())]);
    assert!(expression.match_text("a purple ball").is_none());
}

#[rstest]
fn transform_failures_surface_per_argument(registry: ParameterTypeRegistry) {
    let expression =
        CucumberExpression::new("I have {int} cukes", &registry).expect("expression compiles");
    let args = expression
        .match_text("I have 99999999999999999999 cukes")
        .expect("regex still matches");
    let err = args.first().map(|arg| arg.value());
    assert!(matches!(err, Some(Err(ParameterTypeError::Transform { .. }))));
}

#[rstest]
#[case("{unknown}", 0)]
#[case("a (b", 2)]
#[case("a ({int})", 3)]
#[case("{int}/x", 0)]
fn compile_errors_report_positions(
    registry: ParameterTypeRegistry,
    #[case] source: &str,
    #[case] position: usize,
) {
    let err = CucumberExpression::new(source, &registry).expect_err("expression is malformed");
    assert_eq!(err.position(), Some(position), "{source}: {err}");
}

#[rstest]
fn regex_patterns_type_groups_from_the_registry(registry: ParameterTypeRegistry) {
    let pattern = RegularExpression::new(r"^I pick (red|green|blue) x(-?\d+)$", &registry)
        .expect("regex compiles");
    let args = pattern.match_text("I pick red x3").expect("text matches");
    let values: Vec<_> = args.iter().map(|arg| arg.value().expect("transform succeeds")).collect();
    assert_eq!(
        values,
        vec![ParameterValue::Text("RED".into()), ParameterValue::Int(3)]
    );
}

#[rstest]
fn snippets_use_custom_types(registry: ParameterTypeRegistry) {
    let generated = generate_expression("I paint 3 walls blue", &registry);
    assert_eq!(generated.source, "I paint {int} walls {color}");
    assert_eq!(generated.parameter_names, vec!["int", "color"]);

    let expression =
        CucumberExpression::new(&generated.source, &registry).expect("snippet compiles");
    assert!(expression.match_text("I paint 3 walls blue").is_some());
}

#[test]
fn undefined_parameter_types_are_hard_errors() {
    let err = build_regex_from_expression("{color}", &ParameterTypeRegistry::default())
        .expect_err("color is not built in");
    assert!(matches!(err, ExpressionError::UndefinedParameterType { .. }));
}
