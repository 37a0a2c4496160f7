//! Unit tests for the recursive-descent parser.

use rstest::rstest;

use super::*;

#[expect(clippy::expect_used, reason = "tests require a parsed document")]
fn parse_ok(source: &str) -> GherkinDocument {
    let tokenized = Lexer::new(DialectTable::builtin(), "en").tokenize(source);
    Parser::new(tokenized, "test.feature")
        .parse()
        .expect("document should parse")
}

fn parse_err(source: &str) -> Option<ParserError> {
    let tokenized = Lexer::new(DialectTable::builtin(), "en").tokenize(source);
    Parser::new(tokenized, "test.feature").parse().err()
}

#[expect(clippy::expect_used, reason = "tests require a feature")]
fn feature(source: &str) -> Feature {
    parse_ok(source).feature.expect("feature present")
}

fn scenarios(children: &[FeatureChild]) -> Vec<&Scenario> {
    children
        .iter()
        .filter_map(|child| match child {
            FeatureChild::Scenario(scenario) => Some(scenario),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_document_has_no_feature() {
    let document = parse_ok("# just a note\n\n");
    assert!(document.feature.is_none());
    assert_eq!(document.comments.len(), 1);
    assert_eq!(document.uri, "test.feature");
}

#[test]
fn language_directive_is_not_a_comment() {
    let tokenized = Lexer::new(DialectTable::builtin(), "en")
        .tokenize("# language: de\nFunktionalität: Essen\n");
    let document = Parser::new(tokenized, "de.feature").parse();
    let summary = document
        .ok()
        .map(|d| (d.comments.len(), d.feature.map(|f| (f.language, f.keyword))));
    assert_eq!(
        summary,
        Some((0, Some(("de".to_owned(), "Funktionalität".to_owned()))))
    );
}

#[test]
fn children_keep_source_order() {
    let feature = feature(
        "Feature: F\n  Scenario: one\n    Given a\n  Background:\n    Given b\n  Rule: R\n    Scenario: two\n",
    );
    let order: Vec<&str> = feature
        .children
        .iter()
        .map(|child| match child {
            FeatureChild::Background(_) => "background",
            FeatureChild::Scenario(_) => "scenario",
            FeatureChild::Rule(_) => "rule",
        })
        .collect();
    assert_eq!(order, vec!["scenario", "background", "rule"]);
}

#[rstest]
#[case("Feature: F\n  Background:\n  Background:\n", Location::new(3, 3))]
#[case(
    "Feature: F\n  Rule: R\n    Background:\n    Scenario: S\n    Background:\n",
    Location::new(5, 5)
)]
fn duplicate_background_is_rejected(#[case] source: &str, #[case] location: Location) {
    assert_eq!(
        parse_err(source),
        Some(ParserError::DuplicateBackground { location })
    );
}

#[test]
fn rule_and_feature_backgrounds_are_independent() {
    let feature = feature(
        "Feature: F\n  Background:\n    Given a\n  Rule: R\n    Background:\n      Given b\n",
    );
    assert_eq!(feature.children.len(), 2);
}

#[test]
fn conjunctions_inherit_but_wildcards_do_not() {
    let feature = feature(
        "Feature: F\n  Scenario: S\n    And first\n    Given a\n    And b\n    * c\n    But d\n    When e\n    * f\n    And g\n",
    );
    let types: Vec<StepKeywordType> = scenarios(&feature.children)
        .first()
        .map(|s| s.steps.iter().map(|step| step.keyword_type).collect())
        .unwrap_or_default();
    assert_eq!(
        types,
        vec![
            StepKeywordType::Conjunction,
            StepKeywordType::Context,
            StepKeywordType::Context,
            StepKeywordType::Unknown,
            StepKeywordType::Context,
            StepKeywordType::Action,
            StepKeywordType::Unknown,
            StepKeywordType::Action,
        ]
    );
}

#[test]
fn descriptions_trim_trailing_blank_lines() {
    let feature = feature("Feature: F\n\n  First line\n\n  Second line\n\n\n  Scenario: S\n");
    assert_eq!(
        feature.description.as_deref(),
        Some("  First line\n\n  Second line")
    );
    let scenario = scenarios(&feature.children).into_iter().next();
    assert_eq!(scenario.map(|s| s.description.clone()), Some(None));
}

#[test]
fn comments_inside_descriptions_keep_surrounding_blank_lines() {
    let document = parse_ok("Feature: F\n  a\n\n  # c\n\n  b\n  Scenario: S\n");
    let description = document.feature.and_then(|f| f.description);
    assert_eq!(description.as_deref(), Some("  a\n\n\n  b"));
    let comments: Vec<_> = document
        .comments
        .iter()
        .map(|c| (c.location.line, c.text.as_str()))
        .collect();
    assert_eq!(comments, vec![(4, "  # c")]);
}

#[test]
fn step_arguments_are_attached() {
    let feature = feature(concat!(
        "Feature: F\n",
        "  Scenario: S\n",
        "    Given a table\n",
        "      | a | b |\n",
        "      # comment inside\n",
        "      | 1 | 2 |\n",
        "    And a doc string\n",
        "      ```markdown\n",
        "      line one\n",
        "\n",
        "      line two\n",
        "      ```\n",
    ));
    let steps = scenarios(&feature.children)
        .first()
        .map(|s| s.steps.clone())
        .unwrap_or_default();
    let [first, second] = steps.as_slice() else {
        panic!("expected two steps, got {steps:?}");
    };
    let Some(StepArgument::DataTable(table)) = &first.argument else {
        panic!("expected a data table");
    };
    let values: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(|c| c.value.as_str()).collect())
        .collect();
    assert_eq!(values, vec![vec!["a", "b"], vec!["1", "2"]]);
    assert_eq!(table.location, Location::new(4, 7));
    let Some(StepArgument::DocString(doc)) = &second.argument else {
        panic!("expected a doc string");
    };
    assert_eq!(doc.content, "line one\n\nline two");
    assert_eq!(doc.media_type.as_deref(), Some("markdown"));
    assert_eq!(doc.delimiter, "```");
}

#[test]
fn unterminated_doc_string_is_unexpected_eof() {
    let err = parse_err("Feature: F\n  Scenario: S\n    Given x\n      \"\"\"\n      text\n");
    assert!(matches!(
        err,
        Some(ParserError::UnexpectedEof { location, .. }) if location == Location::new(6, 0)
    ));
}

#[test]
fn tags_before_rule_close_the_previous_rule() {
    let feature = feature(concat!(
        "@feature\n",
        "Feature: F\n",
        "  Rule: first\n",
        "    @scenario\n",
        "    Scenario: S\n",
        "  @second\n",
        "  # between tags\n",
        "  @rule\n",
        "  Rule: second\n",
    ));
    let rules: Vec<(&str, Vec<&str>, usize)> = feature
        .children
        .iter()
        .filter_map(|child| match child {
            FeatureChild::Rule(rule) => Some((
                rule.name.as_str(),
                rule.tags.iter().map(|t| t.name.as_str()).collect(),
                rule.children.len(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        rules,
        vec![
            ("first", vec![], 1),
            ("second", vec!["@second", "@rule"], 0)
        ]
    );
    assert_eq!(feature.tags.first().map(|t| t.location), Some(Location::new(1, 1)));
}

#[test]
fn tagged_examples_blocks_belong_to_the_outline() {
    let feature = feature(concat!(
        "Feature: F\n",
        "  Scenario Outline: O\n",
        "    Given <x>\n",
        "    Examples:\n",
        "      | x |\n",
        "      | 1 |\n",
        "    @slow\n",
        "    Examples: more\n",
        "      | x |\n",
        "  @next\n",
        "  Scenario: after\n",
    ));
    let found = scenarios(&feature.children);
    let [outline, after] = found.as_slice() else {
        panic!("expected two scenarios");
    };
    assert!(outline.is_outline());
    let examples: Vec<(&str, Vec<&str>, usize)> = outline
        .examples
        .iter()
        .map(|e| {
            (
                e.name.as_str(),
                e.tags.iter().map(|t| t.name.as_str()).collect(),
                e.body.len(),
            )
        })
        .collect();
    assert_eq!(examples, vec![("", vec![], 1), ("more", vec!["@slow"], 0)]);
    assert_eq!(after.tags.first().map(|t| t.name.as_str()), Some("@next"));
}

#[test]
fn examples_without_table_have_no_header() {
    let feature = feature("Feature: F\n  Scenario Outline: O\n    Examples:\n");
    let header = scenarios(&feature.children)
        .first()
        .and_then(|s| s.examples.first())
        .map(|e| e.header.clone());
    assert_eq!(header, Some(None));
}

#[rstest]
#[case("Given x\n", "expected #FeatureLine, got 'Given x'")]
#[case("Feature: F\n  Given x\n", "expected #EOF, #BackgroundLine, #TagLine, #ScenarioLine, #ScenarioOutlineLine, #RuleLine, got 'Given x'")]
#[case("Feature: F\n  @tag\n  Background:\n", "expected #ScenarioLine, #ScenarioOutlineLine, got 'Background: '")]
#[case("Feature: F\nFeature: G\n", "expected #EOF, #BackgroundLine, #TagLine, #ScenarioLine, #ScenarioOutlineLine, #RuleLine, got 'Feature: G'")]
fn unexpected_tokens_are_described(#[case] source: &str, #[case] message: &str) {
    let err = parse_err(source).map(|e| e.to_string());
    assert!(
        err.as_deref().is_some_and(|text| text.ends_with(message)),
        "unexpected error: {err:?}"
    );
}

#[test]
fn dangling_tags_at_end_of_file_are_unexpected_eof() {
    let err = parse_err("Feature: F\n  @orphan\n");
    assert!(matches!(err, Some(ParserError::UnexpectedEof { .. })));
}

#[test]
fn ids_are_deterministic() {
    let source = "Feature: F\n  Scenario: S\n    Given a\n      | x |\n";
    assert_eq!(parse_ok(source), parse_ok(source));
}

#[test]
fn rectangularity_is_checked_on_demand() {
    let feature = feature("Feature: F\n  Scenario: S\n    Given t\n      | a | b |\n      | 1 |\n");
    let table = scenarios(&feature.children)
        .first()
        .and_then(|s| s.steps.first())
        .and_then(|step| match &step.argument {
            Some(StepArgument::DataTable(table)) => Some(table.clone()),
            _ => None,
        });
    let result = table.map(|t| t.ensure_rectangular());
    assert_eq!(
        result,
        Some(Err(ParserError::inconsistent_cell_count(Location::new(5, 7))))
    );
}

#[test]
fn error_location_is_exposed() {
    let err = parse_err("Feature: F\n  Background:\n  Background:\n");
    assert_eq!(err.map(|e| e.location()), Some(Location::new(3, 3)));
}
