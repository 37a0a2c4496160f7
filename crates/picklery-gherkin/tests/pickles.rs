//! End-to-end tests from feature text to pickles.
#![expect(clippy::expect_used, reason = "tests assert the happy path directly")]

use std::fmt::Write as _;

use picklery_gherkin::{
    ParseOptions, ParserError, Pickle, PickleStream, PickleStepType, compile, compile_stream,
    config, parse,
};
use rstest::{fixture, rstest};
use serial_test::serial;

#[fixture]
fn options() -> ParseOptions {
    ParseOptions::new("features/eating.feature").with_language("en")
}

fn names(pickles: &[Pickle]) -> Vec<&str> {
    pickles.iter().map(|p| p.name.as_str()).collect()
}

fn texts(pickle: &Pickle) -> Vec<&str> {
    pickle.steps.iter().map(|s| s.text.as_str()).collect()
}

#[rstest]
fn outline_expands_once_per_row(options: ParseOptions) {
    let source = "Feature: F\n  Scenario Outline: Eat <n>\n    Given there are <n> cucumbers\n\n    Examples:\n      | n |\n      | 5 |\n      | 1 |";
    let document = parse(source, &options).expect("valid feature");
    let pickles = compile(&document);
    assert_eq!(names(&pickles), vec!["Eat 5", "Eat 1"]);
    let steps: Vec<Vec<&str>> = pickles.iter().map(texts).collect();
    assert_eq!(
        steps,
        vec![
            vec!["there are 5 cucumbers"],
            vec!["there are 1 cucumbers"]
        ]
    );
}

#[rstest]
fn wildcard_after_given_is_unknown(options: ParseOptions) {
    let source = "Feature: F\n  Scenario: S\n    Given a basket\n    * an apple\n";
    let pickles = compile(&parse(source, &options).expect("valid feature"));
    let types: Vec<PickleStepType> = pickles
        .iter()
        .flat_map(|p| &p.steps)
        .map(|s| s.step_type)
        .collect();
    assert_eq!(types, vec![PickleStepType::Context, PickleStepType::Unknown]);
}

#[rstest]
fn background_applies_only_to_later_scenarios(options: ParseOptions) {
    let source = concat!(
        "Feature: F\n",
        "  Scenario: early\n",
        "    When I eat\n",
        "  Background:\n",
        "    Given a basket\n",
        "  Scenario: late\n",
        "    When I eat\n",
    );
    let pickles = compile(&parse(source, &options).expect("valid feature"));
    let steps: Vec<Vec<&str>> = pickles.iter().map(texts).collect();
    assert_eq!(steps, vec![vec!["I eat"], vec!["a basket", "I eat"]]);
}

#[rstest]
fn plain_scenarios_keep_placeholders_verbatim(options: ParseOptions) {
    let source = "Feature: F\n  Background:\n    Given <a>\n  Scenario: S\n    Then <b>\n";
    let pickles = compile(&parse(source, &options).expect("valid feature"));
    assert_eq!(pickles.first().map(texts), Some(vec!["<a>", "<b>"]));
}

#[rstest]
#[case::one_block(&[3], 3)]
#[case::several_blocks(&[2, 0, 4], 6)]
#[case::only_empty_blocks(&[0, 0], 0)]
#[case::no_blocks(&[], 0)]
fn outline_cardinality_is_the_sum_of_rows(
    options: ParseOptions,
    #[case] rows_per_block: &[usize],
    #[case] expected: usize,
) {
    let mut source = String::from("Feature: F\n  Scenario Outline: O\n    Given <v>\n");
    for rows in rows_per_block {
        source.push_str("    Examples:\n      | v |\n");
        for row in 0..*rows {
            writeln!(source, "      | {row} |").expect("writing to a String");
        }
    }
    let document = parse(&source, &options).expect("valid feature");
    assert_eq!(compile(&document).len(), expected);
}

#[rstest]
fn compilation_is_idempotent(options: ParseOptions) {
    let source = concat!(
        "@f\n",
        "Feature: F\n",
        "  Rule: R\n",
        "    @s\n",
        "    Scenario Outline: O <x>\n",
        "      Given <x>\n",
        "      @e\n",
        "      Examples:\n",
        "        | x |\n",
        "        | 1 |\n",
        "        | 2 |\n",
    );
    let document = parse(source, &options).expect("valid feature");
    let first = compile(&document);
    assert_eq!(first, compile(&document));
    assert_eq!(first, PickleStream::new(&document).collect::<Vec<_>>());
    let tags: Vec<&str> = first
        .first()
        .map(|p| p.tags.iter().map(|t| t.name.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(tags, vec!["@f", "@s", "@e"]);
}

#[rstest]
fn streaming_expands_large_tables_lazily(options: ParseOptions) {
    const ROWS: usize = 100_000;
    let mut source = String::from(
        "Feature: F\n  Scenario Outline: row <i>\n    Given row <i> of the table\n    Examples:\n      | i |\n",
    );
    for row in 0..ROWS {
        writeln!(source, "      | {row} |").expect("writing to a String");
    }
    let document = parse(&source, &options).expect("valid feature");
    let mut stream = PickleStream::new(&document);
    let first = stream.next().map(|p| p.name);
    assert_eq!(first.as_deref(), Some("row 0"));
    let (count, last) = stream.fold((1usize, None), |(count, _), pickle| {
        (count + 1, Some(pickle.name))
    });
    assert_eq!(count, ROWS);
    assert_eq!(last.as_deref(), Some("row 99999"));
}

#[rstest]
fn independent_streams_yield_the_same_sequence(options: ParseOptions) {
    let source = "Feature: F\n  Scenario Outline: O\n    Given <n>\n    Examples:\n      | n |\n      | a |\n      | b |\n";
    let document = parse(source, &options).expect("valid feature");
    let mut first = PickleStream::new(&document);
    let mut second = PickleStream::new(&document);
    assert_eq!(first.next(), second.next());
    assert_eq!(first.next(), second.next());
    assert!(first.next().is_none());
    assert!(first.next().is_none());
}

#[rstest]
fn duplicate_background_is_a_parse_error(options: ParseOptions) {
    let source = "Feature: F\n  Background:\n    Given a\n  Background:\n    Given b\n";
    let err = parse(source, &options).expect_err("duplicate background");
    assert!(matches!(err, ParserError::DuplicateBackground { .. }));
    assert_eq!(err.location().line, 4);
}

#[rstest]
fn compile_stream_parses_and_consumes(options: ParseOptions) {
    let source = "Feature: F\n  Scenario: a\n  Scenario: b\n";
    let collected = compile_stream(source, &options, |stream| {
        stream.map(|p| p.name).collect::<Vec<_>>()
    })
    .expect("valid feature");
    assert_eq!(collected, vec!["a".to_owned(), "b".to_owned()]);
}

#[rstest]
fn compile_stream_counts_outline_rows(options: ParseOptions) {
    let source = "Feature: F\n  Scenario Outline: O\n    Given <n>\n    Examples:\n      | n |\n      | 1 |\n      | 2 |\n";
    let count = compile_stream(source, &options, |stream| stream.count()).expect("valid feature");
    assert_eq!(count, 2);
}

#[test]
fn language_directive_selects_french_keywords() {
    let source = concat!(
        "# language: fr\n",
        "Fonctionnalité: Manger\n",
        "  Plan du scénario: Manger <n>\n",
        "    Soit <n> concombres\n",
        "    Et que tout va bien\n",
        "    Exemples:\n",
        "      | n |\n",
        "      | 3 |\n",
    );
    let document = parse(source, &ParseOptions::new("fr.feature")).expect("valid feature");
    let pickles = compile(&document);
    let [pickle] = pickles.as_slice() else {
        panic!("expected one pickle, got {}", pickles.len());
    };
    assert_eq!(pickle.language, "fr");
    assert_eq!(pickle.name, "Manger 3");
    assert_eq!(texts(pickle), vec!["3 concombres", "tout va bien"]);
    let types: Vec<_> = pickle.steps.iter().map(|s| s.step_type).collect();
    assert_eq!(types, vec![PickleStepType::Context, PickleStepType::Context]);
    assert!(document.comments.is_empty());
}

#[test]
#[serial]
fn unknown_language_falls_back_to_the_default() {
    config::clear_default_language_override();
    let options = ParseOptions::new("xx.feature").with_language("xx");
    let document = parse("#language: xx\nFeature: F\n", &options).expect("valid feature");
    assert_eq!(
        document.feature.map(|f| f.language),
        Some(config::default_language())
    );
}

#[test]
#[serial]
fn configured_default_language_is_used() {
    config::set_default_language("de");
    let document = parse(
        "Funktionalität: Essen\n  Szenario: Eins\n    Angenommen ich habe Hunger\n",
        &ParseOptions::new("de.feature"),
    );
    config::clear_default_language_override();
    let pickles = compile(&document.expect("valid feature"));
    assert_eq!(pickles.first().map(|p| p.language.as_str()), Some("de"));
}
