//! Abstract syntax tree produced by the parser.
//!
//! Nodes keep their children in source order. Feature and Rule children are
//! sum types so that a Background between two Scenarios stays exactly where
//! it was written.

use serde::Serialize;

use crate::location::Location;
use crate::parser::ParserError;

/// A parsed feature file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinDocument {
    /// Source identifier supplied by the caller.
    pub uri: String,
    /// The feature, absent for files holding only comments and blank lines.
    pub feature: Option<Feature>,
    /// Every comment line, excluding the `# language:` directive.
    pub comments: Vec<Comment>,
}

/// A `#` comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Where the comment starts.
    pub location: Location,
    /// The full line as written.
    pub text: String,
}

/// A `@tag` attached to a feature, rule, scenario or examples block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Node identifier.
    pub id: String,
    /// Where the tag starts.
    pub location: Location,
    /// Tag name including the leading `@`.
    pub name: String,
}

/// The root `Feature:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Where the keyword line starts.
    pub location: Location,
    /// Tags written above the keyword line.
    pub tags: Vec<Tag>,
    /// Dialect code the feature was parsed with.
    pub language: String,
    /// Keyword as written, e.g. `Feature` or `Fonctionnalité`.
    pub keyword: String,
    /// Text after the keyword's colon.
    pub name: String,
    /// Free text below the keyword line.
    pub description: Option<String>,
    /// Backgrounds, scenarios and rules in source order.
    pub children: Vec<FeatureChild>,
}

/// A child of a [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureChild {
    /// A feature-level background.
    Background(Background),
    /// A scenario or scenario outline.
    Scenario(Scenario),
    /// A `Rule:` grouping.
    Rule(Rule),
}

/// A `Rule:` block grouping scenarios under a business rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Node identifier.
    pub id: String,
    /// Where the keyword line starts.
    pub location: Location,
    /// Tags written above the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword as written.
    pub keyword: String,
    /// Text after the keyword's colon.
    pub name: String,
    /// Free text below the keyword line.
    pub description: Option<String>,
    /// Backgrounds and scenarios in source order.
    pub children: Vec<RuleChild>,
}

/// A child of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleChild {
    /// A rule-level background.
    Background(Background),
    /// A scenario or scenario outline.
    Scenario(Scenario),
}

/// Steps prepended to the scenarios that follow it in the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    /// Node identifier.
    pub id: String,
    /// Where the keyword line starts.
    pub location: Location,
    /// Keyword as written.
    pub keyword: String,
    /// Text after the keyword's colon.
    pub name: String,
    /// Free text below the keyword line.
    pub description: Option<String>,
    /// The background's steps.
    pub steps: Vec<Step>,
}

/// Which keyword introduced a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    /// `Scenario:` or `Example:`.
    Scenario,
    /// `Scenario Outline:` or `Scenario Template:`.
    Outline,
}

/// A scenario or scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Node identifier.
    pub id: String,
    /// Where the keyword line starts.
    pub location: Location,
    /// Tags written above the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword family used.
    pub kind: ScenarioKind,
    /// Keyword as written.
    pub keyword: String,
    /// Text after the keyword's colon; may contain `<placeholders>`.
    pub name: String,
    /// Free text below the keyword line.
    pub description: Option<String>,
    /// The scenario's own steps.
    pub steps: Vec<Step>,
    /// Examples tables, empty for plain scenarios.
    pub examples: Vec<Examples>,
}

impl Scenario {
    /// Whether the scenario expands against Examples tables.
    ///
    /// True for the outline keywords, and for a plain `Scenario:` that
    /// nonetheless carries Examples.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        self.kind == ScenarioKind::Outline || !self.examples.is_empty()
    }
}

/// How a step keyword relates to the step's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKeywordType {
    /// `Given`: establishes context.
    Context,
    /// `When`: performs an action.
    Action,
    /// `Then`: checks an outcome.
    Outcome,
    /// `And`/`But` with nothing before them to inherit from.
    Conjunction,
    /// `*`, or a keyword shared between categories.
    Unknown,
}

/// A single step line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Node identifier.
    pub id: String,
    /// Where the keyword starts.
    pub location: Location,
    /// Keyword as written, including its trailing space.
    pub keyword: String,
    /// Resolved keyword type; conjunctions inherit from earlier steps.
    pub keyword_type: StepKeywordType,
    /// Text after the keyword.
    pub text: String,
    /// Attached doc string or data table.
    pub argument: Option<StepArgument>,
}

/// The block argument attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepArgument {
    /// A `"""` or ```` ``` ```` block.
    DocString(DocString),
    /// A pipe-delimited table.
    DataTable(DataTable),
}

/// A multi-line string argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocString {
    /// Where the opening delimiter starts.
    pub location: Location,
    /// The delimiter used, `"""` or ```` ``` ````.
    pub delimiter: String,
    /// Optional media type written after the opening delimiter.
    pub media_type: Option<String>,
    /// Content lines joined with `\n`, indentation and escapes resolved.
    pub content: String,
}

/// A table argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    /// Where the first row starts.
    pub location: Location,
    /// Rows in source order.
    pub rows: Vec<TableRow>,
}

impl DataTable {
    /// Check that every row has as many cells as the first.
    ///
    /// # Errors
    /// Returns [`ParserError::InconsistentCellCount`] at the first row whose
    /// width differs.
    pub fn ensure_rectangular(&self) -> Result<(), ParserError> {
        ensure_rectangular(self.rows.iter())
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Node identifier.
    pub id: String,
    /// Where the row's first pipe starts.
    pub location: Location,
    /// Cells in column order.
    pub cells: Vec<TableCell>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Where the cell's value starts.
    pub location: Location,
    /// Trimmed, unescaped value.
    pub value: String,
}

/// An `Examples:` block of a scenario outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Examples {
    /// Node identifier.
    pub id: String,
    /// Where the keyword line starts.
    pub location: Location,
    /// Tags written above the keyword line.
    pub tags: Vec<Tag>,
    /// Keyword as written.
    pub keyword: String,
    /// Text after the keyword's colon, empty when omitted.
    pub name: String,
    /// Free text below the keyword line.
    pub description: Option<String>,
    /// Column names; `None` when the block has no table at all.
    pub header: Option<TableRow>,
    /// Value rows.
    pub body: Vec<TableRow>,
}

impl Examples {
    /// Check that every body row has as many cells as the header.
    ///
    /// # Errors
    /// Returns [`ParserError::InconsistentCellCount`] at the first row whose
    /// width differs.
    pub fn ensure_rectangular(&self) -> Result<(), ParserError> {
        ensure_rectangular(self.header.iter().chain(self.body.iter()))
    }
}

fn ensure_rectangular<'a>(mut rows: impl Iterator<Item = &'a TableRow>) -> Result<(), ParserError> {
    let Some(first) = rows.next() else {
        return Ok(());
    };
    let width = first.cells.len();
    rows.find(|row| row.cells.len() != width)
        .map_or(Ok(()), |row| Err(ParserError::inconsistent_cell_count(row.location)))
}
