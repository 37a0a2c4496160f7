//! Compilation of a [`GherkinDocument`] into flat, executable pickles.
//!
//! Backgrounds apply to the scenarios that follow them in their scope, tags
//! accumulate feature → rule → scenario → examples, and every body row of a
//! headed Examples table expands its outline once with `<placeholder>`
//! values substituted into the name, step text, table cells and doc string.

mod placeholder;
mod stream;

use serde::Serialize;

use crate::ast::{GherkinDocument, StepKeywordType};
use crate::location::Location;

pub use stream::PickleStream;

/// One concrete test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickle {
    /// Identifier, unique within one compilation.
    pub id: String,
    /// Source identifier of the document.
    pub uri: String,
    /// The scenario line, or the Examples row for an outline expansion.
    pub location: Location,
    /// Scenario name with placeholders substituted.
    pub name: String,
    /// Dialect code of the feature.
    pub language: String,
    /// Inherited and own tags, feature first.
    pub tags: Vec<PickleTag>,
    /// Background steps followed by the scenario's steps.
    pub steps: Vec<PickleStep>,
    /// The scenario id, plus the Examples row id for outline expansions.
    pub ast_node_ids: Vec<String>,
}

/// A tag attached to a pickle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickleTag {
    /// Tag name including `@`.
    pub name: String,
    /// Id of the tag node it came from.
    pub ast_node_id: String,
}

/// A step ready for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickleStep {
    /// Identifier, unique within one compilation.
    pub id: String,
    /// Step text after substitution, without the keyword.
    pub text: String,
    /// Category derived from the resolved keyword.
    #[serde(rename = "type")]
    pub step_type: PickleStepType,
    /// Substituted doc string or data table.
    pub argument: Option<PickleStepArgument>,
    /// The step id, plus the Examples row id for outline expansions.
    pub ast_node_ids: Vec<String>,
}

/// Category of a pickle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PickleStepType {
    /// Established by `Given`.
    Context,
    /// Performed by `When`.
    Action,
    /// Checked by `Then`.
    Outcome,
    /// `*`, or a conjunction with nothing to inherit from.
    Unknown,
}

impl From<StepKeywordType> for PickleStepType {
    fn from(keyword_type: StepKeywordType) -> Self {
        match keyword_type {
            StepKeywordType::Context => Self::Context,
            StepKeywordType::Action => Self::Action,
            StepKeywordType::Outcome => Self::Outcome,
            StepKeywordType::Conjunction | StepKeywordType::Unknown => Self::Unknown,
        }
    }
}

/// Block argument of a pickle step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PickleStepArgument {
    /// A doc string.
    DocString {
        /// Content with placeholders substituted.
        content: String,
        /// Media type, if one was written.
        #[serde(rename = "mediaType")]
        media_type: Option<String>,
    },
    /// A data table as rows of cell values.
    DataTable {
        /// Cell values, row by row.
        rows: Vec<Vec<String>>,
    },
}

/// Compile every pickle of `document` into a vector.
///
/// Equivalent to collecting a [`PickleStream`]; prefer the stream for
/// documents with very large Examples tables.
///
/// # Examples
/// ```
/// use picklery_gherkin::{ParseOptions, compile, parse};
///
/// let source = "Feature: F\n  Scenario Outline: Eat <n>\n    Given <n> cucumbers\n\n    Examples:\n      | n |\n      | 5 |\n      | 1 |\n";
/// let document = parse(source, &ParseOptions::new("f.feature")).expect("valid feature");
/// let names: Vec<_> = compile(&document).into_iter().map(|p| p.name).collect();
/// assert_eq!(names, vec!["Eat 5", "Eat 1"]);
/// ```
#[must_use]
pub fn compile(document: &GherkinDocument) -> Vec<Pickle> {
    let pickles: Vec<Pickle> = PickleStream::new(document).collect();
    log::debug!("compiled '{}' into {} pickles", document.uri, pickles.len());
    pickles
}
