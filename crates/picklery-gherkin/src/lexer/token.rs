//! Lexical units produced by the lexer.

use std::fmt;

use serde::Serialize;

use crate::ast::StepKeywordType;
use crate::location::Location;

/// What a source line was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// `Feature:` line.
    FeatureLine,
    /// `Rule:` line.
    RuleLine,
    /// `Background:` line.
    BackgroundLine,
    /// `Scenario:` or `Example:` line.
    ScenarioLine,
    /// `Scenario Outline:` or `Scenario Template:` line.
    ScenarioOutlineLine,
    /// `Examples:` line.
    ExamplesLine,
    /// A step line.
    StepLine,
    /// A line of `@tags`.
    TagLine,
    /// A `#` comment.
    Comment,
    /// A `# language:` directive before any content.
    Language,
    /// An opening or closing doc-string delimiter.
    DocStringSeparator,
    /// A line inside a doc string.
    DocStringContent,
    /// A pipe-delimited table row.
    TableRow,
    /// A blank line.
    Empty,
    /// Free text, used for descriptions.
    Other,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FeatureLine => "#FeatureLine",
            Self::RuleLine => "#RuleLine",
            Self::BackgroundLine => "#BackgroundLine",
            Self::ScenarioLine => "#ScenarioLine",
            Self::ScenarioOutlineLine => "#ScenarioOutlineLine",
            Self::ExamplesLine => "#ExamplesLine",
            Self::StepLine => "#StepLine",
            Self::TagLine => "#TagLine",
            Self::Comment => "#Comment",
            Self::Language => "#Language",
            Self::DocStringSeparator => "#DocStringSeparator",
            Self::DocStringContent => "#DocStringContent",
            Self::TableRow => "#TableRow",
            Self::Empty => "#Empty",
            Self::Other => "#Other",
            Self::Eof => "#EOF",
        };
        f.write_str(name)
    }
}

/// A positioned fragment of a line: a tag or a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// 1-based column where the item starts.
    pub column: usize,
    /// The item's text.
    pub text: String,
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Classification of the line.
    pub kind: TokenKind,
    /// Line and column of the first significant character.
    pub location: Location,
    /// Matched keyword: structural and step keywords as written, or the
    /// doc-string delimiter.
    pub keyword: Option<String>,
    /// Keyword category for step lines.
    pub keyword_type: Option<StepKeywordType>,
    /// Text after the keyword; the whole line for comments and free text,
    /// the code for language directives.
    pub text: String,
    /// Tags of a tag line or cells of a table row.
    pub items: Vec<LineItem>,
    /// Media type written after an opening doc-string delimiter.
    pub media_type: Option<String>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, location: Location, text: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            keyword: None,
            keyword_type: None,
            text: text.into(),
            items: Vec::new(),
            media_type: None,
        }
    }

    pub(crate) fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Short human-readable description used in parse errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.to_string(),
            TokenKind::Empty => "an empty line".to_owned(),
            TokenKind::FeatureLine
            | TokenKind::RuleLine
            | TokenKind::BackgroundLine
            | TokenKind::ScenarioLine
            | TokenKind::ScenarioOutlineLine
            | TokenKind::ExamplesLine => {
                let keyword = self.keyword.as_deref().unwrap_or_default();
                format!("'{keyword}: {}'", self.text)
            }
            _ => {
                let keyword = self.keyword.as_deref().unwrap_or_default();
                format!("'{}{}'", keyword, self.text.trim())
            }
        }
    }
}
