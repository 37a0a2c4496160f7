//! Recursive-descent parser building a [`GherkinDocument`] from tokens.
//!
//! The parser walks the token stream with a single forward cursor. Comments
//! and blank lines are skipped everywhere (comments are kept on the
//! document) and two places look further ahead: a run of tag lines is
//! attributed to a following `Rule:` or `Examples:` line before the current
//! scope decides whether it is finished.

mod error;

use crate::ast::{
    Background, Comment, DataTable, DocString, Examples, Feature, FeatureChild, GherkinDocument,
    Rule, RuleChild, Scenario, ScenarioKind, Step, StepArgument, StepKeywordType, TableCell,
    TableRow, Tag,
};
use crate::config::ParseOptions;
use crate::dialect::DialectTable;
use crate::ids::IdGenerator;
use crate::lexer::{Lexer, Token, TokenKind, Tokenized};
use crate::location::Location;

pub use error::ParserError;

const FEATURE_CHILD: &[TokenKind] = &[
    TokenKind::Eof,
    TokenKind::BackgroundLine,
    TokenKind::TagLine,
    TokenKind::ScenarioLine,
    TokenKind::ScenarioOutlineLine,
    TokenKind::RuleLine,
];
const SCENARIO_START: &[TokenKind] = &[TokenKind::ScenarioLine, TokenKind::ScenarioOutlineLine];

/// Parse `source` with the built-in keyword table.
///
/// # Errors
/// Returns a [`ParserError`] describing the first structural problem.
///
/// # Examples
/// ```
/// use picklery_gherkin::{ParseOptions, parse};
///
/// let document = parse("Feature: Eating\n", &ParseOptions::new("eating.feature"))
///     .expect("valid feature");
/// assert_eq!(document.feature.map(|f| f.name), Some("Eating".to_owned()));
/// ```
pub fn parse(source: &str, options: &ParseOptions) -> Result<GherkinDocument, ParserError> {
    parse_with_table(source, DialectTable::builtin(), options)
}

/// Parse `source` using a caller-supplied keyword table.
///
/// # Errors
/// Returns a [`ParserError`] describing the first structural problem.
pub fn parse_with_table(
    source: &str,
    table: &DialectTable,
    options: &ParseOptions,
) -> Result<GherkinDocument, ParserError> {
    let tokenized = Lexer::new(table, &options.initial_language()).tokenize(source);
    Parser::new(tokenized, options.uri.clone()).parse()
}

/// Builds the AST of one document from its token stream.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    eof: Token,
    language: String,
    uri: String,
    ids: IdGenerator,
    comments: Vec<Comment>,
}

impl Parser {
    /// Prepare to parse `tokenized`, recording `uri` on the document.
    #[must_use]
    pub fn new(tokenized: Tokenized, uri: impl Into<String>) -> Self {
        let Tokenized { language, tokens } = tokenized;
        let eof = tokens
            .last()
            .filter(|token| token.kind == TokenKind::Eof)
            .cloned()
            .unwrap_or_else(|| {
                let line = tokens.last().map_or(1, |token| token.location.line + 1);
                Token::new(TokenKind::Eof, Location::new(line, 0), "")
            });
        Self {
            tokens,
            position: 0,
            eof,
            language,
            uri: uri.into(),
            ids: IdGenerator::new(),
            comments: Vec::new(),
        }
    }

    /// Consume the token stream and build the document.
    ///
    /// # Errors
    /// Returns a [`ParserError`] describing the first structural problem.
    pub fn parse(mut self) -> Result<GherkinDocument, ParserError> {
        self.skip_trivia();
        let feature = if self.kind() == TokenKind::Eof {
            None
        } else {
            Some(self.parse_feature()?)
        };
        self.skip_trivia();
        self.expect_end()?;
        log::debug!(
            "parsed '{}': {} tokens, {} feature children, {} comments",
            self.uri,
            self.tokens.len(),
            feature.as_ref().map_or(0, |f| f.children.len()),
            self.comments.len()
        );
        Ok(GherkinDocument {
            uri: self.uri,
            feature,
            comments: self.comments,
        })
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, ParserError> {
        if kinds.contains(&self.kind()) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kinds))
        }
    }

    fn expect_end(&self) -> Result<(), ParserError> {
        if self.kind() == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected(&[TokenKind::Eof]))
        }
    }

    fn unexpected(&self, kinds: &[TokenKind]) -> ParserError {
        let token = self.current();
        let expected = kinds
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        if token.kind == TokenKind::Eof {
            ParserError::UnexpectedEof {
                location: token.location,
                expected,
            }
        } else {
            ParserError::UnexpectedToken {
                location: token.location,
                expected,
                found: token.describe(),
            }
        }
    }

    fn take_comment(&mut self) {
        let token = self.advance();
        self.comments.push(Comment {
            location: token.location,
            text: token.text,
        });
    }

    /// Skip blank lines, comments and the language directive, keeping the
    /// comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Comment => self.take_comment(),
                TokenKind::Empty | TokenKind::Language => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Whether the tag lines at the cursor (possibly interleaved with
    /// comments and blank lines) are followed by one of `kinds`.
    fn tags_precede(&self, kinds: &[TokenKind]) -> bool {
        self.tokens
            .iter()
            .skip(self.position)
            .find(|token| {
                !matches!(
                    token.kind,
                    TokenKind::TagLine | TokenKind::Comment | TokenKind::Empty
                )
            })
            .is_some_and(|token| kinds.contains(&token.kind))
    }

    fn parse_tags(&mut self) -> Vec<Tag> {
        let mut tags = Vec::new();
        loop {
            self.skip_trivia();
            if self.kind() != TokenKind::TagLine {
                break;
            }
            let token = self.advance();
            for item in token.items {
                tags.push(Tag {
                    id: self.ids.next_id(),
                    location: Location::new(token.location.line, item.column),
                    name: item.text,
                });
            }
        }
        tags
    }

    /// Collect free text below a keyword line. Internal blank lines are
    /// kept, trailing ones dropped; no text at all yields `None`.
    fn parse_description(&mut self) -> Option<String> {
        let mut lines: Vec<String> = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Other => lines.push(self.advance().text),
                TokenKind::Empty => {
                    self.advance();
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                }
                TokenKind::Comment => self.take_comment(),
                _ => break,
            }
        }
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    fn parse_feature(&mut self) -> Result<Feature, ParserError> {
        let tags = self.parse_tags();
        let header = self.expect(&[TokenKind::FeatureLine])?;
        let description = self.parse_description();
        let mut children = Vec::new();
        let mut background_seen = false;
        loop {
            self.skip_trivia();
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::BackgroundLine => children.push(FeatureChild::Background(
                    self.parse_background(&mut background_seen)?,
                )),
                TokenKind::RuleLine => children.push(FeatureChild::Rule(self.parse_rule()?)),
                TokenKind::TagLine if self.tags_precede(&[TokenKind::RuleLine]) => {
                    children.push(FeatureChild::Rule(self.parse_rule()?));
                }
                TokenKind::TagLine | TokenKind::ScenarioLine | TokenKind::ScenarioOutlineLine => {
                    children.push(FeatureChild::Scenario(self.parse_scenario()?));
                }
                _ => return Err(self.unexpected(FEATURE_CHILD)),
            }
        }
        Ok(Feature {
            location: header.location,
            tags,
            language: self.language.clone(),
            keyword: header.keyword.unwrap_or_default(),
            name: header.text,
            description,
            children,
        })
    }

    fn parse_rule(&mut self) -> Result<Rule, ParserError> {
        let tags = self.parse_tags();
        let header = self.expect(&[TokenKind::RuleLine])?;
        let description = self.parse_description();
        let mut children = Vec::new();
        let mut background_seen = false;
        loop {
            self.skip_trivia();
            match self.kind() {
                TokenKind::BackgroundLine => children.push(RuleChild::Background(
                    self.parse_background(&mut background_seen)?,
                )),
                TokenKind::TagLine if self.tags_precede(&[TokenKind::RuleLine]) => break,
                TokenKind::TagLine | TokenKind::ScenarioLine | TokenKind::ScenarioOutlineLine => {
                    children.push(RuleChild::Scenario(self.parse_scenario()?));
                }
                _ => break,
            }
        }
        Ok(Rule {
            id: self.ids.next_id(),
            location: header.location,
            tags,
            keyword: header.keyword.unwrap_or_default(),
            name: header.text,
            description,
            children,
        })
    }

    fn parse_background(&mut self, seen: &mut bool) -> Result<Background, ParserError> {
        let header = self.expect(&[TokenKind::BackgroundLine])?;
        if *seen {
            return Err(ParserError::DuplicateBackground {
                location: header.location,
            });
        }
        *seen = true;
        let description = self.parse_description();
        let steps = self.parse_steps()?;
        Ok(Background {
            id: self.ids.next_id(),
            location: header.location,
            keyword: header.keyword.unwrap_or_default(),
            name: header.text,
            description,
            steps,
        })
    }

    fn parse_scenario(&mut self) -> Result<Scenario, ParserError> {
        let tags = self.parse_tags();
        let header = self.expect(SCENARIO_START)?;
        let kind = if header.kind == TokenKind::ScenarioOutlineLine {
            ScenarioKind::Outline
        } else {
            ScenarioKind::Scenario
        };
        let description = self.parse_description();
        let steps = self.parse_steps()?;
        let mut examples = Vec::new();
        loop {
            self.skip_trivia();
            let starts_examples = match self.kind() {
                TokenKind::ExamplesLine => true,
                TokenKind::TagLine => self.tags_precede(&[TokenKind::ExamplesLine]),
                _ => false,
            };
            if !starts_examples {
                break;
            }
            examples.push(self.parse_examples()?);
        }
        Ok(Scenario {
            id: self.ids.next_id(),
            location: header.location,
            tags,
            kind,
            keyword: header.keyword.unwrap_or_default(),
            name: header.text,
            description,
            steps,
            examples,
        })
    }

    fn parse_examples(&mut self) -> Result<Examples, ParserError> {
        let tags = self.parse_tags();
        let header_line = self.expect(&[TokenKind::ExamplesLine])?;
        let description = self.parse_description();
        let mut rows = self.parse_rows().into_iter();
        let header = rows.next();
        Ok(Examples {
            id: self.ids.next_id(),
            location: header_line.location,
            tags,
            keyword: header_line.keyword.unwrap_or_default(),
            name: header_line.text,
            description,
            header,
            body: rows.collect(),
        })
    }

    fn parse_steps(&mut self) -> Result<Vec<Step>, ParserError> {
        let mut steps = Vec::new();
        let mut previous: Option<StepKeywordType> = None;
        loop {
            self.skip_trivia();
            if self.kind() != TokenKind::StepLine {
                break;
            }
            let token = self.advance();
            let keyword_type = match token.keyword_type.unwrap_or(StepKeywordType::Unknown) {
                StepKeywordType::Conjunction => previous.unwrap_or(StepKeywordType::Conjunction),
                StepKeywordType::Unknown => StepKeywordType::Unknown,
                resolved => {
                    previous = Some(resolved);
                    resolved
                }
            };
            let argument = self.parse_step_argument()?;
            steps.push(Step {
                id: self.ids.next_id(),
                location: token.location,
                keyword: token.keyword.unwrap_or_default(),
                keyword_type,
                text: token.text,
                argument,
            });
        }
        Ok(steps)
    }

    fn parse_step_argument(&mut self) -> Result<Option<StepArgument>, ParserError> {
        self.skip_trivia();
        match self.kind() {
            TokenKind::DocStringSeparator => {
                Ok(Some(StepArgument::DocString(self.parse_doc_string()?)))
            }
            TokenKind::TableRow => {
                let location = self.current().location;
                let rows = self.parse_rows();
                Ok(Some(StepArgument::DataTable(DataTable { location, rows })))
            }
            _ => Ok(None),
        }
    }

    fn parse_doc_string(&mut self) -> Result<DocString, ParserError> {
        let open = self.expect(&[TokenKind::DocStringSeparator])?;
        let mut lines: Vec<String> = Vec::new();
        loop {
            match self.kind() {
                TokenKind::DocStringContent => lines.push(self.advance().text),
                TokenKind::DocStringSeparator => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected(&[TokenKind::DocStringSeparator])),
            }
        }
        Ok(DocString {
            location: open.location,
            delimiter: open.keyword.unwrap_or_default(),
            media_type: open.media_type,
            content: lines.join("\n"),
        })
    }

    fn parse_rows(&mut self) -> Vec<TableRow> {
        let mut rows = Vec::new();
        loop {
            self.skip_trivia();
            if self.kind() != TokenKind::TableRow {
                break;
            }
            let token = self.advance();
            let line = token.location.line;
            rows.push(TableRow {
                id: self.ids.next_id(),
                location: token.location,
                cells: token
                    .items
                    .into_iter()
                    .map(|item| TableCell {
                        location: Location::new(line, item.column),
                        value: item.text,
                    })
                    .collect(),
            });
        }
        rows
    }
}

#[cfg(test)]
mod tests;
