//! Line-oriented lexer turning feature source into classified tokens.
//!
//! Each line becomes exactly one [`Token`]; the stream always ends with a
//! single [`TokenKind::Eof`]. The only state carried between lines is the
//! active dialect and whether a doc string is open.

mod table;
mod token;

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::StepKeywordType;
use crate::config;
use crate::dialect::{Dialect, DialectTable};
use crate::location::Location;

pub use token::{LineItem, Token, TokenKind};

const QUOTE_DELIMITER: &str = "\"\"\"";
const BACKTICK_DELIMITER: &str = "```";

static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#\s*language\s*:\s*(\S+)\s*$")
        .unwrap_or_else(|_| unreachable!("language directive regex is valid"))
});

/// The token stream of one document, with the dialect it was lexed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Dialect code in effect for the document's content.
    pub language: String,
    /// One token per line, followed by [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
}

/// Tokenize `source` starting in [`config::FALLBACK_LANGUAGE`] unless a
/// `# language:` directive selects another dialect.
///
/// The process-wide default language is not consulted while `table`
/// contains the fallback dialect; [`crate::parse`] applies it through
/// [`ParseOptions`](crate::ParseOptions). Use [`Lexer::new`] to start in a
/// specific dialect.
///
/// # Examples
/// ```
/// use picklery_gherkin::{DialectTable, TokenKind, tokenize};
///
/// let tokenized = tokenize("Feature: Eating\n  Scenario: One\n", DialectTable::builtin());
/// let kinds: Vec<_> = tokenized.tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::FeatureLine, TokenKind::ScenarioLine, TokenKind::Eof]
/// );
/// ```
#[must_use]
pub fn tokenize(source: &str, table: &DialectTable) -> Tokenized {
    Lexer::new(table, config::FALLBACK_LANGUAGE).tokenize(source)
}

#[derive(Debug, Clone, Copy)]
struct OpenDocString {
    delimiter: &'static str,
    indent: usize,
}

/// Lexer bound to a keyword table and a starting dialect.
#[derive(Debug)]
pub struct Lexer<'t> {
    table: &'t DialectTable,
    language: String,
    dialect: &'t Dialect,
    step_keywords: Vec<(&'t str, StepKeywordType)>,
    doc_string: Option<OpenDocString>,
    seen_content: bool,
}

impl<'t> Lexer<'t> {
    /// Create a lexer starting in `language`, falling back to the default
    /// dialect when the table lacks it.
    #[must_use]
    pub fn new(table: &'t DialectTable, language: &str) -> Self {
        let (code, dialect) = table.resolve(language);
        Self {
            table,
            language: code.to_owned(),
            dialect,
            step_keywords: dialect.step_keywords(),
            doc_string: None,
            seen_content: false,
        }
    }

    /// Classify every line of `source`.
    #[must_use]
    pub fn tokenize(mut self, source: &str) -> Tokenized {
        let mut tokens = Vec::new();
        let mut line_count = 0usize;
        for (index, line) in source.lines().enumerate() {
            line_count = index + 1;
            let token = self.match_line(line_count, line);
            if !matches!(
                token.kind,
                TokenKind::Empty | TokenKind::Comment | TokenKind::Language
            ) {
                self.seen_content = true;
            }
            tokens.push(token);
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            Location::new(line_count + 1, 0),
            "",
        ));
        log::trace!(
            "tokenized {line_count} lines in dialect '{}'",
            self.language
        );
        Tokenized {
            language: self.language,
            tokens,
        }
    }

    fn switch_language(&mut self, requested: &str) {
        let (code, dialect) = self.table.resolve(requested);
        code.clone_into(&mut self.language);
        self.dialect = dialect;
        self.step_keywords = dialect.step_keywords();
    }

    fn match_line(&mut self, line_number: usize, line: &str) -> Token {
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        let trimmed = line.trim_start();
        let location = Location::new(line_number, indent + 1);

        if let Some(open) = self.doc_string {
            return self.match_doc_string_line(open, line_number, line, location);
        }
        if trimmed.is_empty() {
            return Token::new(TokenKind::Empty, location, "");
        }
        if trimmed.starts_with('#') {
            return self.match_comment(line, location);
        }
        if trimmed.starts_with('@') {
            let mut token = Token::new(TokenKind::TagLine, location, trimmed.trim_end());
            token.items = table::split_tags(line);
            return token;
        }
        if let Some(token) = self.match_doc_string_open(trimmed, indent, location) {
            return token;
        }
        if trimmed.starts_with('|') {
            let mut token = Token::new(TokenKind::TableRow, location, trimmed.trim_end());
            token.items = table::split_cells(line);
            return token;
        }
        if let Some(token) = self.match_structural(trimmed, location) {
            return token;
        }
        if let Some(token) = self.match_step(trimmed, location) {
            return token;
        }
        Token::new(TokenKind::Other, location, line.trim_end())
    }

    fn match_doc_string_line(
        &mut self,
        open: OpenDocString,
        line_number: usize,
        line: &str,
        location: Location,
    ) -> Token {
        if line.trim_start().starts_with(open.delimiter) {
            self.doc_string = None;
            return Token::new(TokenKind::DocStringSeparator, location, "")
                .with_keyword(open.delimiter);
        }
        let content = strip_indent(line, open.indent);
        let escaped: String = open.delimiter.chars().flat_map(|c| ['\\', c]).collect();
        Token::new(
            TokenKind::DocStringContent,
            Location::new(line_number, 1),
            content.replace(&escaped, open.delimiter),
        )
    }

    fn match_comment(&mut self, line: &str, location: Location) -> Token {
        if !self.seen_content {
            let code = LANGUAGE_RE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_owned());
            if let Some(code) = code {
                self.switch_language(&code);
                return Token::new(TokenKind::Language, location, code);
            }
        }
        Token::new(TokenKind::Comment, Location::new(location.line, 1), line)
    }

    fn match_doc_string_open(
        &mut self,
        trimmed: &str,
        indent: usize,
        location: Location,
    ) -> Option<Token> {
        let delimiter = [QUOTE_DELIMITER, BACKTICK_DELIMITER]
            .into_iter()
            .find(|delimiter| trimmed.starts_with(delimiter))?;
        let media_type = trimmed
            .get(delimiter.len()..)
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
            .map(str::to_owned);
        self.doc_string = Some(OpenDocString { delimiter, indent });
        let mut token =
            Token::new(TokenKind::DocStringSeparator, location, "").with_keyword(delimiter);
        token.media_type = media_type;
        Some(token)
    }

    fn match_structural(&self, trimmed: &str, location: Location) -> Option<Token> {
        let dialect = self.dialect;
        let categories = [
            (TokenKind::FeatureLine, &dialect.feature),
            (TokenKind::RuleLine, &dialect.rule),
            (TokenKind::BackgroundLine, &dialect.background),
            (TokenKind::ScenarioOutlineLine, &dialect.scenario_outline),
            (TokenKind::ScenarioLine, &dialect.scenario),
            (TokenKind::ExamplesLine, &dialect.examples),
        ];
        categories.into_iter().find_map(|(kind, keywords)| {
            keywords.iter().find_map(|keyword| {
                let rest = trimmed.strip_prefix(keyword.as_str())?.strip_prefix(':')?;
                Some(Token::new(kind, location, rest.trim()).with_keyword(keyword.as_str()))
            })
        })
    }

    fn match_step(&self, trimmed: &str, location: Location) -> Option<Token> {
        self.step_keywords
            .iter()
            .find_map(|&(keyword, keyword_type)| {
                let rest = trimmed.strip_prefix(keyword)?;
                let mut token =
                    Token::new(TokenKind::StepLine, location, rest.trim_end()).with_keyword(keyword);
                token.keyword_type = Some(keyword_type);
                Some(token)
            })
    }
}

/// Remove up to `indent` leading whitespace characters; a line with less
/// leading whitespace than that is returned unchanged.
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut chars = line.char_indices();
    for _ in 0..indent {
        match chars.next() {
            Some((_, c)) if c.is_whitespace() => {}
            _ => return line,
        }
    }
    chars
        .next()
        .and_then(|(offset, _)| line.get(offset..))
        .unwrap_or_default()
}
