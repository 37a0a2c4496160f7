//! Gherkin front end for picklery.
//!
//! Feature text flows through three stages:
//!
//! 1. [`tokenize`] classifies each line against a localised keyword table
//!    ([`DialectTable`]).
//! 2. [`parse`] builds a [`GherkinDocument`] with a recursive-descent
//!    [`Parser`].
//! 3. [`compile`] (or the lazy [`PickleStream`]) flattens the document into
//!    [`Pickle`]s: concrete test cases with backgrounds merged, tags
//!    inherited and outlines expanded.
//!
//! ```
//! use picklery_gherkin::{ParseOptions, compile, parse};
//!
//! let source = "Feature: Eating\n  Scenario: One\n    Given there are 5 cucumbers\n";
//! let document = parse(source, &ParseOptions::new("eating.feature")).expect("valid feature");
//! let pickles = compile(&document);
//! assert_eq!(pickles.len(), 1);
//! ```

pub mod ast;
pub mod config;
mod dialect;
mod ids;
mod lexer;
mod location;
mod parser;
mod pickles;

pub use ast::{GherkinDocument, StepKeywordType};
pub use config::ParseOptions;
pub use dialect::{Dialect, DialectError, DialectTable};
pub use ids::IdGenerator;
pub use lexer::{Lexer, LineItem, Token, TokenKind, Tokenized, tokenize};
pub use location::Location;
pub use parser::{Parser, ParserError, parse, parse_with_table};
pub use pickles::{
    Pickle, PickleStep, PickleStepArgument, PickleStepType, PickleStream, PickleTag, compile,
};

/// Parse `source` and hand a lazy pickle stream over the result to
/// `consume`.
///
/// The stream borrows the document, which lives only for this call; use
/// [`parse`] and [`PickleStream::new`] directly to keep the AST.
///
/// # Errors
/// Returns a [`ParserError`] when `source` is not a valid document.
///
/// # Examples
/// ```
/// use picklery_gherkin::{ParseOptions, compile_stream};
///
/// let source = "Feature: F\n  Scenario Outline: O\n    Given <n>\n    Examples:\n      | n |\n      | 1 |\n      | 2 |\n";
/// let options = ParseOptions::new("f.feature");
/// let count = compile_stream(source, &options, |stream| stream.count()).expect("valid feature");
/// assert_eq!(count, 2);
/// ```
pub fn compile_stream<T>(
    source: &str,
    options: &ParseOptions,
    consume: impl FnOnce(PickleStream<'_>) -> T,
) -> Result<T, ParserError> {
    let document = parse(source, options)?;
    Ok(consume(PickleStream::new(&document)))
}
