//! Step matching for Gherkin pickles.
//!
//! `picklery` ties the Gherkin front end ([`gherkin`]) to Cucumber
//! Expressions ([`expressions`]): feature text is compiled into
//! [`Pickle`]s, and each pickle step is resolved against a catalog of
//! [`StepDefinition`]s by a [`StepMatcher`].
//!
//! ```
//! use picklery::{ParameterTypeRegistry, ParseOptions, StepMatcher, compile, step_definition};
//!
//! let source = "Feature: Eating\n  Scenario: Lunch\n    Given I have 5 cucumbers\n    When I eat 3\n";
//! let pickles = compile(source, &ParseOptions::new("eating.feature")).expect("valid feature");
//!
//! let matcher = StepMatcher::new(
//!     vec![
//!         step_definition!(expression "I have {int} cucumber(s)", "stock"),
//!         step_definition!(regex r"^I eat (\d+)$", "eat"),
//!     ],
//!     ParameterTypeRegistry::default(),
//! );
//! let handlers: Vec<&str> = pickles
//!     .iter()
//!     .flat_map(|pickle| &pickle.steps)
//!     .filter_map(|step| matcher.match_step(step).ok().map(|found| *found.handler()))
//!     .collect();
//! assert_eq!(handlers, vec!["stock", "eat"]);
//! ```

mod definition;
mod macros;
mod matcher;
mod pattern;

pub use definition::{PatternSource, PatternTier, SourceLocation, StepDefinition};
pub use matcher::{CompileFailure, StepMatch, StepMatchError, StepMatcher};
pub use pattern::PatternError;

pub use picklery_expressions as expressions;
pub use picklery_gherkin as gherkin;

pub use picklery_expressions::{
    Argument, CucumberExpression, ExpressionError, GeneratedExpression, ParameterType,
    ParameterTypeError, ParameterTypeRegistry, ParameterValue, generate_expression,
};
pub use picklery_gherkin::{
    GherkinDocument, ParseOptions, ParserError, Pickle, PickleStep, PickleStepArgument,
    PickleStepType, PickleStream, PickleTag,
};

/// Parse feature text into a [`GherkinDocument`].
///
/// # Errors
/// Returns a [`ParserError`] when `source` is not a valid document.
pub fn parse(source: &str, options: &ParseOptions) -> Result<GherkinDocument, ParserError> {
    picklery_gherkin::parse(source, options)
}

/// Parse feature text and compile it into pickles in one call.
///
/// # Errors
/// Returns a [`ParserError`] when `source` is not a valid document.
///
/// # Examples
/// ```
/// use picklery::{ParseOptions, compile};
///
/// let source = "Feature: F\n  Scenario Outline: O <n>\n    Given <n>\n    Examples:\n      | n |\n      | 1 |\n      | 2 |\n";
/// let pickles = compile(source, &ParseOptions::new("f.feature")).expect("valid feature");
/// let names: Vec<_> = pickles.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["O 1", "O 2"]);
/// ```
pub fn compile(source: &str, options: &ParseOptions) -> Result<Vec<Pickle>, ParserError> {
    let document = parse(source, options)?;
    Ok(picklery_gherkin::compile(&document))
}
