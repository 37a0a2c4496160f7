//! Errors reported by the step matcher.

use picklery_expressions::{GeneratedExpression, ParameterTypeError};
use thiserror::Error;

use crate::definition::{PatternSource, SourceLocation};
use crate::pattern::PatternError;

/// Why step text did not resolve to exactly one usable definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepMatchError {
    /// No definition matches the text.
    #[error("undefined step '{text}'; a definition could use the expression '{}'", .snippet.source)]
    Undefined {
        /// The step text.
        text: String,
        /// Suggested expression for a new definition.
        snippet: GeneratedExpression,
    },
    /// Several definitions match at the best priority tier.
    #[error("ambiguous step '{text}' matches: {}", .candidates.join(", "))]
    Ambiguous {
        /// The step text.
        text: String,
        /// Each colliding definition as `pattern (file:line)`.
        candidates: Vec<String>,
    },
    /// The matching definition's parameter type rejected a capture.
    #[error("step '{text}' matched {pattern} ({location}) but {source}")]
    Transform {
        /// The step text.
        text: String,
        /// Pattern of the matching definition.
        pattern: PatternSource,
        /// Location of the matching definition.
        location: SourceLocation,
        /// The rejected conversion.
        source: ParameterTypeError,
    },
}

/// A definition whose pattern failed to compile and therefore never matches.
#[derive(Debug)]
pub struct CompileFailure {
    /// The pattern as written.
    pub pattern: PatternSource,
    /// Where the definition was declared.
    pub location: SourceLocation,
    /// What went wrong.
    pub error: PatternError,
}
