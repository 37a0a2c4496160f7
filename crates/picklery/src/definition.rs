//! Step definitions: a pattern, an opaque handler and where it was declared.

use std::fmt;

/// Priority of a pattern kind; lower tiers win over higher ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternTier {
    /// Literal text compared for equality.
    Exact,
    /// A Cucumber Expression.
    Expression,
    /// A free-form regular expression.
    Regex,
}

/// The pattern text of a step definition and how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSource {
    /// Matches only this exact step text.
    Exact(String),
    /// A Cucumber Expression such as `I have {int} cucumber(s)`.
    Expression(String),
    /// A regular expression, used exactly as written.
    Regex(String),
}

impl PatternSource {
    /// The pattern text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact(text) | Self::Expression(text) | Self::Regex(text) => text,
        }
    }

    /// The priority tier this kind of pattern matches at.
    #[must_use]
    pub const fn tier(&self) -> PatternTier {
        match self {
            Self::Exact(_) => PatternTier::Exact,
            Self::Expression(_) => PatternTier::Expression,
            Self::Regex(_) => PatternTier::Regex,
        }
    }
}

impl fmt::Display for PatternSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(text) => write!(f, "\"{text}\""),
            Self::Expression(text) => f.write_str(text),
            Self::Regex(text) => write!(f, "/{text}/"),
        }
    }
}

/// Source position of a step definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file where the step is defined.
    pub file: &'static str,
    /// Line number within the source file.
    pub line: u32,
}

impl SourceLocation {
    /// Create a location.
    #[must_use]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A step definition registered with a [`StepMatcher`](crate::StepMatcher).
///
/// The handler is opaque to matching; it is handed back in the
/// [`StepMatch`](crate::StepMatch) for the caller to run.
///
/// # Examples
/// ```
/// use picklery::{PatternSource, SourceLocation, StepDefinition};
///
/// let definition = StepDefinition::new(
///     PatternSource::Expression("I have {int} cucumbers".into()),
///     "count_cucumbers",
///     SourceLocation::new("steps.rs", 12),
/// );
/// assert_eq!(definition.to_string(), "I have {int} cucumbers (steps.rs:12)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition<H> {
    /// Pattern the step text must match.
    pub pattern: PatternSource,
    /// Value returned with a successful match.
    pub handler: H,
    /// Where the definition was declared.
    pub location: SourceLocation,
}

impl<H> StepDefinition<H> {
    /// Create a definition.
    #[must_use]
    pub const fn new(pattern: PatternSource, handler: H, location: SourceLocation) -> Self {
        Self {
            pattern,
            handler,
            location,
        }
    }
}

impl<H> fmt::Display for StepDefinition<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pattern, self.location)
    }
}
