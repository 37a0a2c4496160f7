//! Error types shared by the expression and parameter-type modules.

use thiserror::Error;

/// Errors surfaced while compiling a Cucumber Expression into a regular
/// expression.
///
/// Positions are zero-based byte offsets into the expression source.
///
/// # Examples
/// ```
/// use picklery_expressions::{ExpressionError, ParameterTypeRegistry, build_regex_from_expression};
///
/// let registry = ParameterTypeRegistry::default();
/// let err = build_regex_from_expression("I have {color} cukes", &registry)
///     .expect_err("color is not a registered parameter type");
/// assert!(matches!(err, ExpressionError::UndefinedParameterType { .. }));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExpressionError {
    /// A `{` was never closed.
    #[error("missing closing '}}' for parameter opened at byte {position}")]
    UnterminatedParameter {
        /// Offset of the opening brace.
        position: usize,
    },
    /// A `(` was never closed.
    #[error("missing closing ')' for optional text opened at byte {position}")]
    UnterminatedOptional {
        /// Offset of the opening parenthesis.
        position: usize,
    },
    /// `()` with nothing inside.
    #[error("optional text at byte {position} may not be empty")]
    EmptyOptional {
        /// Offset of the opening parenthesis.
        position: usize,
    },
    /// A `(` inside optional text.
    #[error("optional text at byte {position} may not contain another optional")]
    NestedOptional {
        /// Offset of the nested parenthesis.
        position: usize,
    },
    /// A `{` inside optional text.
    #[error("optional text at byte {position} may not contain a parameter")]
    ParameterInOptional {
        /// Offset of the offending brace.
        position: usize,
    },
    /// A parameter used as (part of) an alternative.
    #[error("alternation at byte {position} may not contain a parameter")]
    ParameterInAlternation {
        /// Offset of the offending parameter.
        position: usize,
    },
    /// An alternative with no literal text, e.g. `a//b` or `(s)/x`.
    #[error("alternative at byte {position} may not be empty or consist only of optional text")]
    EmptyAlternative {
        /// Offset of the alternation segment.
        position: usize,
    },
    /// A structural character that closes nothing.
    #[error("unexpected '{character}' at byte {position}")]
    UnexpectedCharacter {
        /// The stray character.
        character: char,
        /// Offset of the character.
        position: usize,
    },
    /// A `{name}` that is not registered.
    #[error("undefined parameter type '{name}' at byte {position}")]
    UndefinedParameterType {
        /// Parameter type name as written.
        name: String,
        /// Offset of the opening brace.
        position: usize,
    },
    /// The generated regex source failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl ExpressionError {
    /// Byte offset in the expression source where compilation failed, when
    /// the failure is positional.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnterminatedParameter { position }
            | Self::UnterminatedOptional { position }
            | Self::EmptyOptional { position }
            | Self::NestedOptional { position }
            | Self::ParameterInOptional { position }
            | Self::ParameterInAlternation { position }
            | Self::EmptyAlternative { position }
            | Self::UnexpectedCharacter { position, .. }
            | Self::UndefinedParameterType { position, .. } => Some(*position),
            Self::Regex(_) => None,
        }
    }
}

/// Errors raised by the parameter type registry and by parameter transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParameterTypeError {
    /// A parameter type with the same name is already registered.
    #[error("parameter type '{name}' is already defined")]
    Duplicate {
        /// The clashing name.
        name: String,
    },
    /// Lookup of an unregistered name.
    #[error("parameter type '{name}' is not defined")]
    Unknown {
        /// The requested name.
        name: String,
    },
    /// Names may not contain expression syntax.
    #[error("illegal character '{character}' in parameter type name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// First offending character.
        character: char,
    },
    /// One of the regex fragments does not compile.
    #[error("parameter type '{name}' has an invalid regex '{regexp}': {reason}")]
    InvalidRegex {
        /// Parameter type name.
        name: String,
        /// The failing fragment.
        regexp: String,
        /// Reason reported by the regex engine.
        reason: String,
    },
    /// A captured value could not be converted.
    #[error("cannot convert '{value}' with parameter type '{name}': {reason}")]
    Transform {
        /// Parameter type name.
        name: String,
        /// Cleaned capture text.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },
}

impl ParameterTypeError {
    /// Build a [`ParameterTypeError::Transform`] for `name` and `value`.
    ///
    /// # Examples
    /// ```
    /// use picklery_expressions::ParameterTypeError;
    ///
    /// let err = ParameterTypeError::transform("int", "abc", "not a number");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "cannot convert 'abc' with parameter type 'int': not a number"
    /// );
    /// ```
    #[must_use]
    pub fn transform(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Transform {
            name: name.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
