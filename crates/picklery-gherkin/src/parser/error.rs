//! Errors raised while building the AST.

use thiserror::Error;

use crate::location::Location;

/// A located structural error in a feature document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParserError {
    /// A line of the wrong kind where a specific one was required.
    #[error("({location}): expected {expected}, got {found}")]
    UnexpectedToken {
        /// Where the offending line starts.
        location: Location,
        /// Human-readable list of acceptable lines.
        expected: String,
        /// Description of the line found instead.
        found: String,
    },
    /// Input ended inside a construct, such as an unterminated doc string.
    #[error("({location}): unexpected end of file, expected {expected}")]
    UnexpectedEof {
        /// Position of the end of input.
        location: Location,
        /// What was still required.
        expected: String,
    },
    /// A second Background within one Feature or Rule.
    #[error("({location}): a feature or rule may only have one background")]
    DuplicateBackground {
        /// Where the second Background starts.
        location: Location,
    },
    /// A table row whose cell count differs from the first row.
    #[error("({location}): inconsistent cell count within the table")]
    InconsistentCellCount {
        /// Where the offending row starts.
        location: Location,
    },
}

impl ParserError {
    /// Build the error reported for a non-rectangular table.
    #[must_use]
    pub fn inconsistent_cell_count(location: Location) -> Self {
        Self::InconsistentCellCount { location }
    }

    /// Where the error was detected.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::UnexpectedToken { location, .. }
            | Self::UnexpectedEof { location, .. }
            | Self::DuplicateBackground { location }
            | Self::InconsistentCellCount { location } => *location,
        }
    }
}
