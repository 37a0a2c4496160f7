//! Source positions attached to tokens and AST nodes.

use std::fmt;

use serde::Serialize;

/// A position in a feature file.
///
/// Lines are 1-based. Columns are 1-based character offsets, with `0`
/// meaning the column is unknown (for example the end-of-file marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, or `0` when unknown.
    pub column: usize,
}

impl Location {
    /// Create a location from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
