//! Deterministic identifiers for AST nodes and pickles.

/// Hands out incrementing string identifiers.
///
/// Two generators created with the same prefix produce the same sequence,
/// which keeps repeated parses and compilations structurally equal.
///
/// # Examples
/// ```
/// use picklery_gherkin::IdGenerator;
///
/// let mut ids = IdGenerator::with_prefix("pickle-");
/// assert_eq!(ids.next_id(), "pickle-0");
/// assert_eq!(ids.next_id(), "pickle-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    /// Create a generator yielding bare numbers: `"0"`, `"1"`, ...
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose ids start with `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Return the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
