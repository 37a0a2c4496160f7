//! `<placeholder>` substitution for Scenario Outline expansion.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ast::TableRow;

/// Matches `<name>` tokens; the name may contain spaces and punctuation but
/// not angle brackets.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>]+)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Column values of one Examples row, keyed by header name.
#[derive(Debug, Clone)]
pub(crate) struct ExampleValues<'doc> {
    pairs: Vec<(&'doc str, &'doc str)>,
}

impl<'doc> ExampleValues<'doc> {
    /// Pair `header` cells with `row` cells. Extra cells on either side are
    /// ignored.
    pub(crate) fn new(header: &'doc TableRow, row: &'doc TableRow) -> Self {
        let pairs = header
            .cells
            .iter()
            .zip(&row.cells)
            .map(|(name, value)| (name.value.as_str(), value.value.as_str()))
            .collect();
        Self { pairs }
    }

    fn lookup(&self, name: &str) -> Option<&'doc str> {
        self.pairs
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
    }

    /// Replace every `<name>` whose name is a column with that column's
    /// value. Unknown placeholders stay as written, and substituted values
    /// are never scanned again.
    pub(crate) fn substitute(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                caps.get(1)
                    .and_then(|name| self.lookup(name.as_str()))
                    .unwrap_or(whole)
                    .to_owned()
            })
            .into_owned()
    }
}
