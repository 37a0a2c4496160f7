//! Localised keyword tables.
//!
//! A [`DialectTable`] maps a language code to the keywords of that language.
//! The built-in table is embedded in the crate and decoded on first use;
//! callers with their own keyword data load it via
//! [`DialectTable::from_json`].

use std::sync::LazyLock;

use hashbrown::HashMap;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::StepKeywordType;
use crate::config;

const LANGUAGES_ASSET: &str = "languages.json";

/// Keyword data shipped with the crate.
#[derive(RustEmbed)]
#[folder = "i18n"]
struct DialectAssets;

static BUILTIN: LazyLock<DialectTable> = LazyLock::new(|| {
    let asset = DialectAssets::get(LANGUAGES_ASSET)
        .unwrap_or_else(|| panic!("embedded keyword table '{LANGUAGES_ASSET}' is missing"));
    let json = std::str::from_utf8(&asset.data)
        .unwrap_or_else(|error| panic!("embedded keyword table is not UTF-8: {error}"));
    DialectTable::from_json(json)
        .unwrap_or_else(|error| panic!("failed to load embedded keyword table: {error}"))
});

/// Errors from loading or querying a keyword table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DialectError {
    /// The JSON document did not have the expected shape.
    #[error("invalid keyword table: {0}")]
    Json(#[from] serde_json::Error),
    /// The table holds no dialects at all.
    #[error("keyword table defines no languages")]
    Empty,
    /// A strict lookup named a code the table does not define.
    #[error("unknown language '{code}'")]
    UnknownLanguage {
        /// The requested code.
        code: String,
    },
}

/// The keywords of one language.
///
/// Step keywords include their trailing space where the language separates
/// keyword and text with one (`"Given "`), and omit it where it does not
/// (`"前提"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialect {
    /// English name of the language.
    pub name: String,
    /// Name of the language in that language.
    pub native: String,
    /// `Feature` keywords.
    pub feature: Vec<String>,
    /// `Rule` keywords.
    pub rule: Vec<String>,
    /// `Background` keywords.
    pub background: Vec<String>,
    /// `Scenario` keywords.
    pub scenario: Vec<String>,
    /// `Scenario Outline` keywords.
    pub scenario_outline: Vec<String>,
    /// `Examples` keywords.
    pub examples: Vec<String>,
    /// `Given` keywords.
    pub given: Vec<String>,
    /// `When` keywords.
    pub when: Vec<String>,
    /// `Then` keywords.
    pub then: Vec<String>,
    /// `And` keywords.
    pub and: Vec<String>,
    /// `But` keywords.
    pub but: Vec<String>,
}

impl Dialect {
    /// All step keywords with their type, longest first.
    ///
    /// A keyword listed under more than one category (such as `"* "`) has
    /// type [`StepKeywordType::Unknown`].
    #[must_use]
    pub fn step_keywords(&self) -> Vec<(&str, StepKeywordType)> {
        let categories = [
            (&self.given, StepKeywordType::Context),
            (&self.when, StepKeywordType::Action),
            (&self.then, StepKeywordType::Outcome),
            (&self.and, StepKeywordType::Conjunction),
            (&self.but, StepKeywordType::Conjunction),
        ];
        let mut keywords: Vec<(&str, StepKeywordType)> = Vec::new();
        for (list, keyword_type) in categories {
            for keyword in list {
                match keywords.iter_mut().find(|(known, _)| *known == keyword.as_str()) {
                    Some(entry) if entry.1 != keyword_type => entry.1 = StepKeywordType::Unknown,
                    Some(_) => {}
                    None => keywords.push((keyword.as_str(), keyword_type)),
                }
            }
        }
        keywords.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        keywords
    }
}

/// Language code to [`Dialect`] lookup.
///
/// # Examples
/// ```
/// use picklery_gherkin::DialectTable;
///
/// let table = DialectTable::builtin();
/// let french = table.get("fr").expect("French ships with the crate");
/// assert!(french.feature.iter().any(|k| k == "Fonctionnalité"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectTable {
    dialects: HashMap<String, Dialect>,
}

impl DialectTable {
    /// The keyword table embedded in the crate.
    ///
    /// This is a subset of the upstream `gherkin-languages.json` data set:
    /// `de`, `en`, `es`, `fr`, `it`, `ja`, `nl` and `pt`. Documents in other
    /// languages need a full table loaded with [`DialectTable::from_json`]
    /// and passed to [`parse_with_table`](crate::parse_with_table).
    ///
    /// # Panics
    /// Panics on first use if the embedded asset is corrupt, which can only
    /// happen in a broken build.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Decode a table from JSON shaped like the embedded asset: an object
    /// keyed by language code whose values hold the keyword lists.
    ///
    /// # Errors
    /// Returns [`DialectError::Json`] for malformed input and
    /// [`DialectError::Empty`] when no language is defined.
    pub fn from_json(json: &str) -> Result<Self, DialectError> {
        let dialects: HashMap<String, Dialect> = serde_json::from_str(json)?;
        if dialects.is_empty() {
            return Err(DialectError::Empty);
        }
        Ok(Self { dialects })
    }

    /// Look up a dialect by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Dialect> {
        self.dialects.get(code)
    }

    /// Look up a dialect by code, failing when it is missing.
    ///
    /// # Errors
    /// Returns [`DialectError::UnknownLanguage`] for undefined codes.
    pub fn dialect(&self, code: &str) -> Result<&Dialect, DialectError> {
        self.get(code).ok_or_else(|| DialectError::UnknownLanguage {
            code: code.to_owned(),
        })
    }

    /// Resolve `requested` to a dialect, falling back to the configured
    /// default language, then English, then the first code in sort order.
    ///
    /// A fallback is logged at `warn` level.
    #[must_use]
    pub fn resolve(&self, requested: &str) -> (&str, &Dialect) {
        if let Some((code, dialect)) = self.dialects.get_key_value(requested) {
            return (code.as_str(), dialect);
        }
        let default = config::default_language();
        let fallback = self
            .dialects
            .get_key_value(default.as_str())
            .or_else(|| self.dialects.get_key_value(config::FALLBACK_LANGUAGE))
            .or_else(|| self.dialects.iter().min_by_key(|(code, _)| code.as_str()));
        // `from_json` rejects empty tables, so a fallback always exists.
        let (code, dialect) =
            fallback.unwrap_or_else(|| unreachable!("keyword tables are never empty"));
        log::warn!("unknown language '{requested}', using '{code}' instead");
        (code.as_str(), dialect)
    }

    /// Language codes in sorted order.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
