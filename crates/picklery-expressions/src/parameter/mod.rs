//! Parameter types: named regex fragments paired with value converters.
//!
//! A [`ParameterType`] owns one or more alternative regex fragments, a
//! cleaner that tidies the raw capture (for example stripping the quotes
//! around a `{string}`), and a transformer that converts the cleaned text
//! into a [`ParameterValue`].

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::errors::ParameterTypeError;

mod builtin;
mod registry;

pub use registry::ParameterTypeRegistry;

/// Converts cleaned capture text into a typed value.
pub type Transformer = Arc<dyn Fn(&str) -> Result<ParameterValue, ParameterTypeError> + Send + Sync>;

/// Cleans raw capture text before it is transformed.
pub type Cleaner = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A typed value produced by a parameter transformer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// Signed integer, produced by `{int}`.
    Int(i64),
    /// Floating-point number, produced by `{float}`.
    Float(f64),
    /// Text, produced by `{string}`, `{word}`, `{}` and untyped captures.
    Text(String),
}

impl ParameterValue {
    /// Return the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(_) | Self::Text(_) => None,
        }
    }

    /// Return the floating-point payload, if any.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(_) | Self::Text(_) => None,
        }
    }

    /// Return the text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Int(_) | Self::Float(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// A named, regex-backed value converter usable as `{name}` in a Cucumber
/// Expression.
///
/// # Examples
/// ```
/// use picklery_expressions::{ParameterType, ParameterValue};
///
/// let color = ParameterType::new("color", ["red|green|blue"]).with_snippets(true);
/// assert_eq!(color.name(), "color");
/// assert_eq!(
///     color.transform("red").expect("text transform cannot fail"),
///     ParameterValue::Text("red".into())
/// );
/// ```
#[derive(Clone)]
pub struct ParameterType {
    name: String,
    regexps: Vec<String>,
    cleaner: Cleaner,
    transformer: Transformer,
    use_for_snippets: bool,
    prefer_for_regexp_match: bool,
    group_count: OnceLock<usize>,
}

impl fmt::Debug for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterType")
            .field("name", &self.name)
            .field("regexps", &self.regexps)
            .field("use_for_snippets", &self.use_for_snippets)
            .field("prefer_for_regexp_match", &self.prefer_for_regexp_match)
            .finish_non_exhaustive()
    }
}

impl ParameterType {
    /// Create a parameter type whose values are passed through as
    /// [`ParameterValue::Text`].
    ///
    /// Snippet use and regexp preference both default to `false`.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, regexps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            regexps: regexps.into_iter().map(Into::into).collect(),
            cleaner: Arc::new(keep_raw),
            transformer: Arc::new(into_text),
            use_for_snippets: false,
            prefer_for_regexp_match: false,
            group_count: OnceLock::new(),
        }
    }

    /// Replace the cleaner applied to raw captures.
    #[must_use]
    pub fn with_cleaner<F>(mut self, cleaner: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.cleaner = Arc::new(cleaner);
        self
    }

    /// Replace the transformer applied to cleaned captures.
    #[must_use]
    pub fn with_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&str) -> Result<ParameterValue, ParameterTypeError> + Send + Sync + 'static,
    {
        self.transformer = Arc::new(transformer);
        self
    }

    /// Offer this type when generating snippet expressions.
    #[must_use]
    pub const fn with_snippets(mut self, enabled: bool) -> Self {
        self.use_for_snippets = enabled;
        self
    }

    /// Prefer this type when a raw regex capture group matches several
    /// registered types.
    #[must_use]
    pub const fn with_regexp_preference(mut self, preferred: bool) -> Self {
        self.prefer_for_regexp_match = preferred;
        self
    }

    /// The name used inside `{...}`. The anonymous type's name is empty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative regex fragments, in declaration order.
    #[must_use]
    pub fn regexps(&self) -> &[String] {
        &self.regexps
    }

    /// Whether this is the anonymous `{}` type.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Whether snippet generation may use this type.
    #[must_use]
    pub const fn use_for_snippets(&self) -> bool {
        self.use_for_snippets
    }

    /// Whether this type wins ties when mapping regex capture groups.
    #[must_use]
    pub const fn prefer_for_regexp_match(&self) -> bool {
        self.prefer_for_regexp_match
    }

    /// The regex alternatives joined into a single fragment.
    #[must_use]
    pub fn regex_source(&self) -> String {
        self.regexps.join("|")
    }

    /// Apply the cleaner to a raw capture.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        (self.cleaner)(raw)
    }

    /// Clean and transform a raw capture into a typed value.
    ///
    /// # Errors
    /// Returns [`ParameterTypeError::Transform`] when the transformer rejects
    /// the cleaned text.
    pub fn transform(&self, raw: &str) -> Result<ParameterValue, ParameterTypeError> {
        let cleaned = self.clean(raw);
        (self.transformer)(&cleaned)
    }

    /// Number of capture groups the regex alternatives contribute on their
    /// own, cached after the first successful computation.
    pub(crate) fn inner_group_count(&self) -> Result<usize, regex::Error> {
        if let Some(count) = self.group_count.get() {
            return Ok(*count);
        }
        let regex = regex::Regex::new(&self.regex_source())?;
        let count = regex.captures_len().saturating_sub(1);
        let _ = self.group_count.set(count);
        Ok(count)
    }
}

fn keep_raw(raw: &str) -> String {
    raw.to_owned()
}

fn into_text(value: &str) -> Result<ParameterValue, ParameterTypeError> {
    Ok(ParameterValue::Text(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transform_yields_text() {
        let pt = ParameterType::new("flavour", ["\\w+"]);
        assert_eq!(
            pt.transform("lime").ok(),
            Some(ParameterValue::Text("lime".into()))
        );
    }

    #[test]
    fn cleaner_runs_before_transformer() {
        let pt = ParameterType::new("shout", ["[A-Z]+!"])
            .with_cleaner(|raw| raw.trim_end_matches('!').to_lowercase())
            .with_transformer(|value| Ok(ParameterValue::Text(format!("<{value}>"))));
        assert_eq!(
            pt.transform("HEY!").ok(),
            Some(ParameterValue::Text("<hey>".into()))
        );
    }

    #[test]
    fn counts_inner_groups_across_alternatives() {
        let pt = ParameterType::new("pair", ["(a)(b)", "(c)"]);
        assert_eq!(pt.inner_group_count().ok(), Some(3));
        assert_eq!(pt.regex_source(), "(a)(b)|(c)");
    }

    #[test]
    fn value_accessors_match_variant() {
        assert_eq!(ParameterValue::Int(3).as_int(), Some(3));
        assert_eq!(ParameterValue::Int(3).as_float(), None);
        assert_eq!(ParameterValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ParameterValue::Text("x".into()).as_str(), Some("x"));
        assert_eq!(ParameterValue::Text("x".into()).to_string(), "x");
    }
}
