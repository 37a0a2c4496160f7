//! Parser configuration.
//!
//! The default dialect is resolved from an in-process override, then the
//! `PICKLERY_LANGUAGE` environment variable, then English. Per-document
//! settings travel in [`ParseOptions`].

use std::sync::{PoisonError, RwLock};

/// Environment variable naming the default dialect code.
pub const LANGUAGE_ENV: &str = "PICKLERY_LANGUAGE";

/// Dialect used when nothing else is configured.
pub const FALLBACK_LANGUAGE: &str = "en";

static DEFAULT_LANGUAGE_OVERRIDE: RwLock<Option<String>> = RwLock::new(None);

fn env_language() -> Option<String> {
    std::env::var(LANGUAGE_ENV)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn override_state() -> Option<String> {
    DEFAULT_LANGUAGE_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Determine the dialect code used when a document has no `# language:`
/// directive and the caller did not pin one.
#[must_use]
pub fn default_language() -> String {
    override_state()
        .or_else(env_language)
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_owned())
}

/// Override the default dialect for the current process.
///
/// Tests may call [`clear_default_language_override`] to restore environment
/// driven behaviour after setting the override.
pub fn set_default_language(code: impl Into<String>) {
    *DEFAULT_LANGUAGE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(code.into());
}

/// Remove any in-process override of the default dialect.
pub fn clear_default_language_override() {
    *DEFAULT_LANGUAGE_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

/// Per-document parse settings.
///
/// # Examples
/// ```
/// use picklery_gherkin::ParseOptions;
///
/// let options = ParseOptions::new("features/eating.feature").with_language("fr");
/// assert_eq!(options.language.as_deref(), Some("fr"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Dialect to start in; a `# language:` directive in the source wins.
    /// `None` means [`default_language`].
    pub language: Option<String>,
    /// Source identifier copied into the document and its pickles.
    pub uri: String,
}

impl ParseOptions {
    /// Options for the document at `uri`, in the default dialect.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            language: None,
            uri: uri.into(),
        }
    }

    /// Start in the dialect `code`.
    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// The dialect code to start in.
    #[must_use]
    pub fn initial_language(&self) -> String {
        self.language.clone().unwrap_or_else(default_language)
    }
}
