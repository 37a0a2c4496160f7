//! Pre-compiled step patterns.

use picklery_expressions::{
    Argument, CucumberExpression, ExpressionError, ParameterTypeRegistry, RegularExpression,
};
use thiserror::Error;

use crate::definition::{PatternSource, PatternTier};

/// Why a step pattern could not be compiled.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The Cucumber Expression is malformed or names an unknown type.
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    /// The regular expression does not compile.
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),
}

/// One definition's pattern, compiled once.
#[derive(Debug, Clone)]
pub(crate) enum CompiledPattern {
    Exact(String),
    Expression(CucumberExpression),
    Regex(RegularExpression),
    /// Stands in for a pattern that failed to compile; never matches.
    Invalid,
}

impl CompiledPattern {
    pub(crate) fn compile(
        source: &PatternSource,
        registry: &ParameterTypeRegistry,
    ) -> Result<Self, PatternError> {
        Ok(match source {
            PatternSource::Exact(text) => Self::Exact(text.clone()),
            PatternSource::Expression(text) => {
                Self::Expression(CucumberExpression::new(text, registry)?)
            }
            PatternSource::Regex(text) => Self::Regex(RegularExpression::new(text, registry)?),
        })
    }

    /// Priority tier, or `None` for the never-matching sentinel.
    pub(crate) const fn tier(&self) -> Option<PatternTier> {
        match self {
            Self::Exact(_) => Some(PatternTier::Exact),
            Self::Expression(_) => Some(PatternTier::Expression),
            Self::Regex(_) => Some(PatternTier::Regex),
            Self::Invalid => None,
        }
    }

    pub(crate) fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        match self {
            Self::Exact(expected) => (expected == text).then(Vec::new),
            Self::Expression(expression) => expression.match_text(text),
            Self::Regex(regex) => regex.match_text(text),
            Self::Invalid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PatternSource::Exact("I eat".into()), "I eat", Some(0))]
    #[case(PatternSource::Exact("I eat".into()), "I eat more", None)]
    #[case(PatternSource::Expression("I eat {int}".into()), "I eat 3", Some(1))]
    #[case(PatternSource::Expression("I eat {int}".into()), "I eat 3 more", None)]
    #[case(PatternSource::Regex(r"eat (\d+)".into()), "I eat 3 more", Some(1))]
    fn matches_by_kind(
        #[case] source: PatternSource,
        #[case] text: &str,
        #[case] arguments: Option<usize>,
    ) {
        let registry = ParameterTypeRegistry::default();
        let compiled = CompiledPattern::compile(&source, &registry);
        let found = compiled
            .ok()
            .and_then(|pattern| pattern.match_text(text))
            .map(|args| args.len());
        assert_eq!(found, arguments);
    }

    #[rstest]
    #[case(PatternSource::Expression("I eat {unknown}".into()))]
    #[case(PatternSource::Expression("I eat {int".into()))]
    #[case(PatternSource::Regex("I eat (".into()))]
    fn reports_compile_errors(#[case] source: PatternSource) {
        let registry = ParameterTypeRegistry::default();
        assert!(CompiledPattern::compile(&source, &registry).is_err());
    }

    #[test]
    fn sentinel_never_matches() {
        assert!(CompiledPattern::Invalid.match_text("").is_none());
        assert!(CompiledPattern::Invalid.tier().is_none());
    }
}
