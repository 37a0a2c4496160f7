//! Cucumber Expression lexing, compilation and matching.

mod compiler;
mod lexer;

use regex::Regex;

use crate::capture::{Argument, extract_arguments};
use crate::errors::ExpressionError;
use crate::parameter::{ParameterType, ParameterTypeRegistry};

pub use compiler::{ExpressionSource, ParameterSlot, build_regex_from_expression};

/// A compiled Cucumber Expression bound to the parameter types it uses.
///
/// The regex is built once on construction; matching never recompiles.
///
/// # Examples
/// ```
/// use picklery_expressions::{CucumberExpression, ParameterTypeRegistry, ParameterValue};
///
/// let registry = ParameterTypeRegistry::default();
/// let expression = CucumberExpression::new("I have {int} cucumber(s)", &registry)
///     .expect("expression is well formed");
/// let args = expression.match_text("I have 5 cucumbers").expect("text matches");
/// assert_eq!(args.len(), 1);
/// assert_eq!(args[0].raw(), "5");
/// assert_eq!(args[0].value().ok(), Some(ParameterValue::Int(5)));
/// assert!(expression.match_text("I have 5 cucumbers today").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CucumberExpression {
    source: String,
    regex: Regex,
    parameters: Vec<(ParameterType, usize)>,
}

impl CucumberExpression {
    /// Compile `source` against the parameter types in `registry`.
    ///
    /// # Errors
    /// Returns [`ExpressionError`] for malformed expressions, unknown
    /// parameter types, or a generated regex the engine rejects.
    pub fn new(source: &str, registry: &ParameterTypeRegistry) -> Result<Self, ExpressionError> {
        let compiled = build_regex_from_expression(source, registry)?;
        let regex = Regex::new(&compiled.pattern)?;
        let mut parameters = Vec::with_capacity(compiled.parameters.len());
        for slot in compiled.parameters {
            // The compiler has already resolved every name against `registry`.
            let parameter_type = registry.get(&slot.name).cloned().ok_or_else(|| {
                ExpressionError::UndefinedParameterType {
                    name: slot.name.clone(),
                    position: 0,
                }
            })?;
            parameters.push((parameter_type, slot.group));
        }
        Ok(Self {
            source: source.to_owned(),
            regex,
            parameters,
        })
    }

    /// The expression as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled, anchored regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Parameter types bound by this expression, in order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &ParameterType> {
        self.parameters.iter().map(|(parameter_type, _)| parameter_type)
    }

    /// Match the whole of `text`, returning one argument per parameter.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        extract_arguments(
            &self.regex,
            text,
            self.parameters
                .iter()
                .map(|(parameter_type, group)| (*group, Some(parameter_type))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterValue;
    use rstest::rstest;

    fn expression(source: &str) -> CucumberExpression {
        CucumberExpression::new(source, &ParameterTypeRegistry::default())
            .unwrap_or_else(|err| panic!("{source}: {err}"))
    }

    #[rstest]
    #[case("I have 1 cucumber", "1")]
    #[case("I have 5 cucumbers", "5")]
    fn optional_plural_matches_both_forms(#[case] text: &str, #[case] raw: &str) {
        let args = expression("I have {int} cucumber(s)")
            .match_text(text)
            .unwrap_or_else(|| panic!("{text} should match"));
        let raws: Vec<_> = args.iter().map(Argument::raw).collect();
        assert_eq!(raws, vec![raw]);
    }

    #[rstest]
    #[case("I eat a meal", true)]
    #[case("I drink a meal", true)]
    #[case("I cook a meal", false)]
    #[case("I eat a meal later", false)]
    fn alternation_is_whole_string(#[case] text: &str, #[case] matches: bool) {
        assert_eq!(
            expression("I eat/drink a meal").match_text(text).is_some(),
            matches
        );
    }

    #[test]
    fn string_arguments_are_cleaned() {
        let args = expression("I say {string} and {word}")
            .match_text(r#"I say "hello \"there\"" and bye"#)
            .unwrap_or_else(|| panic!("text should match"));
        let values: Vec<_> = args.iter().filter_map(|arg| arg.value().ok()).collect();
        assert_eq!(
            values,
            vec![
                ParameterValue::Text("hello \"there\"".into()),
                ParameterValue::Text("bye".into()),
            ]
        );
    }

    #[test]
    fn float_and_anonymous_parameters() {
        let args = expression("{float} of {}")
            .match_text("2.5 of anything at all")
            .unwrap_or_else(|| panic!("text should match"));
        assert_eq!(args.len(), 2);
        assert_eq!(args.first().map(|a| a.value().ok()), Some(Some(ParameterValue::Float(2.5))));
        assert_eq!(args.get(1).map(Argument::raw), Some("anything at all"));
    }
}
