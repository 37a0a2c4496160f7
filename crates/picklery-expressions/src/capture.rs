//! Regex capture helpers shared by expression and regex step patterns.

use regex::Regex;

use crate::errors::ParameterTypeError;
use crate::parameter::{ParameterType, ParameterValue};

/// One captured argument of a step match.
#[derive(Debug, Clone)]
pub struct Argument {
    raw: String,
    start: Option<usize>,
    parameter_type: Option<ParameterType>,
}

impl Argument {
    /// Create an argument from its raw capture text.
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        start: Option<usize>,
        parameter_type: Option<ParameterType>,
    ) -> Self {
        Self {
            raw: raw.into(),
            start,
            parameter_type,
        }
    }

    /// Captured text exactly as it appeared in the step.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Byte offset of the capture in the step text, or `None` when the group
    /// did not participate in the match.
    #[must_use]
    pub const fn start(&self) -> Option<usize> {
        self.start
    }

    /// Parameter type bound to this argument, if one could be determined.
    #[must_use]
    pub const fn parameter_type(&self) -> Option<&ParameterType> {
        self.parameter_type.as_ref()
    }

    /// Convert the raw text with the bound parameter type; untyped
    /// arguments become [`ParameterValue::Text`].
    ///
    /// # Errors
    /// Returns [`ParameterTypeError::Transform`] when the parameter type's
    /// transformer rejects the text.
    pub fn value(&self) -> Result<ParameterValue, ParameterTypeError> {
        match &self.parameter_type {
            Some(parameter_type) => parameter_type.transform(&self.raw),
            None => Ok(ParameterValue::Text(self.raw.clone())),
        }
    }
}

/// Match `text` against `re` and build one [`Argument`] per requested group.
pub(crate) fn extract_arguments<'a>(
    re: &Regex,
    text: &str,
    groups: impl Iterator<Item = (usize, Option<&'a ParameterType>)>,
) -> Option<Vec<Argument>> {
    let caps = re.captures(text)?;
    Some(
        groups
            .map(|(group, parameter_type)| {
                let capture = caps.get(group);
                Argument::new(
                    capture.map_or("", |m| m.as_str()),
                    capture.map(|m| m.start()),
                    parameter_type.cloned(),
                )
            })
            .collect(),
    )
}
