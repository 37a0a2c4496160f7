//! Raw regular-expression step patterns with inferred parameter types.

use regex::Regex;

use crate::capture::{Argument, extract_arguments};
use crate::groups::capture_groups;
use crate::parameter::{ParameterType, ParameterTypeRegistry};

/// A regex step pattern compiled exactly as written.
///
/// Each top-level capturing group becomes one argument. A group whose source
/// equals a registered parameter type's regex is converted by that type;
/// other groups yield text.
///
/// # Examples
/// ```
/// use picklery_expressions::{ParameterTypeRegistry, ParameterValue, RegularExpression};
///
/// let registry = ParameterTypeRegistry::default();
/// let pattern = RegularExpression::new(r"^I have (-?\d+) (\w+)$", &registry)
///     .expect("regex is valid");
/// let args = pattern.match_text("I have 3 apples").expect("text matches");
/// assert_eq!(args[0].value().ok(), Some(ParameterValue::Int(3)));
/// assert_eq!(args[1].value().ok(), Some(ParameterValue::Text("apples".into())));
/// ```
#[derive(Debug, Clone)]
pub struct RegularExpression {
    regex: Regex,
    groups: Vec<(usize, Option<ParameterType>)>,
}

impl RegularExpression {
    /// Compile `source` and bind its top-level groups to parameter types.
    ///
    /// # Errors
    /// Returns [`regex::Error`] when `source` is not a valid regex.
    pub fn new(source: &str, registry: &ParameterTypeRegistry) -> Result<Self, regex::Error> {
        let regex = Regex::new(source)?;
        let groups = capture_groups(source)
            .into_iter()
            .filter(|group| group.depth == 0)
            .map(|group| {
                let parameter_type = registry.lookup_by_regexp(&group.source).cloned();
                (group.index, parameter_type)
            })
            .collect();
        Ok(Self { regex, groups })
    }

    /// The regex source as written.
    #[must_use]
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// The compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Match `text`, returning one argument per top-level capturing group.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Option<Vec<Argument>> {
        extract_arguments(
            &self.regex,
            text,
            self.groups
                .iter()
                .map(|(index, parameter_type)| (*index, parameter_type.as_ref())),
        )
    }
}
