//! Name-indexed store of parameter types.

use hashbrown::HashMap;

use super::ParameterType;
use super::builtin::builtin_types;
use crate::errors::ParameterTypeError;

const ILLEGAL_NAME_CHARACTERS: [char; 6] = ['{', '}', '(', ')', '\\', '/'];

/// Registry of parameter types available to Cucumber Expressions.
///
/// A default registry is seeded with `int`, `float`, `string`, `word` and the
/// anonymous type `{}`. Iteration follows registration order, so snippet
/// generation and regexp lookup are deterministic.
///
/// # Duplicate names
///
/// [`define`](Self::define) rejects every name that is already present,
/// built-in or not. Callers that want "the existing definition wins"
/// semantics use [`define_or_keep`](Self::define_or_keep), which reports
/// whether the new type was stored.
///
/// # Examples
/// ```
/// use picklery_expressions::{ParameterType, ParameterTypeRegistry};
///
/// let mut registry = ParameterTypeRegistry::default();
/// registry
///     .define(ParameterType::new("color", ["red|green|blue"]))
///     .expect("color is a fresh name");
/// assert!(registry.get("color").is_some());
/// assert!(registry.define(ParameterType::new("color", ["cyan"])).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ParameterTypeRegistry {
    types: Vec<ParameterType>,
    by_name: HashMap<String, usize>,
}

impl Default for ParameterTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ParameterTypeRegistry {
    /// Create a registry without any parameter types.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry seeded with the built-in parameter types.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for parameter_type in builtin_types() {
            registry.insert(parameter_type);
        }
        registry
    }

    /// Register a new parameter type.
    ///
    /// # Errors
    /// - [`ParameterTypeError::Duplicate`] when the name is already taken.
    /// - [`ParameterTypeError::InvalidName`] when the name contains
    ///   expression syntax or is empty.
    /// - [`ParameterTypeError::InvalidRegex`] when a fragment does not
    ///   compile.
    pub fn define(&mut self, parameter_type: ParameterType) -> Result<(), ParameterTypeError> {
        validate(&parameter_type)?;
        if self.by_name.contains_key(parameter_type.name()) {
            return Err(ParameterTypeError::Duplicate {
                name: parameter_type.name().to_owned(),
            });
        }
        self.insert(parameter_type);
        Ok(())
    }

    /// Register a parameter type unless the name is already taken, in which
    /// case the existing definition is kept.
    ///
    /// Returns `Ok(true)` when the type was stored and `Ok(false)` when an
    /// existing definition was kept.
    ///
    /// # Errors
    /// Returns the same validation errors as [`define`](Self::define), except
    /// for [`ParameterTypeError::Duplicate`].
    ///
    /// # Examples
    /// ```
    /// use picklery_expressions::{ParameterType, ParameterTypeRegistry};
    ///
    /// let mut registry = ParameterTypeRegistry::default();
    /// let stored = registry
    ///     .define_or_keep(ParameterType::new("int", ["[0-9a-f]+"]))
    ///     .expect("definition is well formed");
    /// assert!(!stored);
    /// assert_eq!(registry.get("int").map(|pt| pt.regex_source()), Some(r"-?\d+".to_owned()));
    /// ```
    pub fn define_or_keep(
        &mut self,
        parameter_type: ParameterType,
    ) -> Result<bool, ParameterTypeError> {
        match self.define(parameter_type) {
            Ok(()) => Ok(true),
            Err(ParameterTypeError::Duplicate { name }) => {
                log::debug!("keeping existing parameter type '{name}'");
                Ok(false)
            }
            Err(other) => Err(other),
        }
    }

    /// Look up a parameter type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterType> {
        self.by_name
            .get(name)
            .and_then(|&index| self.types.get(index))
    }

    /// Look up a parameter type by name, failing when it is missing.
    ///
    /// # Errors
    /// Returns [`ParameterTypeError::Unknown`] for unregistered names.
    pub fn lookup(&self, name: &str) -> Result<&ParameterType, ParameterTypeError> {
        self.get(name).ok_or_else(|| ParameterTypeError::Unknown {
            name: name.to_owned(),
        })
    }

    /// Find the parameter type whose regex matches a capture-group source.
    ///
    /// A type matches when one of its fragments, or its joined source, equals
    /// `source`. When several match, the first one flagged with
    /// `prefer_for_regexp_match` wins, otherwise the first registered.
    #[must_use]
    pub fn lookup_by_regexp(&self, source: &str) -> Option<&ParameterType> {
        let mut candidates = self.types.iter().filter(|pt| {
            pt.regexps().iter().any(|fragment| fragment == source) || pt.regex_source() == source
        });
        let first = candidates.next()?;
        if first.prefer_for_regexp_match() {
            return Some(first);
        }
        Some(
            candidates
                .find(|pt| pt.prefer_for_regexp_match())
                .unwrap_or(first),
        )
    }

    /// Iterate over all parameter types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterType> {
        self.types.iter()
    }

    /// Number of registered parameter types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds no parameter types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, parameter_type: ParameterType) {
        self.by_name
            .insert(parameter_type.name().to_owned(), self.types.len());
        self.types.push(parameter_type);
    }
}

fn validate(parameter_type: &ParameterType) -> Result<(), ParameterTypeError> {
    let name = parameter_type.name();
    if name.is_empty() {
        return Err(ParameterTypeError::InvalidName {
            name: name.to_owned(),
            character: ' ',
        });
    }
    if let Some(character) = name
        .chars()
        .find(|c| ILLEGAL_NAME_CHARACTERS.contains(c) || c.is_whitespace())
    {
        return Err(ParameterTypeError::InvalidName {
            name: name.to_owned(),
            character,
        });
    }
    if parameter_type.regexps().is_empty() {
        return Err(ParameterTypeError::InvalidRegex {
            name: name.to_owned(),
            regexp: String::new(),
            reason: "at least one regex is required".to_owned(),
        });
    }
    for fragment in parameter_type.regexps() {
        if let Err(err) = regex::Regex::new(fragment) {
            return Err(ParameterTypeError::InvalidRegex {
                name: name.to_owned(),
                regexp: fragment.clone(),
                reason: err.to_string(),
            });
        }
    }
    Ok(())
}
