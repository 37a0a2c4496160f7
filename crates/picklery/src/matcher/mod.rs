//! Priority-tier matching of step text against a fixed definition catalog.
//!
//! Every pattern is compiled once in [`StepMatcher::new`]. Matching then
//! only reads the compiled set, so one matcher can serve any number of
//! threads. Exact patterns beat Cucumber Expressions, which beat regular
//! expressions; two matches within the best tier are ambiguous.

mod error;

use picklery_expressions::{Argument, ParameterTypeRegistry, ParameterValue, generate_expression};
use picklery_gherkin::PickleStep;

use crate::definition::{PatternTier, SourceLocation, StepDefinition};
use crate::pattern::CompiledPattern;

pub use error::{CompileFailure, StepMatchError};

#[derive(Debug)]
struct CompiledDefinition<H> {
    definition: StepDefinition<H>,
    pattern: CompiledPattern,
}

/// The result of matching step text to a single definition.
#[derive(Debug)]
pub struct StepMatch<'m, H> {
    definition: &'m StepDefinition<H>,
    arguments: Vec<Argument>,
    values: Vec<ParameterValue>,
}

impl<'m, H> StepMatch<'m, H> {
    /// The matching definition.
    #[must_use]
    pub const fn definition(&self) -> &'m StepDefinition<H> {
        self.definition
    }

    /// The matching definition's handler.
    #[must_use]
    pub const fn handler(&self) -> &'m H {
        &self.definition.handler
    }

    /// Where the matching definition was declared.
    #[must_use]
    pub const fn location(&self) -> SourceLocation {
        self.definition.location
    }

    /// Captured arguments in pattern order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Captured text of each argument, in order.
    #[must_use]
    pub fn raw_arguments(&self) -> Vec<&str> {
        self.arguments.iter().map(Argument::raw).collect()
    }

    /// Typed values of each argument, in order.
    #[must_use]
    pub fn values(&self) -> &[ParameterValue] {
        &self.values
    }
}

/// Matches step text against a catalog of pre-compiled step definitions.
///
/// A definition whose pattern fails to compile is kept as a sentinel that
/// never matches; [`StepMatcher::compile_failures`] lists them.
///
/// # Examples
/// ```
/// use picklery::{ParameterTypeRegistry, ParameterValue, StepMatcher, step_definition};
///
/// let matcher = StepMatcher::new(
///     vec![
///         step_definition!(expression "I have {int} cucumber(s)", "count"),
///         step_definition!(exact "I have no cucumbers", "none"),
///     ],
///     ParameterTypeRegistry::default(),
/// );
/// let found = matcher.match_text("I have 5 cucumbers").expect("one definition matches");
/// assert_eq!(*found.handler(), "count");
/// assert_eq!(found.values(), &[ParameterValue::Int(5)]);
/// ```
#[derive(Debug)]
pub struct StepMatcher<H> {
    definitions: Vec<CompiledDefinition<H>>,
    failures: Vec<CompileFailure>,
    registry: ParameterTypeRegistry,
}

impl<H> StepMatcher<H> {
    /// Compile every definition's pattern against `registry`.
    #[must_use]
    pub fn new(
        definitions: impl IntoIterator<Item = StepDefinition<H>>,
        registry: ParameterTypeRegistry,
    ) -> Self {
        let mut compiled = Vec::new();
        let mut failures = Vec::new();
        for definition in definitions {
            let pattern = CompiledPattern::compile(&definition.pattern, &registry)
                .unwrap_or_else(|error| {
                    log::warn!(
                        "step pattern {} at {} will never match: {error}",
                        definition.pattern,
                        definition.location
                    );
                    failures.push(CompileFailure {
                        pattern: definition.pattern.clone(),
                        location: definition.location,
                        error,
                    });
                    CompiledPattern::Invalid
                });
            compiled.push(CompiledDefinition {
                definition,
                pattern,
            });
        }
        log::debug!(
            "compiled {} step definitions, {} failed",
            compiled.len(),
            failures.len()
        );
        Self {
            definitions: compiled,
            failures,
            registry,
        }
    }

    /// Definitions demoted to the never-matching sentinel.
    #[must_use]
    pub fn compile_failures(&self) -> &[CompileFailure] {
        &self.failures
    }

    /// Registered definitions, in catalog order.
    pub fn definitions(&self) -> impl Iterator<Item = &StepDefinition<H>> {
        self.definitions.iter().map(|entry| &entry.definition)
    }

    /// Parameter types the patterns were compiled against.
    #[must_use]
    pub const fn registry(&self) -> &ParameterTypeRegistry {
        &self.registry
    }

    /// Number of definitions in the catalog, including failed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve a pickle step to its definition.
    ///
    /// # Errors
    /// See [`StepMatcher::match_text`].
    pub fn match_step(&self, step: &PickleStep) -> Result<StepMatch<'_, H>, StepMatchError> {
        self.match_text(&step.text)
    }

    /// Resolve `text` to exactly one definition and convert its arguments.
    ///
    /// # Errors
    /// - [`StepMatchError::Undefined`] when nothing matches.
    /// - [`StepMatchError::Ambiguous`] when more than one definition matches
    ///   at the best tier.
    /// - [`StepMatchError::Transform`] when a parameter type rejects a
    ///   captured value.
    pub fn match_text(&self, text: &str) -> Result<StepMatch<'_, H>, StepMatchError> {
        let mut best_tier: Option<PatternTier> = None;
        let mut best: Vec<(&CompiledDefinition<H>, Vec<Argument>)> = Vec::new();
        for entry in &self.definitions {
            let Some(tier) = entry.pattern.tier() else {
                continue;
            };
            if best_tier.is_some_and(|current| tier > current) {
                continue;
            }
            let Some(arguments) = entry.pattern.match_text(text) else {
                continue;
            };
            if best_tier.is_none_or(|current| tier < current) {
                best_tier = Some(tier);
                best.clear();
            }
            best.push((entry, arguments));
        }

        let mut candidates = best.into_iter();
        let Some((entry, arguments)) = candidates.next() else {
            return Err(StepMatchError::Undefined {
                text: text.to_owned(),
                snippet: generate_expression(text, &self.registry),
            });
        };
        let others: Vec<_> = candidates.collect();
        if !others.is_empty() {
            return Err(StepMatchError::Ambiguous {
                text: text.to_owned(),
                candidates: std::iter::once(entry)
                    .chain(others.iter().map(|(other, _)| *other))
                    .map(|candidate| candidate.definition.to_string())
                    .collect(),
            });
        }

        let definition = &entry.definition;
        let values = arguments
            .iter()
            .map(Argument::value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| StepMatchError::Transform {
                text: text.to_owned(),
                pattern: definition.pattern.clone(),
                location: definition.location,
                source,
            })?;
        log::trace!("step '{text}' matched {definition}");
        Ok(StepMatch {
            definition,
            arguments,
            values,
        })
    }
}
