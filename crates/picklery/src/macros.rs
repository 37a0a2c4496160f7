//! Public macro helpers exported by `picklery`.
//!
//! The macros live in a dedicated module to keep `lib.rs` small and focused on
//! type exports. They remain available at the crate root via `#[macro_export]`.

/// Build a [`StepDefinition`](crate::StepDefinition) that records the
/// invocation site as its [`SourceLocation`](crate::SourceLocation).
///
/// The pattern kind is chosen with a leading `exact`, `expression` or
/// `regex` marker; without one, the first argument must already be a
/// [`PatternSource`](crate::PatternSource).
///
/// # Examples
/// ```
/// use picklery::{PatternSource, PatternTier, step_definition};
///
/// let eat = step_definition!(expression "I eat {int} cucumber(s)", "eat");
/// assert_eq!(eat.pattern.tier(), PatternTier::Expression);
/// assert_eq!(eat.location.file, file!());
///
/// let raw = step_definition!(PatternSource::Regex(r"^I (\w+)$".into()), "verb");
/// assert_eq!(raw.pattern.as_str(), r"^I (\w+)$");
/// ```
#[macro_export]
macro_rules! step_definition {
    (exact $pattern:expr, $handler:expr $(,)?) => {
        $crate::step_definition!(
            $crate::PatternSource::Exact(::core::convert::Into::into($pattern)),
            $handler
        )
    };
    (expression $pattern:expr, $handler:expr $(,)?) => {
        $crate::step_definition!(
            $crate::PatternSource::Expression(::core::convert::Into::into($pattern)),
            $handler
        )
    };
    (regex $pattern:expr, $handler:expr $(,)?) => {
        $crate::step_definition!(
            $crate::PatternSource::Regex(::core::convert::Into::into($pattern)),
            $handler
        )
    };
    ($pattern:expr, $handler:expr $(,)?) => {
        $crate::StepDefinition::new(
            $pattern,
            $handler,
            $crate::SourceLocation::new(file!(), line!()),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{PatternSource, SourceLocation};

    #[test]
    fn records_the_invocation_site() {
        let line = line!() + 1;
        let definition = step_definition!(exact "I wait", ());
        assert_eq!(definition.location, SourceLocation::new(file!(), line));
        assert_eq!(definition.pattern, PatternSource::Exact("I wait".into()));
    }

    #[test]
    fn accepts_owned_patterns_and_trailing_commas() {
        let text = String::from("^I (\\w+)$");
        let definition = step_definition!(regex text, 7,);
        assert_eq!(definition.pattern, PatternSource::Regex("^I (\\w+)$".into()));
        assert_eq!(definition.handler, 7);
    }
}
