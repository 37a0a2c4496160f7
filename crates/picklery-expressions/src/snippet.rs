//! Suggest Cucumber Expressions for step text that no definition matches.

use regex::Regex;

use crate::parameter::ParameterTypeRegistry;

const SPECIAL_CHARACTERS: [char; 6] = ['\\', '{', '}', '(', ')', '/'];

/// A Cucumber Expression generated from concrete step text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExpression {
    /// Expression source, with literal text escaped.
    pub source: String,
    /// Names of the parameter types used, in order of appearance.
    pub parameter_names: Vec<String>,
}

/// Generate an expression for `text` from the registry's snippet types.
///
/// Scanning left to right, the leftmost match of any type flagged with
/// `use_for_snippets` is replaced by `{name}`. Ties go to the longer match,
/// then to the type registered first. A match must not start or end in the
/// middle of a word.
///
/// # Examples
/// ```
/// use picklery_expressions::{ParameterTypeRegistry, generate_expression};
///
/// let registry = ParameterTypeRegistry::default();
/// let generated = generate_expression("I have 4.5 \"red\" cukes (fresh)", &registry);
/// assert_eq!(generated.source, r"I have {float} {string} cukes \(fresh\)");
/// assert_eq!(generated.parameter_names, vec!["float", "string"]);
/// ```
#[must_use]
pub fn generate_expression(text: &str, registry: &ParameterTypeRegistry) -> GeneratedExpression {
    let candidates: Vec<(&str, Regex)> = registry
        .iter()
        .filter(|parameter_type| parameter_type.use_for_snippets())
        .filter_map(|parameter_type| {
            Regex::new(&parameter_type.regex_source())
                .ok()
                .map(|regex| (parameter_type.name(), regex))
        })
        .collect();

    let mut source = String::with_capacity(text.len());
    let mut parameter_names = Vec::new();
    let mut pos = 0usize;
    while let Some((name, start, end)) = next_match(text, pos, &candidates) {
        push_escaped(text.get(pos..start).unwrap_or_default(), &mut source);
        source.push('{');
        source.push_str(name);
        source.push('}');
        parameter_names.push(name.to_owned());
        pos = end;
    }
    push_escaped(text.get(pos..).unwrap_or_default(), &mut source);

    GeneratedExpression {
        source,
        parameter_names,
    }
}

/// Find the best word-bounded match at or after `pos`.
fn next_match<'a>(
    text: &str,
    pos: usize,
    candidates: &[(&'a str, Regex)],
) -> Option<(&'a str, usize, usize)> {
    let mut best: Option<(&'a str, usize, usize)> = None;
    for (name, regex) in candidates {
        let Some((start, end)) = first_bounded(text, pos, regex) else {
            continue;
        };
        let better = best.is_none_or(|(_, best_start, best_end)| {
            start < best_start || (start == best_start && end > best_end)
        });
        if better {
            best = Some((*name, start, end));
        }
    }
    best
}

fn first_bounded(text: &str, mut pos: usize, regex: &Regex) -> Option<(usize, usize)> {
    while pos <= text.len() {
        let found = regex.find_at(text, pos)?;
        if !found.is_empty()
            && is_boundary_before(text, found.start())
            && is_boundary_after(text, found.end())
        {
            return Some((found.start(), found.end()));
        }
        let step = text
            .get(found.start()..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        pos = found.start().saturating_add(step);
    }
    None
}

fn is_boundary_before(text: &str, index: usize) -> bool {
    text.get(..index)
        .and_then(|head| head.chars().next_back())
        .is_none_or(|c| !c.is_alphanumeric())
}

fn is_boundary_after(text: &str, index: usize) -> bool {
    text.get(index..)
        .and_then(|tail| tail.chars().next())
        .is_none_or(|c| !c.is_alphanumeric())
}

fn push_escaped(literal: &str, out: &mut String) {
    for c in literal.chars() {
        if SPECIAL_CHARACTERS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterType;
    use rstest::rstest;

    #[rstest]
    #[case("I have 5 cucumbers", "I have {int} cucumbers", &["int"])]
    #[case("it costs -2.75 now", "it costs {float} now", &["float"])]
    #[case("I say 'hi' and \"bye\"", "I say {string} and {string}", &["string", "string"])]
    #[case("room 101b is free", "room 101b is free", &[])]
    #[case("a/b {c}", r"a\/b \{c\}", &[])]
    #[case("7", "{int}", &["int"])]
    fn generates_snippets(#[case] text: &str, #[case] expected: &str, #[case] names: &[&str]) {
        let generated = generate_expression(text, &ParameterTypeRegistry::default());
        assert_eq!(generated.source, expected);
        assert_eq!(generated.parameter_names, names);
    }

    #[test]
    fn custom_snippet_types_take_part() {
        let mut registry = ParameterTypeRegistry::default();
        registry
            .define(ParameterType::new("color", ["red|green|blue"]).with_snippets(true))
            .unwrap_or_else(|err| panic!("{err}"));
        let generated = generate_expression("a green apple", &registry);
        assert_eq!(generated.source, "a {color} apple");
    }

    #[test]
    fn non_snippet_types_are_ignored() {
        let generated = generate_expression("plain words only", &ParameterTypeRegistry::default());
        assert_eq!(generated.source, "plain words only");
        assert!(generated.parameter_names.is_empty());
    }
}
