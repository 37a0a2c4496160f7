//! The five parameter types every registry starts with.

use super::{ParameterType, ParameterValue};
use crate::errors::ParameterTypeError;

const INT_REGEX: &str = r"-?\d+";
const FLOAT_REGEX: &str = r"-?\d*\.\d+";
const DOUBLE_QUOTED_REGEX: &str = r#""(?:[^"\\]*(?:\\.[^"\\]*)*)""#;
const SINGLE_QUOTED_REGEX: &str = r"'(?:[^'\\]*(?:\\.[^'\\]*)*)'";
const WORD_REGEX: &str = r"[^\s]+";
const ANONYMOUS_REGEX: &str = r".+";

pub(super) fn builtin_types() -> [ParameterType; 5] {
    [int(), float(), string(), word(), anonymous()]
}

fn int() -> ParameterType {
    ParameterType::new("int", [INT_REGEX])
        .with_transformer(|value| {
            value
                .parse::<i64>()
                .map(ParameterValue::Int)
                .map_err(|err| ParameterTypeError::transform("int", value, err))
        })
        .with_snippets(true)
        .with_regexp_preference(true)
}

fn float() -> ParameterType {
    ParameterType::new("float", [FLOAT_REGEX])
        .with_transformer(|value| {
            value
                .parse::<f64>()
                .map(ParameterValue::Float)
                .map_err(|err| ParameterTypeError::transform("float", value, err))
        })
        .with_snippets(true)
        .with_regexp_preference(true)
}

fn string() -> ParameterType {
    ParameterType::new("string", [DOUBLE_QUOTED_REGEX, SINGLE_QUOTED_REGEX])
        .with_cleaner(strip_quotes)
        .with_snippets(true)
}

fn word() -> ParameterType {
    ParameterType::new("word", [WORD_REGEX])
}

fn anonymous() -> ParameterType {
    ParameterType::new("", [ANONYMOUS_REGEX])
}

/// Remove one matching pair of surrounding quotes and unescape the quote
/// character inside.
fn strip_quotes(raw: &str) -> String {
    for quote in ['"', '\''] {
        let inner = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote));
        if let Some(inner) = inner {
            let escaped = format!("\\{quote}");
            return inner.replace(&escaped, &quote.to_string());
        }
    }
    raw.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"hello\"", "hello")]
    #[case("'hello'", "hello")]
    #[case("\"say \\\"hi\\\"\"", "say \"hi\"")]
    #[case("'it\\'s'", "it's")]
    #[case("\"\"", "")]
    #[case("bare", "bare")]
    #[case("\"mismatched'", "\"mismatched'")]
    fn strips_one_pair_of_quotes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_quotes(raw), expected);
    }

    #[test]
    fn int_rejects_overflowing_values() {
        let err = int().transform("99999999999999999999").err();
        assert!(matches!(err, Some(ParameterTypeError::Transform { .. })));
    }

    #[test]
    fn float_parses_leading_dot() {
        assert_eq!(float().transform(".5").ok(), Some(ParameterValue::Float(0.5)));
    }

    #[test]
    fn anonymous_type_is_excluded_from_snippets() {
        let anon = anonymous();
        assert!(anon.is_anonymous());
        assert!(!anon.use_for_snippets());
    }
}
