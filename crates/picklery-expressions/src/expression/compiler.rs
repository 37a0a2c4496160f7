//! Convert lexed expression tokens into anchored regular-expression sources.
//!
//! Tokens are first grouped into nodes. A whitespace-delimited run that
//! contains a `/` becomes an alternation, so `I eat/drink a meal` yields the
//! literal `I `, the alternation `eat|drink` and the literal ` a meal`.

use crate::errors::ExpressionError;
use crate::parameter::ParameterTypeRegistry;

use super::lexer::{Token, lex_expression};

/// A parameter binding produced by compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSlot {
    /// Name of the parameter type as written between the braces.
    pub name: String,
    /// Index of the capture group holding the parameter's text.
    pub group: usize,
}

/// The regex source and parameter bindings of a compiled expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionSource {
    /// Anchored regular-expression source.
    pub pattern: String,
    /// Parameters in the order they appear in the expression.
    pub parameters: Vec<ParameterSlot>,
}

impl ExpressionSource {
    /// Parameter type names in expression order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|slot| slot.name.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Node {
    Text(String),
    Optional(String),
    Parameter { name: String, start: usize },
    Alternation(Vec<Vec<Node>>),
}

/// Build an anchored regular expression from a Cucumber Expression.
///
/// # Errors
/// Returns [`ExpressionError`] when the expression is malformed or names a
/// parameter type missing from `registry`.
///
/// # Examples
/// ```
/// use picklery_expressions::{ParameterTypeRegistry, build_regex_from_expression};
///
/// let registry = ParameterTypeRegistry::default();
/// let source = build_regex_from_expression("I have {int} cucumber(s)", &registry)
///     .expect("expression is well formed");
/// assert_eq!(source.pattern, r"^I have (-?\d+) cucumber(?:s)?$");
/// assert_eq!(source.parameter_types().collect::<Vec<_>>(), vec!["int"]);
/// ```
pub fn build_regex_from_expression(
    expression: &str,
    registry: &ParameterTypeRegistry,
) -> Result<ExpressionSource, ExpressionError> {
    let tokens = lex_expression(expression)?;
    let nodes = group_nodes(tokens)?;

    let mut pattern = String::with_capacity(expression.len().saturating_mul(2) + 2);
    let mut parameters = Vec::new();
    let mut next_group = 1usize;
    pattern.push('^');
    for node in &nodes {
        match node {
            Node::Parameter { name, start } => {
                let parameter_type = registry.get(name).ok_or_else(|| {
                    ExpressionError::UndefinedParameterType {
                        name: name.clone(),
                        position: *start,
                    }
                })?;
                pattern.push('(');
                pattern.push_str(&parameter_type.regex_source());
                pattern.push(')');
                parameters.push(ParameterSlot {
                    name: name.clone(),
                    group: next_group,
                });
                next_group = next_group
                    .saturating_add(1)
                    .saturating_add(parameter_type.inner_group_count()?);
            }
            other => emit_literal(other, &mut pattern),
        }
    }
    pattern.push('$');

    Ok(ExpressionSource {
        pattern,
        parameters,
    })
}

fn emit_literal(node: &Node, pattern: &mut String) {
    match node {
        Node::Text(text) => pattern.push_str(&regex::escape(text)),
        Node::Optional(text) => {
            pattern.push_str("(?:");
            pattern.push_str(&regex::escape(text));
            pattern.push_str(")?");
        }
        Node::Alternation(alternatives) => {
            pattern.push_str("(?:");
            for (index, alternative) in alternatives.iter().enumerate() {
                if index > 0 {
                    pattern.push('|');
                }
                for part in alternative {
                    emit_literal(part, pattern);
                }
            }
            pattern.push(')');
        }
        // Parameters never reach here: alternatives reject them while grouping.
        Node::Parameter { .. } => {}
    }
}

/// Split tokens into whitespace-bounded segments and fold any segment
/// containing a slash into an alternation node.
fn group_nodes(tokens: Vec<Token>) -> Result<Vec<Node>, ExpressionError> {
    let mut nodes = Vec::new();
    let mut segment = Vec::new();
    for token in tokens {
        if let Token::Whitespace(space) = token {
            nodes.extend(fold_segment(std::mem::take(&mut segment))?);
            nodes.push(Node::Text(space));
        } else {
            segment.push(token);
        }
    }
    nodes.extend(fold_segment(segment)?);
    Ok(nodes)
}

fn fold_segment(segment: Vec<Token>) -> Result<Vec<Node>, ExpressionError> {
    let slashes: Vec<usize> = segment
        .iter()
        .filter_map(|token| match token {
            Token::Slash { position } => Some(*position),
            _ => None,
        })
        .collect();
    if slashes.is_empty() {
        return Ok(segment.into_iter().filter_map(plain_node).collect());
    }

    let mut alternatives = vec![Vec::new()];
    for token in segment {
        match token {
            Token::Slash { .. } => alternatives.push(Vec::new()),
            Token::Parameter { start, .. } => {
                return Err(ExpressionError::ParameterInAlternation { position: start });
            }
            other => {
                if let (Some(node), Some(current)) = (plain_node(other), alternatives.last_mut()) {
                    current.push(node);
                }
            }
        }
    }

    for (index, alternative) in alternatives.iter().enumerate() {
        if !alternative.iter().any(|node| matches!(node, Node::Text(_))) {
            let slash = index.saturating_sub(1).min(slashes.len().saturating_sub(1));
            let position = slashes.get(slash).copied().unwrap_or_default();
            return Err(ExpressionError::EmptyAlternative { position });
        }
    }
    Ok(vec![Node::Alternation(alternatives)])
}

fn plain_node(token: Token) -> Option<Node> {
    match token {
        Token::Text(text) | Token::Whitespace(text) => Some(Node::Text(text)),
        Token::Optional { text, .. } => Some(Node::Optional(text)),
        Token::Parameter { name, start } => Some(Node::Parameter { name, start }),
        Token::Slash { .. } => None,
    }
}
