//! Expression lexer converting Cucumber Expression source into tokens.
//!
//! Escapes (`\{ \} \( \) \/ \\` and escaped whitespace) are resolved here,
//! before any structural character is interpreted, so the compiler never
//! sees a backslash.

use crate::errors::ExpressionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Literal characters that are not unescaped whitespace.
    Text(String),
    /// A run of unescaped whitespace.
    Whitespace(String),
    Parameter {
        name: String,
        start: usize,
    },
    Optional {
        text: String,
        start: usize,
    },
    Slash {
        position: usize,
    },
}

pub(crate) fn lex_expression(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut chars = source.char_indices().peekable();
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut space = String::new();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => {
                flush_space(&mut space, &mut tokens);
                match chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => text.push('\\'),
                }
            }
            c if c.is_whitespace() => {
                flush_text(&mut text, &mut tokens);
                space.push(c);
            }
            '{' => {
                flush_all(&mut text, &mut space, &mut tokens);
                let name = lex_parameter(&mut chars, pos)?;
                tokens.push(Token::Parameter { name, start: pos });
            }
            '(' => {
                flush_all(&mut text, &mut space, &mut tokens);
                let optional = lex_optional(&mut chars, pos)?;
                tokens.push(Token::Optional {
                    text: optional,
                    start: pos,
                });
            }
            '/' => {
                flush_all(&mut text, &mut space, &mut tokens);
                tokens.push(Token::Slash { position: pos });
            }
            '}' | ')' => {
                return Err(ExpressionError::UnexpectedCharacter {
                    character: ch,
                    position: pos,
                });
            }
            other => {
                flush_space(&mut space, &mut tokens);
                text.push(other);
            }
        }
    }

    flush_all(&mut text, &mut space, &mut tokens);
    Ok(tokens)
}

fn flush_all(text: &mut String, space: &mut String, tokens: &mut Vec<Token>) {
    flush_text(text, tokens);
    flush_space(space, tokens);
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

fn flush_space(space: &mut String, tokens: &mut Vec<Token>) {
    if !space.is_empty() {
        tokens.push(Token::Whitespace(std::mem::take(space)));
    }
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn lex_parameter(chars: &mut Chars<'_>, start: usize) -> Result<String, ExpressionError> {
    let mut name = String::new();
    for (pos, ch) in chars.by_ref() {
        match ch {
            '}' => return Ok(name),
            '{' => {
                return Err(ExpressionError::UnexpectedCharacter {
                    character: ch,
                    position: pos,
                });
            }
            other => name.push(other),
        }
    }
    Err(ExpressionError::UnterminatedParameter { position: start })
}

fn lex_optional(chars: &mut Chars<'_>, start: usize) -> Result<String, ExpressionError> {
    let mut text = String::new();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            },
            ')' => {
                if text.is_empty() {
                    return Err(ExpressionError::EmptyOptional { position: start });
                }
                return Ok(text);
            }
            '{' => return Err(ExpressionError::ParameterInOptional { position: pos }),
            '(' => return Err(ExpressionError::NestedOptional { position: pos }),
            other => text.push(other),
        }
    }
    Err(ExpressionError::UnterminatedOptional { position: start })
}
