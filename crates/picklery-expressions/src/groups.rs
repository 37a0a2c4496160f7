//! Capture-group analysis of raw regular-expression sources.
//!
//! Regex step definitions do not name their parameter types, so the source
//! of each top-level capturing group is compared with the registered types'
//! regexes to decide how its text should be converted.

/// A capturing group found in a regex source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CaptureGroup {
    /// One-based capture index, as used by [`regex::Captures::get`].
    pub(crate) index: usize,
    /// Source text between the group's parentheses, excluding any name.
    pub(crate) source: String,
    /// Number of enclosing capturing groups.
    pub(crate) depth: usize,
}

struct OpenGroup {
    capture: Option<(usize, usize)>,
}

/// List the capturing groups of `pattern` in index order.
///
/// Escapes, character classes (including nested classes), non-capturing
/// groups, flag groups and look-around forms are skipped; `(?P<name>` and
/// `(?<name>` count as capturing.
pub(crate) fn capture_groups(pattern: &str) -> Vec<CaptureGroup> {
    let mut groups: Vec<CaptureGroup> = Vec::new();
    let mut stack: Vec<OpenGroup> = Vec::new();
    let mut class_depth = 0usize;
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '[' => {
                class_depth = class_depth.saturating_add(1);
                // A leading `]` (optionally after `^`) is a literal member.
                if chars.peek().is_some_and(|&(_, c)| c == '^') {
                    chars.next();
                }
                if chars.peek().is_some_and(|&(_, c)| c == ']') {
                    chars.next();
                }
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '(' if class_depth == 0 => {
                let rest = pattern.get(pos.saturating_add(1)..).unwrap_or_default();
                let capturing = !rest.starts_with('?')
                    || rest.starts_with("?P<")
                    || (rest.starts_with("?<")
                        && !rest.starts_with("?<=")
                        && !rest.starts_with("?<!"));
                let capture = if capturing {
                    let body_start = body_offset(rest).map_or(pos + 1, |offset| pos + 1 + offset);
                    let depth = stack.iter().filter(|open| open.capture.is_some()).count();
                    groups.push(CaptureGroup {
                        index: groups.len() + 1,
                        source: String::new(),
                        depth,
                    });
                    Some((groups.len() - 1, body_start))
                } else {
                    None
                };
                stack.push(OpenGroup { capture });
            }
            ')' if class_depth == 0 => {
                if let Some(OpenGroup {
                    capture: Some((slot, body_start)),
                }) = stack.pop()
                {
                    if let (Some(group), Some(body)) =
                        (groups.get_mut(slot), pattern.get(body_start..pos))
                    {
                        body.clone_into(&mut group.source);
                    }
                }
            }
            _ => {}
        }
    }
    groups
}

/// Offset from just after `(` to the first character of a named group's body.
fn body_offset(rest: &str) -> Option<usize> {
    if rest.starts_with("?P<") || rest.starts_with("?<") {
        rest.find('>').map(|close| close + 1)
    } else {
        None
    }
}
