//! Splitting tag lines and table rows into positioned items.

use super::token::LineItem;

/// Split a tag line into its tags, stopping at a ` #` comment.
pub(super) fn split_tags(line: &str) -> Vec<LineItem> {
    split_words(line)
        .into_iter()
        .take_while(|item| !item.text.starts_with('#'))
        .collect()
}

fn split_words(line: &str) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut word = String::new();
    let mut start = 0usize;
    for (index, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                items.push(LineItem {
                    column: start + 1,
                    text: std::mem::take(&mut word),
                });
            }
        } else {
            if word.is_empty() {
                start = index;
            }
            word.push(ch);
        }
    }
    if !word.is_empty() {
        items.push(LineItem {
            column: start + 1,
            text: word,
        });
    }
    items
}

/// Split a table row into trimmed, unescaped cells.
///
/// Text before the first pipe and after the last pipe is ignored. Inside a
/// cell `\|` is a literal pipe, `\n` a newline and `\\` a backslash; any
/// other backslash pair is kept as written.
pub(super) fn split_cells(line: &str) -> Vec<LineItem> {
    let mut chars = line.chars().enumerate().skip_while(|&(_, ch)| ch != '|');
    let Some((first_pipe, _)) = chars.next() else {
        return Vec::new();
    };

    let mut cells = Vec::new();
    let mut raw = String::new();
    // 1-based column of the first character after the opening pipe.
    let mut cell_column = first_pipe + 2;
    while let Some((index, ch)) = chars.next() {
        match ch {
            '|' => {
                cells.push(finish_cell(&raw, cell_column));
                raw.clear();
                cell_column = index + 2;
            }
            '\\' => {
                raw.push(ch);
                if let Some((_, escaped)) = chars.next() {
                    raw.push(escaped);
                }
            }
            other => raw.push(other),
        }
    }
    cells
}

fn finish_cell(raw: &str, cell_column: usize) -> LineItem {
    let leading = raw.chars().take_while(|c| c.is_whitespace()).count();
    LineItem {
        column: cell_column + leading,
        text: unescape_cell(raw.trim()),
    }
}

fn unescape_cell(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('|') => value.push('|'),
            Some('\\') => value.push('\\'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }
    value
}
