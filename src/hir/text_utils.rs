//! Identifier scanning over raw source lines.

/// Check if a character can continue a Clarion name.
///
/// Uses Unicode Standard Annex #31 rules, plus `:` for prefixed names
/// such as `Pre:Field`.
#[inline]
pub fn is_name_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == ':'
}

/// Check if a character can start a Clarion name.
#[inline]
pub fn is_name_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_'
}

/// The name at the start of `text`, after leading whitespace.
pub fn leading_name(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    if !is_name_start(first) {
        return None;
    }
    let end = chars
        .find(|(_, c)| !is_name_character(*c))
        .map_or(text.len(), |(idx, _)| idx);
    Some(&text[..end])
}

/// Find the boundaries of a dotted name (`SELF.Log.Write`) at a character index.
///
/// Returns `Some((start, end))` as character indices, or `None` when the
/// position is not on a name.
pub fn find_dotted_name(chars: &[char], position: usize) -> Option<(usize, usize)> {
    let is_part = |c: char| is_name_character(c) || c == '.';
    if position >= chars.len() || !is_name_character(chars[position]) {
        return None;
    }

    let mut start = position;
    while start > 0 && is_part(chars[start - 1]) {
        start -= 1;
    }
    let mut end = position;
    while end < chars.len() && is_name_character(chars[end]) {
        end += 1;
    }

    while start < end && chars[start] == '.' {
        start += 1;
    }
    Some((start, end))
}

/// Split `text` on commas outside brackets, angle brackets and strings.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            _ if in_string => {}
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// The text inside a parenthesized group, given the text after its `(`.
///
/// Nested parentheses and quoted strings are skipped. An unclosed group
/// runs to the end of `text`.
pub fn balanced_group(text: &str) -> &str {
    let mut depth = 1usize;
    let mut in_string = false;
    for (idx, c) in text.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            _ if in_string => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &text[..idx];
                }
            }
            _ => {}
        }
    }
    text
}
