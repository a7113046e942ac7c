//! Parameter-list splitting.
//!
//! A raw list is split on commas, each fragment on whitespace, and the last
//! two tokens become type and name. Splitting ignores separators nested in
//! `<>`, `()` or `[]`, so `Dictionary<string, int> map` and
//! `[Range(1, 10)] int x` stay single parameters.
//!
//! [`ListDepth`] finds where a list ends: the `)` matching its opening `(`,
//! not the first `)` on the line.

/// A parsed `type name` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub ty: String,
    pub name: String,
}

/// Parse a raw parameter list. Fragments with fewer than two tokens are
/// skipped, which also covers the empty list and trailing commas.
pub fn parse_parameters(raw: &str) -> Vec<ParameterDescriptor> {
    split_top_level(raw, |c| c == ',')
        .into_iter()
        .filter_map(parse_fragment)
        .collect()
}

fn parse_fragment(fragment: &str) -> Option<ParameterDescriptor> {
    let tokens = split_top_level(strip_default(fragment), char::is_whitespace);
    let tokens: Vec<&str> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [.., ty, name] => Some(ParameterDescriptor {
            ty: ty.to_string(),
            name: name.to_string(),
        }),
        _ => None,
    }
}

/// Drop a trailing `= value` initializer.
fn strip_default(fragment: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in fragment.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return &fragment[..i],
            _ => {}
        }
    }
    fragment
}

fn split_top_level(text: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            c if depth == 0 && is_separator(c) => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Parenthesis depth inside a parameter list, counted from its opening `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDepth(usize);

impl ListDepth {
    /// Depth just after the list's opening `(`.
    pub fn opened() -> Self {
        Self(1)
    }

    /// Depth reached after `text`, for a list that `text` leaves open.
    pub fn after(text: &str) -> Self {
        let mut depth = Self::opened();
        depth.advance(text);
        depth
    }

    /// Consume `text`. Returns the byte offset of the `)` that closes the
    /// list, leaving the depth at zero; `None` while the list stays open.
    pub fn advance(&mut self, text: &str) -> Option<usize> {
        for (i, c) in text.char_indices() {
            match c {
                '(' => self.0 += 1,
                ')' => {
                    self.0 = self.0.saturating_sub(1);
                    if self.0 == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }
}
