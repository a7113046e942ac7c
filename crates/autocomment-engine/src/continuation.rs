//! Continuation tracker: assembles comments for declarations whose
//! parameter list spans several physical lines.
//!
//! The first line's rendering carries the whole comment plus the
//! [`ADDITIONAL_PARAMETERS`] marker. Every later line contributes parameter
//! entries until the `)` matching the list's opening `(` closes it; the
//! entries are then spliced into the marker in order. Parentheses nested in
//! the list (attribute arguments, `default(T)`) are carried across lines.

use crate::config::TemplateConfig;
use crate::params::ListDepth;
use crate::template::{render_parameters, ADDITIONAL_PARAMETERS};

/// An open parameter list awaiting its closing `)`.
#[derive(Debug)]
pub struct Continuation {
    insert_at: usize,
    first_line: usize,
    newline_token: String,
    depth: ListDepth,
    fragments: Vec<String>,
}

impl Continuation {
    /// Start tracking. `head` is the rendering of the declaration's first
    /// line and `raw_head` its parameter text after the `(`; `newline_token`
    /// is fixed here for every later fragment.
    pub fn open(
        insert_at: usize,
        first_line: usize,
        head: String,
        raw_head: &str,
        newline_token: String,
    ) -> Self {
        Self {
            insert_at,
            first_line,
            newline_token,
            depth: ListDepth::after(raw_head),
            fragments: vec![head],
        }
    }

    /// Line where the finished comment is inserted.
    pub fn insert_at(&self) -> usize {
        self.insert_at
    }

    /// Line that introduced the declaration.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Feed the next physical line. Returns the assembled comment once the
    /// line closes the parameter list; only text before the closing `)` counts.
    pub fn accept(&mut self, line: &str, config: &TemplateConfig) -> Option<String> {
        let (fragment, closed) = match self.depth.advance(line) {
            Some(close) => (&line[..close], true),
            None => (line, false),
        };
        self.fragments
            .push(render_parameters(fragment, &self.newline_token, config));

        closed.then(|| self.assemble())
    }

    fn assemble(&self) -> String {
        let (head, rest) = self
            .fragments
            .split_first()
            .map(|(head, rest)| (head.as_str(), rest.concat()))
            .unwrap_or_default();
        head.replacen(ADDITIONAL_PARAMETERS, &rest, 1)
    }
}
