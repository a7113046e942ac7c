//! Line-scan orchestrator: one pass over a file producing a batch of edits.
//!
//! The scanner owns all cross-line state. State is built fresh for every pass and edits are only
//! returned once the whole file has been scanned, so callers apply them as a
//! single batch.

use crate::config::TemplateConfig;
use crate::continuation::Continuation;
use crate::matcher;
use crate::params::ListDepth;
use crate::template::{newline_token, render};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Delete every `///` line, then comment every recognized declaration.
    Regenerate,
    /// Comment only declarations not already preceded by a `///` block.
    FillMissing,
}

/// A positioned edit. Lines are zero-based indexes into the scanned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    /// Insert `text` at the start of `line`
    Insert { line: usize, text: String },
    /// Delete `line` together with its line break
    Delete { line: usize },
}

impl Edit {
    pub fn line(&self) -> usize {
        match self {
            Edit::Insert { line, .. } | Edit::Delete { line } => *line,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("scan cancelled before line {line}")]
    Cancelled { line: usize },
}

// -- Scan state ---------------------------------------------------------------

#[derive(Debug, Default)]
struct LineScanState {
    /// Nearest preceding non-attribute line was a `///` comment
    after_comment: bool,
    /// First line of the attribute run directly above, if any
    attribute_start: Option<usize>,
    /// Declaration whose parameter list is still open
    continuation: Option<Continuation>,
    /// Open list of a declaration that gets no comment; its lines are consumed
    skipped_list: Option<ListDepth>,
}

// -- Scanner ------------------------------------------------------------------

/// Configurable generation pass.
pub struct Scanner<'a> {
    config: &'a TemplateConfig,
    mode: Mode,
    line_break: &'a str,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a TemplateConfig, mode: Mode) -> Self {
        Self {
            config,
            mode,
            line_break: "\n",
            cancel: None,
        }
    }

    /// Line break sequence used in rendered comments.
    pub fn line_break(mut self, line_break: &'a str) -> Self {
        self.line_break = line_break;
        self
    }

    /// Abort the pass when `flag` is set; checked once per line.
    pub fn cancel_on(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Scan `lines` (without line breaks). `progress` is called after each
    /// line with the 1-based line count processed and the total.
    pub fn scan<S, F>(&self, lines: &[S], mut progress: F) -> Result<Vec<Edit>, ScanError>
    where
        S: AsRef<str>,
        F: FnMut(usize, usize),
    {
        let total = lines.len();
        let mut state = LineScanState::default();
        let mut edits = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(ScanError::Cancelled { line: index });
            }
            self.step(&mut state, index, line.as_ref(), &mut edits);
            progress(index + 1, total);
        }

        if let Some(open) = state.continuation {
            debug!(line = open.first_line(), "parameter list never closed, no comment inserted");
        }
        debug!(mode = ?self.mode, lines = total, edits = edits.len(), "scan complete");
        Ok(edits)
    }

    fn step(&self, s: &mut LineScanState, index: usize, line: &str, edits: &mut Vec<Edit>) {
        // `///` lines abort any open list and reset the attribute run
        if matcher::is_existing_comment(line) {
            if let Some(open) = s.continuation.take() {
                debug!(line = open.first_line(), "comment inside parameter list, continuation dropped");
            }
            s.skipped_list = None;
            s.after_comment = true;
            s.attribute_start = None;
            if self.mode == Mode::Regenerate {
                edits.push(Edit::Delete { line: index });
            }
            return;
        }

        // Inside an open list every line is a parameter fragment
        if let Some(open) = s.continuation.as_mut() {
            if let Some(text) = open.accept(line, self.config) {
                edits.push(Edit::Insert {
                    line: open.insert_at(),
                    text,
                });
                s.continuation = None;
            }
            return;
        }

        if let Some(depth) = s.skipped_list.as_mut() {
            if depth.advance(line).is_some() {
                s.skipped_list = None;
            }
            return;
        }

        if matcher::is_attribute(line) {
            s.attribute_start.get_or_insert(index);
            return;
        }

        let documented = self.mode == Mode::FillMissing && s.after_comment;
        let insert_at = s.attribute_start.take().unwrap_or(index);
        s.after_comment = false;

        let Some(decl) = matcher::match_declaration(line) else {
            return;
        };
        let raw = decl.raw_parameters().unwrap_or_default();
        let text = if documented || !self.config.allows(decl.access()) {
            None
        } else {
            render(&decl, self.config, self.line_break)
        };

        match (text, decl.is_open()) {
            (Some(text), true) => {
                let nl = newline_token(self.line_break, decl.indent());
                s.continuation = Some(Continuation::open(insert_at, index, text, raw, nl));
            }
            (Some(text), false) => edits.push(Edit::Insert {
                line: insert_at,
                text,
            }),
            (None, true) => s.skipped_list = Some(ListDepth::after(raw)),
            (None, false) => {}
        }
    }
}

/// Run one pass with default options: `\n` line breaks, no cancellation.
pub fn generate<S: AsRef<str>>(lines: &[S], config: &TemplateConfig, mode: Mode) -> Vec<Edit> {
    match Scanner::new(config, mode).scan(lines, |_, _| {}) {
        Ok(edits) => edits,
        Err(ScanError::Cancelled { .. }) => Vec::new(),
    }
}
