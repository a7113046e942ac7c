//! In-memory text snapshot: line spans and batched edit application.

use anyhow::{ensure, Context, Result};
use autocomment_engine::Edit;

/// Byte offsets of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    /// End of the line text, before any line break
    pub end: usize,
    pub end_including_break: usize,
}

/// Read-only view of a document split into lines.
pub struct Snapshot<'a> {
    text: &'a str,
    spans: Vec<LineSpan>,
}

impl<'a> Snapshot<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut spans = Vec::new();
        let mut start = 0;
        while start < text.len() {
            let (end, end_including_break) = match text[start..].find('\n') {
                Some(rel) => {
                    let newline = start + rel;
                    let end = if newline > start && text.as_bytes()[newline - 1] == b'\r' {
                        newline - 1
                    } else {
                        newline
                    };
                    (end, newline + 1)
                }
                None => (text.len(), text.len()),
            };
            spans.push(LineSpan {
                start,
                end,
                end_including_break,
            });
            start = end_including_break;
        }
        Self { text, spans }
    }

    /// Line texts without their line breaks.
    pub fn lines(&self) -> Vec<&'a str> {
        self.spans
            .iter()
            .map(|span| &self.text[span.start..span.end])
            .collect()
    }

    /// The first line break in the document, `\n` when there is none.
    pub fn detect_line_break(&self) -> &'static str {
        self.spans
            .iter()
            .map(|span| &self.text[span.end..span.end_including_break])
            .find(|brk| !brk.is_empty())
            .map_or("\n", |brk| if brk == "\r\n" { "\r\n" } else { "\n" })
    }

    /// Apply a batch of edits and return the new text. The snapshot itself is
    /// never modified, so a failed batch leaves nothing half-applied.
    pub fn apply(&self, edits: &[Edit]) -> Result<String> {
        let mut ordered: Vec<&Edit> = edits.iter().collect();
        ordered.sort_by_key(|edit| edit.line());

        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for edit in ordered {
            let line = edit.line();
            let span = self.spans.get(line).with_context(|| {
                format!(
                    "edit references line {} but the document has {} lines",
                    line + 1,
                    self.spans.len()
                )
            })?;
            ensure!(span.start >= cursor, "overlapping edits at line {}", line + 1);
            out.push_str(&self.text[cursor..span.start]);
            match edit {
                Edit::Insert { text, .. } => {
                    out.push_str(text);
                    cursor = span.start;
                }
                Edit::Delete { .. } => cursor = span.end_including_break,
            }
        }
        out.push_str(&self.text[cursor..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lf_and_crlf() {
        let snapshot = Snapshot::new("a\r\nbb\nccc");
        assert_eq!(snapshot.lines(), vec!["a", "bb", "ccc"]);
        assert_eq!(
            snapshot.spans,
            vec![
                LineSpan { start: 0, end: 1, end_including_break: 3 },
                LineSpan { start: 3, end: 5, end_including_break: 6 },
                LineSpan { start: 6, end: 9, end_including_break: 9 },
            ]
        );
    }

    #[test]
    fn trailing_newline_has_no_empty_line() {
        assert_eq!(Snapshot::new("a\nb\n").lines(), vec!["a", "b"]);
        assert!(Snapshot::new("").lines().is_empty());
        assert_eq!(Snapshot::new("\n\n").lines(), vec!["", ""]);
    }

    #[test]
    fn detects_line_break() {
        assert_eq!(Snapshot::new("a\r\nb\n").detect_line_break(), "\r\n");
        assert_eq!(Snapshot::new("a\nb\r\n").detect_line_break(), "\n");
        assert_eq!(Snapshot::new("single").detect_line_break(), "\n");
    }

    #[test]
    fn applies_inserts_and_deletes() {
        let snapshot = Snapshot::new("/// old\r\nvoid A();\r\nvoid B();");
        let edits = vec![
            Edit::Delete { line: 0 },
            Edit::Insert { line: 1, text: "/// a\r\n".to_string() },
            Edit::Insert { line: 2, text: "/// b\r\n".to_string() },
        ];
        assert_eq!(
            snapshot.apply(&edits).unwrap(),
            "/// a\r\nvoid A();\r\n/// b\r\nvoid B();"
        );
    }

    #[test]
    fn no_edits_is_identity() {
        let text = "x\r\ny\n";
        assert_eq!(Snapshot::new(text).apply(&[]).unwrap(), text);
    }

    #[test]
    fn out_of_range_edit_fails() {
        let snapshot = Snapshot::new("one line\n");
        let err = snapshot
            .apply(&[Edit::Delete { line: 4 }])
            .unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn overlapping_edits_fail() {
        let snapshot = Snapshot::new("a\nb\n");
        let edits = vec![
            Edit::Delete { line: 0 },
            Edit::Insert { line: 0, text: "x\n".to_string() },
        ];
        assert!(snapshot.apply(&edits).is_err());
    }
}
