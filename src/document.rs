//! The document model: the full editable text and its low-level edit operations.

use crate::types::{LineEnding, Pos};
use crate::utils::char_to_byte_index;
use std::cmp::min;

/// The in-memory document: a list of lines plus the line ending detected on
/// load. Plenty for the plain-text files this editor targets; a rope would
/// only pay off on much larger documents.
pub struct Document {
    pub lines: Vec<String>,
    pub line_ending: LineEnding,
}

impl Document {
    /// An empty document: one empty line, LF.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            line_ending: LineEnding::Lf,
        }
    }

    /// Build a document from on-disk text, detecting the line ending.
    pub fn from_text(s: &str) -> Self {
        let line_ending = if s.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        let mut lines: Vec<String> = s
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }

        Self { lines, line_ending }
    }

    /// Serialize for saving, using the detected line ending.
    pub fn contents(&self) -> String {
        self.lines.join(self.line_ending.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    /// Number of line-break characters in the document. This is what the
    /// line-number overlay counts: one less than the number of lines.
    pub fn break_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Clamp a position onto a valid line and column.
    pub fn clamp(&self, mut p: Pos) -> Pos {
        p.line = min(p.line, self.lines.len().saturating_sub(1));
        p.col = min(p.col, self.line_len(p.line));
        p
    }

    /// Split the line at `p` in two; returns the start of the new line.
    pub fn break_line(&mut self, p: Pos) -> Pos {
        let line = &mut self.lines[p.line];
        let bi = char_to_byte_index(line, p.col);
        let tail = line.split_off(bi);
        self.lines.insert(p.line + 1, tail);
        Pos { line: p.line + 1, col: 0 }
    }

    /// Backspace: delete the character before `p`, merging with the previous
    /// line when at column 0. Returns the new cursor position.
    pub fn remove_before(&mut self, p: Pos) -> Pos {
        if p.line >= self.lines.len() {
            return Pos::ORIGIN;
        }
        if p.col > 0 {
            let line = &mut self.lines[p.line];
            let bi = char_to_byte_index(line, p.col - 1);
            line.remove(bi);
            Pos { line: p.line, col: p.col - 1 }
        } else if p.line > 0 {
            let tail = self.lines.remove(p.line);
            let prev = &mut self.lines[p.line - 1];
            let col = prev.chars().count();
            prev.push_str(&tail);
            Pos { line: p.line - 1, col }
        } else {
            p
        }
    }

    /// Delete key: delete the character at `p`, merging with the next line
    /// when at end of line. The cursor does not move.
    pub fn remove_at(&mut self, p: Pos) -> Pos {
        if p.line >= self.lines.len() {
            return Pos::ORIGIN;
        }
        if p.col < self.line_len(p.line) {
            let line = &mut self.lines[p.line];
            let bi = char_to_byte_index(line, p.col);
            line.remove(bi);
        } else if p.line + 1 < self.lines.len() {
            let next = self.lines.remove(p.line + 1);
            self.lines[p.line].push_str(&next);
        }
        p
    }

    /// Extract the text between two positions (in either order).
    pub fn slice(&self, start: Pos, end: Pos) -> String {
        if start == end {
            return String::new();
        }
        let (a, b) = if start <= end { (start, end) } else { (end, start) };

        if a.line == b.line {
            let line = &self.lines[a.line];
            let b0 = char_to_byte_index(line, a.col);
            let b1 = char_to_byte_index(line, b.col);
            return line[b0..b1].to_string();
        }

        let mut out = String::new();
        let first = &self.lines[a.line];
        out.push_str(&first[char_to_byte_index(first, a.col)..]);
        out.push('\n');
        for line in &self.lines[a.line + 1..b.line] {
            out.push_str(line);
            out.push('\n');
        }
        let last = &self.lines[b.line];
        out.push_str(&last[..char_to_byte_index(last, b.col)]);
        out
    }

    /// Delete the text between two positions; returns the start of the range.
    pub fn remove_range(&mut self, start: Pos, end: Pos) -> Pos {
        if start == end {
            return start;
        }
        let (a, b) = if start <= end { (start, end) } else { (end, start) };

        if a.line == b.line {
            let line = &mut self.lines[a.line];
            let b0 = char_to_byte_index(line, a.col);
            let b1 = char_to_byte_index(line, b.col);
            line.replace_range(b0..b1, "");
            return a;
        }

        let tail = {
            let last = &self.lines[b.line];
            last[char_to_byte_index(last, b.col)..].to_string()
        };
        let first = &mut self.lines[a.line];
        first.truncate(char_to_byte_index(first, a.col));
        self.lines.drain(a.line + 1..=b.line);
        self.lines[a.line].push_str(&tail);
        a
    }

    /// Insert a string (possibly multi-line) at a position; returns the
    /// position just after the inserted text.
    pub fn insert_text(&mut self, p: Pos, text: &str) -> Pos {
        let normalized = text.replace("\r\n", "\n");
        let parts: Vec<&str> = normalized.split('\n').collect();

        if parts.len() == 1 {
            let line = &mut self.lines[p.line];
            let bi = char_to_byte_index(line, p.col);
            line.insert_str(bi, parts[0]);
            return Pos { line: p.line, col: p.col + parts[0].chars().count() };
        }

        let tail = {
            let line = &mut self.lines[p.line];
            let bi = char_to_byte_index(line, p.col);
            line.split_off(bi)
        };
        self.lines[p.line].push_str(parts[0]);

        let mut at = p.line + 1;
        for mid in &parts[1..parts.len() - 1] {
            self.lines.insert(at, (*mid).to_string());
            at += 1;
        }

        let last_part = parts[parts.len() - 1];
        let mut last = last_part.to_string();
        last.push_str(&tail);
        self.lines.insert(at, last);

        Pos {
            line: p.line + parts.len() - 1,
            col: last_part.chars().count(),
        }
    }

    /// Where the cursor would land if `text` were inserted at `p`.
    pub fn end_of_insertion(&self, p: Pos, text: &str) -> Pos {
        let normalized = text.replace("\r\n", "\n");
        let parts: Vec<&str> = normalized.split('\n').collect();
        if parts.len() == 1 {
            Pos { line: p.line, col: p.col + parts[0].chars().count() }
        } else {
            Pos {
                line: p.line + parts.len() - 1,
                col: parts[parts.len() - 1].chars().count(),
            }
        }
    }

    /// Whether the document starts with exactly `prefix`. The line-number
    /// overlay uses this before removing its inserted block.
    pub fn starts_with(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        let end = self.end_of_insertion(Pos::ORIGIN, prefix);
        if end.line >= self.lines.len() || end.col > self.line_len(end.line) {
            return false;
        }
        self.slice(Pos::ORIGIN, end) == prefix.replace("\r\n", "\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_is_one_empty_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.lines[0], "");
        assert_eq!(doc.break_count(), 0);
    }

    #[test]
    fn from_text_detects_line_endings() {
        let lf = Document::from_text("a\nb\nc");
        assert_eq!(lf.line_count(), 3);
        assert_eq!(lf.line_ending, LineEnding::Lf);
        assert_eq!(lf.contents(), "a\nb\nc");

        let crlf = Document::from_text("a\r\nb");
        assert_eq!(crlf.line_count(), 2);
        assert_eq!(crlf.line_ending, LineEnding::CrLf);
        assert_eq!(crlf.contents(), "a\r\nb");
    }

    #[test]
    fn from_text_empty() {
        let doc = Document::from_text("");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.contents(), "");
    }

    #[test]
    fn insert_text_multibyte() {
        let mut doc = Document::from_text("hllo");
        let p = doc.insert_text(Pos { line: 0, col: 1 }, "é");
        assert_eq!(p, Pos { line: 0, col: 2 });
        assert_eq!(doc.lines[0], "héllo");
    }

    #[test]
    fn break_line_splits() {
        let mut doc = Document::from_text("hello world");
        let p = doc.break_line(Pos { line: 0, col: 5 });
        assert_eq!(p, Pos { line: 1, col: 0 });
        assert_eq!(doc.lines, vec!["hello", " world"]);
    }

    #[test]
    fn remove_before_merges_lines() {
        let mut doc = Document::from_text("one\ntwo");
        let p = doc.remove_before(Pos { line: 1, col: 0 });
        assert_eq!(p, Pos { line: 0, col: 3 });
        assert_eq!(doc.lines, vec!["onetwo"]);
    }

    #[test]
    fn remove_at_merges_lines() {
        let mut doc = Document::from_text("one\ntwo");
        doc.remove_at(Pos { line: 0, col: 3 });
        assert_eq!(doc.lines, vec!["onetwo"]);
    }

    #[test]
    fn slice_multiline() {
        let doc = Document::from_text("line1\nline2\nline3");
        let s = doc.slice(Pos { line: 0, col: 3 }, Pos { line: 2, col: 3 });
        assert_eq!(s, "e1\nline2\nlin");
    }

    #[test]
    fn slice_accepts_reversed_range() {
        let doc = Document::from_text("hello");
        let s = doc.slice(Pos { line: 0, col: 4 }, Pos { line: 0, col: 1 });
        assert_eq!(s, "ell");
    }

    #[test]
    fn remove_range_multiline() {
        let mut doc = Document::from_text("start\nmiddle\nend");
        let p = doc.remove_range(Pos { line: 0, col: 3 }, Pos { line: 2, col: 1 });
        assert_eq!(p, Pos { line: 0, col: 3 });
        assert_eq!(doc.lines, vec!["stand"]);
    }

    #[test]
    fn insert_text_multiline() {
        let mut doc = Document::from_text("start end");
        let p = doc.insert_text(Pos { line: 0, col: 6 }, "a\nb\nc");
        assert_eq!(doc.lines, vec!["start a", "b", "cend"]);
        assert_eq!(p, Pos { line: 2, col: 1 });
    }

    #[test]
    fn insert_then_end_of_insertion_agree() {
        let mut doc = Document::from_text("xy");
        let at = Pos { line: 0, col: 1 };
        let text = "1\n2\n";
        let predicted = doc.end_of_insertion(at, text);
        let actual = doc.insert_text(at, text);
        assert_eq!(predicted, actual);
    }

    #[test]
    fn starts_with_exact_prefix() {
        let doc = Document::from_text("1\n2\na\nb\nc");
        assert!(doc.starts_with("1\n2\n"));
        assert!(doc.starts_with(""));
        assert!(!doc.starts_with("1\n3\n"));
        assert!(!doc.starts_with("1\n2\na\nb\nc\nd"));
    }

    #[test]
    fn clamp_limits_line_and_col() {
        let doc = Document::from_text("short\nlonger line");
        assert_eq!(doc.clamp(Pos { line: 9, col: 0 }).line, 1);
        assert_eq!(doc.clamp(Pos { line: 0, col: 99 }).col, 5);
    }

    #[test]
    fn operations_with_cjk() {
        let mut doc = Document::from_text("日本語");
        assert_eq!(doc.line_len(0), 3);
        doc.insert_text(Pos { line: 0, col: 1 }, "中");
        assert_eq!(doc.lines[0], "日中本語");
        doc.remove_before(Pos { line: 0, col: 2 });
        assert_eq!(doc.lines[0], "日本語");
    }
}
