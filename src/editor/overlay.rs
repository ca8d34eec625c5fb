//! The line-number overlay: a right-justified column of line numbers
//! prepended into the document text, toggled from the View menu.
//!
//! The numbering block is ordinary document text once inserted: it is saved
//! with the file, editable, and visible to select-all. The editor remembers
//! the exact string it inserted so toggling off removes that string and
//! nothing else.

use super::Editor;
use crate::types::{Edit, Pos};
use crate::utils::digits;
use std::time::Duration;

/// Build the numbering block for a document with `breaks` line-break
/// characters: the integers `1..=breaks`, one per line, right-justified to
/// the width of the largest, followed by a final line break. Zero breaks
/// produce an empty block.
fn number_block(breaks: usize) -> String {
    if breaks == 0 {
        return String::new();
    }
    let width = digits(breaks);
    let mut block = String::new();
    for n in 1..=breaks {
        block.push_str(&format!("{n:>width$}"));
        block.push('\n');
    }
    block
}

impl Editor {
    /// Toggle the line-number overlay.
    pub fn toggle_line_numbers(&mut self) {
        if self.overlay.active {
            self.remove_line_numbers();
        } else {
            self.apply_line_numbers();
        }
        self.cursor = self.doc.clamp(self.cursor);
        self.clear_selection();
        self.ensure_visible();
        self.mark_redraw();
    }

    fn apply_line_numbers(&mut self) {
        let block = number_block(self.doc.break_count());
        self.overlay.active = true;
        self.overlay.inserted = block.clone();

        if block.is_empty() {
            self.set_status("Line numbers: on (nothing to number)", Duration::from_secs(2));
            return;
        }

        self.record_edit(Edit::Insert {
            at: Pos::ORIGIN,
            text: block.clone(),
        });
        let shift = block.matches('\n').count();
        self.doc.insert_text(Pos::ORIGIN, &block);
        self.cursor.line += shift;
        self.dirty = true;
        self.set_status("Line numbers: on", Duration::from_secs(2));
    }

    fn remove_line_numbers(&mut self) {
        let block = std::mem::take(&mut self.overlay.inserted);
        self.overlay.active = false;

        if block.is_empty() {
            self.set_status("Line numbers: off", Duration::from_secs(2));
            return;
        }

        // Only remove text that is still exactly the block we inserted. If
        // the user edited or undid inside it, clearing the flag is all we can
        // do safely.
        if !self.doc.starts_with(&block) {
            self.set_status(
                "Line numbers: off (numbering block was edited, left in place)",
                Duration::from_secs(3),
            );
            return;
        }

        self.record_edit(Edit::Delete {
            from: Pos::ORIGIN,
            text: block.clone(),
        });
        let end = self.doc.end_of_insertion(Pos::ORIGIN, &block);
        self.doc.remove_range(Pos::ORIGIN, end);
        let shift = block.matches('\n').count();
        self.cursor.line = self.cursor.line.saturating_sub(shift);
        self.dirty = true;
        self.set_status("Line numbers: off", Duration::from_secs(2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn editor_with(text: &str) -> Editor {
        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text(text);
        ed
    }

    #[test]
    fn two_breaks_number_two_lines() {
        // "a\nb\nc" has two line breaks, so the block is "1\n2\n".
        let mut ed = editor_with("a\nb\nc");
        ed.toggle_line_numbers();
        assert!(ed.overlay.active);
        assert_eq!(ed.doc.contents(), "1\n2\na\nb\nc");
    }

    #[test]
    fn toggle_on_then_off_restores_content() {
        let mut ed = editor_with("alpha\nbeta\ngamma\n");
        ed.toggle_line_numbers();
        ed.toggle_line_numbers();
        assert!(!ed.overlay.active);
        assert_eq!(ed.doc.contents(), "alpha\nbeta\ngamma\n");
        assert!(ed.overlay.inserted.is_empty());
    }

    #[test]
    fn empty_document_is_unchanged() {
        let mut ed = editor_with("");
        ed.toggle_line_numbers();
        assert!(ed.overlay.active);
        assert_eq!(ed.doc.contents(), "");
        ed.toggle_line_numbers();
        assert!(!ed.overlay.active);
        assert_eq!(ed.doc.contents(), "");
    }

    #[test]
    fn single_line_without_break_is_unchanged() {
        let mut ed = editor_with("just one line");
        ed.toggle_line_numbers();
        assert_eq!(ed.doc.contents(), "just one line");
    }

    #[test]
    fn numbers_are_right_justified_to_block_width() {
        let text = "x\n".repeat(12); // 12 breaks, width 2
        let mut ed = editor_with(&text);
        ed.toggle_line_numbers();
        let contents = ed.doc.contents();
        let lines: Vec<&str> = contents.lines().take(12).map(str::trim_end).collect();
        assert_eq!(lines[0], " 1");
        assert_eq!(lines[8], " 9");
        assert_eq!(lines[9], "10");
        assert_eq!(lines[11], "12");
    }

    #[test]
    fn every_number_from_one_to_n_is_present() {
        for breaks in 0..=25 {
            let block = number_block(breaks);
            let nums: Vec<usize> = block.lines().map(|l| l.trim().parse().unwrap()).collect();
            assert_eq!(nums.len(), breaks);
            assert_eq!(nums, (1..=breaks).collect::<Vec<_>>());
        }
    }

    #[test]
    fn edited_block_is_left_in_place_on_toggle_off() {
        let mut ed = editor_with("a\nb\nc");
        ed.toggle_line_numbers();
        // user mangles the first number
        ed.doc.lines[0] = "9".to_string();
        ed.toggle_line_numbers();
        assert!(!ed.overlay.active);
        assert_eq!(ed.doc.contents(), "9\n2\na\nb\nc");
    }

    #[test]
    fn toggle_is_undoable() {
        let mut ed = editor_with("a\nb\nc");
        ed.toggle_line_numbers();
        assert_eq!(ed.doc.contents(), "1\n2\na\nb\nc");
        ed.undo_edit();
        assert_eq!(ed.doc.contents(), "a\nb\nc");
        // the flag is still set, but with the block undone away the next
        // toggle just clears it
        ed.toggle_line_numbers();
        assert!(!ed.overlay.active);
        assert_eq!(ed.doc.contents(), "a\nb\nc");
    }

    #[test]
    fn cursor_follows_the_shifted_text() {
        let mut ed = editor_with("a\nb\nc");
        ed.cursor = Pos { line: 1, col: 1 };
        ed.toggle_line_numbers();
        assert_eq!(ed.cursor, Pos { line: 3, col: 1 });
        ed.toggle_line_numbers();
        assert_eq!(ed.cursor, Pos { line: 1, col: 1 });
    }
}
