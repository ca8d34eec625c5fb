//! Undo/redo: stacks of edits with enough context to invert them.

use super::Editor;
use crate::types::{Edit, HistoryEntry};

/// Cap on history length; oldest entries fall off first.
const HISTORY_CAP: usize = 1000;

impl Editor {
    /// Record an edit about to be applied, for later undo.
    pub fn record_edit(&mut self, edit: Edit) {
        self.undo.push(HistoryEntry {
            edit,
            cursor: self.cursor,
            anchor: self.anchor,
        });
        if self.undo.len() > HISTORY_CAP {
            self.undo.drain(0..(self.undo.len() - HISTORY_CAP));
        }
        self.redo.clear();
    }

    /// Apply the inverse of `entry.edit`, returning the entry that redoes it.
    fn invert(&mut self, entry: &HistoryEntry) -> HistoryEntry {
        let inverse = match &entry.edit {
            Edit::Insert { at, text } => {
                let end = self.doc.end_of_insertion(*at, text);
                self.doc.remove_range(*at, end);
                Edit::Delete {
                    from: *at,
                    text: text.clone(),
                }
            }
            Edit::Delete { from, text } => {
                self.doc.insert_text(*from, text);
                Edit::Insert {
                    at: *from,
                    text: text.clone(),
                }
            }
        };
        HistoryEntry {
            edit: inverse,
            cursor: self.cursor,
            anchor: self.anchor,
        }
    }

    /// Undo the most recent edit. Empty history is a silent no-op.
    pub fn undo_edit(&mut self) {
        let Some(entry) = self.undo.pop() else { return };
        let redo_entry = self.invert(&entry);
        self.redo.push(redo_entry);
        self.cursor = self.doc.clamp(entry.cursor);
        self.anchor = entry.anchor;
        self.dirty = true;
        self.ensure_visible();
        self.mark_redraw();
    }

    /// Redo the most recently undone edit. Empty history is a silent no-op.
    pub fn redo_edit(&mut self) {
        let Some(entry) = self.redo.pop() else { return };
        let undo_entry = self.invert(&entry);
        self.undo.push(undo_entry);
        self.cursor = self.doc.clamp(entry.cursor);
        self.anchor = entry.anchor;
        self.dirty = true;
        self.ensure_visible();
        self.mark_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::types::Pos;

    fn editor_with(text: &str) -> Editor {
        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text(text);
        ed
    }

    #[test]
    fn undo_insert_removes_it() {
        let mut ed = editor_with("ab");
        ed.cursor = Pos { line: 0, col: 1 };
        ed.record_edit(Edit::Insert {
            at: ed.cursor,
            text: "XYZ".to_string(),
        });
        ed.replace_selection_or_insert("XYZ");
        assert_eq!(ed.doc.contents(), "aXYZb");

        ed.undo_edit();
        assert_eq!(ed.doc.contents(), "ab");
        assert_eq!(ed.cursor, Pos { line: 0, col: 1 });
    }

    #[test]
    fn redo_reapplies_after_undo() {
        let mut ed = editor_with("ab");
        ed.cursor = Pos { line: 0, col: 2 };
        ed.record_edit(Edit::Insert {
            at: ed.cursor,
            text: "c".to_string(),
        });
        ed.replace_selection_or_insert("c");
        ed.undo_edit();
        assert_eq!(ed.doc.contents(), "ab");
        ed.redo_edit();
        assert_eq!(ed.doc.contents(), "abc");
    }

    #[test]
    fn undo_delete_restores_text() {
        let mut ed = editor_with("hello world");
        let from = Pos { line: 0, col: 5 };
        let to = Pos { line: 0, col: 11 };
        let deleted = ed.doc.slice(from, to);
        ed.record_edit(Edit::Delete {
            from,
            text: deleted,
        });
        ed.doc.remove_range(from, to);
        assert_eq!(ed.doc.contents(), "hello");

        ed.undo_edit();
        assert_eq!(ed.doc.contents(), "hello world");
    }

    #[test]
    fn empty_stacks_are_silent_noops() {
        let mut ed = editor_with("abc");
        ed.undo_edit();
        ed.redo_edit();
        assert_eq!(ed.doc.contents(), "abc");
        assert!(!ed.dirty);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut ed = editor_with("a");
        ed.cursor = Pos { line: 0, col: 1 };
        ed.record_edit(Edit::Insert {
            at: ed.cursor,
            text: "b".to_string(),
        });
        ed.replace_selection_or_insert("b");
        ed.undo_edit();
        assert!(!ed.redo.is_empty());

        ed.cursor = Pos { line: 0, col: 1 };
        ed.record_edit(Edit::Insert {
            at: ed.cursor,
            text: "z".to_string(),
        });
        ed.replace_selection_or_insert("z");
        assert!(ed.redo.is_empty());
    }
}
