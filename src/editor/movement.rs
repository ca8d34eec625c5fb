//! Cursor movement.

use super::Editor;
use crossterm::event::{KeyCode, KeyEvent};
use std::cmp::min;

impl Editor {
    /// Move the cursor for a movement key. With `selecting` (Shift held) the
    /// selection is created or extended; otherwise it is cleared.
    pub fn move_cursor(&mut self, key: &KeyEvent, selecting: bool) {
        if selecting && self.anchor.is_none() {
            self.anchor = Some(self.cursor);
            self.mark_redraw();
        }
        if !selecting {
            self.clear_selection();
        }

        let page = self.text_height().saturating_sub(1).max(1);
        let mut p = self.cursor;

        match key.code {
            KeyCode::Left => {
                if p.col > 0 {
                    p.col -= 1;
                } else if p.line > 0 {
                    p.line -= 1;
                    p.col = self.doc.line_len(p.line);
                }
            }
            KeyCode::Right => {
                if p.col < self.doc.line_len(p.line) {
                    p.col += 1;
                } else if p.line + 1 < self.doc.line_count() {
                    p.line += 1;
                    p.col = 0;
                }
            }
            KeyCode::Up => {
                if p.line > 0 {
                    p.line -= 1;
                    p.col = min(p.col, self.doc.line_len(p.line));
                }
            }
            KeyCode::Down => {
                if p.line + 1 < self.doc.line_count() {
                    p.line += 1;
                    p.col = min(p.col, self.doc.line_len(p.line));
                }
            }
            KeyCode::Home => {
                p.col = 0;
            }
            KeyCode::End => {
                p.col = self.doc.line_len(p.line);
            }
            KeyCode::PageUp => {
                p.line = p.line.saturating_sub(page);
                p.col = min(p.col, self.doc.line_len(p.line));
            }
            KeyCode::PageDown => {
                p.line = min(p.line + page, self.doc.line_count().saturating_sub(1));
                p.col = min(p.col, self.doc.line_len(p.line));
            }
            _ => {}
        }

        let old = self.cursor;
        self.cursor = self.doc.clamp(p);
        if old != self.cursor {
            self.mark_redraw();
        }
        self.ensure_visible();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::types::Pos;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editor_with(text: &str) -> Editor {
        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text(text);
        ed
    }

    #[test]
    fn left_at_line_start_wraps_to_previous_line_end() {
        let mut ed = editor_with("abc\nde");
        ed.cursor = Pos { line: 1, col: 0 };
        ed.move_cursor(&key(KeyCode::Left), false);
        assert_eq!(ed.cursor, Pos { line: 0, col: 3 });
    }

    #[test]
    fn right_at_line_end_wraps_to_next_line_start() {
        let mut ed = editor_with("abc\nde");
        ed.cursor = Pos { line: 0, col: 3 };
        ed.move_cursor(&key(KeyCode::Right), false);
        assert_eq!(ed.cursor, Pos { line: 1, col: 0 });
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let mut ed = editor_with("long line\nab");
        ed.cursor = Pos { line: 0, col: 9 };
        ed.move_cursor(&key(KeyCode::Down), false);
        assert_eq!(ed.cursor, Pos { line: 1, col: 2 });
    }

    #[test]
    fn shift_movement_extends_selection() {
        let mut ed = editor_with("hello");
        ed.move_cursor(&key(KeyCode::Right), true);
        ed.move_cursor(&key(KeyCode::Right), true);
        assert_eq!(ed.selected_text(), "he");
        // plain movement drops the selection
        ed.move_cursor(&key(KeyCode::Left), false);
        assert!(ed.selection_range().is_none());
    }

    #[test]
    fn home_and_end() {
        let mut ed = editor_with("whatever");
        ed.cursor = Pos { line: 0, col: 4 };
        ed.move_cursor(&key(KeyCode::End), false);
        assert_eq!(ed.cursor.col, 8);
        ed.move_cursor(&key(KeyCode::Home), false);
        assert_eq!(ed.cursor.col, 0);
    }
}
