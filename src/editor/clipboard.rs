//! Clipboard operations: cut, copy, paste via the system clipboard.

use super::Editor;
use crate::types::Edit;
use std::time::Duration;

impl Editor {
    /// Copy the selection to the clipboard.
    pub fn copy(&mut self) {
        let text = self.selected_text();
        if text.is_empty() {
            self.set_status("Nothing selected to copy.", Duration::from_secs(2));
            return;
        }
        if let Some(cb) = &mut self.clipboard {
            cb.set_text(text).ok();
            self.set_status("Copied selection.", Duration::from_secs(2));
        } else {
            self.set_status("Clipboard unavailable.", Duration::from_secs(2));
        }
    }

    /// Cut the selection to the clipboard.
    pub fn cut(&mut self) {
        let text = self.selected_text();
        if text.is_empty() {
            self.set_status("Nothing selected to cut.", Duration::from_secs(2));
            return;
        }
        let Some((a, _)) = self.selection_range() else { return };
        self.record_edit(Edit::Delete {
            from: a,
            text: text.clone(),
        });

        if let Some(cb) = &mut self.clipboard {
            cb.set_text(text).ok();
        }
        self.delete_selection();
        self.ensure_visible();
        self.set_status("Cut selection.", Duration::from_secs(2));
    }

    /// Paste the clipboard at the cursor, replacing any selection.
    pub fn paste(&mut self) {
        let Some(text) = self
            .clipboard
            .as_mut()
            .and_then(|cb| cb.get_text().ok())
        else {
            self.set_status("Clipboard unavailable.", Duration::from_secs(2));
            return;
        };

        // The insert lands at the selection start once the selection is gone.
        let mut at = self.cursor;
        if let Some((a, b)) = self.selection_range() {
            let deleted = self.doc.slice(a, b);
            self.record_edit(Edit::Delete {
                from: a,
                text: deleted,
            });
            at = a;
        }
        self.record_edit(Edit::Insert {
            at,
            text: text.clone(),
        });
        self.replace_selection_or_insert(&text);
        self.ensure_visible();
        self.set_status("Pasted.", Duration::from_secs(2));
    }
}
