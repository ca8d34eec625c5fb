//! File operations: new, open, save, save-as.

use super::Editor;
use crate::document::Document;
use crate::types::{OverlayState, Pos, Prompt, PromptKind};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

impl Editor {
    /// Start an empty document. Clears the stored path, the history, and the
    /// line-number overlay; Save will fall through to Save As.
    pub fn cmd_new(&mut self) {
        self.doc = Document::new();
        self.cursor = Pos::ORIGIN;
        self.anchor = None;
        self.scroll_line = 0;
        self.scroll_col = 0;
        self.file_path = None;
        self.dirty = false;
        self.overlay = OverlayState::default();
        self.undo.clear();
        self.redo.clear();
        self.set_status("New file", Duration::from_secs(2));
    }

    /// Save to the stored path, or prompt for one if there is none.
    pub fn cmd_save(&mut self) {
        let Some(path) = self.file_path.clone() else {
            self.prompt = Some(Prompt::new(PromptKind::SaveAs, ""));
            self.mark_redraw();
            return;
        };
        if let Err(e) = self.save_to_path(path) {
            self.set_status(format!("{e:#}"), Duration::from_secs(4));
        }
    }

    /// Save to `path`, reporting failure in the status bar.
    pub fn cmd_save_to(&mut self, path: PathBuf) {
        if let Err(e) = self.save_to_path(path) {
            self.set_status(format!("{e:#}"), Duration::from_secs(4));
        }
    }

    /// Open `path`, reporting failure in the status bar.
    pub fn cmd_open(&mut self, path: PathBuf) {
        if let Err(e) = self.open_path(path) {
            self.set_status(format!("{e:#}"), Duration::from_secs(4));
        }
    }

    fn save_to_path(&mut self, path: PathBuf) -> Result<()> {
        let content = self.doc.contents();
        fs::write(&path, content)
            .with_context(|| format!("Failed writing {}", path.display()))?;
        self.file_path = Some(path.clone());
        self.dirty = false;
        self.set_status(format!("Saved: {}", path.display()), Duration::from_secs(2));
        Ok(())
    }

    fn open_path(&mut self, path: PathBuf) -> Result<()> {
        let s = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.doc = Document::from_text(&s);
        self.cursor = Pos::ORIGIN;
        self.anchor = None;
        self.scroll_line = 0;
        self.scroll_col = 0;
        self.file_path = Some(path.clone());
        self.dirty = false;
        self.overlay = OverlayState::default();
        self.undo.clear();
        self.redo.clear();
        self.set_status(format!("Opened: {}", path.display()), Duration::from_secs(2));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("medit-test-{}-{name}", std::process::id()));
        p
    }

    #[test]
    fn save_then_open_round_trips_bytes() {
        let path = temp_file("roundtrip.txt");
        let text = "first\nsecond\n\nlast";

        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text(text);
        ed.cmd_save_to(path.clone());
        assert_eq!(ed.file_path.as_deref(), Some(path.as_path()));
        assert!(!ed.dirty);

        let mut ed2 = Editor::new(None).unwrap();
        ed2.cmd_open(path.clone());
        assert_eq!(ed2.doc.contents(), text);
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn crlf_round_trip_preserves_endings() {
        let path = temp_file("crlf.txt");
        let text = "one\r\ntwo\r\nthree";

        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text(text);
        ed.cmd_save_to(path.clone());
        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn new_file_clears_document_and_overlay() {
        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text("a\nb\nc");
        ed.toggle_line_numbers();
        assert!(ed.overlay.active);

        ed.cmd_new();
        assert_eq!(ed.doc.contents(), "");
        assert!(!ed.overlay.active);
        assert!(ed.file_path.is_none());
        assert!(!ed.dirty);
        assert!(ed.undo.is_empty());
    }

    #[test]
    fn open_resets_overlay_state() {
        let path = temp_file("overlay-reset.txt");
        fs::write(&path, "x\ny\n").unwrap();

        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text("a\nb\nc");
        ed.toggle_line_numbers();
        ed.cmd_open(path.clone());
        assert!(!ed.overlay.active);
        assert_eq!(ed.doc.contents(), "x\ny\n");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn open_failure_is_a_status_message_not_a_crash() {
        let mut ed = Editor::new(None).unwrap();
        ed.doc = Document::from_text("keep me");
        ed.cmd_open(PathBuf::from("/definitely/not/a/real/path.txt"));
        assert_eq!(ed.doc.contents(), "keep me");
        let msg = ed.status.as_ref().unwrap().text.clone();
        assert!(msg.contains("Failed to read"), "status was: {msg}");
    }

    #[test]
    fn save_without_path_prompts_for_one() {
        let mut ed = Editor::new(None).unwrap();
        ed.cmd_save();
        assert_eq!(ed.prompt.as_ref().map(|p| p.kind), Some(PromptKind::SaveAs));
    }
}
