//! Editor: the main application state and all editing operations.

mod builtin_commands;
mod clipboard;
mod file_ops;
mod input;
mod movement;
mod overlay;
mod render;
mod undo;

use crate::commands::CommandRegistry;
use crate::document::Document;
use crate::menu::MenuState;
use crate::types::{BgColor, HistoryEntry, OverlayState, Pos, Prompt, StatusMsg};
use anyhow::{Context, Result};
use builtin_commands::register_builtin_commands;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthChar;

/// The top-level application state.
pub struct Editor {
    /// The editable document.
    pub doc: Document,
    /// Cursor position.
    pub cursor: Pos,
    /// Selection anchor (selection runs from here to the cursor).
    pub anchor: Option<Pos>,
    /// Viewport scroll position.
    pub scroll_line: usize,
    pub scroll_col: usize,
    /// Where Save writes to. Explicit state, set by Open and Save As.
    pub file_path: Option<PathBuf>,
    /// Unsaved changes.
    pub dirty: bool,
    /// Line-number overlay state.
    pub overlay: OverlayState,
    /// Text-area background chosen from the Format menu.
    pub bg_color: Option<BgColor>,
    /// Menu-bar navigation state.
    pub(crate) menu: MenuState,
    /// Bottom-line prompt, when one is active.
    pub(crate) prompt: Option<Prompt>,
    /// Short-lived status message.
    pub(crate) status: Option<StatusMsg>,
    /// Tracks the press-twice quit confirmation.
    pub(crate) last_quit_hint: Option<Instant>,
    /// Undo and redo stacks.
    pub(crate) undo: Vec<HistoryEntry>,
    pub(crate) redo: Vec<HistoryEntry>,
    /// System clipboard, when one is available.
    pub(crate) clipboard: Option<arboard::Clipboard>,
    /// Command registry (menu items, keybindings, palette).
    pub(crate) commands: CommandRegistry,
    /// Whether the screen needs to be redrawn.
    pub(crate) needs_redraw: bool,
    /// Cached terminal size, updated from resize events.
    pub(crate) view_w: usize,
    pub(crate) view_h: usize,
}

impl Editor {
    /// Create a new editor, loading `path` if it names an existing file.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let mut doc = Document::new();
        let mut file_path = None;

        if let Some(p) = path {
            if p.exists() {
                let s = fs::read_to_string(&p)
                    .with_context(|| format!("Failed to read file: {}", p.display()))?;
                doc = Document::from_text(&s);
            }
            file_path = Some(p);
        }

        let mut commands = CommandRegistry::new();
        register_builtin_commands(&mut commands);

        let mut ed = Self {
            doc,
            cursor: Pos::ORIGIN,
            anchor: None,
            scroll_line: 0,
            scroll_col: 0,
            file_path,
            dirty: false,
            overlay: OverlayState::default(),
            bg_color: None,
            menu: MenuState::new(),
            prompt: None,
            status: None,
            last_quit_hint: None,
            undo: vec![],
            redo: vec![],
            clipboard: arboard::Clipboard::new().ok(),
            commands,
            needs_redraw: true,
            view_w: 80,
            view_h: 24,
        };

        ed.set_status(
            "F10 menu • Ctrl+P commands • Ctrl+S save • Ctrl+Q quit",
            Duration::from_secs(4),
        );
        Ok(ed)
    }

    /// Mark that the screen needs to be redrawn.
    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Record the current terminal size. Called from the main loop so the
    /// rest of the editor never has to query the terminal itself.
    pub fn set_view_size(&mut self, w: u16, h: u16) {
        self.view_w = w as usize;
        self.view_h = h as usize;
        self.mark_redraw();
    }

    /// Rows available for document text: everything between the menu bar and
    /// the prompt/status lines.
    pub(crate) fn text_height(&self) -> usize {
        let prompt_lines = usize::from(self.prompt.is_some());
        self.view_h.saturating_sub(2 + prompt_lines)
    }

    /// Periodic update: expire the transient status message.
    pub fn tick(&mut self) {
        if let Some(st) = &self.status {
            if Instant::now() >= st.until {
                self.status = None;
                self.mark_redraw();
            }
        }
    }

    /// Show a message in the status bar.
    pub fn set_status(&mut self, msg: impl Into<String>, ttl: Duration) {
        self.status = Some(StatusMsg {
            text: msg.into(),
            until: Instant::now() + ttl,
        });
        self.mark_redraw();
    }

    /// The normalized selection range, if any text is selected.
    pub fn selection_range(&self) -> Option<(Pos, Pos)> {
        let a = self.anchor?;
        if a == self.cursor {
            None
        } else if a <= self.cursor {
            Some((a, self.cursor))
        } else {
            Some((self.cursor, a))
        }
    }

    /// Clear any selection.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
        self.mark_redraw();
    }

    /// Select the entire document.
    pub fn select_all(&mut self) {
        self.anchor = Some(Pos::ORIGIN);
        let last = self.doc.line_count().saturating_sub(1);
        self.cursor = Pos {
            line: last,
            col: self.doc.line_len(last),
        };
        self.mark_redraw();
    }

    /// Extract the selected text.
    pub fn selected_text(&self) -> String {
        match self.selection_range() {
            Some((a, b)) => self.doc.slice(a, b),
            None => String::new(),
        }
    }

    /// Delete the current selection, if any.
    pub fn delete_selection(&mut self) {
        if let Some((a, b)) = self.selection_range() {
            self.cursor = self.doc.remove_range(a, b);
            self.clear_selection();
            self.dirty = true;
        }
    }

    /// Replace the selection with `text`, or insert at the cursor.
    pub fn replace_selection_or_insert(&mut self, text: &str) {
        if self.selection_range().is_some() {
            self.delete_selection();
        }
        self.cursor = self.doc.insert_text(self.cursor, text);
        self.dirty = true;
        self.mark_redraw();
    }

    /// Adjust scroll so the cursor is inside the viewport.
    pub fn ensure_visible(&mut self) {
        let text_h = self.text_height();
        let old = (self.scroll_line, self.scroll_col);

        if self.cursor.line < self.scroll_line {
            self.scroll_line = self.cursor.line;
        } else if text_h > 0 && self.cursor.line >= self.scroll_line + text_h {
            self.scroll_line = self.cursor.line - (text_h - 1);
        }

        let avail = self.view_w.saturating_sub(1);
        let line = &self.doc.lines[self.cursor.line];
        let cursor_col: usize = line
            .chars()
            .take(self.cursor.col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum();
        let scroll_col: usize = line
            .chars()
            .take(self.scroll_col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum();

        if cursor_col < scroll_col {
            self.scroll_col = self.cursor.col;
        } else if avail > 0 && cursor_col >= scroll_col + avail {
            let target = cursor_col.saturating_sub(avail - 1);
            let mut col = 0;
            let mut new_scroll = 0;
            for (i, ch) in line.chars().enumerate() {
                if col >= target {
                    new_scroll = i;
                    break;
                }
                col += UnicodeWidthChar::width(ch).unwrap_or(1);
            }
            self.scroll_col = new_scroll;
        }

        if old != (self.scroll_line, self.scroll_col) {
            self.mark_redraw();
        }
    }

    /// Run a command by name. Returns `Ok(true)` if the editor should quit.
    pub fn run_command_by_name(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("quit") {
            return Ok(self.try_quit());
        }

        if let Some(cmd) = self.commands.get(name).cloned() {
            (cmd.action)(self)?;
            self.mark_redraw();
            Ok(false)
        } else {
            let mut msg = format!("Unknown command: '{name}'");
            if let Some(suggestion) = self.commands.suggest(name) {
                msg.push_str(&format!(". Did you mean '{}'?", suggestion.name));
            }
            self.set_status(msg, Duration::from_secs(3));
            Ok(false)
        }
    }

    /// Quit, with a press-twice confirmation when there are unsaved changes.
    pub fn try_quit(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        let now = Instant::now();
        if let Some(t) = self.last_quit_hint {
            if now.duration_since(t) <= Duration::from_secs(2) {
                return true;
            }
        }
        self.last_quit_hint = Some(now);
        self.set_status(
            "Unsaved changes! Quit again within 2s to discard.",
            Duration::from_secs(2),
        );
        false
    }
}
