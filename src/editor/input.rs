//! Input handling: menu navigation, prompt editing, keybindings, direct edits.

use super::Editor;
use crate::commands::canonical_key_string;
use crate::types::{BgColor, Edit, Pos, Prompt, PromptKind};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cmp::min;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Filesystem completions for a partial path, directories first (with a
/// trailing `/`), then files, both alphabetically.
fn path_completions(partial: &str) -> Vec<String> {
    let path = Path::new(partial);
    let (dir, prefix) = if partial.is_empty() {
        (PathBuf::from("."), String::new())
    } else if partial.ends_with('/') || path.is_dir() {
        (path.to_path_buf(), String::new())
    } else {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        (parent, name)
    };

    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with(&prefix) {
            continue;
        }
        let joined = if dir == Path::new(".") && !partial.starts_with("./") {
            name
        } else {
            dir.join(&name).to_string_lossy().into_owned()
        };
        if entry.path().is_dir() {
            out.push(format!("{joined}/"));
        } else {
            out.push(joined);
        }
    }

    out.sort_by(|a, b| {
        let (a_dir, b_dir) = (a.ends_with('/'), b.ends_with('/'));
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    out
}

/// Longest common prefix of a completion set.
fn common_prefix(items: &[String]) -> String {
    let Some(first) = items.first() else {
        return String::new();
    };
    let mut prefix: Vec<char> = first.chars().collect();
    for s in &items[1..] {
        let shared = prefix
            .iter()
            .zip(s.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
    }
    prefix.into_iter().collect()
}

impl Editor {
    /// Top-level key handler.
    ///
    /// Returns `Ok(true)` if the editor should quit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        if self.menu.open {
            return self.handle_menu_key(key);
        }
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }

        if key.code == KeyCode::F(10) {
            self.menu.activate();
            self.mark_redraw();
            return Ok(false);
        }

        // Movement keys (selection-aware).
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::PageUp
            | KeyCode::PageDown => {
                let selecting = key.modifiers.contains(KeyModifiers::SHIFT);
                self.move_cursor(key, selecting);
                return Ok(false);
            }
            _ => {}
        }

        // Registered keybindings.
        let key_str = canonical_key_string(key);
        if let Some(name) = self.commands.resolve_key(&key_str) {
            return self.run_command_by_name(&name);
        }

        // Direct edits.
        match key.code {
            KeyCode::Esc => {
                self.clear_selection();
            }
            KeyCode::Enter => {
                if let Some((a, b)) = self.selection_range() {
                    let deleted = self.doc.slice(a, b);
                    self.record_edit(Edit::Delete { from: a, text: deleted });
                    self.delete_selection();
                }
                self.record_edit(Edit::Insert {
                    at: self.cursor,
                    text: "\n".to_string(),
                });
                self.cursor = self.doc.break_line(self.cursor);
                self.dirty = true;
                self.mark_redraw();
                self.ensure_visible();
            }
            KeyCode::Backspace => {
                if let Some((a, b)) = self.selection_range() {
                    let deleted = self.doc.slice(a, b);
                    self.record_edit(Edit::Delete { from: a, text: deleted });
                    self.delete_selection();
                } else if self.cursor != Pos::ORIGIN {
                    let end = self.cursor;
                    let start = if self.cursor.col > 0 {
                        Pos { line: self.cursor.line, col: self.cursor.col - 1 }
                    } else {
                        let prev = self.cursor.line - 1;
                        Pos { line: prev, col: self.doc.line_len(prev) }
                    };
                    let deleted = self.doc.slice(start, end);
                    self.record_edit(Edit::Delete { from: start, text: deleted });
                    self.cursor = self.doc.remove_before(self.cursor);
                    self.dirty = true;
                    self.mark_redraw();
                }
                self.ensure_visible();
            }
            KeyCode::Delete => {
                if let Some((a, b)) = self.selection_range() {
                    let deleted = self.doc.slice(a, b);
                    self.record_edit(Edit::Delete { from: a, text: deleted });
                    self.delete_selection();
                } else {
                    let start = self.cursor;
                    let end = if self.cursor.col < self.doc.line_len(self.cursor.line) {
                        Pos { line: self.cursor.line, col: self.cursor.col + 1 }
                    } else if self.cursor.line + 1 < self.doc.line_count() {
                        Pos { line: self.cursor.line + 1, col: 0 }
                    } else {
                        start
                    };
                    if start != end {
                        let deleted = self.doc.slice(start, end);
                        self.record_edit(Edit::Delete { from: start, text: deleted });
                        self.cursor = self.doc.remove_at(self.cursor);
                        self.dirty = true;
                        self.mark_redraw();
                    }
                }
                self.ensure_visible();
            }
            KeyCode::Tab => {
                if let Some((a, b)) = self.selection_range() {
                    let deleted = self.doc.slice(a, b);
                    self.record_edit(Edit::Delete { from: a, text: deleted });
                    self.delete_selection();
                }
                self.record_edit(Edit::Insert {
                    at: self.cursor,
                    text: "    ".to_string(),
                });
                self.replace_selection_or_insert("    ");
                self.ensure_visible();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    if let Some((a, b)) = self.selection_range() {
                        let deleted = self.doc.slice(a, b);
                        self.record_edit(Edit::Delete { from: a, text: deleted });
                        self.delete_selection();
                    }
                    let text = ch.to_string();
                    self.record_edit(Edit::Insert {
                        at: self.cursor,
                        text: text.clone(),
                    });
                    self.replace_selection_or_insert(&text);
                    self.ensure_visible();
                }
            }
            _ => {}
        }

        Ok(false)
    }

    /// Keys while the menu bar has focus.
    fn handle_menu_key(&mut self, key: &KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.menu.close();
                self.mark_redraw();
            }
            KeyCode::Left => {
                self.menu.prev_menu();
                self.mark_redraw();
            }
            KeyCode::Right => {
                self.menu.next_menu();
                self.mark_redraw();
            }
            KeyCode::Up => {
                self.menu.prev_item();
                self.mark_redraw();
            }
            KeyCode::Down => {
                self.menu.next_item();
                self.mark_redraw();
            }
            KeyCode::Enter => {
                let command = self.menu.selected().command;
                self.menu.close();
                self.mark_redraw();
                return self.run_command_by_name(command);
            }
            _ => {}
        }
        Ok(false)
    }

    /// Keys while a prompt is active. The prompt is taken out of the editor
    /// for the duration so status messages can be set freely.
    fn handle_prompt_key(&mut self, key: &KeyEvent) -> Result<bool> {
        let Some(mut prompt) = self.prompt.take() else {
            return Ok(false);
        };
        self.mark_redraw();

        match key.code {
            KeyCode::Esc => {
                // prompt stays consumed
                return Ok(false);
            }
            KeyCode::Enter => {
                return self.finish_prompt(&prompt);
            }
            KeyCode::Tab | KeyCode::BackTab
                if matches!(prompt.kind, PromptKind::Open | PromptKind::SaveAs) =>
            {
                self.complete_path(&mut prompt, key.code == KeyCode::BackTab);
            }
            KeyCode::Backspace => {
                if prompt.cursor > 0 {
                    let mut chars: Vec<char> = prompt.input.chars().collect();
                    chars.remove(prompt.cursor - 1);
                    prompt.input = chars.into_iter().collect();
                    prompt.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                let len = prompt.input.chars().count();
                if prompt.cursor < len {
                    let mut chars: Vec<char> = prompt.input.chars().collect();
                    chars.remove(prompt.cursor);
                    prompt.input = chars.into_iter().collect();
                }
            }
            KeyCode::Left => {
                prompt.cursor = prompt.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                prompt.cursor = min(prompt.cursor + 1, prompt.input.chars().count());
            }
            KeyCode::Home => {
                prompt.cursor = 0;
            }
            KeyCode::End => {
                prompt.cursor = prompt.input.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.input.clear();
                prompt.cursor = 0;
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    let mut chars: Vec<char> = prompt.input.chars().collect();
                    chars.insert(prompt.cursor, ch);
                    prompt.input = chars.into_iter().collect();
                    prompt.cursor += 1;
                }
            }
            _ => {}
        }

        self.prompt = Some(prompt);
        Ok(false)
    }

    /// Enter pressed on a prompt: dispatch on its kind.
    fn finish_prompt(&mut self, prompt: &Prompt) -> Result<bool> {
        let input = prompt.input.trim().to_string();
        match prompt.kind {
            PromptKind::Open => {
                if !input.is_empty() {
                    self.cmd_open(PathBuf::from(input));
                }
            }
            PromptKind::SaveAs => {
                if !input.is_empty() {
                    self.cmd_save_to(PathBuf::from(input));
                }
            }
            PromptKind::Command => {
                if !input.is_empty() {
                    return self.run_command_by_name(&input);
                }
            }
            PromptKind::BgColor => {
                if input.is_empty() {
                    return Ok(false);
                }
                if input.eq_ignore_ascii_case("default") || input.eq_ignore_ascii_case("none") {
                    self.bg_color = None;
                    self.set_status("Background color: default", Duration::from_secs(2));
                } else if let Some(color) = BgColor::parse(&input) {
                    self.bg_color = Some(color);
                    self.set_status(
                        format!("Background color: {}", input.to_lowercase()),
                        Duration::from_secs(2),
                    );
                } else {
                    self.set_status(
                        format!("Unknown color '{input}'. Try: {}", BgColor::NAMES),
                        Duration::from_secs(4),
                    );
                }
            }
        }
        Ok(false)
    }

    /// Tab completion for the Open/SaveAs prompts: first Tab extends to the
    /// longest common prefix, further Tabs cycle through the matches.
    fn complete_path(&mut self, prompt: &mut Prompt, backwards: bool) {
        if prompt.completion_base != prompt.input {
            prompt.completions = path_completions(&prompt.input);
            prompt.completion_base = prompt.input.clone();
            prompt.completion_index = None;
        }

        match prompt.completions.len() {
            0 => {
                self.set_status("No completions", Duration::from_secs(1));
                return;
            }
            1 => {
                prompt.input = prompt.completions[0].clone();
            }
            _ => {
                if let Some(idx) = prompt.completion_index {
                    let n = prompt.completions.len();
                    let next = if backwards { (idx + n - 1) % n } else { (idx + 1) % n };
                    prompt.completion_index = Some(next);
                    prompt.input = prompt.completions[next].clone();
                } else {
                    let prefix = common_prefix(&prompt.completions);
                    if prefix.chars().count() > prompt.input.chars().count() {
                        prompt.input = prefix;
                    } else {
                        prompt.completion_index = Some(0);
                        prompt.input = prompt.completions[0].clone();
                    }
                }

                let shown: Vec<&str> = prompt
                    .completions
                    .iter()
                    .map(|s| s.trim_end_matches('/').rsplit('/').next().unwrap_or(s))
                    .take(8)
                    .collect();
                let msg = if prompt.completions.len() > 8 {
                    format!("{} (+{} more)", shown.join(" | "), prompt.completions.len() - 8)
                } else {
                    shown.join(" | ")
                };
                self.set_status(msg, Duration::from_secs(3));
            }
        }

        prompt.cursor = prompt.input.chars().count();
        if prompt.completion_index.is_none() {
            // a fresh base: recompute on the next Tab
            prompt.completion_base = prompt.input.clone();
            prompt.completions = path_completions(&prompt.input);
        }
    }
}
