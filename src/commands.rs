//! Command registry: every menu item is a named command with an optional
//! keybinding, so the menu bar, the keymap, and the command palette all
//! dispatch through the same table.

use crate::editor::Editor;
use crate::utils::levenshtein_distance;
use anyhow::Result;
use std::collections::HashMap;

/// A user-invokable action.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub description: String,
    /// Canonical key chord, e.g. "Ctrl+S".
    pub key: Option<String>,
    pub action: fn(&mut Editor) -> Result<()>,
}

/// Registry of known commands plus lookup tables for fast resolving.
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
    keymap: HashMap<String, String>, // key chord -> command name
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: vec![],
            by_name: HashMap::new(),
            keymap: HashMap::new(),
        }
    }

    /// Add or replace a command. Names are case-insensitive; a keybinding, if
    /// present, goes into the keymap as well.
    pub fn register(&mut self, cmd: Command) {
        let name_key = cmd.name.to_lowercase();
        if let Some(k) = cmd.key.as_ref() {
            self.keymap.insert(k.clone(), cmd.name.clone());
        }
        if let Some(&idx) = self.by_name.get(&name_key) {
            self.commands[idx] = cmd;
        } else {
            let idx = self.commands.len();
            self.commands.push(cmd);
            self.by_name.insert(name_key, idx);
        }
    }

    /// Lookup by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Command> {
        let idx = *self.by_name.get(&name.to_lowercase())?;
        self.commands.get(idx)
    }

    /// Resolve a key chord like `"Ctrl+S"` to a command name.
    pub fn resolve_key(&self, key: &str) -> Option<String> {
        self.keymap.get(key).cloned()
    }

    /// Substring search over names and descriptions for the palette.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Command> {
        let q = query.to_lowercase();
        let mut items: Vec<&Command> = self
            .commands
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&q) || c.description.to_lowercase().contains(&q)
            })
            .collect();
        items.sort_by_key(|c| c.name.to_lowercase());
        items.truncate(limit);
        items
    }

    /// Closest command by edit distance, for "did you mean?" on typos.
    pub fn suggest(&self, name: &str) -> Option<&Command> {
        let name = name.to_lowercase();
        let best = self
            .commands
            .iter()
            .min_by_key(|c| levenshtein_distance(&name, &c.name.to_lowercase()))?;

        let dist = levenshtein_distance(&name, &best.name.to_lowercase());
        let threshold = (name.len().max(best.name.len()) as f32 * 0.4).ceil() as usize;
        if dist <= threshold.max(2) {
            Some(best)
        } else {
            None
        }
    }
}

/// Convert a crossterm `KeyEvent` into a canonical chord string like `"Ctrl+S"`.
///
/// Canonical ordering: Ctrl, Alt, Shift + key.
pub fn canonical_key_string(key: &crossterm::event::KeyEvent) -> String {
    use crossterm::event::{KeyCode, KeyModifiers};

    let mut parts: Vec<&str> = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key_name = match key.code {
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => format!("{:?}", key.code),
    };

    if parts.is_empty() {
        key_name
    } else {
        parts.push(&key_name);
        parts.join("+")
    }
}
