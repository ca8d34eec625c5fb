//! Rendering: menu bar, text area, dropdown, prompt line, status bar.

use super::Editor;
use crate::menu::{MenuState, MENUS};
use crate::types::{BgColor, Pos, PromptKind};
use anyhow::Result;
use crossterm::{
    cursor,
    style::{self, Attribute, Color},
    terminal::{self, ClearType},
    QueueableCommand,
};
use std::io::{Stdout, Write};
use unicode_width::UnicodeWidthChar;

impl Editor {
    /// Render the whole UI. Layout, top to bottom: menu bar, text area,
    /// optional prompt line, status bar.
    pub fn render(&mut self, stdout: &mut Stdout) -> Result<()> {
        if !self.needs_redraw {
            return Ok(());
        }
        self.needs_redraw = false;

        let text_h = self.text_height();
        let prompt_row = 1 + text_h;
        let status_row = self.view_h.saturating_sub(1);

        stdout.queue(cursor::Hide)?;
        stdout.queue(style::ResetColor)?;

        self.render_menu_bar(stdout)?;
        for row in 0..text_h {
            self.render_text_row(stdout, row)?;
        }
        if self.menu.open {
            self.render_dropdown(stdout, text_h)?;
        }
        if self.prompt.is_some() {
            self.render_prompt_line(stdout, prompt_row)?;
        }
        self.render_status_bar(stdout, status_row)?;

        self.place_cursor(stdout, prompt_row)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_menu_bar(&self, stdout: &mut Stdout) -> Result<()> {
        stdout.queue(cursor::MoveTo(0, 0))?;
        stdout.queue(style::SetBackgroundColor(Color::White))?;
        stdout.queue(style::SetForegroundColor(Color::Black))?;
        stdout.queue(terminal::Clear(ClearType::CurrentLine))?;

        let mut used = 1;
        stdout.queue(style::Print(" "))?;
        for (i, menu) in MENUS.iter().enumerate() {
            if self.menu.open && i == self.menu.menu {
                stdout.queue(style::SetBackgroundColor(Color::DarkBlue))?;
                stdout.queue(style::SetForegroundColor(Color::White))?;
                stdout.queue(style::Print(menu.title))?;
                stdout.queue(style::SetBackgroundColor(Color::White))?;
                stdout.queue(style::SetForegroundColor(Color::Black))?;
            } else {
                stdout.queue(style::Print(menu.title))?;
            }
            stdout.queue(style::Print("  "))?;
            used += menu.title.chars().count() + 2;
        }
        if used < self.view_w {
            stdout.queue(style::Print(" ".repeat(self.view_w - used)))?;
        }
        stdout.queue(style::ResetColor)?;
        Ok(())
    }

    fn render_text_row(&self, stdout: &mut Stdout, row: usize) -> Result<()> {
        let screen_row = (row + 1) as u16;
        let line_idx = self.scroll_line + row;
        stdout.queue(cursor::MoveTo(0, screen_row))?;
        stdout.queue(terminal::Clear(ClearType::CurrentLine))?;

        if line_idx >= self.doc.line_count() {
            stdout.queue(style::SetForegroundColor(Color::DarkGrey))?;
            stdout.queue(style::Print("~"))?;
            stdout.queue(style::ResetColor)?;
            return Ok(());
        }

        let bg = self.bg_color.map(BgColor::to_crossterm);
        let sel = self.selection_range();
        let line = &self.doc.lines[line_idx];

        let mut col_used = 0;
        let mut char_i = self.scroll_col;
        for ch in line.chars().skip(self.scroll_col) {
            let w = UnicodeWidthChar::width(ch).unwrap_or(1);
            if col_used + w > self.view_w {
                break;
            }
            if is_selected(sel, line_idx, char_i) {
                stdout.queue(style::SetForegroundColor(Color::Black))?;
                stdout.queue(style::SetBackgroundColor(Color::Grey))?;
                stdout.queue(style::SetAttribute(Attribute::Bold))?;
            } else {
                if let Some(bg) = bg {
                    stdout.queue(style::SetBackgroundColor(bg))?;
                }
                stdout.queue(style::SetForegroundColor(Color::Reset))?;
                stdout.queue(style::SetAttribute(Attribute::Reset))?;
            }
            stdout.queue(style::Print(ch))?;
            stdout.queue(style::ResetColor)?;
            col_used += w;
            char_i += 1;
        }

        // Paint the rest of the row in the chosen background.
        if let Some(bg) = bg {
            if col_used < self.view_w {
                stdout.queue(style::SetBackgroundColor(bg))?;
                stdout.queue(style::Print(" ".repeat(self.view_w - col_used)))?;
                stdout.queue(style::ResetColor)?;
            }
        }
        Ok(())
    }

    fn render_dropdown(&self, stdout: &mut Stdout, text_h: usize) -> Result<()> {
        let menu = &MENUS[self.menu.menu];
        let col = MenuState::bar_offset(self.menu.menu).min(self.view_w.saturating_sub(1));

        let label_w = menu
            .items
            .iter()
            .map(|i| i.label.chars().count())
            .max()
            .unwrap_or(0);
        let key_w = menu
            .items
            .iter()
            .filter_map(|i| self.commands.get(i.command).and_then(|c| c.key.clone()))
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);

        for (i, item) in menu.items.iter().enumerate() {
            let row = 1 + i;
            if row > text_h {
                break;
            }
            stdout.queue(cursor::MoveTo(col as u16, row as u16))?;
            if i == self.menu.item {
                stdout.queue(style::SetBackgroundColor(Color::DarkBlue))?;
                stdout.queue(style::SetForegroundColor(Color::White))?;
            } else {
                stdout.queue(style::SetBackgroundColor(Color::AnsiValue(235)))?;
                stdout.queue(style::SetForegroundColor(Color::Grey))?;
            }
            let key = self
                .commands
                .get(item.command)
                .and_then(|c| c.key.clone())
                .unwrap_or_default();
            stdout.queue(style::Print(format!(
                " {:<label_w$}  {:>key_w$} ",
                item.label, key
            )))?;
            stdout.queue(style::ResetColor)?;
        }
        Ok(())
    }

    fn render_prompt_line(&self, stdout: &mut Stdout, prompt_row: usize) -> Result<()> {
        let Some(p) = &self.prompt else { return Ok(()) };

        // The command palette lists matches above the prompt line.
        if p.kind == PromptKind::Command {
            let hits = self.commands.search(p.input.trim(), 8);
            let start = prompt_row.saturating_sub(hits.len());
            for (i, cmd) in hits.iter().enumerate() {
                let row = start + i;
                if row == 0 {
                    continue;
                }
                stdout.queue(cursor::MoveTo(0, row as u16))?;
                stdout.queue(terminal::Clear(ClearType::CurrentLine))?;
                stdout.queue(style::SetBackgroundColor(Color::AnsiValue(235)))?;
                stdout.queue(style::SetForegroundColor(Color::Yellow))?;
                stdout.queue(style::Print(format!("  {:15}", cmd.name)))?;
                stdout.queue(style::SetForegroundColor(Color::White))?;
                stdout.queue(style::Print(format!(" │ {:30}", cmd.description)))?;
                let mut used = 2 + 15 + 3 + 30;
                if let Some(key) = &cmd.key {
                    stdout.queue(style::SetForegroundColor(Color::Grey))?;
                    stdout.queue(style::Print(format!(" ({key})")))?;
                    used += key.chars().count() + 3;
                }
                if used < self.view_w {
                    stdout.queue(style::Print(" ".repeat(self.view_w - used)))?;
                }
                stdout.queue(style::ResetColor)?;
            }
        }

        stdout.queue(cursor::MoveTo(0, prompt_row as u16))?;
        stdout.queue(terminal::Clear(ClearType::CurrentLine))?;
        stdout.queue(style::SetForegroundColor(Color::Yellow))?;
        stdout.queue(style::Print(prompt_label(p.kind)))?;
        stdout.queue(style::ResetColor)?;
        stdout.queue(style::Print(&p.input))?;
        Ok(())
    }

    fn render_status_bar(&self, stdout: &mut Stdout, status_row: usize) -> Result<()> {
        stdout.queue(cursor::MoveTo(0, status_row as u16))?;
        stdout.queue(terminal::Clear(ClearType::CurrentLine))?;
        stdout.queue(style::SetForegroundColor(Color::Black))?;
        stdout.queue(style::SetBackgroundColor(Color::White))?;

        let path = self
            .file_path
            .as_ref()
            .map_or_else(|| "<new file>".to_string(), |p| p.display().to_string());
        let dirty = if self.dirty { "*" } else { " " };
        let overlay = if self.overlay.active { "[LN]" } else { "" };
        let msg = self.status.as_ref().map(|s| s.text.clone()).unwrap_or_default();

        let mut bar = format!(
            " {}{} {}  Ln {}, Col {} ",
            dirty,
            path,
            overlay,
            self.cursor.line + 1,
            self.cursor.col + 1
        );
        if !msg.is_empty() {
            bar.push_str("| ");
            bar.push_str(&msg);
        }
        let bar_len = bar.chars().count();
        if bar_len < self.view_w {
            bar.push_str(&" ".repeat(self.view_w - bar_len));
        } else {
            bar = bar.chars().take(self.view_w).collect();
        }

        stdout.queue(style::Print(bar))?;
        stdout.queue(style::ResetColor)?;
        Ok(())
    }

    fn place_cursor(&self, stdout: &mut Stdout, prompt_row: usize) -> Result<()> {
        if self.menu.open {
            // dropdown highlight stands in for the cursor
            return Ok(());
        }

        if let Some(p) = &self.prompt {
            let label_w = prompt_label(p.kind).chars().count();
            let x = (label_w + p.cursor).min(self.view_w.saturating_sub(1));
            stdout.queue(cursor::MoveTo(x as u16, prompt_row as u16))?;
            stdout.queue(cursor::Show)?;
            return Ok(());
        }

        let row = self.cursor.line.saturating_sub(self.scroll_line) + 1;
        let line = &self.doc.lines[self.cursor.line];
        let col: usize = line
            .chars()
            .skip(self.scroll_col)
            .take(self.cursor.col.saturating_sub(self.scroll_col))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum();
        let x = col.min(self.view_w.saturating_sub(1));
        let y = row.min(self.text_height().max(1));
        stdout.queue(cursor::MoveTo(x as u16, y as u16))?;
        stdout.queue(cursor::Show)?;
        Ok(())
    }
}

fn prompt_label(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Open => "Open: ",
        PromptKind::SaveAs => "Save as: ",
        PromptKind::Command => "Command: ",
        PromptKind::BgColor => "Background color: ",
    }
}

fn is_selected(sel: Option<(Pos, Pos)>, line: usize, col: usize) -> bool {
    let Some((a, b)) = sel else { return false };
    if line < a.line || line > b.line {
        false
    } else if line == a.line && line == b.line {
        col >= a.col && col < b.col
    } else if line == a.line {
        col >= a.col
    } else if line == b.line {
        col < b.col
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_containment() {
        let sel = Some((Pos { line: 1, col: 2 }, Pos { line: 3, col: 1 }));
        assert!(!is_selected(sel, 0, 0));
        assert!(!is_selected(sel, 1, 1));
        assert!(is_selected(sel, 1, 2));
        assert!(is_selected(sel, 2, 99));
        assert!(is_selected(sel, 3, 0));
        assert!(!is_selected(sel, 3, 1));
        assert!(!is_selected(None, 1, 1));
    }

    #[test]
    fn same_line_selection() {
        let sel = Some((Pos { line: 0, col: 2 }, Pos { line: 0, col: 5 }));
        assert!(!is_selected(sel, 0, 1));
        assert!(is_selected(sel, 0, 2));
        assert!(is_selected(sel, 0, 4));
        assert!(!is_selected(sel, 0, 5));
    }
}
