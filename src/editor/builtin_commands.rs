//! Registration of every built-in command (the whole menu surface).

use crate::commands::{Command, CommandRegistry};
use crate::types::{Prompt, PromptKind};

fn cmd(
    name: &str,
    description: &str,
    key: Option<&str>,
    action: fn(&mut crate::editor::Editor) -> anyhow::Result<()>,
) -> Command {
    Command {
        name: name.to_string(),
        description: description.to_string(),
        key: key.map(String::from),
        action,
    }
}

/// Register all built-in editor commands.
pub fn register_builtin_commands(reg: &mut CommandRegistry) {
    reg.register(cmd("new", "New file (Ctrl+N)", Some("Ctrl+N"), |ed| {
        ed.cmd_new();
        Ok(())
    }));

    reg.register(cmd("open", "Open file (Ctrl+O)", Some("Ctrl+O"), |ed| {
        ed.prompt = Some(Prompt::new(PromptKind::Open, ""));
        ed.mark_redraw();
        Ok(())
    }));

    reg.register(cmd("save", "Save file (Ctrl+S)", Some("Ctrl+S"), |ed| {
        ed.cmd_save();
        Ok(())
    }));

    reg.register(cmd(
        "save_as",
        "Save under a new name (Ctrl+Shift+S)",
        Some("Ctrl+Shift+S"),
        |ed| {
            ed.prompt = Some(Prompt::new(PromptKind::SaveAs, ""));
            ed.mark_redraw();
            Ok(())
        },
    ));

    // "quit" is resolved specially in run_command_by_name so the quit
    // confirmation can flow back to the main loop; the registration is here
    // for the keymap, the menu, and the palette listing.
    reg.register(cmd("quit", "Exit (Ctrl+Q)", Some("Ctrl+Q"), |_ed| Ok(())));

    reg.register(cmd("undo", "Undo (Ctrl+Z)", Some("Ctrl+Z"), |ed| {
        ed.undo_edit();
        Ok(())
    }));

    reg.register(cmd("redo", "Redo (Ctrl+Y)", Some("Ctrl+Y"), |ed| {
        ed.redo_edit();
        Ok(())
    }));

    reg.register(cmd("cut", "Cut selection (Ctrl+X)", Some("Ctrl+X"), |ed| {
        ed.cut();
        Ok(())
    }));

    reg.register(cmd("copy", "Copy selection (Ctrl+C)", Some("Ctrl+C"), |ed| {
        ed.copy();
        Ok(())
    }));

    reg.register(cmd("paste", "Paste clipboard (Ctrl+V)", Some("Ctrl+V"), |ed| {
        ed.paste();
        Ok(())
    }));

    reg.register(cmd(
        "select_all",
        "Select entire document (Ctrl+A)",
        Some("Ctrl+A"),
        |ed| {
            ed.select_all();
            ed.ensure_visible();
            Ok(())
        },
    ));

    reg.register(cmd(
        "bg_color",
        "Change background color",
        None,
        |ed| {
            ed.prompt = Some(Prompt::new(PromptKind::BgColor, ""));
            ed.mark_redraw();
            Ok(())
        },
    ));

    reg.register(cmd(
        "line_numbers",
        "Toggle line numbers (Ctrl+L)",
        Some("Ctrl+L"),
        |ed| {
            ed.toggle_line_numbers();
            Ok(())
        },
    ));

    reg.register(cmd(
        "command",
        "Command palette (Ctrl+P)",
        Some("Ctrl+P"),
        |ed| {
            ed.prompt = Some(Prompt::new(PromptKind::Command, ""));
            ed.mark_redraw();
            Ok(())
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MENUS;

    #[test]
    fn every_menu_item_has_a_registered_command() {
        let mut reg = CommandRegistry::new();
        register_builtin_commands(&mut reg);
        for menu in MENUS {
            for item in menu.items {
                assert!(
                    reg.get(item.command).is_some(),
                    "menu item '{}' names unknown command '{}'",
                    item.label,
                    item.command
                );
            }
        }
    }

    #[test]
    fn core_keybindings_resolve() {
        let mut reg = CommandRegistry::new();
        register_builtin_commands(&mut reg);
        assert_eq!(reg.resolve_key("Ctrl+S").as_deref(), Some("save"));
        assert_eq!(reg.resolve_key("Ctrl+Z").as_deref(), Some("undo"));
        assert_eq!(reg.resolve_key("Ctrl+L").as_deref(), Some("line_numbers"));
        assert_eq!(reg.resolve_key("Ctrl+Shift+S").as_deref(), Some("save_as"));
    }
}
