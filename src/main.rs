//! `medit` — a small notepad-like terminal text editor.
//!
//! ## Reading guide
//! - **`main()` / `run()`**: argument parsing, terminal setup, the
//!   render/poll/dispatch loop.
//! - **`terminal::TerminalGuard`**: raw mode + alternate screen, restored on
//!   every exit path.
//! - **`document::Document`**: the document model (lines of text) and the
//!   low-level edit operations.
//! - **`editor::Editor`**: application state, key handling, rendering,
//!   prompts, undo/redo, the line-number overlay.
//! - **`menu` / `commands`**: the File/Edit/Format/View menu surface and the
//!   command registry behind it.

mod commands;
mod document;
mod editor;
mod menu;
mod terminal;
mod types;
mod utils;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use editor::Editor;
use std::io;
use std::time::Duration;
use terminal::TerminalGuard;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

/// Parse arguments, set up the terminal, and run the editor loop.
fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut file_to_open = None;
    if args.len() > 1 {
        match args[1].as_str() {
            "-h" | "--help" => {
                println!("medit — a simple TUI text editor");
                println!();
                println!("USAGE:");
                println!("    medit [FILE]         Open a file (creates it on save)");
                println!("    medit -h, --help     Show this help message");
                println!("    medit -v, --version  Show version information");
                println!();
                println!("KEYBINDINGS:");
                println!("    F10                  Menu bar (File, Edit, Format, View)");
                println!("    Ctrl+P               Command palette");
                println!("    Ctrl+S               Save");
                println!("    Ctrl+O               Open file prompt");
                println!("    Ctrl+L               Toggle line numbers");
                println!("    Ctrl+Q               Quit");
                return Ok(());
            }
            "-v" | "--version" => {
                println!("medit v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("Error: Unknown flag '{flag}'");
                eprintln!("Try 'medit --help' for more information.");
                std::process::exit(1);
            }
            path => {
                file_to_open = Some(std::path::PathBuf::from(path));
            }
        }
    }

    let mut stdout = io::stdout();
    let _term = TerminalGuard::new(&mut stdout)?;

    let mut editor = Editor::new(file_to_open)?;
    let (w, h) = crossterm::terminal::size()?;
    editor.set_view_size(w, h);

    // Main loop: render, then poll with a short timeout so transient status
    // messages can expire even without input.
    loop {
        editor.render(&mut stdout)?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if editor.handle_key(&key)? {
                        break;
                    }
                }
                Event::Resize(w, h) => {
                    editor.set_view_size(w, h);
                    editor.ensure_visible();
                }
                _ => {}
            }
        } else {
            editor.tick();
        }
    }

    Ok(())
}
