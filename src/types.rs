//! Common types used throughout the editor.

use std::time::Instant;

/// A position in the document.
///
/// - `line`: line index (0-based)
/// - `col`: **char index** within that line (0-based). This is *not* a byte index.
///
/// Ordering is document order (line first, then column), which the derive gives
/// us for free with this field order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    /// The start of the document.
    pub const ORIGIN: Pos = Pos { line: 0, col: 0 };
}

/// An atomic edit applied to the document.
#[derive(Clone, Debug)]
pub enum Edit {
    /// Text was inserted at a position.
    Insert { at: Pos, text: String },
    /// Text was deleted starting at a position.
    /// We keep the deleted text so undo can restore it.
    Delete { from: Pos, text: String },
}

/// A single entry in the undo/redo stacks.
#[derive(Clone)]
pub struct HistoryEntry {
    pub edit: Edit,
    /// Cursor position before the edit (restored on undo).
    pub cursor: Pos,
    /// Selection anchor before the edit (restored on undo).
    pub anchor: Option<Pos>,
}

/// The different prompts shown on the bottom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    Command,
    BgColor,
}

/// Prompt state (what the user is typing at the bottom).
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    pub cursor: usize, // char index in input
    /// Tab-completion state for the Open/SaveAs prompts.
    pub completions: Vec<String>,
    /// The input the current `completions` were computed for.
    pub completion_base: String,
    /// Which completion we are cycling through, if any.
    pub completion_index: Option<usize>,
}

impl Prompt {
    /// Create a new prompt pre-filled with `initial`.
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        let input = initial.into();
        let cursor = input.chars().count();
        Self {
            kind,
            input,
            cursor,
            completions: Vec::new(),
            completion_base: String::new(),
            completion_index: None,
        }
    }
}

/// Short-lived message shown in the status bar.
#[derive(Clone)]
pub struct StatusMsg {
    pub text: String,
    pub until: Instant,
}

/// The character sequence used to separate lines in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// Unix line ending: `\n`
    Lf,
    /// Windows line ending: `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// State of the line-number overlay.
///
/// The overlay is either fully applied or fully absent. `inserted` is the
/// exact text that was prepended at activation; toggling off removes exactly
/// that text and nothing else.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    pub active: bool,
    pub inserted: String,
}

/// Background colors selectable from the Format menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
    DarkGrey,
}

impl BgColor {
    /// Parse a color name typed at the background-color prompt.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "black" => Some(Self::Black),
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            "blue" => Some(Self::Blue),
            "magenta" | "purple" => Some(Self::Magenta),
            "cyan" => Some(Self::Cyan),
            "white" => Some(Self::White),
            "grey" | "gray" => Some(Self::Grey),
            "darkgrey" | "darkgray" | "dark_grey" | "dark_gray" => Some(Self::DarkGrey),
            _ => None,
        }
    }

    /// The names `parse` accepts, for the prompt's error hint.
    pub const NAMES: &'static str =
        "black, red, green, yellow, blue, magenta, cyan, white, grey, darkgrey, default";

    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color;
        match self {
            Self::Black => Color::Black,
            Self::Red => Color::DarkRed,
            Self::Green => Color::DarkGreen,
            Self::Yellow => Color::DarkYellow,
            Self::Blue => Color::DarkBlue,
            Self::Magenta => Color::DarkMagenta,
            Self::Cyan => Color::DarkCyan,
            Self::White => Color::White,
            Self::Grey => Color::Grey,
            Self::DarkGrey => Color::DarkGrey,
        }
    }
}
