//! The menu bar: a static File/Edit/Format/View structure whose items are
//! command names, plus the navigation state while a menu is open.

/// One entry in a dropdown. `command` is looked up in the command registry.
pub struct MenuItem {
    pub label: &'static str,
    pub command: &'static str,
}

/// One titled menu on the bar.
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

const fn item(label: &'static str, command: &'static str) -> MenuItem {
    MenuItem { label, command }
}

/// The whole menu surface.
pub const MENUS: &[Menu] = &[
    Menu {
        title: "File",
        items: &[
            item("New", "new"),
            item("Open", "open"),
            item("Save", "save"),
            item("Save As", "save_as"),
            item("Exit", "quit"),
        ],
    },
    Menu {
        title: "Edit",
        items: &[
            item("Undo", "undo"),
            item("Redo", "redo"),
            item("Cut", "cut"),
            item("Copy", "copy"),
            item("Paste", "paste"),
            item("Select All", "select_all"),
        ],
    },
    Menu {
        title: "Format",
        items: &[item("Change Background Color", "bg_color")],
    },
    Menu {
        title: "View",
        items: &[item("Toggle Line Numbers", "line_numbers")],
    },
];

/// Navigation state while the menu bar has focus.
#[derive(Default)]
pub struct MenuState {
    pub open: bool,
    pub menu: usize,
    pub item: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the bar on the first menu.
    pub fn activate(&mut self) {
        self.open = true;
        self.menu = 0;
        self.item = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next_menu(&mut self) {
        self.menu = (self.menu + 1) % MENUS.len();
        self.item = 0;
    }

    pub fn prev_menu(&mut self) {
        self.menu = (self.menu + MENUS.len() - 1) % MENUS.len();
        self.item = 0;
    }

    pub fn next_item(&mut self) {
        let len = MENUS[self.menu].items.len();
        self.item = (self.item + 1) % len;
    }

    pub fn prev_item(&mut self) {
        let len = MENUS[self.menu].items.len();
        self.item = (self.item + len - 1) % len;
    }

    /// The currently highlighted item.
    pub fn selected(&self) -> &'static MenuItem {
        &MENUS[self.menu].items[self.item]
    }

    /// Column where the dropdown for menu `idx` starts on the bar
    /// (one leading space, titles separated by two spaces).
    pub fn bar_offset(idx: usize) -> usize {
        let mut col = 1;
        for menu in &MENUS[..idx] {
            col += menu.title.chars().count() + 2;
        }
        col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menus_match_the_advertised_surface() {
        let titles: Vec<&str> = MENUS.iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["File", "Edit", "Format", "View"]);
        assert_eq!(MENUS[0].items.len(), 5);
        assert_eq!(MENUS[1].items.len(), 6);
        assert_eq!(MENUS[3].items[0].command, "line_numbers");
    }

    #[test]
    fn navigation_wraps() {
        let mut st = MenuState::new();
        st.activate();
        assert!(st.open);

        st.prev_menu();
        assert_eq!(st.menu, MENUS.len() - 1);
        st.next_menu();
        assert_eq!(st.menu, 0);

        st.prev_item();
        assert_eq!(st.item, MENUS[0].items.len() - 1);
        st.next_item();
        assert_eq!(st.item, 0);
        assert_eq!(st.selected().command, "new");
    }

    #[test]
    fn bar_offsets_are_increasing() {
        assert_eq!(MenuState::bar_offset(0), 1);
        // "File" + two spaces
        assert_eq!(MenuState::bar_offset(1), 7);
        assert!(MenuState::bar_offset(2) < MenuState::bar_offset(3));
    }
}
