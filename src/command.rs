//! The menu command table.
//!
//! Menu wiring is data, not callbacks: each entry pairs a label (and an
//! optional shortcut) with a `Command` value, and the window dispatches on
//! that value when the entry is triggered. The table is built once at
//! startup and never changes.

use eframe::egui;
use image::ImageFormat;

use crate::strings;

/// Everything a menu entry or shortcut can ask the window to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Open,
    /// Export the canvas in the tagged format.
    SaveAs(ImageFormat),
    Print,
    Exit,
    PenColor,
    PenWidth,
    ClearScreen,
    About,
    AboutEgui,
}

pub struct MenuEntry {
    pub label: String,
    pub shortcut: Option<egui::KeyboardShortcut>,
    pub command: Command,
}

impl MenuEntry {
    fn new(label: &str, command: Command) -> Self {
        Self {
            label: label.to_owned(),
            shortcut: None,
            command,
        }
    }

    fn with_shortcut(label: &str, key: egui::Key, command: Command) -> Self {
        Self {
            label: label.to_owned(),
            shortcut: Some(egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, key)),
            command,
        }
    }
}

pub enum MenuItem {
    Entry(MenuEntry),
    /// The Save As submenu, one entry per writable image format.
    SaveAsSubmenu(Vec<MenuEntry>),
    Separator,
}

pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

/// One Save As entry per format the `image` crate can encode, in
/// enumeration order.
pub fn save_as_entries() -> Vec<MenuEntry> {
    ImageFormat::all()
        .filter(ImageFormat::writing_enabled)
        .map(|format| MenuEntry {
            label: format!("{}…", primary_extension(format).to_uppercase()),
            shortcut: None,
            command: Command::SaveAs(format),
        })
        .collect()
}

/// The extension used for dialog filters and suggested file names.
pub fn primary_extension(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("img")
}

/// File / Options / Help, in that order.
pub fn menu_bar() -> Vec<Menu> {
    let file = Menu {
        title: strings::MENU_FILE,
        items: vec![
            MenuItem::Entry(MenuEntry::with_shortcut(
                strings::ACT_OPEN,
                egui::Key::O,
                Command::Open,
            )),
            MenuItem::SaveAsSubmenu(save_as_entries()),
            MenuItem::Entry(MenuEntry::new(strings::ACT_PRINT, Command::Print)),
            MenuItem::Separator,
            MenuItem::Entry(MenuEntry::with_shortcut(
                strings::ACT_EXIT,
                egui::Key::Q,
                Command::Exit,
            )),
        ],
    };
    let options = Menu {
        title: strings::MENU_OPTIONS,
        items: vec![
            MenuItem::Entry(MenuEntry::new(strings::ACT_PEN_COLOR, Command::PenColor)),
            MenuItem::Entry(MenuEntry::new(strings::ACT_PEN_WIDTH, Command::PenWidth)),
            MenuItem::Separator,
            MenuItem::Entry(MenuEntry::with_shortcut(
                strings::ACT_CLEAR_SCREEN,
                egui::Key::L,
                Command::ClearScreen,
            )),
        ],
    };
    let help = Menu {
        title: strings::MENU_HELP,
        items: vec![
            MenuItem::Entry(MenuEntry::new(strings::ACT_ABOUT, Command::About)),
            MenuItem::Entry(MenuEntry::new(strings::ACT_ABOUT_EGUI, Command::AboutEgui)),
        ],
    };
    vec![file, options, help]
}
