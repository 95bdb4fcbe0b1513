//! Every user-facing string in one place.

pub const APP_TITLE: &str = "Scribble";

pub const MENU_FILE: &str = "File";
pub const MENU_OPTIONS: &str = "Options";
pub const MENU_HELP: &str = "Help";
pub const MENU_SAVE_AS: &str = "Save As";

pub const ACT_OPEN: &str = "Open";
pub const ACT_PRINT: &str = "Print…";
pub const ACT_EXIT: &str = "Exit";
pub const ACT_PEN_COLOR: &str = "Pen Color…";
pub const ACT_PEN_WIDTH: &str = "Pen Width…";
pub const ACT_CLEAR_SCREEN: &str = "Clear Screen";
pub const ACT_ABOUT: &str = "About…";
pub const ACT_ABOUT_EGUI: &str = "About egui…";

pub const RETRAIN_BUTTON: &str = "Retrain";
pub const LABEL_HINT: &str = "0–9";

pub const OPEN_DIALOG_TITLE: &str = "Open File";
pub const SAVE_DIALOG_TITLE: &str = "Save As";
pub const ALL_FILES_FILTER: &str = "All Files";

pub const UNSAVED_PROMPT: &str =
    "The image has been modified.\nDo you want to save your changes?";

pub const PEN_COLOR_TITLE: &str = "Pen Color";
pub const PEN_WIDTH_TITLE: &str = "Pen Width";
pub const PEN_WIDTH_PROMPT: &str = "Select pen width:";

pub const OK: &str = "OK";
pub const CANCEL: &str = "Cancel";

pub const ABOUT_TITLE: &str = "About Scribble";
pub const ABOUT_TEXT: &str = "Scribble collects hand-drawn digits as labeled \
training samples.\n\nDraw a digit, type its value in the field below the \
canvas and press Retrain.";

pub const ABOUT_EGUI_TITLE: &str = "About egui";
pub const ABOUT_EGUI_TEXT: &str = "This application is built with egui and \
eframe, an immediate-mode GUI library for Rust.\n\nhttps://github.com/emilk/egui";
