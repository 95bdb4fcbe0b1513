//! Native dialog seam.
//!
//! Every blocking dialog the window opens goes through the [`Dialogs`]
//! trait, so tests can script user choices instead of clicking through
//! rfd prompts.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::command::primary_extension;
use crate::strings;

/// Outcome of the unsaved-changes prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardChoice {
    Save,
    Discard,
    Cancel,
}

pub trait Dialogs {
    /// Three-way Save / Discard / Cancel prompt.
    fn confirm_unsaved(&mut self) -> DiscardChoice;

    /// File-open picker rooted at `dir`. None when the user cancels.
    fn pick_open_path(&mut self, dir: &Path) -> Option<PathBuf>;

    /// File-save picker rooted at `dir`, pre-filled with
    /// `untitled.<ext>` and filtered to the format plus "all files".
    /// None when the user cancels.
    fn pick_save_path(&mut self, dir: &Path, format: ImageFormat) -> Option<PathBuf>;

    /// Plain informational message box (About dialogs).
    fn show_message(&mut self, title: &str, text: &str);
}

/// rfd-backed implementation.
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn confirm_unsaved(&mut self) -> DiscardChoice {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(strings::APP_TITLE)
            .set_description(strings::UNSAVED_PROMPT)
            .set_buttons(rfd::MessageButtons::YesNoCancel)
            .show();
        match result {
            rfd::MessageDialogResult::Yes => DiscardChoice::Save,
            rfd::MessageDialogResult::No => DiscardChoice::Discard,
            _ => DiscardChoice::Cancel,
        }
    }

    fn pick_open_path(&mut self, dir: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(strings::OPEN_DIALOG_TITLE)
            .set_directory(dir)
            .pick_file()
    }

    fn pick_save_path(&mut self, dir: &Path, format: ImageFormat) -> Option<PathBuf> {
        let ext = primary_extension(format);
        let mut dialog = rfd::FileDialog::new()
            .set_title(strings::SAVE_DIALOG_TITLE)
            .set_directory(dir)
            .set_file_name(format!("untitled.{ext}"));
        for (name, extensions) in save_filters(format) {
            dialog = dialog.add_filter(name, &extensions);
        }
        dialog.save_file()
    }

    fn show_message(&mut self, title: &str, text: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(text)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Save-dialog filters: the chosen format, then a catch-all.
///
/// rfd filter entries are bare extensions, so the catch-all must be "*".
/// Some backends render that as "*.*"; an empty extension is rejected
/// outright by GTK, so "*" is the portable spelling.
fn save_filters(format: ImageFormat) -> Vec<(String, Vec<&'static str>)> {
    let ext = primary_extension(format);
    vec![
        (format!("{} Files", ext.to_uppercase()), vec![ext]),
        (strings::ALL_FILES_FILTER.to_owned(), vec!["*"]),
    ]
}
