use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::{Path, PathBuf};

use crate::map_file::MAP_EXTENSION;

fn map_dialog(current: Option<&Path>) -> FileDialog {
    let dialog = FileDialog::new().add_filter("Map files (*.map)", &[MAP_EXTENSION]);
    match current.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => dialog.set_directory(dir),
        _ => dialog,
    }
}

pub fn pick_map_to_open(current: Option<&Path>) -> Option<PathBuf> {
    map_dialog(current).pick_file()
}

pub fn pick_map_to_save(current: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let file_name = current
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| default_name.to_string());

    map_dialog(current).set_file_name(&file_name).save_file()
}

/// Shows a failure to the user once. Nothing is retried.
pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
