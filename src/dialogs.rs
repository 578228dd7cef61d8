use std::path::{Path, PathBuf};

use tauri::{AppHandle, Runtime};
use tauri_plugin_dialog::DialogExt;

use crate::services::data_dir_service::DirectoryPicker;
use crate::services::save_service::SavePathPicker;

pub const FOLDER_PROMPT_TITLE: &str = "Select your financial snapshot data folder";

/// Dialog-backed folder picker used during startup resolution. Blocking, so
/// callers must stay off the main thread.
pub struct DialogFolderPicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogFolderPicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> DirectoryPicker for DialogFolderPicker<R> {
    fn pick_directory(&self) -> Option<PathBuf> {
        self.app
            .dialog()
            .file()
            .set_title(FOLDER_PROMPT_TITLE)
            .blocking_pick_folder()
            .and_then(|picked| picked.into_path().ok())
    }
}

/// Dialog-backed "save as" picker, seeded with the default path and limited
/// to CSV files.
pub struct DialogSavePicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogSavePicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> SavePathPicker for DialogSavePicker<R> {
    fn pick_save_path(&self, default_path: &Path) -> Option<PathBuf> {
        let mut dialog = self
            .app
            .dialog()
            .file()
            .set_title("Save CSV")
            .add_filter("CSV", &["csv"]);
        if let Some(dir) = default_path.parent() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = default_path.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        dialog
            .blocking_save_file()
            .and_then(|picked| picked.into_path().ok())
    }
}
