use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::AppError;

/// Save-dialog capability, injected so the bridge is testable without a
/// real dialog.
pub trait SavePathPicker {
    fn pick_save_path(&self, default_path: &Path) -> Option<PathBuf>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveOutcome {
    Saved { path: String },
    Cancelled,
}

/// The one mutating operation in the app: prompt for a target seeded with
/// `<data dir>/<filename>` and write the edited CSV text there. A missing
/// data directory or filename cancels without touching the filesystem; a
/// failed write is an error, not a silent success.
pub fn save_csv_with(
    picker: &dyn SavePathPicker,
    data_dir: Option<&Path>,
    filename: &str,
    content: &str,
) -> Result<SaveOutcome, AppError> {
    let Some(data_dir) = data_dir else {
        return Ok(SaveOutcome::Cancelled);
    };
    if filename.is_empty() {
        return Ok(SaveOutcome::Cancelled);
    }

    let default_path = data_dir.join(filename);
    let Some(target) = picker.pick_save_path(&default_path) else {
        log::info!("csv save cancelled: {filename}");
        return Ok(SaveOutcome::Cancelled);
    };

    fs::write(&target, content)?;
    log::info!("saved csv: {}", target.display());
    Ok(SaveOutcome::Saved {
        path: target.to_string_lossy().into_owned(),
    })
}
