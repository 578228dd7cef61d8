use tauri::{command, AppHandle, State};

use crate::dialogs::DialogSavePicker;
use crate::error::AppError;
use crate::services::save_service::{self, SaveOutcome};
use crate::state::AppState;

/// Save bridge exposed to the report page. Async so the blocking save
/// dialog never runs on the main thread.
#[command]
pub async fn save_csv(
    filename: String,
    content: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<SaveOutcome, AppError> {
    let picker = DialogSavePicker::new(app);
    save_service::save_csv_with(&picker, Some(&state.data_dir), &filename, &content)
}
