use tauri::menu::{Menu, MenuBuilder, MenuEvent, SubmenuBuilder};
use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_dialog::DialogExt;

use crate::config::AppConfig;
use crate::dialogs::FOLDER_PROMPT_TITLE;
use crate::state::AppState;

const CHANGE_DATA_FOLDER: &str = "change-data-folder";
const OPEN_DATA_FOLDER: &str = "open-data-folder";

pub fn build<R: Runtime>(app: &AppHandle<R>) -> tauri::Result<Menu<R>> {
    let app_menu = SubmenuBuilder::new(app, "Financial Snapshot")
        .about(None)
        .separator()
        .text(CHANGE_DATA_FOLDER, "Change Data Folder…")
        .text(OPEN_DATA_FOLDER, "Open Data Folder")
        .separator()
        .hide()
        .hide_others()
        .show_all()
        .separator()
        .quit()
        .build()?;

    let edit = SubmenuBuilder::new(app, "Edit")
        .undo()
        .redo()
        .separator()
        .cut()
        .copy()
        .paste()
        .select_all()
        .build()?;

    let view = SubmenuBuilder::new(app, "View").fullscreen().build()?;

    let window = SubmenuBuilder::new(app, "Window")
        .minimize()
        .maximize()
        .separator()
        .close_window()
        .build()?;

    MenuBuilder::new(app)
        .items(&[&app_menu, &edit, &view, &window])
        .build()
}

pub fn on_event<R: Runtime>(app: &AppHandle<R>, event: MenuEvent) {
    match event.id().as_ref() {
        CHANGE_DATA_FOLDER => change_data_folder(app),
        OPEN_DATA_FOLDER => open_data_folder(app),
        _ => {}
    }
}

/// Prompts for a new folder, persists it and relaunches so the whole
/// session (protocol handler included) starts over against the new root.
fn change_data_folder<R: Runtime>(app: &AppHandle<R>) {
    let handle = app.clone();
    app.dialog()
        .file()
        .set_title(FOLDER_PROMPT_TITLE)
        .pick_folder(move |picked| {
            let Some(dir) = picked.and_then(|p| p.into_path().ok()) else {
                return;
            };
            let Some(state) = handle.try_state::<AppState>() else {
                return;
            };
            let mut config = AppConfig::load(&state.config_path);
            config.data_dir = Some(dir);
            if let Err(err) = config.save(&state.config_path) {
                log::error!("failed to persist data folder change: {err}");
                return;
            }
            handle.restart();
        });
}

fn open_data_folder<R: Runtime>(app: &AppHandle<R>) {
    let Some(state) = app.try_state::<AppState>() else {
        return;
    };
    if let Err(err) = tauri_plugin_opener::open_path(state.data_dir.clone(), None::<&str>) {
        log::warn!("failed to open data folder: {err}");
    }
}
