mod commands;
mod config;
mod dialogs;
mod error;
mod menu;
mod protocol;
pub(crate) mod scope_path;
mod services;
mod state;

use std::path::PathBuf;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use commands::csv_commands;
use dialogs::DialogFolderPicker;
use error::AppError;
use services::data_dir_service;
use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .register_uri_scheme_protocol(protocol::SCHEME, |ctx, request| {
            // requests can only arrive once the window exists, and the window
            // is only created after the state is managed
            match ctx.app_handle().try_state::<AppState>() {
                Some(state) => protocol::handle(&state.data_dir, &request),
                None => protocol::not_found(request.uri().path()),
            }
        })
        .menu(menu::build)
        .on_menu_event(|app, event| menu::on_event(app, event))
        .setup(|app| {
            app.handle().plugin(
                tauri_plugin_log::Builder::default()
                    .level(log::LevelFilter::Info)
                    .build(),
            )?;

            let config_path = config::default_config_path(app.handle())?;
            let handle = app.handle().clone();
            tauri::async_runtime::spawn_blocking(move || bootstrap(handle, config_path));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![csv_commands::save_csv])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Resolves the data directory and opens the report window. Runs off the
/// main thread because resolution may need a blocking folder dialog; when
/// the user declines, the session ends without a window.
fn bootstrap(handle: AppHandle, config_path: PathBuf) {
    let picker = DialogFolderPicker::new(handle.clone());
    let candidates = data_dir_service::candidates();
    let data_dir = match data_dir_service::resolve(&config_path, &candidates, &picker) {
        Ok(Some(dir)) => dir,
        Ok(None) => {
            log::warn!("no data folder selected, exiting");
            handle.exit(0);
            return;
        }
        Err(err) => {
            log::error!("failed to resolve data folder: {err}");
            handle.exit(1);
            return;
        }
    };

    let main_thread = handle.clone();
    let dispatched = handle.run_on_main_thread(move || {
        if let Err(err) = open_report_window(&main_thread, config_path, data_dir) {
            log::error!("failed to open report window: {err}");
            main_thread.exit(1);
        }
    });
    if let Err(err) = dispatched {
        log::error!("failed to reach the main thread: {err}");
        handle.exit(1);
    }
}

fn open_report_window(
    app: &AppHandle,
    config_path: PathBuf,
    data_dir: PathBuf,
) -> Result<(), AppError> {
    let entry_file = data_dir_service::find_report_file(&data_dir);
    log::info!("opening report {} from {}", entry_file, data_dir.display());

    let url: tauri::Url = protocol::initial_url(&entry_file)
        .parse()
        .map_err(|err| AppError::General(format!("invalid report url: {err}")))?;

    app.manage(AppState {
        data_dir,
        config_path,
    });

    WebviewWindowBuilder::new(app, "main", WebviewUrl::CustomProtocol(url))
        .title("Financial Snapshot")
        .inner_size(1440.0, 1000.0)
        .build()?;

    Ok(())
}
