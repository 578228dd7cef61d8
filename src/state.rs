use std::path::PathBuf;

/// Context managed once the data directory is resolved. Both fields are
/// immutable for the rest of the session; changing the data folder goes
/// through a config rewrite and an app restart.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}
