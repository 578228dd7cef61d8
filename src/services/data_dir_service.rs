use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::AppError;

const REPORT_FILE_NAME: &str = "financial-snapshot.html";
const REPORT_FILE_EXT: &str = ".html";

/// Folder-picker capability, injected so resolution is testable without a
/// real dialog.
pub trait DirectoryPicker {
    fn pick_directory(&self) -> Option<PathBuf>;
}

/// Well-known locations the data folder tends to live in, probed in order.
pub fn candidates() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        home.join("Library/CloudStorage/Dropbox/Financial Snapshot"),
        home.join("Dropbox/Financial Snapshot"),
        home.join("Documents/Financial Snapshot"),
    ]
}

pub fn detect_data_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_dir()).cloned()
}

/// Produces the data directory for this session: a persisted path that still
/// exists, else the first existing candidate, else whatever the picker
/// returns. Newly determined paths are persisted for the next launch.
/// `Ok(None)` means the user declined the picker and the session should end.
pub fn resolve(
    config_path: &Path,
    candidates: &[PathBuf],
    picker: &dyn DirectoryPicker,
) -> Result<Option<PathBuf>, AppError> {
    let mut config = AppConfig::load(config_path);

    if let Some(dir) = config.data_dir.as_ref() {
        if dir.exists() {
            log::info!("using persisted data folder: {}", dir.display());
            return Ok(Some(dir.clone()));
        }
        log::warn!("persisted data folder is gone: {}", dir.display());
    }

    if let Some(detected) = detect_data_dir(candidates) {
        log::info!("detected data folder: {}", detected.display());
        config.data_dir = Some(detected.clone());
        config.save(config_path)?;
        return Ok(Some(detected));
    }

    let Some(picked) = picker.pick_directory() else {
        return Ok(None);
    };
    log::info!("user picked data folder: {}", picked.display());
    config.data_dir = Some(picked.clone());
    config.save(config_path)?;
    Ok(Some(picked))
}

/// Picks the document the window opens with: the expected report name if a
/// case-insensitive match exists, else the first visible `.html` file in
/// directory-read order, else the expected name (which will surface as a 404).
pub fn find_report_file(data_dir: &Path) -> String {
    let Ok(entries) = fs::read_dir(data_dir) else {
        return REPORT_FILE_NAME.to_string();
    };
    let names: Vec<String> = entries
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    if let Some(exact) = names.iter().find(|n| n.eq_ignore_ascii_case(REPORT_FILE_NAME)) {
        return exact.clone();
    }
    names
        .iter()
        .find(|n| n.ends_with(REPORT_FILE_EXT) && !n.starts_with('.'))
        .cloned()
        .unwrap_or_else(|| REPORT_FILE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FixedPicker(Option<PathBuf>);

    impl DirectoryPicker for FixedPicker {
        fn pick_directory(&self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    struct UnreachablePicker;

    impl DirectoryPicker for UnreachablePicker {
        fn pick_directory(&self) -> Option<PathBuf> {
            panic!("picker must not be consulted");
        }
    }

    fn config_with_data_dir(config_path: &Path, dir: &Path) {
        let config = AppConfig {
            data_dir: Some(dir.to_path_buf()),
            extra: serde_json::Map::new(),
        };
        config.save(config_path).unwrap();
    }

    #[test]
    fn persisted_dir_wins_when_it_still_exists() {
        let base = TempDir::new().unwrap();
        let data = base.path().join("data");
        fs::create_dir(&data).unwrap();
        let config_path = base.path().join("config.json");
        config_with_data_dir(&config_path, &data);

        let resolved = resolve(&config_path, &[], &UnreachablePicker).unwrap();

        assert_eq!(resolved, Some(data));
    }

    #[test]
    fn stale_persisted_dir_falls_through_to_detection() {
        let base = TempDir::new().unwrap();
        let config_path = base.path().join("config.json");
        config_with_data_dir(&config_path, &base.path().join("deleted"));
        let candidate = base.path().join("candidate");
        fs::create_dir(&candidate).unwrap();

        let resolved = resolve(&config_path, &[candidate.clone()], &UnreachablePicker).unwrap();

        assert_eq!(resolved, Some(candidate.clone()));
        // the detected path replaces the stale one
        let config = AppConfig::load(&config_path);
        assert_eq!(config.data_dir, Some(candidate));
    }

    #[test]
    fn detection_skips_candidates_that_are_not_directories() {
        let base = TempDir::new().unwrap();
        let file = base.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();
        let dir = base.path().join("real");
        fs::create_dir(&dir).unwrap();

        let detected = detect_data_dir(&[file, dir.clone()]);

        assert_eq!(detected, Some(dir));
    }

    #[test]
    fn picker_is_the_last_resort_and_gets_persisted() {
        let base = TempDir::new().unwrap();
        let config_path = base.path().join("config.json");
        let picked = base.path().join("picked");
        fs::create_dir(&picked).unwrap();

        let resolved = resolve(
            &config_path,
            &[base.path().join("absent")],
            &FixedPicker(Some(picked.clone())),
        )
        .unwrap();

        assert_eq!(resolved, Some(picked.clone()));
        let config = AppConfig::load(&config_path);
        assert_eq!(config.data_dir, Some(picked));
    }

    #[test]
    fn declined_picker_resolves_to_none_without_persisting() {
        let base = TempDir::new().unwrap();
        let config_path = base.path().join("config.json");

        let resolved = resolve(&config_path, &[], &FixedPicker(None)).unwrap();

        assert_eq!(resolved, None);
        assert!(!config_path.exists());
    }

    #[test]
    fn exact_report_name_wins_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("other.html"), "x").unwrap();
        fs::write(dir.path().join("Financial-Snapshot.HTML"), "x").unwrap();

        assert_eq!(
            find_report_file(dir.path()),
            "Financial-Snapshot.HTML".to_string()
        );
    }

    #[test]
    fn falls_back_to_any_visible_html_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden.html"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("overview.html"), "x").unwrap();

        assert_eq!(find_report_file(dir.path()), "overview.html".to_string());
    }

    #[test]
    fn missing_report_falls_back_to_the_expected_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.csv"), "x").unwrap();

        assert_eq!(
            find_report_file(dir.path()),
            "financial-snapshot.html".to_string()
        );
    }
}
