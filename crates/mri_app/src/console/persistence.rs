use std::fs;
use std::path::Path;

use mri_core::Theme;
use mri_engine::{ensure_output_dir, AtomicFileWriter};
use mri_logging::{mri_error, mri_info, mri_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".mri_prefs.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedPrefs {
    theme: String,
}

/// Reads the saved theme; anything missing or unreadable falls back to light.
pub(crate) fn load_theme(state_dir: &Path) -> Theme {
    let path = state_dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Theme::default();
        }
        Err(err) => {
            mri_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Theme::default();
        }
    };

    let prefs: PersistedPrefs = match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            mri_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return Theme::default();
        }
    };

    match prefs.theme.parse::<Theme>() {
        Ok(theme) => {
            mri_info!("Loaded theme preference {} from {:?}", theme, path);
            theme
        }
        Err(err) => {
            mri_warn!("Ignoring stored theme in {:?}: {}", path, err);
            Theme::default()
        }
    }
}

pub(crate) fn save_theme(state_dir: &Path, theme: Theme) {
    if let Err(err) = ensure_output_dir(state_dir) {
        mri_error!("Failed to ensure state dir {:?}: {}", state_dir, err);
        return;
    }

    let prefs = PersistedPrefs {
        theme: theme.to_string(),
    };
    let content = match ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new()) {
        Ok(text) => text,
        Err(err) => {
            mri_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir);
    if let Err(err) = writer.write(PREFS_FILENAME, &content) {
        mri_error!("Failed to write preferences to {:?}: {}", state_dir, err);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mri_core::Theme;
    use tempfile::TempDir;

    use super::{load_theme, save_theme, PREFS_FILENAME};

    #[test]
    fn missing_file_means_light() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_theme(temp.path()), Theme::Light);
    }

    #[test]
    fn saved_theme_is_restored() {
        let temp = TempDir::new().unwrap();
        let state_dir = temp.path().join("nested");
        save_theme(&state_dir, Theme::Dark);
        assert!(state_dir.join(PREFS_FILENAME).is_file());
        assert_eq!(load_theme(&state_dir), Theme::Dark);

        save_theme(&state_dir, Theme::Light);
        assert_eq!(load_theme(&state_dir), Theme::Light);
    }

    #[test]
    fn corrupt_or_unknown_values_fall_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PREFS_FILENAME);

        fs::write(&path, "not ron at all {").unwrap();
        assert_eq!(load_theme(temp.path()), Theme::Light);

        fs::write(&path, "(theme: \"sepia\")").unwrap();
        assert_eq!(load_theme(temp.path()), Theme::Light);
    }
}
