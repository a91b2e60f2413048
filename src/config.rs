use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file looked up in the working directory at startup.
pub const SETTINGS_FILE: &str = "survey-lens.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// User-tunable knobs. Every field has a default so a partial file is fine.
///
/// ```json
/// { "font_path": "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc", "top_words": 30 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// CJK-capable font for chart labels and the word cloud.
    pub font_path: Option<PathBuf>,
    /// Extra jieba dictionary (one `word [freq] [tag]` per line).
    pub user_dictionary: Option<PathBuf>,
    /// Categorical questions with more distinct answers get no pie chart.
    pub max_pie_categories: usize,
    /// Rows in the word frequency table.
    pub top_words: usize,
    pub cloud_max_words: usize,
    pub cloud_width: f32,
    pub cloud_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_path: None,
            user_dictionary: None,
            max_pie_categories: 10,
            top_words: 20,
            cloud_max_words: 200,
            cloud_width: 800.0,
            cloud_height: 600.0,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `path` if it exists; fall back to defaults (with a log line)
    /// when it is absent or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "font_path": "/fonts/cjk.ttc", "top_words": 30 }}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.font_path, Some(PathBuf::from("/fonts/cjk.ttc")));
        assert_eq!(settings.top_words, 30);
        assert_eq!(settings.max_pie_categories, 10);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "red" }}"#).unwrap();
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(Settings::load_or_default(file.path()), Settings::default());
    }

    #[test]
    fn absent_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join(SETTINGS_FILE));
        assert_eq!(settings, Settings::default());
    }
}
