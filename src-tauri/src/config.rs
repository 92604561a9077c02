//! Preferences file: data folder, language and field set.
//!
//! The file is a small JSON object in the home directory. Missing or
//! malformed files read as "not configured"; saving always overwrites the
//! whole object, so callers read-modify-write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::day_file::write_text_file;
use crate::error::ConfigError;
use crate::i18n::Language;
use crate::schema::FieldSet;

const CONFIG_FILE: &str = ".product-scanner-config.json";
const DEFAULT_DATA_DIR: &str = "ProductScannerData";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_set: Option<FieldSet>,
}

impl Config {
    /// Lenient read of a parsed config object. Keys with the wrong type are
    /// ignored, unknown language or field set codes map to the defaults.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |key: &str| {
            obj.get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };
        Some(Self {
            data_folder: text("dataFolder").map(PathBuf::from),
            language: text("language").map(Language::from_code),
            field_set: text("fieldSet").map(FieldSet::from_code),
        })
    }

    pub fn language_or_default(&self) -> Language {
        self.language.unwrap_or_default()
    }

    pub fn field_set_or_default(&self) -> FieldSet {
        self.field_set.unwrap_or_default()
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

/// Folder used until the operator picks one.
pub fn default_data_folder() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(DEFAULT_DATA_DIR)
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.product-scanner-config.json`.
    pub fn at_home() -> Result<Self, ConfigError> {
        default_config_path()
            .map(Self::new)
            .ok_or(ConfigError::NoHomeDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored preferences; `Ok(None)` when no config file exists yet.
    pub fn read(&self) -> Result<Option<Config>, ConfigError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let value = serde_json::from_str::<serde_json::Value>(raw.as_str()).map_err(|source| {
            ConfigError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        Config::from_value(&value)
            .map(Some)
            .ok_or_else(|| ConfigError::NotAnObject {
                path: self.path.clone(),
            })
    }

    /// Like [`ConfigStore::read`], but an unusable file reads as "not
    /// configured".
    pub fn load(&self) -> Option<Config> {
        self.read()
            .inspect_err(|err| warn!(error = %err, "ignoring config file"))
            .ok()
            .flatten()
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(config)?;
        write_text_file(&self.path, content.as_str()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        (dir, store)
    }

    #[test]
    fn absent_file_is_not_configured() {
        let (_dir, store) = store();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_file_is_not_configured() {
        let (_dir, store) = store();
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), None);
        fs::write(store.path(), "[1, 2]").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn read_tells_absent_from_malformed() {
        let (_dir, store) = store();
        assert!(matches!(store.read(), Ok(None)));
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.read(), Err(ConfigError::Parse { .. })));
        fs::write(store.path(), "\"text\"").unwrap();
        assert!(matches!(store.read(), Err(ConfigError::NotAnObject { .. })));
    }

    #[test]
    fn saved_config_reads_back() {
        let (dir, store) = store();
        let config = Config {
            data_folder: Some(dir.path().join("scans")),
            language: Some(Language::English),
            field_set: Some(FieldSet::Serial),
        };
        store.save(&config).unwrap();
        assert_eq!(store.load(), Some(config));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["language"], json!("en"));
        assert_eq!(raw["fieldSet"], json!("serial"));
    }

    #[test]
    fn unknown_language_keeps_the_folder() {
        let config = Config::from_value(&json!({
            "dataFolder": "/data/scans",
            "language": "de",
            "extra": true,
        }))
        .unwrap();
        assert_eq!(config.data_folder, Some(PathBuf::from("/data/scans")));
        assert_eq!(config.language, Some(Language::Italian));
        assert_eq!(config.field_set, None);
    }

    #[test]
    fn empty_folder_means_unset() {
        let config = Config::from_value(&json!({ "dataFolder": "", "language": 3 })).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_overwrites_the_whole_object() {
        let (_dir, store) = store();
        store
            .save(&Config {
                data_folder: Some(PathBuf::from("/a")),
                language: Some(Language::English),
                field_set: None,
            })
            .unwrap();
        store
            .save(&Config {
                data_folder: Some(PathBuf::from("/b")),
                ..Config::default()
            })
            .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.data_folder, Some(PathBuf::from("/b")));
        assert_eq!(loaded.language, None);
    }
}
