//! Boundary operations handed to the UI.
//!
//! None of these fail across the boundary: every filesystem or parse problem
//! comes back as an outcome with `ok: false` and a readable message.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{Config, ConfigStore};
use crate::day_file::write_text_file;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub ok: bool,
    pub path: Option<String>,
    pub error: Option<String>,
}

impl SaveOutcome {
    fn failed(message: String) -> Self {
        Self {
            ok: false,
            path: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub ok: bool,
    pub content: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOutcome {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigLoadOutcome {
    pub ok: bool,
    pub config: Option<Config>,
    pub error: Option<String>,
}

/// Only a bare file name is accepted; anything that would leave the data
/// folder is rejected.
fn sanitize_file_name(value: &str) -> Result<PathBuf, String> {
    let mut out = PathBuf::new();
    for component in Path::new(value).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return Err("Invalid file name.".to_string()),
        }
    }
    if out.as_os_str().is_empty() || out.components().count() != 1 {
        return Err("Invalid file name.".to_string());
    }
    Ok(out)
}

/// Writes `content` to `folder/filename`, creating the folder if needed.
pub fn save_records(folder: &Path, filename: &str, content: &str) -> SaveOutcome {
    let name = match sanitize_file_name(filename) {
        Ok(name) => name,
        Err(message) => return SaveOutcome::failed(message),
    };
    let path = folder.join(name);
    match write_text_file(&path, content) {
        Ok(()) => {
            info!(path = %path.display(), bytes = content.len(), "day file saved");
            SaveOutcome {
                ok: true,
                path: Some(path.to_string_lossy().to_string()),
                error: None,
            }
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "day file save failed");
            SaveOutcome::failed(err.to_string())
        }
    }
}

pub fn load_records(folder: &Path, filename: &str) -> LoadOutcome {
    let failed = |message: String| LoadOutcome {
        ok: false,
        content: None,
        error: Some(message),
    };
    let name = match sanitize_file_name(filename) {
        Ok(name) => name,
        Err(message) => return failed(message),
    };
    let path = folder.join(name);
    if !path.exists() {
        return failed("File not found".to_string());
    }
    match fs::read_to_string(&path) {
        Ok(content) => LoadOutcome {
            ok: true,
            content: Some(content),
            error: None,
        },
        Err(err) => {
            error!(path = %path.display(), error = %err, "day file load failed");
            failed(err.to_string())
        }
    }
}

pub fn save_config(store: &ConfigStore, config: &Config) -> ConfigOutcome {
    match store.save(config) {
        Ok(()) => ConfigOutcome {
            ok: true,
            error: None,
        },
        Err(err) => {
            error!(error = %err, "config save failed");
            ConfigOutcome {
                ok: false,
                error: Some(err.to_string()),
            }
        }
    }
}

pub fn load_config(store: &ConfigStore) -> ConfigLoadOutcome {
    let (config, error) = match store.read() {
        Ok(Some(config)) => (Some(config), None),
        Ok(None) => (None, Some("Config not found".to_string())),
        Err(err) => {
            warn!(error = %err, "config load failed");
            (None, Some(err.to_string()))
        }
    };
    ConfigLoadOutcome {
        ok: config.is_some(),
        config,
        error,
    }
}
