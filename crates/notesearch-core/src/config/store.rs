use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::Settings;

/// TOML-backed settings store. Stored keys are merged over the defaults.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(err) => return Err(err.into()),
        };
        let stored: Settings = toml::from_str(&raw)?;
        Ok(stored.sanitized())
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let encoded = toml::to_string_pretty(settings)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    /// Applies one raw value and saves when it was accepted.
    pub fn update(&self, settings: &mut Settings, key: &str, raw: &str) -> Result<bool> {
        let applied = settings.apply_raw(key, raw)?;
        if applied {
            self.save(settings)?;
        }
        Ok(applied)
    }
}
