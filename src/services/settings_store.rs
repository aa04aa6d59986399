//! Settings persistence

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::{error::SettingsError, state::TimerSettings};

/// Persistence boundary for timer settings
pub trait SettingsStore: Send + Sync {
    /// Load stored settings, falling back to defaults when nothing usable is stored
    fn load(&self) -> TimerSettings;

    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError>;
}

/// Stores settings as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/breaktime/settings.json`
    pub fn in_config_dir() -> Result<Self, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::new(dir.join("breaktime").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<TimerSettings>, SettingsError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let settings: TimerSettings = serde_json::from_slice(&data)?;
        settings.validate()?;
        Ok(Some(settings))
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> TimerSettings {
        match self.read() {
            Ok(Some(settings)) => {
                debug!(path = %self.path.display(), "Loaded settings");
                settings
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No stored settings, using defaults");
                TimerSettings::default()
            }
            Err(e) => {
                warn!("Ignoring stored settings: {}", e);
                TimerSettings::default()
            }
        }
    }

    fn save(&self, settings: &TimerSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let data = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, data).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}
