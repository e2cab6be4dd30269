// Lernova Settings Engine
// Loads and persists shell settings (API endpoint, window defaults, frontend source).
// Settings are stored as a JSON file at the platform-specific config path and
// can be overridden from the environment at startup.

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{parse_hex_color, ShellSettings};

/// Overrides the downloads API base URL.
pub const ENV_API_URL: &str = "LERNOVA_API_URL";
/// Forces dev mode on (`1`, `true`, `development`) or off (anything else).
pub const ENV_DEV: &str = "LERNOVA_DEV";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ShellSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ShellSettings;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ShellSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ShellSettings::default(),
        }
    }

    /// Applies `LERNOVA_API_URL` and `LERNOVA_DEV` from the process environment.
    /// Overrides are in-memory only and never written back to disk.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            info!(api_url = %url, "API URL overridden from environment");
            self.settings.api.base_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_DEV) {
            let flag = flag.trim().to_ascii_lowercase();
            self.settings.frontend.dev_mode =
                matches!(flag.as_str(), "1" | "true" | "development");
            debug!(dev_mode = self.settings.frontend.dev_mode, "dev mode overridden from environment");
        }
    }
}

/// Rejects settings the shell cannot start with.
pub fn validate(settings: &ShellSettings) -> Result<(), SettingsError> {
    let api_url = url::Url::parse(&settings.api.base_url).map_err(|e| {
        SettingsError::InvalidValue(format!("api.base_url '{}': {}", settings.api.base_url, e))
    })?;
    if !matches!(api_url.scheme(), "http" | "https") {
        return Err(SettingsError::InvalidValue(format!(
            "api.base_url '{}': scheme must be http or https",
            settings.api.base_url
        )));
    }
    if settings.window.width == 0 || settings.window.height == 0 {
        return Err(SettingsError::InvalidValue(
            "window.width and window.height must be non-zero".to_string(),
        ));
    }
    if parse_hex_color(&settings.window.background_color).is_none() {
        return Err(SettingsError::InvalidValue(format!(
            "window.background_color '{}': expected #rrggbb",
            settings.window.background_color
        )));
    }
    Ok(())
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file loads the defaults and writes them out so there is a
    /// file to edit next time; failing to write it is not fatal. A file that
    /// is malformed or fails [`validate`] is an error.
    fn load(&mut self) -> Result<ShellSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ShellSettings::default();
            match self.save() {
                Ok(()) => info!(path = %self.config_path, "wrote default settings"),
                Err(e) => warn!(path = %self.config_path, error = %e, "could not write default settings"),
            }
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ShellSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file, creating parent directories.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ShellSettings {
        &self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
