use serde::{Deserialize, Serialize};

/// Base URL of the downloads API when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Frontend dev server used when running in dev mode.
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:5173";

/// Top-level shell settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellSettings {
    pub api: ApiSettings,
    pub window: WindowSettings,
    pub frontend: FrontendSettings,
    pub downloads: DownloadSettings,
}

/// Remote downloads API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// No timeout when unset; a hung call never affects the download itself.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Appearance of newly created windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub devtools: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Lernova".to_string(),
            width: 1200,
            height: 800,
            background_color: "#ffffff".to_string(),
            devtools: true,
        }
    }
}

/// Where the renderer content comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrontendSettings {
    pub dev_mode: bool,
    pub dev_server_url: String,
    /// Directory holding the built frontend (`index.html` and assets).
    pub dist_dir: String,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            dev_mode: cfg!(debug_assertions),
            dev_server_url: DEFAULT_DEV_SERVER_URL.to_string(),
            dist_dir: "dist".to_string(),
        }
    }
}

/// Download handling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadSettings {
    /// Target directory; the platform download directory when unset.
    pub directory: Option<String>,
}

/// Parses an RGB hex color such as `#ffffff` into its components.
pub fn parse_hex_color(input: &str) -> Option<(u8, u8, u8)> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
