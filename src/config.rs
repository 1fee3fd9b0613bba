use crate::formatting::BoxChars;
use chrono::format::{Item, StrftimeItems};
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

/// Environment variable that overrides `api_base_url`
pub const API_URL_ENV: &str = "HOOPS_API_URL";

/// Base URL used when neither config nor environment set one
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// strftime pattern for the "Updated" timestamp
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub api_base_url: String,
    /// Seconds between automatic refreshes in the TUI (0 disables)
    pub refresh_interval: u32,
    /// Rows per leaderboard on the analytics page
    pub leaders_limit: u32,
    pub time_format: String,
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
}

/// How tables are drawn (unicode box characters or plain ASCII)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    #[serde(skip)]
    pub box_chars: BoxChars,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub header_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval: 60,
            leaders_limit: 5,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            display: DisplayConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::from_use_unicode(true)
    }
}

impl DisplayConfig {
    pub fn from_use_unicode(use_unicode: bool) -> Self {
        Self {
            use_unicode,
            box_chars: BoxChars::from_use_unicode(use_unicode),
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        BoxChars::unicode()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            header_fg: Color::Cyan,
            error_fg: Color::Red,
        }
    }
}

impl Config {
    /// Fill in values derived from other settings after deserializing
    fn finalize(mut self) -> Self {
        self.display.box_chars = BoxChars::from_use_unicode(self.display.use_unicode);
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        if !is_valid_time_format(&self.time_format) {
            tracing::warn!(
                "Invalid time_format {:?}, using {:?}",
                self.time_format,
                DEFAULT_TIME_FORMAT
            );
            self.time_format = DEFAULT_TIME_FORMAT.to_string();
        }
        self
    }

    /// Apply the API URL override from the environment, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        self
    }
}

/// Whether chrono can render every item of a strftime pattern
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = s.strip_prefix('#') {
        return match hex.len() {
            6 => Some(Color::Rgb(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => Some(Color::Rgb(
                u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?,
                u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?,
                u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?,
            )),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }

    None
}

fn base_directories() -> BaseDirectories {
    BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"))
}

pub fn get_config_path() -> Option<PathBuf> {
    let config_home = base_directories().get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Directory for state that survives restarts (the login session)
pub fn get_state_dir() -> Option<PathBuf> {
    base_directories().get_state_home()
}

/// Parse config file contents, falling back to defaults on malformed input
pub fn parse(content: &str) -> Config {
    match toml::from_str::<Config>(content) {
        Ok(config) => config.finalize(),
        Err(e) => {
            tracing::warn!("Ignoring malformed config file: {}", e);
            Config::default()
        }
    }
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default().with_env_overrides(),
    };

    if !config_path.exists() {
        return Config::default().with_env_overrides();
    }

    let config = match fs::read_to_string(&config_path) {
        Ok(content) => parse(&content),
        Err(_) => Config::default(),
    };
    config.with_env_overrides()
}
