//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fixed remote source of the world country boundaries.
pub const DEFAULT_BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub boundaries: BoundaryConfig,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Boundary dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryConfig {
    /// `http(s)://` URL or local file path of a GeoJSON FeatureCollection
    #[serde(default = "default_boundary_url")]
    pub url: String,

    #[serde(default = "default_boundary_timeout")]
    pub timeout_secs: u64,

    /// Feature property holding the country name
    #[serde(default = "default_name_property")]
    pub name_property: String,
}

fn default_boundary_url() -> String {
    DEFAULT_BOUNDARY_URL.to_string()
}

fn default_boundary_timeout() -> u64 {
    30
}

fn default_name_property() -> String {
    "name".to_string()
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            url: default_boundary_url(),
            timeout_secs: default_boundary_timeout(),
            name_property: default_name_property(),
        }
    }
}

/// Map view configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_tiles")]
    pub tiles: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_center_lat() -> f64 {
    25.0
}

fn default_center_lon() -> f64 {
    80.0
}

fn default_zoom() -> u8 {
    4
}

fn default_tiles() -> String {
    "cartodb positron".to_string()
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    800
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            tiles: default_tiles(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("healthmap").join("config.toml")),
            Some(PathBuf::from("/etc/healthmap/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("HEALTHMAP_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("HEALTHMAP_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Boundary overrides
        if let Ok(url) = std::env::var("HEALTHMAP_BOUNDARY_URL") {
            self.boundaries.url = url;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("HEALTHMAP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HEALTHMAP_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Healthmap Configuration
#
# Environment variables override these settings:
# - HEALTHMAP_HOST
# - HEALTHMAP_PORT
# - HEALTHMAP_BOUNDARY_URL
# - HEALTHMAP_LOG_LEVEL
# - HEALTHMAP_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8501

# Largest accepted CSV upload (bytes)
max_upload_bytes = 10485760

[boundaries]
# GeoJSON FeatureCollection with one feature per country.
# Either an http(s) URL (fetched on every upload) or a local file path.
url = "{url}"

# Fetch timeout in seconds
timeout_secs = 30

# Feature property holding the country name ("ADMIN" is tried as a fallback)
name_property = "name"

[map]
# Initial view
center_lat = 25.0
center_lon = 80.0
zoom = 4

# Base tiles: "cartodb positron" or "openstreetmap"
tiles = "cartodb positron"

# Map size in pixels
width = 1024
height = 800

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        url = DEFAULT_BOUNDARY_URL
    )
}
