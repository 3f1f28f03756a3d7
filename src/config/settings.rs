//! Application settings loading from config.toml
//!
//! Settings are read from a TOML file (`config.toml` by default, or the path in
//! `PIZZERIA_CONFIG`). Every field has a default, so a missing file or a partial file
//! is fine. A few environment variables override the file afterwards:
//!
//! - `DATABASE_URL` replaces `database.url`
//! - `PIZZERIA_PORT` replaces `server.port`

use crate::config::database::default_status_names;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{io::ErrorKind, path::Path};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Persistence settings
    pub database: DatabaseConfig,
    /// Startup seed data
    pub seed: SeedConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Prefix for hypermedia links (e.g. `"https://pizza.example.com"`); empty gives relative links
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: String::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pizzeria.sqlite?mode=rwc".to_string(),
        }
    }
}

/// Startup seed data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Status names that must exist; missing ones are inserted at startup
    pub statuses: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            statuses: default_status_names(),
        }
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Settings`] if the TOML syntax is invalid or a field has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Settings {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file, falling back to defaults if the file does not exist.
///
/// # Errors
/// Returns [`Error::Settings`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            debug!("Loaded settings from {}", path.display());
            parse_config(&contents)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No settings file at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Settings {
            message: format!("Failed to read config file {}: {e}", path.display()),
        }),
    }
}

/// Applies environment overrides to `config`.
///
/// `lookup` resolves a variable name to its value; [`load_app_config`] passes
/// `std::env::var`.
///
/// # Errors
/// Returns [`Error::Settings`] if `PIZZERIA_PORT` is not a valid port number.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        config.database.url = url;
    }

    if let Some(port) = lookup("PIZZERIA_PORT") {
        config.server.port = port.parse().map_err(|e| Error::Settings {
            message: format!("PIZZERIA_PORT must be a port number, got '{port}': {e}"),
        })?;
    }

    Ok(())
}

/// Loads the application settings: file first, then environment overrides.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var("PIZZERIA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = load_config(&path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}
