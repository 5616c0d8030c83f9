//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::FixedOffset;
use moodmorph_core::calendar::TEHRAN_OFFSET_SECONDS;
use moodmorph_core::{Calendars, GregorianCalendar, Locale, PersianCalendar};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub data_dir: PathBuf,
    pub log_level: Level,
    pub default_locale: Locale,
    pub cors_origin: String,
    pub persian_utc_offset: FixedOffset,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let default_locale = match std::env::var("DEFAULT_LOCALE") {
            Ok(value) => value
                .parse::<Locale>()
                .map_err(|e| ConfigError::InvalidValue("DEFAULT_LOCALE".to_string(), e))?,
            Err(_) => Locale::default(),
        };

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let persian_utc_offset = match std::env::var("PERSIAN_UTC_OFFSET_MINUTES") {
            Ok(value) => parse_offset_minutes(&value).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PERSIAN_UTC_OFFSET_MINUTES".to_string(),
                    format!("'{}' is not an offset in minutes", value),
                )
            })?,
            Err(_) => FixedOffset::east_opt(TEHRAN_OFFSET_SECONDS).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "PERSIAN_UTC_OFFSET_MINUTES".to_string(),
                    "default offset out of range".to_string(),
                )
            })?,
        };

        Ok(Self {
            bind_address,
            data_dir,
            log_level,
            default_locale,
            cors_origin,
            persian_utc_offset,
        })
    }

    /// The calendar adapters configured for this deployment.
    pub fn calendars(&self) -> Calendars {
        Calendars {
            gregorian: GregorianCalendar::default(),
            persian: PersianCalendar::with_offset(self.persian_utc_offset),
        }
    }
}

fn parse_offset_minutes(value: &str) -> Option<FixedOffset> {
    let minutes = value.trim().parse::<i32>().ok()?;
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}
