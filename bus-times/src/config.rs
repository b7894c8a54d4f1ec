//! Application configuration.

use std::path::PathBuf;

use chrono_tz::Tz;

/// Maximum number of arrivals shown on a board.
pub const MAX_ARRIVALS: usize = 5;

/// Maximum number of stop search suggestions.
pub const MAX_SUGGESTIONS: usize = 10;

/// Timezone used when `TZ` is not set.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// File inside the data directory that holds the per-origin store.
const STORAGE_FILE: &str = "local_storage.json";

/// Errors in the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `TZ` is not an IANA timezone name
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
}

/// Deployment settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Agency name shown in the page title.
    pub agency_name: Option<String>,

    /// Agency logo shown in the page header.
    pub logo_url: Option<String>,

    /// Local timezone of the transit agency.
    pub timezone: Tz,

    /// Directory for persisted browser-side state.
    pub data_dir: PathBuf,

    /// Extracted GTFS static feed.
    pub gtfs_dir: PathBuf,
}

impl AppConfig {
    /// Read settings from the process environment.
    ///
    /// | Variable             | Default           |
    /// |----------------------|-------------------|
    /// | `AGENCY_NAME`        | unset             |
    /// | `AGENCY_LOGO_URL`    | unset             |
    /// | `TZ`                 | `America/Toronto` |
    /// | `BUS_TIMES_DATA_DIR` | `.bus-times`      |
    /// | `GTFS_STATIC_DIR`    | `gtfs`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timezone = match get("TZ") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidTimezone(name))?,
            None => DEFAULT_TIMEZONE,
        };

        let defaults = Self::default();

        Ok(Self {
            agency_name: get("AGENCY_NAME"),
            logo_url: get("AGENCY_LOGO_URL"),
            timezone,
            data_dir: get("BUS_TIMES_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            gtfs_dir: get("GTFS_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.gtfs_dir),
        })
    }

    /// Page title: the agency name, or a generic one.
    pub fn title(&self) -> &str {
        self.agency_name.as_deref().unwrap_or("Next Bus")
    }

    /// Path of the file backing the per-origin store.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agency_name: None,
            logo_url: None,
            timezone: DEFAULT_TIMEZONE,
            data_dir: PathBuf::from(".bus-times"),
            gtfs_dir: PathBuf::from("gtfs"),
        }
    }
}
