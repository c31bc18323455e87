//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;
use std::time::Duration;

use crate::location::{FeedConfig, DEFAULT_FEED_LABEL};

use super::file::config_directory;

/// Default time between simulated fixes, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Default maximum spacing between replayed route points, in meters.
pub const DEFAULT_ROUTE_SPACING_M: f64 = 25.0;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "routesim.log";

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Location feed settings
    pub feed: FeedSettings,
    /// Route source settings
    pub route: RouteSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Location feed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    /// Milliseconds between fixes
    pub interval_ms: u64,
    /// Source label reported to observers
    pub label: String,
}

/// Route source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSettings {
    /// GeoJSON route to replay (built-in demo route when unset)
    pub file: Option<PathBuf>,
    /// Maximum distance between replayed points; 0 disables densification
    pub spacing_m: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            feed: FeedSettings {
                interval_ms: DEFAULT_INTERVAL_MS,
                label: DEFAULT_FEED_LABEL.to_string(),
            },
            route: RouteSettings {
                file: None,
                spacing_m: DEFAULT_ROUTE_SPACING_M,
            },
            logging: LoggingSettings {
                file: config_directory().join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}

impl FeedSettings {
    /// Build a feed configuration from these settings.
    pub fn to_feed_config(&self) -> FeedConfig {
        FeedConfig::new()
            .with_interval(Duration::from_millis(self.interval_ms))
            .with_label(self.label.clone())
    }
}
