//! Configuration for RouteSim.
//!
//! Settings live in an INI file at `~/.routesim/config.ini`:
//!
//! ```ini
//! [feed]
//! interval_ms = 1000
//! label = route-replay
//!
//! [route]
//! file = ~/routes/commute.geojson
//! spacing_m = 25
//!
//! [logging]
//! file = ~/.routesim/routesim.log
//! ```
//!
//! Missing files and missing keys fall back to defaults.
//!
//! - [`settings`] - one struct per `[section]`
//! - [`file`] - loading, saving and file locations
//! - `parser` / `writer` - INI conversion in both directions

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, FeedSettings, LoggingSettings, RouteSettings, DEFAULT_INTERVAL_MS,
    DEFAULT_LOG_FILE_NAME, DEFAULT_ROUTE_SPACING_M,
};
