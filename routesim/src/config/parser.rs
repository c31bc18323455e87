//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use crate::route::MIN_SEGMENT_SPACING_M;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [feed] section
    if let Some(section) = ini.section(Some("feed")) {
        if let Some(v) = section.get("interval_ms") {
            config.feed.interval_ms = match v.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(invalid("feed", "interval_ms", v, "must be a positive integer"));
                }
            };
        }
        if let Some(v) = section.get("label") {
            let v = v.trim();
            if !v.is_empty() {
                config.feed.label = v.to_string();
            }
        }
    }

    // [route] section
    if let Some(section) = ini.section(Some("route")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.route.file = Some(expand_tilde(v));
            }
        }
        if let Some(v) = section.get("spacing_m") {
            config.route.spacing_m = match v.trim().parse::<f64>() {
                Ok(m) if m == 0.0 || (m.is_finite() && m >= MIN_SEGMENT_SPACING_M) => m,
                _ => {
                    return Err(invalid(
                        "route",
                        "spacing_m",
                        v,
                        &format!(
                            "must be 0 or at least {} meters",
                            MIN_SEGMENT_SPACING_M
                        ),
                    ));
                }
            };
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
