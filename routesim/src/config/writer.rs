//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let route_file = config
        .route
        .file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[feed]
; Milliseconds between simulated location fixes
interval_ms = {}
; Source name reported with each fix
label = {}

[route]
; GeoJSON LineString/Feature to replay (leave empty for the built-in demo route)
file = {}
; Maximum meters between replayed points (0 = replay the route points as-is, otherwise at least 0.1)
spacing_m = {}

[logging]
; Log file location
file = {}
"#,
        config.feed.interval_ms,
        config.feed.label,
        route_file,
        config.route.spacing_m,
        path_to_string(&config.logging.file),
    )
}

/// Render a path, abbreviating the home directory as `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
