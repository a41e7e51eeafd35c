use std::fs;
use std::path::{Path, PathBuf};

use super::core::PostmapConfig;
use crate::core::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".postmap.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<PostmapConfig, String> {
    let config = toml::from_str::<PostmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file; any failure is an error.
pub fn load_config_from(path: &Path) -> Result<PostmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let config = parse_and_validate_config(&contents).map_err(Error::Configuration)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config; failures only warn.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<PostmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| dir.parent().map(Path::to_path_buf)).take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn discover_config(start: PathBuf) -> PostmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PostmapConfig::default()
        })
}

/// Explicit path wins; otherwise discover from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<PostmapConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(PostmapConfig::default())
        }
    }
}
