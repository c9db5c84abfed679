//! Configuration loading.
//!
//! Settings come from an optional TOML file with kebab-case keys; the CLI
//! overrides individual values on top of it.

mod error;
mod inactivity;
mod settings;

pub use error::ConfigError;
pub use inactivity::{InactivityWindow, DEFAULT_SEARCH_WINDOW_DAYS, MAX_INACTIVE_DAYS};
pub use settings::FinderConfig;

use std::path::Path;
use tracing::{debug, info};

/// Loads and validates a config file.
///
/// # Arguments
///
/// * `path` - Path to the TOML config file
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: &Path) -> Result<FinderConfig, ConfigError> {
    info!(path = %path.display(), "Loading config");

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: FinderConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })?;

    config.validate(&path.display().to_string())?;
    debug!(?config, "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("finder.toml");
        fs::write(&path, "max-candidates = 25\nmin-years = 2.5\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.max_candidates, 25);
        assert_eq!(config.min_years, 2.5);
    }

    #[test]
    fn load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("nonexistent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn load_config_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("finder.toml");
        fs::write(&path, "seed-pool = [").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn load_config_runs_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("finder.toml");
        fs::write(&path, "seed-pool = 0\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
