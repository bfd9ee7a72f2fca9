//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::config::{self, CONFIG_FILE_NAME};
use crate::domain::{AppConfig, AppError};

/// Load `costdraft.toml`.
///
/// An explicit `path` must exist. Without one, `costdraft.toml` in the current
/// directory is used when present and defaults apply otherwise. Relative paths
/// inside the file resolve against the file's directory.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(AppConfig::default());
            }
            candidate
        }
    };

    debug!(path = %config_path.display(), "loading configuration");
    let content = fs::read_to_string(&config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config::parse_config_content(&content)?.resolve_paths(base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn explicit_path_resolves_dataset_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costdraft.toml");
        fs::write(&path, "[historical]\npath = \"prices.yml\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.historical.path, Some(dir.path().join("prices.yml")));
    }

    #[test]
    fn absolute_template_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costdraft.toml");
        fs::write(&path, "[prompt]\ntemplate_path = \"/opt/prompts/custom.txt\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.prompt.template_path, Some(PathBuf::from("/opt/prompts/custom.txt")));
    }
}
