use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const SELECTIONS_DIR_ENV_VAR: &str = "REGION_SELECT_DIR";
pub const DEFAULT_SELECTIONS_DIR_NAME: &str = "selections";
pub const SELECTION_FILE_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub selections_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("{var} is set but empty")]
    EmptyEnvDir { var: &'static str },
    #[error("selections path exists but is not a directory: {path}")]
    NotADirectory { path: PathBuf },
    #[error("failed to create selections directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreConfig {
    pub fn new(selections_dir: impl Into<PathBuf>) -> Self {
        Self {
            selections_dir: selections_dir.into(),
        }
    }

    /// Uses `REGION_SELECT_DIR` when set, otherwise `./selections`, and makes
    /// sure the directory exists.
    pub fn resolve() -> Result<Self, ConfigError> {
        let selections_dir = match env::var(SELECTIONS_DIR_ENV_VAR) {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyEnvDir {
                    var: SELECTIONS_DIR_ENV_VAR,
                })
            }
            Ok(value) => PathBuf::from(value),
            Err(env::VarError::NotPresent) => env::current_dir()
                .map_err(ConfigError::CurrentDir)?
                .join(DEFAULT_SELECTIONS_DIR_NAME),
            Err(source) => {
                return Err(ConfigError::EnvVar {
                    var: SELECTIONS_DIR_ENV_VAR,
                    source,
                })
            }
        };

        let config = Self::new(selections_dir);
        config.ensure_dir()?;
        info!(
            selections_dir = %config.selections_dir.display(),
            "selection_store_config_resolved"
        );
        Ok(config)
    }

    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        ensure_dir(&self.selections_dir)
    }
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    if path.exists() && !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn ensure_dir_creates_missing_directories() {
        let temp = TempDir::new().expect("temp");
        let config = StoreConfig::new(temp.path().join("a").join("b"));
        config.ensure_dir().expect("create");
        assert!(config.selections_dir.is_dir());
    }

    #[test]
    fn ensure_dir_rejects_regular_file() {
        let temp = TempDir::new().expect("temp");
        let file = temp.path().join("occupied");
        fs::write(&file, "x").expect("write");

        let error = StoreConfig::new(&file).ensure_dir().expect_err("not a dir");
        assert!(matches!(error, ConfigError::NotADirectory { .. }));
    }
}
