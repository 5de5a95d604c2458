//! Handles settings for the `gym` binary. Configuration is read from an
//! optional TOML file (`gym.toml` unless `--config` says otherwise):
//!
//! ```toml
//! [store]
//! path = "data/gym.json"
//!
//! [log]
//! level = "info"
//! ```
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

pub const DEFAULT_STORE_PATH: &str = "data/gym.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Deserialize)]
pub struct Store {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub store: Store,
    pub log: Log,
}

impl Settings {
    /// Reads `path` if it exists, falling back to the defaults for anything
    /// it leaves out.
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("store.path", DEFAULT_STORE_PATH)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .add_source(File::from(path).required(false))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let settings = Settings::new(Path::new("does/not/exist/gym.toml")).unwrap();
        assert_eq!(settings.store.path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(settings.log.level, DEFAULT_LOG_LEVEL);
    }
}
