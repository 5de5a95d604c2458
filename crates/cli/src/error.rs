use config::ConfigError;
use gym_engine::EngineError;
use thiserror::Error;

/// Errors reported by the `gym` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("failed to read settings: {0}")]
    Settings(#[from] ConfigError),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Kind name printed as `error[<Kind>]`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.kind(),
            Self::Settings(_) => "Settings",
            Self::Usage(_) => "Usage",
        }
    }
}
