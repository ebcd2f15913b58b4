use thiserror::Error;

/// Errors raised while building the planning `Config`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source (file or string) or an environment override could not be read.
    #[error("Failed to load planning configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The values were read but are out of range.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
