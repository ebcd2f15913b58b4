use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
#[cfg(feature = "clap")]
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use overrides::HorizonOverrides;
pub use settings::{Config, HorizonSettings, InitialState, Logging};

/// Loads the planning configuration from a TOML file.
///
/// Values can be overridden from the environment with the `GOSPLAN` prefix and
/// `__` as the section separator, e.g. `GOSPLAN_HORIZON__REVISE_PERIODS=2`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from(path))
        .add_source(
            Environment::with_prefix("GOSPLAN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Parses the planning configuration from TOML text.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(horizon = ?config.horizon, "Configuration loaded.");
    Ok(config)
}
