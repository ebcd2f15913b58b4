use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for a planning run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub horizon: HorizonSettings,
    #[serde(default)]
    pub initial_state: InitialState,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.horizon.validate()?;
        if !self.initial_state.export_deficit.is_finite() {
            return Err(ConfigError::ValidationError(
                "initial_state.export_deficit must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contains the receding-horizon parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonSettings {
    /// The number of periods to actually plan, e.g. the next 4 years.
    pub periods: usize,
    /// The number of periods optimised in each iteration, e.g. 6 years.
    pub horizon_periods: usize,
    /// The number of periods kept from each iteration before planning again.
    pub revise_periods: usize,
    /// How much sector activity may change from one period to the next.
    /// 0.1 keeps activity within 90%..110% of the previous period.
    #[serde(default = "default_labor_realloc_coef")]
    pub labor_realloc_coef: f64,
}

impl HorizonSettings {
    pub fn new(periods: usize, horizon_periods: usize, revise_periods: usize) -> Self {
        Self {
            periods,
            horizon_periods,
            revise_periods,
            labor_realloc_coef: default_labor_realloc_coef(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("periods", self.periods),
            ("horizon_periods", self.horizon_periods),
            ("revise_periods", self.revise_periods),
        ] {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "horizon.{name} must be greater than 0"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.labor_realloc_coef) {
            return Err(ConfigError::ValidationError(
                "horizon.labor_realloc_coef must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// State of the economy before the first planned period.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InitialState {
    /// Surplus of every product carried into period 0. Zero when omitted.
    pub surplus: Option<Vec<f64>>,
    #[serde(default)]
    pub export_deficit: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Logging {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_labor_realloc_coef() -> f64 {
    0.1
}

fn default_log_level() -> String {
    "info".to_string()
}
