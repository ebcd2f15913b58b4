use crate::error::ConfigError;
use crate::settings::HorizonSettings;

/// Command-line overrides for the horizon settings.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HorizonOverrides {
    /// Number of periods to plan.
    #[arg(long)]
    pub periods: Option<usize>,

    /// Number of periods optimised in each iteration.
    #[arg(long)]
    pub horizon_periods: Option<usize>,

    /// Number of periods committed from each iteration.
    #[arg(long)]
    pub revise_periods: Option<usize>,
}

impl HorizonOverrides {
    /// Overwrites every field that was given on the command line.
    pub fn apply(&self, settings: &mut HorizonSettings) {
        if let Some(periods) = self.periods {
            settings.periods = periods;
        }
        if let Some(horizon_periods) = self.horizon_periods {
            settings.horizon_periods = horizon_periods;
        }
        if let Some(revise_periods) = self.revise_periods {
            settings.revise_periods = revise_periods;
        }
    }

    /// Builds settings purely from the command line, for runs without a config file.
    pub fn to_settings(&self) -> Result<HorizonSettings, ConfigError> {
        match (self.periods, self.horizon_periods, self.revise_periods) {
            (Some(periods), Some(horizon_periods), Some(revise_periods)) => {
                Ok(HorizonSettings::new(periods, horizon_periods, revise_periods))
            }
            _ => Err(ConfigError::ValidationError(
                "--periods, --horizon-periods and --revise-periods are required without a config file"
                    .to_string(),
            )),
        }
    }
}
