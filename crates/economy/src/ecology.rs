use crate::error::EconomyError;
use crate::validation::{equal_periods, equal_shapes, expect_shape};
use crate::{Matrix, Vector};

/// Ecological limits on production: per period, the pollutants emitted per
/// unit of sector activity and the maximum allowed emission of each pollutant.
#[derive(Debug, Clone)]
pub struct Ecology {
    pollutants: Vec<Matrix>,
    target_pollutants: Vec<Vector>,
}

impl Ecology {
    pub fn new(pollutants: Vec<Matrix>, target_pollutants: Vec<Vector>) -> Result<Self, EconomyError> {
        if pollutants.is_empty() {
            return Err(EconomyError::EmptySeries("pollutants"));
        }
        equal_shapes("pollutants", &pollutants)?;
        equal_shapes("target_pollutants", &target_pollutants)?;
        equal_periods(
            "target_pollutants",
            target_pollutants.len(),
            "pollutants",
            pollutants.len(),
        )?;
        expect_shape("target_pollutants", &target_pollutants, &[pollutants[0].nrows()])?;

        Ok(Self {
            pollutants,
            target_pollutants,
        })
    }

    /// Number of distinct pollutants tracked.
    pub fn pollutant_kinds(&self) -> usize {
        self.pollutants[0].nrows()
    }

    pub fn sectors(&self) -> usize {
        self.pollutants[0].ncols()
    }

    pub fn periods(&self) -> usize {
        self.pollutants.len()
    }

    pub fn pollutants(&self) -> &[Matrix] {
        &self.pollutants
    }

    pub fn target_pollutants(&self) -> &[Vector] {
        &self.target_pollutants
    }
}
