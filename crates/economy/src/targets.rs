use crate::error::EconomyError;
use crate::model::EconomyModel;
use crate::validation::{equal_periods, equal_shapes, expect_shape};
use crate::Vector;

/// Per-period output targets the plan has to cover: domestic final demand,
/// exports and imported final goods.
#[derive(Debug, Clone)]
pub struct Targets {
    domestic: Vec<Vector>,
    export: Vec<Vector>,
    import: Vec<Vector>,
}

impl Targets {
    /// Uses the economy's own final-demand series as targets.
    pub fn from_final_demand(economy: &EconomyModel) -> Self {
        Self {
            domestic: economy.final_domestic().to_vec(),
            export: economy.final_export().to_vec(),
            import: economy.final_import().to_vec(),
        }
    }

    /// Custom targets, checked against the economy's periods and products.
    pub fn new(
        domestic: Vec<Vector>,
        export: Vec<Vector>,
        import: Vec<Vector>,
        economy: &EconomyModel,
    ) -> Result<Self, EconomyError> {
        let expected = [economy.products()];
        for (name, series) in [
            ("target_domestic", &domestic),
            ("target_export", &export),
            ("target_import", &import),
        ] {
            equal_shapes(name, series)?;
            equal_periods(name, series.len(), "supply", economy.periods())?;
            expect_shape(name, series, &expected)?;
        }
        Ok(Self {
            domestic,
            export,
            import,
        })
    }

    pub fn domestic(&self) -> &[Vector] {
        &self.domestic
    }

    pub fn export(&self) -> &[Vector] {
        &self.export
    }

    pub fn import(&self) -> &[Vector] {
        &self.import
    }
}
