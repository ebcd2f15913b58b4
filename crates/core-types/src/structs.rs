use crate::enums::SolveStatus;
use crate::expr::VarId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a solver returns for one linear program.
///
/// Values are only meaningful when `status` is `Optimal`. Variables the
/// program never referenced resolve to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    values: BTreeMap<VarId, f64>,
}

impl Solution {
    pub fn optimal(objective_value: f64, values: impl IntoIterator<Item = (VarId, f64)>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value: Some(objective_value),
            values: values.into_iter().collect(),
        }
    }

    pub fn failed(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: BTreeMap::new(),
        }
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(&var).copied().unwrap_or(0.0)
    }

    pub fn values_of(&self, vars: &[VarId]) -> Vec<f64> {
        vars.iter().map(|&var| self.value(var)).collect()
    }
}

/// The committed plan: one entry per planned period in every sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannedEconomy {
    /// Planned activity of every sector.
    pub activity: Vec<Vec<f64>>,
    /// Net production of every product.
    pub production: Vec<Vec<f64>>,
    /// Product surplus at the end of the period.
    pub surplus: Vec<Vec<f64>>,
    /// Imports of every product.
    pub total_import: Vec<Vec<f64>>,
    /// Running export deficit at the end of the period.
    pub export_deficit: Vec<f64>,
    /// Total hours worked in the period.
    pub worked_hours: Vec<f64>,
}

impl PlannedEconomy {
    /// Number of committed periods.
    pub fn len(&self) -> usize {
        self.activity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }
}
