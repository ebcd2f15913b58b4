use crate::constraints::WindowSeed;
use crate::error::PlanError;
use core_types::PlannedEconomy;

/// The resolved values of one committed period.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedPeriod {
    pub period: usize,
    pub activity: Vec<f64>,
    pub production: Vec<f64>,
    pub surplus: Vec<f64>,
    pub total_import: Vec<f64>,
    pub export_deficit: f64,
    pub worked_hours: f64,
}

/// Append-only accumulator of the committed plan.
#[derive(Debug, Default)]
pub struct PlannedEconomyRecorder {
    plan: PlannedEconomy,
}

impl PlannedEconomyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next period. Periods must arrive in order, starting at 0.
    pub fn commit(&mut self, period: CommittedPeriod) -> Result<(), PlanError> {
        let expected = self.plan.len();
        if period.period != expected {
            return Err(PlanError::OutOfOrderCommit {
                expected,
                got: period.period,
            });
        }
        self.plan.activity.push(period.activity);
        self.plan.production.push(period.production);
        self.plan.surplus.push(period.surplus);
        self.plan.total_import.push(period.total_import);
        self.plan.export_deficit.push(period.export_deficit);
        self.plan.worked_hours.push(period.worked_hours);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Seed for the next window, taken from the last committed period.
    /// `None` before anything has been committed.
    pub fn seed(&self) -> Option<WindowSeed> {
        Some(WindowSeed {
            surplus: self.plan.surplus.last()?.clone(),
            export_deficit: *self.plan.export_deficit.last()?,
            activity: Some(self.plan.activity.last()?.clone()),
        })
    }

    pub fn finish(self) -> PlannedEconomy {
        self.plan
    }
}
