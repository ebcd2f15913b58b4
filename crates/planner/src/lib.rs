use crate::constraints::{ConstraintBuilder, WindowRecord, WindowSeed};
use crate::cost::CostModel;
use crate::recorder::{CommittedPeriod, PlannedEconomyRecorder};
use crate::schedule::{required_periods, windows};
use crate::variables::DecisionVariables;
use configuration::HorizonSettings;
use core_types::{LinearProgram, PlannedEconomy};
use economy::{Ecology, EconomyModel, Targets};
use optimizer::Solver;
use std::sync::Arc;
use uuid::Uuid;

pub mod algebra;
pub mod constraints;
pub mod cost;
pub mod error;
pub mod recorder;
pub mod schedule;
pub mod variables;

pub use error::PlanError;
pub use schedule::Window;

/// Plans an economy with receding horizon control.
///
/// Each iteration solves a linear program over `horizon_periods` periods,
/// keeps the first `revise_periods` of them and moves forward, seeding the
/// next iteration with the committed surplus, export deficit and activity.
/// The periods past the revise cadence only exist so that the committed
/// ones stay feasible for what comes after them.
pub struct PlanningHorizonController {
    job_id: Uuid,
    settings: HorizonSettings,
    economy: Arc<EconomyModel>,
    targets: Targets,
    ecology: Option<Arc<Ecology>>,
    solver: Box<dyn Solver>,
}

impl PlanningHorizonController {
    pub fn new(
        settings: HorizonSettings,
        economy: Arc<EconomyModel>,
        solver: Box<dyn Solver>,
    ) -> Result<Self, PlanError> {
        validate_settings(&settings, &economy)?;
        let targets = Targets::from_final_demand(&economy);
        Ok(Self {
            job_id: Uuid::new_v4(),
            settings,
            economy,
            targets,
            ecology: None,
            solver,
        })
    }

    /// Adds ecological limits to every window.
    pub fn with_ecology(mut self, ecology: Arc<Ecology>) -> Result<Self, PlanError> {
        if ecology.sectors() != self.economy.sectors() {
            return Err(PlanError::EcologyMismatch(format!(
                "pollutants cover {} sectors, the economy has {}",
                ecology.sectors(),
                self.economy.sectors()
            )));
        }
        let required = self.required_periods();
        if ecology.periods() < required {
            return Err(PlanError::EcologyMismatch(format!(
                "ecology provides {} periods, the plan needs {}",
                ecology.periods(),
                required
            )));
        }
        self.ecology = Some(ecology);
        Ok(self)
    }

    /// Replaces the default targets (the economy's final demand).
    pub fn with_targets(mut self, targets: Targets) -> Result<Self, PlanError> {
        let products = self.economy.products();
        let periods = self.economy.periods();
        for (name, series) in [
            ("domestic", targets.domestic()),
            ("export", targets.export()),
            ("import", targets.import()),
        ] {
            if series.len() != periods || series.iter().any(|v| v.len() != products) {
                return Err(PlanError::TargetsMismatch(format!(
                    "{name} targets must have {periods} periods of {products} products"
                )));
            }
        }
        self.targets = targets;
        Ok(self)
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn settings(&self) -> &HorizonSettings {
        &self.settings
    }

    /// The iterations `run` goes through, in order.
    pub fn windows(&self) -> Vec<Window> {
        windows(
            self.settings.periods,
            self.settings.horizon_periods,
            self.settings.revise_periods,
        )
    }

    fn required_periods(&self) -> usize {
        required_periods(
            self.settings.periods,
            self.settings.horizon_periods,
            self.settings.revise_periods,
        )
    }

    /// Optimises the plan over every period.
    ///
    /// `initial_surplus` defaults to zero for every product. Fails with
    /// `PlanError::Infeasible` at the first window the solver cannot solve;
    /// no partial plan is returned.
    pub fn run(
        &self,
        initial_surplus: Option<&[f64]>,
        initial_export_deficit: f64,
    ) -> Result<PlannedEconomy, PlanError> {
        let products = self.economy.products();
        let surplus = match initial_surplus {
            Some(surplus) if surplus.len() != products => {
                return Err(PlanError::SurplusLength {
                    len: surplus.len(),
                    expected: products,
                });
            }
            Some(surplus) => surplus.to_vec(),
            None => vec![0.0; products],
        };
        if !initial_export_deficit.is_finite() {
            return Err(PlanError::InvalidParameter(
                "initial export deficit must be a finite number".to_string(),
            ));
        }
        let initial = WindowSeed {
            surplus,
            export_deficit: initial_export_deficit,
            activity: None,
        };

        let span = tracing::info_span!("plan", job_id = %self.job_id);
        let _guard = span.enter();

        let extended = self.settings.periods + self.settings.horizon_periods - 1;
        let vars = DecisionVariables::allocate(extended, self.economy.sectors(), products);
        let mut recorder = PlannedEconomyRecorder::new();

        let windows = self.windows();
        tracing::info!(
            periods = self.settings.periods,
            horizon_periods = self.settings.horizon_periods,
            revise_periods = self.settings.revise_periods,
            windows = windows.len(),
            "Starting plan."
        );

        for window in &windows {
            let seed = recorder.seed().unwrap_or_else(|| initial.clone());
            self.solve_window(&vars, window, &seed, &mut recorder)?;
        }

        tracing::info!("Plan completed.");
        Ok(recorder.finish())
    }

    /// Formulates and solves one window, then commits its leading periods.
    fn solve_window(
        &self,
        vars: &DecisionVariables,
        window: &Window,
        seed: &WindowSeed,
        recorder: &mut PlannedEconomyRecorder,
    ) -> Result<(), PlanError> {
        let mut record = WindowRecord::default();
        let builder = ConstraintBuilder::new(
            &self.economy,
            &self.targets,
            self.ecology.as_deref(),
            vars,
            *window,
            self.settings.labor_realloc_coef,
        );

        let mut constraints = builder.production(&seed.surplus, &mut record);
        constraints.extend(builder.trade_balance(seed.export_deficit, &mut record));
        constraints.extend(builder.labor_reallocation(seed.activity.as_deref()));
        constraints.extend(builder.pollutants());
        let objective = CostModel::new(&self.economy, vars).objective(window, &mut record);

        let problem = LinearProgram::new(vars.set(), objective, constraints);
        tracing::debug!(
            period = window.start,
            constraints = problem.constraints.len(),
            "Solving window."
        );

        let solution = self.solver.solve(&problem)?;
        if !solution.status.is_optimal() {
            tracing::error!(period = window.start, status = %solution.status, "Window could not be solved.");
            return Err(PlanError::Infeasible {
                period: window.start,
                status: solution.status,
            });
        }

        let resolve = |exprs: &[core_types::LinearExpr]| -> Vec<f64> {
            exprs.iter().map(|e| e.evaluate(&solution)).collect()
        };
        for (offset, t) in window.committed().enumerate() {
            recorder.commit(CommittedPeriod {
                period: t,
                activity: solution.values_of(vars.activity(t)),
                production: resolve(&record.production[offset]),
                surplus: resolve(&record.surplus[offset]),
                total_import: solution.values_of(vars.total_import(t)),
                export_deficit: record.export_deficit[offset].evaluate(&solution),
                worked_hours: record.worked_hours[offset].evaluate(&solution),
            })?;
        }

        tracing::info!(
            period = window.start,
            committed = window.commit,
            objective = ?solution.objective_value,
            "Window solved."
        );
        Ok(())
    }
}

fn validate_settings(settings: &HorizonSettings, economy: &EconomyModel) -> Result<(), PlanError> {
    if settings.revise_periods > settings.horizon_periods {
        tracing::error!("Revise periods exceed horizon periods.");
        return Err(PlanError::RevisePeriodsExceedsHorizon {
            revise: settings.revise_periods,
            horizon: settings.horizon_periods,
        });
    }
    if settings.periods == 0 || settings.horizon_periods == 0 || settings.revise_periods == 0 {
        return Err(PlanError::InvalidParameter(
            "periods, horizon periods and revise periods must be positive".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&settings.labor_realloc_coef) {
        return Err(PlanError::InvalidParameter(format!(
            "labor reallocation coefficient {} must be in [0, 1)",
            settings.labor_realloc_coef
        )));
    }

    let required = required_periods(
        settings.periods,
        settings.horizon_periods,
        settings.revise_periods,
    );
    if required > economy.periods() {
        tracing::error!(required, available = economy.periods(), "Economy is too short for the plan.");
        return Err(PlanError::InsufficientEconomyPeriods {
            required,
            available: economy.periods(),
        });
    }
    Ok(())
}
