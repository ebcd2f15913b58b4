use crate::algebra::{constants, dot_vars, mat_exprs, mat_vars};
use crate::schedule::Window;
use crate::variables::DecisionVariables;
use core_types::{Constraint, LinearExpr};
use economy::{Ecology, EconomyModel, Targets};

/// State carried into a window from the last committed period.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSeed {
    pub surplus: Vec<f64>,
    pub export_deficit: f64,
    /// Committed activity of the period before the window; `None` at period 0.
    pub activity: Option<Vec<f64>>,
}

/// Expressions captured while building one window, one entry per revise period,
/// so they can be resolved against the solution once it is known.
#[derive(Debug, Default)]
pub struct WindowRecord {
    pub production: Vec<Vec<LinearExpr>>,
    pub surplus: Vec<Vec<LinearExpr>>,
    pub export_deficit: Vec<LinearExpr>,
    pub worked_hours: Vec<LinearExpr>,
}

/// Builds the inequality constraints of a single window.
pub struct ConstraintBuilder<'a> {
    economy: &'a EconomyModel,
    targets: &'a Targets,
    ecology: Option<&'a Ecology>,
    vars: &'a DecisionVariables,
    window: Window,
    realloc_coef: f64,
}

impl<'a> ConstraintBuilder<'a> {
    pub fn new(
        economy: &'a EconomyModel,
        targets: &'a Targets,
        ecology: Option<&'a Ecology>,
        vars: &'a DecisionVariables,
        window: Window,
        realloc_coef: f64,
    ) -> Self {
        Self {
            economy,
            targets,
            ecology,
            vars,
            window,
            realloc_coef,
        }
    }

    /// More is available than the targets consume, in every period of the horizon:
    ///
    /// `D_t s_{t-1} + (S_t - U^dom_t - U^imp_t) x_t + m_t - f^dom_t - f^exp_t - f^imp_t >= 0`
    ///
    /// The left-hand side is the surplus `s_t`, which chains into the next period.
    pub fn production(&self, seed_surplus: &[f64], record: &mut WindowRecord) -> Vec<Constraint> {
        let mut constraints = Vec::new();
        let mut surplus = constants(seed_surplus);

        for t in self.window.horizon() {
            let production = mat_vars(&self.economy.net_supply(t), self.vars.activity(t));
            let carried = mat_exprs(&self.economy.depreciation()[t], &surplus);
            let imports = self.vars.total_import(t);

            let next: Vec<LinearExpr> = carried
                .into_iter()
                .enumerate()
                .map(|(i, mut expr)| {
                    expr += &production[i];
                    expr.add_term(imports[i], 1.0);
                    expr -= self.targets.domestic()[t][i]
                        + self.targets.export()[t][i]
                        + self.targets.import()[t][i];
                    expr
                })
                .collect();

            constraints.extend(
                next.iter()
                    .enumerate()
                    .map(|(i, expr)| expr.clone().ge_zero(format!("surplus[{t}][{i}]"))),
            );

            if self.window.in_revise(t) {
                record.production.push(production);
                record.surplus.push(next.clone());
            }
            surplus = next;
        }
        constraints
    }

    /// The running export deficit stays nonnegative in every revise period:
    ///
    /// `d_t = d_{t-1} + p^exp_t . f^exp_t - p^imp_t . m_t >= 0`
    ///
    /// Checking only the last period would let the deficit swing negative
    /// in between.
    pub fn trade_balance(&self, seed_deficit: f64, record: &mut WindowRecord) -> Vec<Constraint> {
        let mut constraints = Vec::new();
        let mut deficit = LinearExpr::constant(seed_deficit);

        for t in self.window.revise() {
            deficit += self.economy.prices_export()[t].dot(&self.targets.export()[t]);
            let import_cost = dot_vars(self.economy.prices_import()[t].view(), self.vars.total_import(t));
            deficit -= &import_cost;

            constraints.push(deficit.clone().ge_zero(format!("export_deficit[{t}]")));
            record.export_deficit.push(deficit.clone());
        }
        constraints
    }

    /// Activity may only move by `realloc_coef` from one period to the next:
    ///
    /// `(1 - c) x_{t-1} <= x_t <= (1 + c) x_{t-1}`
    ///
    /// Period 0 of the run has nothing to compare against. At the first period
    /// of a later window, `x_{t-1}` is the committed activity.
    pub fn labor_reallocation(&self, committed_activity: Option<&[f64]>) -> Vec<Constraint> {
        let lower = 1.0 - self.realloc_coef;
        let upper = 1.0 + self.realloc_coef;
        let mut constraints = Vec::new();

        for t in self.window.revise() {
            if t == 0 {
                continue;
            }
            let previous: Vec<LinearExpr> = match committed_activity {
                Some(values) if t == self.window.start => constants(values),
                _ => self
                    .vars
                    .activity(t - 1)
                    .iter()
                    .map(|&var| LinearExpr::variable(var))
                    .collect(),
            };

            for (j, (&current, prev)) in self.vars.activity(t).iter().zip(previous).enumerate() {
                let current = LinearExpr::variable(current);
                constraints.push(
                    (current.clone() - prev.clone() * lower).ge_zero(format!("realloc_low[{t}][{j}]")),
                );
                constraints.push((current - prev * upper).le_zero(format!("realloc_high[{t}][{j}]")));
            }
        }
        constraints
    }

    /// Emissions stay within the ecological targets in every revise period.
    /// Empty without ecology data.
    pub fn pollutants(&self) -> Vec<Constraint> {
        let Some(ecology) = self.ecology else {
            return Vec::new();
        };
        let mut constraints = Vec::new();
        for t in self.window.revise() {
            let emitted = mat_vars(&ecology.pollutants()[t], self.vars.activity(t));
            for (k, mut expr) in emitted.into_iter().enumerate() {
                expr -= ecology.target_pollutants()[t][k];
                constraints.push(expr.le_zero(format!("pollutants[{t}][{k}]")));
            }
        }
        constraints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::windows;
    use core_types::{ComparisonOp, Solution};
    use economy::EconomySeries;
    use ndarray::{Array1, Array2};

    fn economy(periods: usize) -> EconomyModel {
        let matrix = |value: f64| vec![Array2::from_elem((1, 1), value); periods];
        let vector = |value: f64| vec![Array1::from_elem(1, value); periods];
        let series = EconomySeries {
            supply: matrix(2.0),
            use_domestic: matrix(0.5),
            use_import: matrix(0.1),
            depreciation: matrix(0.9),
            final_domestic: vector(1.0),
            final_export: vector(0.5),
            final_import: vector(0.25),
            prices_import: vector(2.0),
            prices_export: vector(3.0),
            worked_hours: vector(1.0),
        };
        EconomyModel::new(series, None, None).unwrap()
    }

    #[test]
    fn surplus_chains_through_the_horizon() {
        let economy = economy(3);
        let targets = Targets::from_final_demand(&economy);
        let vars = DecisionVariables::allocate(4, 1, 1);
        let window = windows(2, 3, 1)[0];
        let builder = ConstraintBuilder::new(&economy, &targets, None, &vars, window, 0.1);

        let mut record = WindowRecord::default();
        let constraints = builder.production(&[2.0], &mut record);
        assert_eq!(constraints.len(), 3);
        // Only the revise period is recorded.
        assert_eq!(record.surplus.len(), 1);
        assert_eq!(record.production.len(), 1);

        // s_0 = 0.9 * 2 + 1.4 x_0 + m_0 - 1.75
        let s0 = &constraints[0].expr;
        assert!((s0.constant_term() - (1.8 - 1.75)).abs() < 1e-12);
        assert!((s0.coefficient(vars.activity(0)[0]) - 1.4).abs() < 1e-12);
        assert_eq!(s0.coefficient(vars.total_import(0)[0]), 1.0);

        // s_1 carries 0.9 * s_0.
        let s1 = &constraints[1].expr;
        assert!((s1.coefficient(vars.activity(0)[0]) - 0.9 * 1.4).abs() < 1e-12);
        assert!((s1.coefficient(vars.activity(1)[0]) - 1.4).abs() < 1e-12);
        assert!((s1.constant_term() - (0.9 * 0.05 - 1.75)).abs() < 1e-12);
        assert!(constraints.iter().all(|c| c.op == ComparisonOp::Ge));
    }

    #[test]
    fn trade_balance_is_enforced_every_revise_period() {
        let economy = economy(4);
        let targets = Targets::from_final_demand(&economy);
        let vars = DecisionVariables::allocate(5, 1, 1);
        let window = windows(2, 3, 2)[0];
        let builder = ConstraintBuilder::new(&economy, &targets, None, &vars, window, 0.1);

        let mut record = WindowRecord::default();
        let constraints = builder.trade_balance(1.0, &mut record);
        assert_eq!(constraints.len(), 2);
        assert_eq!(record.export_deficit.len(), 2);

        // d_1 = 1 + 2 * 1.5 - 2 m_0 - 2 m_1
        let d1 = &record.export_deficit[1];
        assert!((d1.constant_term() - 4.0).abs() < 1e-12);
        assert_eq!(d1.coefficient(vars.total_import(0)[0]), -2.0);
        assert_eq!(d1.coefficient(vars.total_import(1)[0]), -2.0);

        let solution = Solution::optimal(0.0, [(vars.total_import(0)[0], 1.0), (vars.total_import(1)[0], 0.5)]);
        assert!((d1.evaluate(&solution) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn first_period_of_run_has_no_realloc_bound() {
        let economy = economy(3);
        let targets = Targets::from_final_demand(&economy);
        let vars = DecisionVariables::allocate(4, 1, 1);
        let window = windows(2, 2, 2)[0];
        let builder = ConstraintBuilder::new(&economy, &targets, None, &vars, window, 0.1);

        let constraints = builder.labor_reallocation(None);
        // Only t = 1 is bounded, once from below and once from above.
        assert_eq!(constraints.len(), 2);
        let low = &constraints[0].expr;
        assert_eq!(low.coefficient(vars.activity(1)[0]), 1.0);
        assert!((low.coefficient(vars.activity(0)[0]) + 0.9).abs() < 1e-12);
        let high = &constraints[1].expr;
        assert!((high.coefficient(vars.activity(0)[0]) + 1.1).abs() < 1e-12);
    }

    #[test]
    fn later_windows_compare_against_committed_activity() {
        let economy = economy(4);
        let targets = Targets::from_final_demand(&economy);
        let vars = DecisionVariables::allocate(5, 1, 1);
        let window = windows(4, 2, 2)[1];
        let builder = ConstraintBuilder::new(&economy, &targets, None, &vars, window, 0.1);

        let constraints = builder.labor_reallocation(Some(&[10.0]));
        assert_eq!(constraints.len(), 4);
        let low = &constraints[0].expr;
        assert_eq!(low.coefficient(vars.activity(1)[0]), 0.0);
        assert!((low.constant_term() + 9.0).abs() < 1e-12);
        let high = &constraints[1].expr;
        assert!((high.constant_term() + 11.0).abs() < 1e-12);
        // The second period of the window is bounded by the first, still a variable.
        assert!((constraints[2].expr.coefficient(vars.activity(2)[0]) + 0.9).abs() < 1e-12);
    }

    #[test]
    fn pollutants_only_with_ecology() {
        let economy = economy(2);
        let targets = Targets::from_final_demand(&economy);
        let vars = DecisionVariables::allocate(2, 1, 1);
        let window = windows(1, 2, 1)[0];

        let builder = ConstraintBuilder::new(&economy, &targets, None, &vars, window, 0.1);
        assert!(builder.pollutants().is_empty());

        let ecology = Ecology::new(vec![Array2::from_elem((2, 1), 0.5); 2], vec![Array1::from_elem(2, 3.0); 2]).unwrap();
        let builder = ConstraintBuilder::new(&economy, &targets, Some(&ecology), &vars, window, 0.1);
        let constraints = builder.pollutants();
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[1].op, ComparisonOp::Le);
        assert_eq!(constraints[1].expr.coefficient(vars.activity(0)[0]), 0.5);
        assert_eq!(constraints[1].expr.constant_term(), -3.0);
    }
}
