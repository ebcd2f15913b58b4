use crate::algebra::dot_vars;
use crate::constraints::WindowRecord;
use crate::schedule::Window;
use crate::variables::DecisionVariables;
use core_types::LinearExpr;
use economy::EconomyModel;

/// Builds the objective minimised in each window: hours worked plus the
/// cost of imports, summed over the whole horizon.
pub struct CostModel<'a> {
    economy: &'a EconomyModel,
    vars: &'a DecisionVariables,
}

impl<'a> CostModel<'a> {
    pub fn new(economy: &'a EconomyModel, vars: &'a DecisionVariables) -> Self {
        Self { economy, vars }
    }

    /// `sum_t  l_t . x_t + p^imp_t . m_t`
    ///
    /// The worked-hours expression of every revise period is kept in `record`.
    pub fn objective(&self, window: &Window, record: &mut WindowRecord) -> LinearExpr {
        let mut cost = LinearExpr::zero();
        for t in window.horizon() {
            let worked_hours = dot_vars(self.economy.worked_hours()[t].view(), self.vars.activity(t));
            let import_cost = dot_vars(self.economy.prices_import()[t].view(), self.vars.total_import(t));
            cost += &worked_hours;
            cost += import_cost;

            if window.in_revise(t) {
                record.worked_hours.push(worked_hours);
            }
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::windows;
    use economy::EconomySeries;
    use ndarray::{arr1, arr2};

    #[test]
    fn sums_hours_and_import_cost_over_horizon() {
        let series = EconomySeries {
            supply: vec![arr2(&[[1.0, 1.0]]); 3],
            use_domestic: vec![arr2(&[[0.0, 0.0]]); 3],
            use_import: vec![arr2(&[[0.0, 0.0]]); 3],
            depreciation: vec![arr2(&[[1.0]]); 3],
            final_domestic: vec![arr1(&[1.0]); 3],
            final_export: vec![arr1(&[0.0]); 3],
            final_import: vec![arr1(&[0.0]); 3],
            prices_import: vec![arr1(&[4.0]); 3],
            prices_export: vec![arr1(&[1.0]); 3],
            worked_hours: vec![arr1(&[2.0, 3.0]); 3],
        };
        let economy = EconomyModel::new(series, None, None).unwrap();
        let vars = DecisionVariables::allocate(3, 2, 1);
        let window = windows(2, 2, 1)[1];

        let mut record = WindowRecord::default();
        let cost = CostModel::new(&economy, &vars).objective(&window, &mut record);

        // Window [1, 3): periods 1 and 2 priced, period 0 untouched.
        assert_eq!(cost.coefficient(vars.activity(0)[0]), 0.0);
        assert_eq!(cost.coefficient(vars.activity(1)[1]), 3.0);
        assert_eq!(cost.coefficient(vars.activity(2)[0]), 2.0);
        assert_eq!(cost.coefficient(vars.total_import(2)[0]), 4.0);
        assert_eq!(record.worked_hours.len(), 1);
        assert_eq!(record.worked_hours[0].coefficient(vars.activity(1)[0]), 2.0);
        assert_eq!(record.worked_hours[0].coefficient(vars.total_import(1)[0]), 0.0);
    }
}
