use core_types::{VarId, VariableSet};

/// The nonnegative `activity` and `total_import` variables for every period
/// of the extended horizon, allocated once per run and shared by all windows.
#[derive(Debug)]
pub struct DecisionVariables {
    set: VariableSet,
    activity: Vec<Vec<VarId>>,
    total_import: Vec<Vec<VarId>>,
}

impl DecisionVariables {
    pub fn allocate(periods: usize, sectors: usize, products: usize) -> Self {
        let mut set = VariableSet::new();
        let mut activity = Vec::with_capacity(periods);
        let mut total_import = Vec::with_capacity(periods);
        for t in 0..periods {
            activity.push(set.add_nonneg_vector(&format!("activity_{t}"), sectors));
            total_import.push(set.add_nonneg_vector(&format!("total_import_{t}"), products));
        }
        Self {
            set,
            activity,
            total_import,
        }
    }

    pub fn set(&self) -> &VariableSet {
        &self.set
    }

    pub fn periods(&self) -> usize {
        self.activity.len()
    }

    pub fn activity(&self, t: usize) -> &[VarId] {
        &self.activity[t]
    }

    pub fn total_import(&self, t: usize) -> &[VarId] {
        &self.total_import[t]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_distinct_nonnegative_variables() {
        let vars = DecisionVariables::allocate(3, 2, 4);
        assert_eq!(vars.periods(), 3);
        assert_eq!(vars.set().len(), 3 * (2 + 4));
        assert_eq!(vars.activity(2).len(), 2);
        assert_eq!(vars.total_import(0).len(), 4);
        assert_ne!(vars.activity(1)[0], vars.activity(2)[0]);

        let def = vars.set().get(vars.total_import(1)[3]).unwrap();
        assert_eq!(def.name, "total_import_1[3]");
        assert_eq!(def.lower, 0.0);
        assert!(def.upper.is_infinite());
    }
}
