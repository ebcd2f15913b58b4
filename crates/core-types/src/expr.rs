use crate::enums::ComparisonOp;
use crate::error::CoreError;
use crate::structs::Solution;
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Handle to a decision variable registered in a `VariableSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

/// A registered decision variable together with its box bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
}

/// Registry of every decision variable a run may reference.
///
/// Variables are allocated once and then shared by all the linear programs
/// formulated during the run; a program only carries the ids it uses.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    defs: Vec<VariableDef>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new variable with the given bounds.
    pub fn add(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> Result<VarId, CoreError> {
        let name = name.into();
        if lower > upper {
            return Err(CoreError::InvalidBounds { name, lower, upper });
        }
        self.defs.push(VariableDef { name, lower, upper });
        Ok(VarId(self.defs.len() - 1))
    }

    /// Registers `len` nonnegative variables named `{prefix}[i]`.
    pub fn add_nonneg_vector(&mut self, prefix: &str, len: usize) -> Vec<VarId> {
        (0..len)
            .map(|i| {
                self.defs.push(VariableDef {
                    name: format!("{prefix}[{i}]"),
                    lower: 0.0,
                    upper: f64::INFINITY,
                });
                VarId(self.defs.len() - 1)
            })
            .collect()
    }

    pub fn get(&self, var: VarId) -> Result<&VariableDef, CoreError> {
        self.defs.get(var.0).ok_or(CoreError::UnknownVariable(var.0))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// An affine expression `sum(coeff * var) + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, f64>,
    constant: f64,
}

impl LinearExpr {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: BTreeMap::new(),
            constant: value,
        }
    }

    pub fn variable(var: VarId) -> Self {
        let mut expr = Self::zero();
        expr.add_term(var, 1.0);
        expr
    }

    /// Adds `coeff * var`, merging with any existing term for `var`.
    /// Terms that cancel out are dropped.
    pub fn add_term(&mut self, var: VarId, coeff: f64) {
        if coeff == 0.0 {
            return;
        }
        let entry = self.terms.entry(var).or_insert(0.0);
        *entry += coeff;
        if *entry == 0.0 {
            self.terms.remove(&var);
        }
    }

    /// Adds `factor * other` to this expression in place.
    pub fn add_scaled(&mut self, other: &LinearExpr, factor: f64) {
        if factor == 0.0 {
            return;
        }
        for (&var, &coeff) in &other.terms {
            self.add_term(var, coeff * factor);
        }
        self.constant += other.constant * factor;
    }

    pub fn terms(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.terms.iter().map(|(&var, &coeff)| (var, coeff))
    }

    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms.get(&var).copied().unwrap_or(0.0)
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Resolves the expression against solved variable values.
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (&var, &coeff)| acc + coeff * solution.value(var))
    }

    pub fn ge_zero(self, label: impl Into<String>) -> Constraint {
        Constraint {
            label: label.into(),
            expr: self,
            op: ComparisonOp::Ge,
        }
    }

    pub fn le_zero(self, label: impl Into<String>) -> Constraint {
        Constraint {
            label: label.into(),
            expr: self,
            op: ComparisonOp::Le,
        }
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::variable(var)
    }
}

impl AddAssign<&LinearExpr> for LinearExpr {
    fn add_assign(&mut self, rhs: &LinearExpr) {
        self.add_scaled(rhs, 1.0);
    }
}

impl AddAssign<LinearExpr> for LinearExpr {
    fn add_assign(&mut self, rhs: LinearExpr) {
        self.add_scaled(&rhs, 1.0);
    }
}

impl SubAssign<&LinearExpr> for LinearExpr {
    fn sub_assign(&mut self, rhs: &LinearExpr) {
        self.add_scaled(rhs, -1.0);
    }
}

impl AddAssign<f64> for LinearExpr {
    fn add_assign(&mut self, rhs: f64) {
        self.constant += rhs;
    }
}

impl SubAssign<f64> for LinearExpr {
    fn sub_assign(&mut self, rhs: f64) {
        self.constant -= rhs;
    }
}

impl Add<&LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: &LinearExpr) -> LinearExpr {
        self += rhs;
        self
    }
}

impl Add<LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self += &rhs;
        self
    }
}

impl Sub<&LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: &LinearExpr) -> LinearExpr {
        self -= rhs;
        self
    }
}

impl Sub<LinearExpr> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: LinearExpr) -> LinearExpr {
        self -= &rhs;
        self
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: f64) -> LinearExpr {
        let mut scaled = LinearExpr::zero();
        scaled.add_scaled(&self, rhs);
        scaled
    }
}

/// A single inequality `expr >= 0` or `expr <= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Human-readable tag used in diagnostics, e.g. `production[3][0]`.
    pub label: String,
    pub expr: LinearExpr,
    pub op: ComparisonOp,
}

impl Constraint {
    /// Checks the inequality against solved values with an absolute tolerance.
    pub fn is_satisfied(&self, solution: &Solution, tolerance: f64) -> bool {
        let value = self.expr.evaluate(solution);
        match self.op {
            ComparisonOp::Ge => value >= -tolerance,
            ComparisonOp::Le => value <= tolerance,
        }
    }
}

/// A minimisation problem handed to a solver.
#[derive(Debug, Clone)]
pub struct LinearProgram<'a> {
    pub variables: &'a VariableSet,
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl<'a> LinearProgram<'a> {
    pub fn new(variables: &'a VariableSet, objective: LinearExpr, constraints: Vec<Constraint>) -> Self {
        Self {
            variables,
            objective,
            constraints,
        }
    }

    /// Every variable id the objective or any constraint mentions, in id order.
    pub fn referenced_variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self
            .objective
            .terms()
            .map(|(var, _)| var)
            .chain(self.constraints.iter().flat_map(|c| c.expr.terms().map(|(var, _)| var)))
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_merge_and_cancel() {
        let mut vars = VariableSet::new();
        let ids = vars.add_nonneg_vector("x", 2);

        let mut expr = LinearExpr::variable(ids[0]) * 2.0;
        expr.add_term(ids[1], 3.0);
        expr.add_term(ids[0], -2.0);
        expr += 5.0;

        assert_eq!(expr.coefficient(ids[0]), 0.0);
        assert_eq!(expr.coefficient(ids[1]), 3.0);
        assert_eq!(expr.terms().count(), 1);
        assert_eq!(expr.constant_term(), 5.0);
    }

    #[test]
    fn evaluate_uses_solution_values() {
        let mut vars = VariableSet::new();
        let ids = vars.add_nonneg_vector("x", 2);
        let expr = LinearExpr::variable(ids[0]) * 2.0 - LinearExpr::variable(ids[1]) + LinearExpr::constant(1.0);

        let solution = Solution::optimal(0.0, [(ids[0], 3.0), (ids[1], 4.0)]);
        assert_eq!(expr.evaluate(&solution), 3.0);
        assert!(expr.clone().ge_zero("c").is_satisfied(&solution, 0.0));
        assert!(!expr.le_zero("c").is_satisfied(&solution, 1e-9));
    }

    #[test]
    fn referenced_variables_are_sorted_and_unique() {
        let mut vars = VariableSet::new();
        let ids = vars.add_nonneg_vector("x", 3);
        let objective = LinearExpr::variable(ids[2]);
        let constraints = vec![
            (LinearExpr::variable(ids[2]) + LinearExpr::variable(ids[0])).ge_zero("a"),
            LinearExpr::variable(ids[0]).le_zero("b"),
        ];
        let program = LinearProgram::new(&vars, objective, constraints);
        assert_eq!(program.referenced_variables(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut vars = VariableSet::new();
        let err = vars.add("y", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBounds { .. }));
        assert!(vars.is_empty());
    }
}
