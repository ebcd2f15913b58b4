use crate::error::OptimizerError;
use crate::Solver;
use core_types::{ComparisonOp, LinearProgram, Solution, SolveStatus, VarId};
use minilp::{OptimizationDirection, Problem};
use std::collections::HashMap;

/// `Solver` backed by the `minilp` simplex implementation.
///
/// Only the variables a program references are handed to the solver; every
/// other registered variable resolves to zero in the returned `Solution`.
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    /// Slack allowed when a constraint reduces to a constant.
    tolerance: f64,
}

impl SimplexSolver {
    pub fn new() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for SimplexSolver {
    fn solve(&self, problem: &LinearProgram<'_>) -> Result<Solution, OptimizerError> {
        let referenced = problem.referenced_variables();
        let mut lp = Problem::new(OptimizationDirection::Minimize);
        let mut handles = HashMap::with_capacity(referenced.len());

        for &var in &referenced {
            let def = problem.variables.get(var)?;
            let coeff = finite(problem.objective.coefficient(var), &def.name)?;
            handles.insert(var, lp.add_var(coeff, (def.lower, def.upper)));
        }

        let mut submitted = 0usize;
        for constraint in &problem.constraints {
            let constant = constraint.expr.constant_term();
            if constraint.expr.is_constant() {
                let holds = match constraint.op {
                    ComparisonOp::Ge => constant >= -self.tolerance,
                    ComparisonOp::Le => constant <= self.tolerance,
                };
                if !holds {
                    tracing::debug!(label = %constraint.label, constant, "Constant constraint violated.");
                    return Ok(Solution::failed(SolveStatus::Infeasible));
                }
                continue;
            }

            let mut expr = minilp::LinearExpr::empty();
            for (var, coeff) in constraint.expr.terms() {
                let handle = handles
                    .get(&var)
                    .ok_or(core_types::CoreError::UnknownVariable(var.0))?;
                expr.add(*handle, finite(coeff, &constraint.label)?);
            }
            let op = match constraint.op {
                ComparisonOp::Ge => minilp::ComparisonOp::Ge,
                ComparisonOp::Le => minilp::ComparisonOp::Le,
            };
            lp.add_constraint(expr, op, -finite(constant, &constraint.label)?);
            submitted += 1;
        }

        tracing::debug!(
            variables = referenced.len(),
            constraints = submitted,
            "Submitting linear program to simplex solver."
        );

        match lp.solve() {
            Ok(solution) => {
                let objective_value = solution.objective() + problem.objective.constant_term();
                let values: Vec<(VarId, f64)> = referenced
                    .iter()
                    .map(|var| (*var, solution[handles[var]]))
                    .collect();
                // minilp can hand back an unbounded program as a solution with
                // infinite values.
                if !objective_value.is_finite() || values.iter().any(|(_, v)| !v.is_finite()) {
                    tracing::debug!(objective = objective_value, "Solver returned a non-finite solution.");
                    return Ok(Solution::failed(SolveStatus::Unbounded));
                }
                Ok(Solution::optimal(objective_value, values))
            }
            Err(minilp::Error::Infeasible) => Ok(Solution::failed(SolveStatus::Infeasible)),
            Err(minilp::Error::Unbounded) => Ok(Solution::failed(SolveStatus::Unbounded)),
        }
    }
}

fn finite(value: f64, label: &str) -> Result<f64, OptimizerError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OptimizerError::NonFiniteCoefficient(label.to_string()))
    }
}
