use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome reported by a solver for a single linear program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

impl SolveStatus {
    /// Returns true when the solution values can be trusted.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
        };
        f.write_str(name)
    }
}

/// Direction of an inequality, always read as `expr <op> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// `expr >= 0`
    Ge,
    /// `expr <= 0`
    Le,
}
