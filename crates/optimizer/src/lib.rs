use core_types::{LinearProgram, Solution};

pub mod error;
pub mod simplex;

pub use error::OptimizerError;
pub use simplex::SimplexSolver;

/// Anything able to minimise a linear program.
///
/// Implementations report infeasible and unbounded programs through
/// `Solution::status`, and reserve `Err` for programs they could not
/// process at all.
pub trait Solver: Send + Sync {
    fn solve(&self, problem: &LinearProgram<'_>) -> Result<Solution, OptimizerError>;
}
