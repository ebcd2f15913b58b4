use core_types::SolveStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Number of revise periods ({revise}) must be less or equal the number of horizon periods ({horizon}).")]
    RevisePeriodsExceedsHorizon { revise: usize, horizon: usize },

    #[error("The economy provides {available} periods, but the plan needs at least {required}.")]
    InsufficientEconomyPeriods { required: usize, available: usize },

    #[error("Invalid planning parameter: {0}")]
    InvalidParameter(String),

    #[error("Initial surplus has {len} entries, but the economy has {expected} products.")]
    SurplusLength { len: usize, expected: usize },

    #[error("Ecology does not match the economy: {0}")]
    EcologyMismatch(String),

    #[error("Targets do not match the economy: {0}")]
    TargetsMismatch(String),

    #[error("LP problem in iteration period {period} couldn't be solved ({status}). You may try increasing the horizon periods or the initial surplus production.")]
    Infeasible { period: usize, status: SolveStatus },

    #[error("Solver error: {0}")]
    Optimizer(#[from] optimizer::OptimizerError),

    #[error("Period {got} was committed out of order, expected period {expected}.")]
    OutOfOrderCommit { expected: usize, got: usize },
}
