use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Problem definition error: {0}")]
    Problem(#[from] core_types::CoreError),

    #[error("Coefficient for '{0}' is not a finite number.")]
    NonFiniteCoefficient(String),
}
