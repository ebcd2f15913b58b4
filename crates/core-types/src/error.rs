use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Unknown decision variable #{0}.")]
    UnknownVariable(usize),

    #[error("Invalid bounds for variable '{name}': lower {lower} is greater than upper {upper}.")]
    InvalidBounds { name: String, lower: f64, upper: f64 },
}
