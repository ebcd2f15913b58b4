use thiserror::Error;

#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("Series '{0}' contains no periods.")]
    EmptySeries(&'static str),

    #[error("The shapes of the matrices in '{series}' differ: period {period} has shape {shape:?}, period 0 has {expected:?}.")]
    ShapeMismatch {
        series: &'static str,
        period: usize,
        shape: Vec<usize>,
        expected: Vec<usize>,
    },

    #[error("'{series}' has {periods} periods but '{reference}' has {expected}.")]
    PeriodMismatch {
        series: &'static str,
        reference: &'static str,
        periods: usize,
        expected: usize,
    },

    #[error("'{series}' has shape {shape:?}, instead of {expected:?}.")]
    CrossShapeMismatch {
        series: &'static str,
        shape: Vec<usize>,
        expected: Vec<usize>,
    },

    #[error("List of {kind} names has length {len}, but it must be of length {expected}.")]
    NamingMismatch {
        kind: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("Row {row} of '{series}' in period {period} has a different length than the first row.")]
    RaggedMatrix {
        series: &'static str,
        period: usize,
        row: usize,
    },

    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse data file: {0}")]
    Json(#[from] serde_json::Error),
}
