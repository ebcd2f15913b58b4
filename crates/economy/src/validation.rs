use crate::error::EconomyError;
use ndarray::{Array, Dimension};

/// Every period of a series must have the shape of its first period.
pub(crate) fn equal_shapes<D: Dimension>(
    series: &'static str,
    arrays: &[Array<f64, D>],
) -> Result<(), EconomyError> {
    let Some(first) = arrays.first() else {
        return Ok(());
    };
    if let Some((period, array)) = arrays
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, array)| array.shape() != first.shape())
    {
        return Err(EconomyError::ShapeMismatch {
            series,
            period,
            shape: array.shape().to_vec(),
            expected: first.shape().to_vec(),
        });
    }
    tracing::debug!(series, shape = ?first.shape(), periods = arrays.len(), "Series has consistent shape.");
    Ok(())
}

pub(crate) fn equal_periods(
    series: &'static str,
    periods: usize,
    reference: &'static str,
    expected: usize,
) -> Result<(), EconomyError> {
    if periods != expected {
        return Err(EconomyError::PeriodMismatch {
            series,
            reference,
            periods,
            expected,
        });
    }
    Ok(())
}

/// Checks the first period of a series against the shape implied by other series.
pub(crate) fn expect_shape<D: Dimension>(
    series: &'static str,
    arrays: &[Array<f64, D>],
    expected: &[usize],
) -> Result<(), EconomyError> {
    match arrays.first() {
        Some(first) if first.shape() != expected => Err(EconomyError::CrossShapeMismatch {
            series,
            shape: first.shape().to_vec(),
            expected: expected.to_vec(),
        }),
        _ => Ok(()),
    }
}
