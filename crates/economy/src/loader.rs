use crate::ecology::Ecology;
use crate::error::EconomyError;
use crate::model::{EconomyModel, EconomySeries};
use crate::{Matrix, Vector};
use serde::Deserialize;
use std::fs;
use std::path::Path;

type RawMatrices = Vec<Vec<Vec<f64>>>;
type RawVectors = Vec<Vec<f64>>;

/// On-disk layout of an economy: every series is a list of periods, each a
/// nested array (matrices as a list of rows).
#[derive(Debug, Deserialize)]
struct RawEconomy {
    supply: RawMatrices,
    use_domestic: RawMatrices,
    use_import: RawMatrices,
    depreciation: RawMatrices,
    final_domestic: RawVectors,
    final_export: RawVectors,
    final_import: RawVectors,
    prices_import: RawVectors,
    prices_export: RawVectors,
    worked_hours: RawVectors,
    #[serde(default)]
    product_names: Option<Vec<String>>,
    #[serde(default)]
    sector_names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawEcology {
    pollutants: RawMatrices,
    target_pollutants: RawVectors,
}

/// Reads and validates an economy from a JSON file.
pub fn load_economy(path: &Path) -> Result<EconomyModel, EconomyError> {
    let contents = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "Loading economy.");
    parse_economy(&contents)
}

pub fn parse_economy(json: &str) -> Result<EconomyModel, EconomyError> {
    let raw: RawEconomy = serde_json::from_str(json)?;
    let series = EconomySeries {
        supply: to_matrices("supply", raw.supply)?,
        use_domestic: to_matrices("use_domestic", raw.use_domestic)?,
        use_import: to_matrices("use_import", raw.use_import)?,
        depreciation: to_matrices("depreciation", raw.depreciation)?,
        final_domestic: to_vectors(raw.final_domestic),
        final_export: to_vectors(raw.final_export),
        final_import: to_vectors(raw.final_import),
        prices_import: to_vectors(raw.prices_import),
        prices_export: to_vectors(raw.prices_export),
        worked_hours: to_vectors(raw.worked_hours),
    };
    EconomyModel::new(series, raw.product_names, raw.sector_names)
}

/// Reads and validates ecological limits from a JSON file.
pub fn load_ecology(path: &Path) -> Result<Ecology, EconomyError> {
    let contents = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "Loading ecology.");
    parse_ecology(&contents)
}

pub fn parse_ecology(json: &str) -> Result<Ecology, EconomyError> {
    let raw: RawEcology = serde_json::from_str(json)?;
    Ecology::new(
        to_matrices("pollutants", raw.pollutants)?,
        to_vectors(raw.target_pollutants),
    )
}

fn to_matrices(series: &'static str, periods: RawMatrices) -> Result<Vec<Matrix>, EconomyError> {
    periods
        .into_iter()
        .enumerate()
        .map(|(period, rows)| to_matrix(series, period, rows))
        .collect()
}

fn to_matrix(series: &'static str, period: usize, rows: Vec<Vec<f64>>) -> Result<Matrix, EconomyError> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().position(|r| r.len() != ncols) {
        return Err(EconomyError::RaggedMatrix { series, period, row });
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Matrix::from_shape_vec((nrows, ncols), flat)
        .map_err(|_| EconomyError::RaggedMatrix { series, period, row: 0 })
}

fn to_vectors(periods: RawVectors) -> Vec<Vector> {
    periods.into_iter().map(Vector::from).collect()
}
