use crate::error::EconomyError;
use crate::validation::{equal_periods, equal_shapes, expect_shape};
use crate::{Matrix, Vector};

/// The raw, unvalidated time series of an economy. Every field holds one
/// entry per period.
#[derive(Debug, Clone, Default)]
pub struct EconomySeries {
    /// Supply table, products x sectors.
    pub supply: Vec<Matrix>,
    /// Domestic intermediate use, products x sectors.
    pub use_domestic: Vec<Matrix>,
    /// Imported intermediate use, products x sectors.
    pub use_import: Vec<Matrix>,
    /// Fraction of each product's surplus surviving into the next period, products x products.
    pub depreciation: Vec<Matrix>,
    pub final_domestic: Vec<Vector>,
    pub final_export: Vec<Vector>,
    pub final_import: Vec<Vector>,
    pub prices_import: Vec<Vector>,
    pub prices_export: Vec<Vector>,
    /// Hours worked per unit of activity, one entry per sector.
    pub worked_hours: Vec<Vector>,
}

/// A validated, read-only economy.
///
/// The only way to obtain one is `EconomyModel::new`, which checks that
/// every series is internally consistent, spans the same number of periods
/// as `supply`, and agrees with the product/sector dimensions of `supply[0]`.
#[derive(Debug, Clone)]
pub struct EconomyModel {
    series: EconomySeries,
    product_names: Option<Vec<String>>,
    sector_names: Option<Vec<String>>,
}

impl EconomyModel {
    pub fn new(
        series: EconomySeries,
        product_names: Option<Vec<String>>,
        sector_names: Option<Vec<String>>,
    ) -> Result<Self, EconomyError> {
        validate_series(&series)?;

        let products = series.supply[0].nrows();
        let sectors = series.supply[0].ncols();
        validate_cross_shapes(&series, products, sectors)?;

        if let Some(names) = &product_names {
            if names.len() != products {
                return Err(EconomyError::NamingMismatch {
                    kind: "product",
                    len: names.len(),
                    expected: products,
                });
            }
        }
        if let Some(names) = &sector_names {
            if names.len() != sectors {
                return Err(EconomyError::NamingMismatch {
                    kind: "sector",
                    len: names.len(),
                    expected: sectors,
                });
            }
        }

        tracing::info!(
            products,
            sectors,
            periods = series.supply.len(),
            "Economy validated."
        );

        Ok(Self {
            series,
            product_names,
            sector_names,
        })
    }

    /// Number of products in the economy.
    pub fn products(&self) -> usize {
        self.series.supply[0].nrows()
    }

    /// Number of sectors in the economy.
    pub fn sectors(&self) -> usize {
        self.series.supply[0].ncols()
    }

    /// Number of periods covered by every series.
    pub fn periods(&self) -> usize {
        self.series.supply.len()
    }

    pub fn supply(&self) -> &[Matrix] {
        &self.series.supply
    }

    pub fn use_domestic(&self) -> &[Matrix] {
        &self.series.use_domestic
    }

    pub fn use_import(&self) -> &[Matrix] {
        &self.series.use_import
    }

    pub fn depreciation(&self) -> &[Matrix] {
        &self.series.depreciation
    }

    pub fn final_domestic(&self) -> &[Vector] {
        &self.series.final_domestic
    }

    pub fn final_export(&self) -> &[Vector] {
        &self.series.final_export
    }

    pub fn final_import(&self) -> &[Vector] {
        &self.series.final_import
    }

    pub fn prices_import(&self) -> &[Vector] {
        &self.series.prices_import
    }

    pub fn prices_export(&self) -> &[Vector] {
        &self.series.prices_export
    }

    pub fn worked_hours(&self) -> &[Vector] {
        &self.series.worked_hours
    }

    pub fn product_names(&self) -> Option<&[String]> {
        self.product_names.as_deref()
    }

    pub fn sector_names(&self) -> Option<&[String]> {
        self.sector_names.as_deref()
    }

    /// Net output per unit of activity in period `t`:
    /// `supply[t] - use_domestic[t] - use_import[t]`.
    pub fn net_supply(&self, t: usize) -> Matrix {
        &self.series.supply[t] - &self.series.use_domestic[t] - &self.series.use_import[t]
    }
}

fn validate_series(series: &EconomySeries) -> Result<(), EconomyError> {
    if series.supply.is_empty() {
        return Err(EconomyError::EmptySeries("supply"));
    }
    let periods = series.supply.len();
    equal_shapes("supply", &series.supply)?;

    let matrices = [
        ("use_domestic", &series.use_domestic),
        ("use_import", &series.use_import),
        ("depreciation", &series.depreciation),
    ];
    for (name, matrices) in matrices {
        equal_shapes(name, matrices)?;
        equal_periods(name, matrices.len(), "supply", periods)?;
    }

    let vectors = [
        ("final_domestic", &series.final_domestic),
        ("final_export", &series.final_export),
        ("final_import", &series.final_import),
        ("prices_import", &series.prices_import),
        ("prices_export", &series.prices_export),
        ("worked_hours", &series.worked_hours),
    ];
    for (name, vectors) in vectors {
        equal_shapes(name, vectors)?;
        equal_periods(name, vectors.len(), "supply", periods)?;
    }
    Ok(())
}

fn validate_cross_shapes(
    series: &EconomySeries,
    products: usize,
    sectors: usize,
) -> Result<(), EconomyError> {
    expect_shape("use_domestic", &series.use_domestic, &[products, sectors])?;
    expect_shape("use_import", &series.use_import, &[products, sectors])?;
    expect_shape("depreciation", &series.depreciation, &[products, products])?;
    expect_shape("final_domestic", &series.final_domestic, &[products])?;
    expect_shape("final_export", &series.final_export, &[products])?;
    expect_shape("final_import", &series.final_import, &[products])?;
    expect_shape("prices_import", &series.prices_import, &[products])?;
    expect_shape("prices_export", &series.prices_export, &[products])?;
    expect_shape("worked_hours", &series.worked_hours, &[sectors])?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    /// A constant economy with every entry set to a small, valid value.
    pub(crate) fn constant_series(periods: usize, products: usize, sectors: usize) -> EconomySeries {
        let matrix = |rows: usize, cols: usize, value: f64| vec![Array2::from_elem((rows, cols), value); periods];
        let vector = |len: usize, value: f64| vec![Array1::from_elem(len, value); periods];
        EconomySeries {
            supply: matrix(products, sectors, 2.0),
            use_domestic: matrix(products, sectors, 0.5),
            use_import: matrix(products, sectors, 0.1),
            depreciation: matrix(products, products, 0.9),
            final_domestic: vector(products, 1.0),
            final_export: vector(products, 0.5),
            final_import: vector(products, 0.0),
            prices_import: vector(products, 1.0),
            prices_export: vector(products, 1.0),
            worked_hours: vector(sectors, 1.0),
        }
    }

    #[test]
    fn dimensions_come_from_first_supply_matrix() {
        let economy = EconomyModel::new(constant_series(3, 2, 4), None, None).unwrap();
        assert_eq!(economy.products(), 2);
        assert_eq!(economy.sectors(), 4);
        assert_eq!(economy.periods(), 3);
        assert!(economy.product_names().is_none());
    }

    #[test]
    fn net_supply_subtracts_both_uses() {
        let economy = EconomyModel::new(constant_series(1, 1, 1), None, None).unwrap();
        let net = economy.net_supply(0);
        assert!((net[[0, 0]] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn shape_mismatch_within_series() {
        let mut series = constant_series(3, 2, 2);
        series.use_import[2] = Array2::zeros((2, 3));
        let err = EconomyModel::new(series, None, None).unwrap_err();
        assert!(matches!(
            err,
            EconomyError::ShapeMismatch { series: "use_import", period: 2, .. }
        ));
    }

    #[test]
    fn shape_check_runs_before_cross_field_check() {
        let mut series = constant_series(2, 2, 2);
        // Wrong against (products) in period 0 and inconsistent in period 1.
        series.prices_export[0] = Array1::zeros(5);
        let err = EconomyModel::new(series, None, None).unwrap_err();
        assert!(matches!(
            err,
            EconomyError::ShapeMismatch { series: "prices_export", .. }
        ));
    }

    #[test]
    fn period_mismatch_against_supply() {
        let mut series = constant_series(3, 1, 1);
        series.worked_hours.pop();
        let err = EconomyModel::new(series, None, None).unwrap_err();
        assert!(matches!(
            err,
            EconomyError::PeriodMismatch { series: "worked_hours", periods: 2, expected: 3, .. }
        ));
    }

    #[test]
    fn cross_field_mismatch_reports_both_shapes() {
        let mut series = constant_series(2, 2, 3);
        series.depreciation = vec![Array2::zeros((2, 3)); 2];
        match EconomyModel::new(series, None, None).unwrap_err() {
            EconomyError::CrossShapeMismatch { series, shape, expected } => {
                assert_eq!(series, "depreciation");
                assert_eq!(shape, vec![2, 3]);
                assert_eq!(expected, vec![2, 2]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn worked_hours_must_match_sectors() {
        let mut series = constant_series(1, 2, 3);
        series.worked_hours = vec![Array1::zeros(2)];
        let err = EconomyModel::new(series, None, None).unwrap_err();
        assert!(matches!(
            err,
            EconomyError::CrossShapeMismatch { series: "worked_hours", .. }
        ));
    }

    #[test]
    fn name_lists_must_match_dimensions() {
        let products = Some(vec!["grain".to_string(), "steel".to_string()]);
        let sectors = Some(vec!["farming".to_string()]);
        let economy = EconomyModel::new(constant_series(1, 2, 1), products.clone(), sectors).unwrap();
        assert_eq!(economy.sector_names().unwrap()[0], "farming");

        let err = EconomyModel::new(constant_series(1, 2, 2), products, Some(vec!["farming".into()]))
            .unwrap_err();
        assert!(matches!(
            err,
            EconomyError::NamingMismatch { kind: "sector", len: 1, expected: 2 }
        ));

        let err = EconomyModel::new(constant_series(1, 3, 1), Some(vec!["grain".into()]), None).unwrap_err();
        assert!(matches!(err, EconomyError::NamingMismatch { kind: "product", .. }));
    }

    #[test]
    fn empty_supply_is_rejected() {
        let err = EconomyModel::new(EconomySeries::default(), None, None).unwrap_err();
        assert!(matches!(err, EconomyError::EmptySeries("supply")));
    }
}
