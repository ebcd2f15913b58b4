//! Products between numeric matrices/vectors and vectors of expressions.

use core_types::{LinearExpr, VarId};
use economy::Matrix;
use ndarray::ArrayView1;

/// `matrix @ vars`
pub fn mat_vars(matrix: &Matrix, vars: &[VarId]) -> Vec<LinearExpr> {
    matrix.rows().into_iter().map(|row| dot_vars(row, vars)).collect()
}

/// `matrix @ exprs`
pub fn mat_exprs(matrix: &Matrix, exprs: &[LinearExpr]) -> Vec<LinearExpr> {
    matrix
        .rows()
        .into_iter()
        .map(|row| {
            let mut acc = LinearExpr::zero();
            for (coeff, expr) in row.iter().zip(exprs) {
                acc.add_scaled(expr, *coeff);
            }
            acc
        })
        .collect()
}

/// `vector . vars`
pub fn dot_vars(vector: ArrayView1<'_, f64>, vars: &[VarId]) -> LinearExpr {
    let mut acc = LinearExpr::zero();
    for (coeff, var) in vector.iter().zip(vars) {
        acc.add_term(*var, *coeff);
    }
    acc
}

pub fn constants(values: &[f64]) -> Vec<LinearExpr> {
    values.iter().map(|&v| LinearExpr::constant(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::VariableSet;
    use ndarray::arr2;

    #[test]
    fn matrix_times_variables() {
        let mut set = VariableSet::new();
        let x = set.add_nonneg_vector("x", 2);
        let exprs = mat_vars(&arr2(&[[1.0, 2.0], [0.0, 3.0]]), &x);
        assert_eq!(exprs[0].coefficient(x[0]), 1.0);
        assert_eq!(exprs[0].coefficient(x[1]), 2.0);
        assert_eq!(exprs[1].coefficient(x[0]), 0.0);
        assert_eq!(exprs[1].coefficient(x[1]), 3.0);
    }

    #[test]
    fn matrix_times_expressions_keeps_constants() {
        let mut set = VariableSet::new();
        let x = set.add_nonneg_vector("x", 1);
        let inputs = vec![LinearExpr::variable(x[0]) + LinearExpr::constant(1.0), LinearExpr::constant(2.0)];
        let exprs = mat_exprs(&arr2(&[[0.5, 1.0]]), &inputs);
        assert_eq!(exprs.len(), 1);
        assert_eq!(exprs[0].coefficient(x[0]), 0.5);
        assert_eq!(exprs[0].constant_term(), 2.5);
    }
}
