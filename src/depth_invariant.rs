//! Depth invariant bands by coordinate rotation (Lyzenga 1978, Eq. 8).
//!
//! `Y = A . X`, where `X` holds one flattened `Xi` per row. Rows `0..N-1` of `Y` are the depth
//! invariant indices and row `N-1` is the depth dependent band.

use ndarray::{Array1, Array2};

use crate::error::{LyzengaError, Result};
use crate::raster::unflatten;

fn check_shapes(a: &Array2<f64>, x: &Array2<f64>) -> Result<()> {
    let n = x.nrows();
    if a.dim() != (n, n) {
        return Err(LyzengaError::ShapeMismatch {
            what: "rotation matrix for Xi bands".to_string(),
            expected: vec![n, n],
            found: vec![a.nrows(), a.ncols()],
        });
    }
    Ok(())
}

/// Computes rotated band `i`: `Y_i = sum_k A[i, k] * X[k, :]`.
pub fn y_i(i: usize, a: &Array2<f64>, x: &Array2<f64>) -> Result<Array1<f64>> {
    check_shapes(a, x)?;
    if i >= a.nrows() {
        return Err(LyzengaError::ShapeMismatch {
            what: format!("rotated band index {}", i),
            expected: vec![a.nrows()],
            found: vec![i],
        });
    }

    Ok(a.row(i).dot(x))
}

/// Computes all `N` rotated bands, in order, as an `(N, pixel_count)` matrix.
pub fn depth_invariant(a: &Array2<f64>, x: &Array2<f64>) -> Result<Array2<f64>> {
    check_shapes(a, x)?;

    let mut y = Array2::<f64>::zeros(x.dim());
    for i in 0..x.nrows() {
        y.row_mut(i).assign(&y_i(i, a, x)?);
    }

    Ok(y)
}

/// Restores each rotated band to the raster shape of the input band with the same index.
pub fn reshape_di(di: &Array2<f64>, bands: &[Array2<f64>]) -> Result<Vec<Array2<f64>>> {
    if di.nrows() != bands.len() {
        return Err(LyzengaError::ShapeMismatch {
            what: "rotated bands for input bands".to_string(),
            expected: vec![bands.len()],
            found: vec![di.nrows()],
        });
    }

    di.rows()
        .into_iter()
        .zip(bands)
        .map(|(row, band)| unflatten(row, band.dim()))
        .collect()
}
