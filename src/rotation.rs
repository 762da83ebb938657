//! Coordinate system rotation parameters `Aij` (Lyzenga 1978, Eqs. B2, B5, B6 and B7).
//!
//! The last row of the matrix is the normalised slope vector, so the last rotated band carries
//! all of the depth signal. Each row `i < N - 1` mixes bands `0..=i + 1` so that it is orthogonal
//! to the slope vector, which makes the corresponding rotated band independent of depth.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{LyzengaError, Result};

/// Builds the `N x N` rotation matrix from the attenuation slopes.
///
/// With `s(k)` the sum of squared slopes over `0..=k`:
///
/// * `A[N-1, j] = b[j] / sqrt(s(N-1))`
/// * `A[i, j] = b[i+1] * b[j] / (sqrt(s(i)) * sqrt(s(i+1)))` for `j <= i`
/// * `A[i, i+1] = -sqrt(s(i)) / sqrt(s(i+1))`
/// * `0` everywhere else
///
/// At least two slopes are required. A zero prefix sum (leading slopes all zero) yields NaN or
/// infinite cells, which are not checked.
pub fn aij(slopes: &Array1<f64>) -> Result<Array2<f64>> {
    let n = slopes.len();
    if n < 2 {
        return Err(LyzengaError::TooFewBands(n));
    }

    // Square roots of the prefix sums of squared slopes
    let mut norms = Array1::<f64>::zeros(n);
    let mut acc = 0.0;
    for (k, &b) in slopes.iter().enumerate() {
        acc += b * b;
        norms[k] = acc.sqrt();
    }

    let a = Array2::from_shape_fn((n, n), |(i, j)| {
        if i == n - 1 {
            slopes[j] / norms[n - 1]
        } else if j <= i {
            slopes[i + 1] * slopes[j] / (norms[i] * norms[i + 1])
        } else if j == i + 1 {
            -norms[i] / norms[i + 1]
        } else {
            0.0
        }
    });

    debug!(bands = n, "Built rotation matrix");

    Ok(a)
}
