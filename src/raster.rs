//! Row-major conversion between band rasters and flat pixel vectors.
//!
//! Every stage that turns a raster into a vector, or a vector back into a raster, goes through
//! [`flatten`] and [`unflatten`] so that pixel `k` of a flat vector is always
//! `raster[[k / ncols, k % ncols]]`, whatever the memory layout of the input array.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{LyzengaError, Result};

/// Flattens a raster in logical row-major order.
pub fn flatten(band: &Array2<f64>) -> Array1<f64> {
    band.iter().copied().collect()
}

/// Restores a flat vector to a `(rows, cols)` raster, the inverse of [`flatten`].
pub fn unflatten(values: ArrayView1<f64>, shape: (usize, usize)) -> Result<Array2<f64>> {
    let (rows, cols) = shape;
    if values.len() != rows * cols {
        return Err(LyzengaError::ShapeMismatch {
            what: "flat vector to raster".to_string(),
            expected: vec![rows, cols],
            found: vec![values.len()],
        });
    }

    Array2::from_shape_vec(shape, values.to_vec()).map_err(|e| LyzengaError::ShapeMismatch {
        what: format!("flat vector to raster ({})", e),
        expected: vec![rows, cols],
        found: vec![values.len()],
    })
}

/// Returns the shape shared by all bands, or an error naming the first band that differs.
pub fn common_shape(bands: &[Array2<f64>]) -> Result<(usize, usize)> {
    let first = bands.first().ok_or(LyzengaError::EmptyInput)?.dim();

    for (i, band) in bands.iter().enumerate().skip(1) {
        if band.dim() != first {
            return Err(LyzengaError::ShapeMismatch {
                what: format!("band {}", i),
                expected: vec![first.0, first.1],
                found: vec![band.nrows(), band.ncols()],
            });
        }
    }

    Ok(first)
}
