//! Attenuation coefficients from known depths (Lyzenga 1978, Eq. B1).
//!
//! For each band, an ordinary least squares fit of `Xi` against depth `z` is parameterised as
//! `Xi = a - b * z`, so `b` (the slope) is positive when radiance decays with depth.

use ndarray::Array1;
use tracing::{debug, warn};

use crate::error::{LyzengaError, Result};

/// Per band slopes `b`, intercepts `a` and coefficients of determination, in band order.
#[derive(Debug, Clone, PartialEq)]
pub struct AttenuationFit {
    pub slopes: Array1<f64>,
    pub intercepts: Array1<f64>,
    pub r_squared: Array1<f64>,
}

impl AttenuationFit {
    pub fn band_count(&self) -> usize {
        self.slopes.len()
    }

    /// Ratio of attenuation coefficients `k_i / k_j`.
    pub fn ratio(&self, i: usize, j: usize) -> Option<f64> {
        Some(self.slopes.get(i)? / self.slopes.get(j)?)
    }
}

struct LineFit {
    coef: f64,
    intercept: f64,
    r_squared: f64,
}

// Closed form OLS with an intercept term. Zero variance in z leaves 0 / 0 in the coefficient.
fn fit_line(z: &Array1<f64>, x: &Array1<f64>) -> LineFit {
    let n = z.len() as f64;
    let z_mean = z.sum() / n;
    let x_mean = x.sum() / n;

    let mut szz = 0.0;
    let mut szx = 0.0;
    let mut sxx = 0.0;
    for (&zi, &xi) in z.iter().zip(x.iter()) {
        let dz = zi - z_mean;
        let dx = xi - x_mean;
        szz += dz * dz;
        szx += dz * dx;
        sxx += dx * dx;
    }

    let coef = szx / szz;
    let intercept = x_mean - coef * z_mean;
    let r_squared = (szx * szx) / (szz * sxx);

    LineFit {
        coef,
        intercept,
        r_squared,
    }
}

/// Regresses every calibration `Xi` vector against the depths `z`.
///
/// Each vector must have the same length as `z`; bands are checked in order and the first one
/// that differs is reported. Degenerate inputs (fewer than 2 points, constant depth) give NaN
/// coefficients rather than an error.
pub fn linear_regression(xi_list: &[Array1<f64>], z: &Array1<f64>) -> Result<AttenuationFit> {
    let mut slopes = Vec::with_capacity(xi_list.len());
    let mut intercepts = Vec::with_capacity(xi_list.len());
    let mut r_squared = Vec::with_capacity(xi_list.len());

    for (band, x) in xi_list.iter().enumerate() {
        if x.len() != z.len() {
            return Err(LyzengaError::LengthMismatch {
                what: format!("Xi of band {} and depths", band),
                expected: z.len(),
                found: x.len(),
            });
        }

        let fit = fit_line(z, x);
        if !fit.coef.is_finite() || !fit.intercept.is_finite() {
            warn!(band, samples = z.len(), "Regression produced non-finite coefficients");
        }

        debug!(
            band,
            slope = -fit.coef,
            intercept = fit.intercept,
            r_squared = fit.r_squared,
            "Fitted attenuation"
        );

        slopes.push(-fit.coef);
        intercepts.push(fit.intercept);
        r_squared.push(fit.r_squared);
    }

    Ok(AttenuationFit {
        slopes: Array1::from(slopes),
        intercepts: Array1::from(intercepts),
        r_squared: Array1::from(r_squared),
    })
}
