//! Band transformation: deep water subtraction followed by a natural log (Lyzenga 1978, Eq. 7).
//!
//! `Xi = ln(Li - Lsi)` where `Li` is the radiance of band `i` and `Lsi` the mean radiance of the
//! same band over optically deep water. Each band is flattened row-major (see [`crate::raster`]),
//! so the result is an `(N, pixel_count)` matrix with one row per band.

use ndarray::{Array1, Array2, Axis};
use tracing::{debug, warn};

use crate::config::DomainPolicy;
use crate::error::{LyzengaError, Result};
use crate::raster::{common_shape, flatten};

/// Computes `ln(band - deep_water)` for every band, letting NaN / -inf through on
/// non-positive arguments.
pub fn compute_xi(bands: &[Array2<f64>], deep_water: &[f64]) -> Result<Array2<f64>> {
    compute_xi_with_policy(bands, deep_water, DomainPolicy::Silent)
}

/// Same as [`compute_xi`], with explicit handling of pixels where `band - deep_water <= 0`.
///
/// `Warn` keeps the numerics of `Silent` and logs the number of non-finite samples per band.
/// `Strict` returns [`LyzengaError::NumericDomain`] for the first pixel whose
/// `band - deep_water` is not a finite positive number, and produces no output.
pub fn compute_xi_with_policy(
    bands: &[Array2<f64>],
    deep_water: &[f64],
    policy: DomainPolicy,
) -> Result<Array2<f64>> {
    if bands.len() != deep_water.len() {
        return Err(LyzengaError::LengthMismatch {
            what: "bands and deep water offsets".to_string(),
            expected: bands.len(),
            found: deep_water.len(),
        });
    }

    let (rows, cols) = common_shape(bands)?;
    let pixel_count = rows * cols;

    let mut xi = Array2::<f64>::zeros((bands.len(), pixel_count));

    for (i, (band, &dw)) in bands.iter().zip(deep_water).enumerate() {
        let shifted = flatten(band) - dw;

        if policy == DomainPolicy::Strict {
            let invalid = shifted
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v <= 0.0);
            if let Some((pixel, &value)) = invalid {
                return Err(LyzengaError::NumericDomain {
                    band: i,
                    pixel,
                    value,
                });
            }
        }

        let row = shifted.mapv(f64::ln);

        if policy == DomainPolicy::Warn {
            let invalid = non_finite_count(&row);
            if invalid > 0 {
                warn!(
                    band = i,
                    invalid,
                    pixel_count,
                    deep_water = dw,
                    "Non-finite Xi values, deep water offset is not below every radiance"
                );
            }
        }

        xi.row_mut(i).assign(&row);
    }

    debug!(bands = bands.len(), pixel_count, %policy, "Computed Xi");

    Ok(xi)
}

fn non_finite_count(row: &Array1<f64>) -> usize {
    row.iter().filter(|v| !v.is_finite()).count()
}

/// Picks the Xi samples at the given flat pixel indices, one vector per band.
///
/// This is how the calibration subset passed to
/// [`linear_regression`](crate::regression::linear_regression) is usually built: the indices
/// are the pixels where depth is known, in the same order as the depth vector.
pub fn sample_xi(xi: &Array2<f64>, pixel_indices: &[usize]) -> Result<Vec<Array1<f64>>> {
    let len = xi.ncols();
    if let Some(&index) = pixel_indices.iter().find(|&&idx| idx >= len) {
        return Err(LyzengaError::PixelIndexOutOfRange { index, len });
    }

    let subset = xi.select(Axis(1), pixel_indices);

    Ok(subset.rows().into_iter().map(|r| r.to_owned()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CaptureWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
        type Writer = CaptureWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn sample_bands() -> Vec<Array2<f64>> {
        vec![
            array![[5.0, 6.0], [7.0, 8.0]],
            array![[3.0, 4.0], [5.0, 6.0]],
        ]
    }

    #[test]
    fn test_compute_xi_values_and_shape() {
        let xi = compute_xi(&sample_bands(), &[1.0, 1.0]).unwrap();

        assert_eq!(xi.dim(), (2, 4));
        let expected0 = array![4.0_f64, 5.0, 6.0, 7.0].mapv(f64::ln);
        let expected1 = array![2.0_f64, 3.0, 4.0, 5.0].mapv(f64::ln);
        for k in 0..4 {
            assert_relative_eq!(xi[[0, k]], expected0[k], epsilon = 1e-12);
            assert_relative_eq!(xi[[1, k]], expected1[k], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let result = compute_xi(&sample_bands(), &[1.0]);

        assert!(matches!(
            result,
            Err(LyzengaError::LengthMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_no_bands() {
        assert!(matches!(compute_xi(&[], &[]), Err(LyzengaError::EmptyInput)));
    }

    #[test]
    fn test_band_shapes_must_match() {
        let bands = vec![Array2::<f64>::ones((2, 2)), Array2::<f64>::ones((1, 4))];

        assert!(matches!(
            compute_xi(&bands, &[0.0, 0.0]),
            Err(LyzengaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_silent_policy_propagates_non_finite() {
        // 3 - 3 = 0 gives -inf, 2 - 3 < 0 gives NaN
        let bands = vec![array![[4.0, 3.0, 2.0]]];

        let xi = compute_xi(&bands, &[3.0]).unwrap();

        assert_relative_eq!(xi[[0, 0]], 0.0);
        assert_eq!(xi[[0, 1]], f64::NEG_INFINITY);
        assert!(xi[[0, 2]].is_nan());
    }

    #[test]
    fn test_warn_policy_keeps_numerics() {
        let bands = vec![array![[4.0, 3.0, 2.0]]];

        let silent = compute_xi(&bands, &[3.0]).unwrap();
        let warned = compute_xi_with_policy(&bands, &[3.0], DomainPolicy::Warn).unwrap();

        assert_eq!(silent[[0, 0]], warned[[0, 0]]);
        assert_eq!(silent[[0, 1]], warned[[0, 1]]);
        assert!(warned[[0, 2]].is_nan());
        // -inf and NaN are the two samples reported for the band
        assert_eq!(non_finite_count(&warned.row(0).to_owned()), 2);
    }

    #[test]
    fn test_warn_policy_emits_warning_per_band() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(CaptureWriter(messages.clone()))
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        // Band 0 is valid, band 1 has one pixel at its deep water offset
        let bands = vec![array![[4.0, 5.0]], array![[3.0, 6.0]]];
        tracing::subscriber::with_default(subscriber, || {
            compute_xi_with_policy(&bands, &[1.0, 3.0], DomainPolicy::Warn).unwrap();
        });

        let output = String::from_utf8(messages.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("Non-finite Xi values").count(), 1, "{output}");
        assert!(output.contains("band=1"), "{output}");
        assert!(output.contains("invalid=1"), "{output}");
    }

    #[test]
    fn test_silent_policy_does_not_warn() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::fmt()
            .with_writer(CaptureWriter(messages.clone()))
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let bands = vec![array![[3.0, 6.0]]];
        tracing::subscriber::with_default(subscriber, || {
            compute_xi(&bands, &[3.0]).unwrap();
        });

        assert!(messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_strict_policy_fails_fast() {
        let bands = vec![array![[10.0, 10.0]], array![[4.0, 3.0]]];

        let result = compute_xi_with_policy(&bands, &[1.0, 3.0], DomainPolicy::Strict);

        match result {
            Err(LyzengaError::NumericDomain { band, pixel, value }) => {
                assert_eq!(band, 1);
                assert_eq!(pixel, 1);
                assert_relative_eq!(value, 0.0);
            }
            other => panic!("Expected NumericDomain, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_policy_rejects_infinite_radiance() {
        let bands = vec![array![[5.0, f64::INFINITY, 2.0]]];

        let result = compute_xi_with_policy(&bands, &[1.0], DomainPolicy::Strict);

        assert!(matches!(
            result,
            Err(LyzengaError::NumericDomain {
                band: 0,
                pixel: 1,
                ..
            })
        ));
        // Silent keeps the +inf
        assert_eq!(compute_xi(&bands, &[1.0]).unwrap()[[0, 1]], f64::INFINITY);
    }

    #[test]
    fn test_strict_policy_accepts_valid_input() {
        let strict = compute_xi_with_policy(&sample_bands(), &[1.0, 1.0], DomainPolicy::Strict);

        assert_eq!(strict.unwrap(), compute_xi(&sample_bands(), &[1.0, 1.0]).unwrap());
    }

    #[test]
    fn test_sample_xi() {
        let xi = array![[0.0, 1.0, 2.0, 3.0], [10.0, 11.0, 12.0, 13.0]];

        let subset = sample_xi(&xi, &[3, 0]).unwrap();

        assert_eq!(subset, vec![array![3.0, 0.0], array![13.0, 10.0]]);
        assert!(matches!(
            sample_xi(&xi, &[1, 4]),
            Err(LyzengaError::PixelIndexOutOfRange { index: 4, len: 4 })
        ));
    }
}
