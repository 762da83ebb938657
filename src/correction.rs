use ndarray::{Array1, Array2};
use std::path::Path;
use tracing::{info, instrument};

use crate::config::{Config, DomainPolicy};
use crate::depth_invariant::{depth_invariant, reshape_di};
use crate::error::{LyzengaError, Result};
use crate::regression::{AttenuationFit, linear_regression};
use crate::rotation::aij;
use crate::xi::{compute_xi_with_policy, sample_xi};

/// Runs the water column correction stages with the offsets and domain policy of a [`Config`].
#[derive(Debug, Clone)]
pub struct WaterColumnCorrection {
    config: Config,
}

/// Attenuation fit and rotation matrix, ready to be applied to any image with the same bands.
#[derive(Debug, Clone)]
pub struct CorrectionModel {
    deep_water: Vec<f64>,
    domain_policy: DomainPolicy,
    attenuation: AttenuationFit,
    rotation: Array2<f64>,
}

impl WaterColumnCorrection {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the config from a JSON file, see [`Config::from_file`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Config::from_file(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fits the attenuation coefficients on the pixels of known depth and builds the rotation.
    ///
    /// `pixel_indices` are flat row-major pixel indices into the bands, matched one to one with
    /// `depths`.
    #[instrument(skip_all, fields(bands = bands.len(), samples = depths.len()))]
    pub fn fit(
        &self,
        bands: &[Array2<f64>],
        pixel_indices: &[usize],
        depths: &Array1<f64>,
    ) -> Result<CorrectionModel> {
        let deep_water = self.config.deep_water();
        let policy = self.config.domain_policy();

        let xi = compute_xi_with_policy(bands, &deep_water, policy)?;
        let calibration = sample_xi(&xi, pixel_indices)?;
        let attenuation = linear_regression(&calibration, depths)?;
        let rotation = aij(&attenuation.slopes)?;

        info!(
            slopes = ?attenuation.slopes.to_vec(),
            "Water column correction fitted"
        );

        Ok(CorrectionModel {
            deep_water,
            domain_policy: policy,
            attenuation,
            rotation,
        })
    }

    /// Fits on the given bands and applies the result to the same bands.
    pub fn correct(
        &self,
        bands: &[Array2<f64>],
        pixel_indices: &[usize],
        depths: &Array1<f64>,
    ) -> Result<(CorrectionModel, Vec<Array2<f64>>)> {
        let model = self.fit(bands, pixel_indices, depths)?;
        let corrected = model.apply(bands)?;
        Ok((model, corrected))
    }
}

impl CorrectionModel {
    /// Builds a model from already known attenuation slopes.
    pub fn from_attenuation(
        deep_water: Vec<f64>,
        attenuation: AttenuationFit,
        domain_policy: DomainPolicy,
    ) -> Result<Self> {
        if deep_water.len() != attenuation.band_count() {
            return Err(LyzengaError::LengthMismatch {
                what: "deep water offsets and attenuation slopes".to_string(),
                expected: attenuation.band_count(),
                found: deep_water.len(),
            });
        }
        let rotation = aij(&attenuation.slopes)?;

        Ok(Self {
            deep_water,
            domain_policy,
            attenuation,
            rotation,
        })
    }

    pub fn attenuation(&self) -> &AttenuationFit {
        &self.attenuation
    }

    pub fn rotation(&self) -> &Array2<f64> {
        &self.rotation
    }

    pub fn deep_water(&self) -> &[f64] {
        &self.deep_water
    }

    /// Returns the `N - 1` depth invariant bands followed by the depth dependent band, each with
    /// the shape of the matching input band.
    #[instrument(skip_all, fields(bands = bands.len()))]
    pub fn apply(&self, bands: &[Array2<f64>]) -> Result<Vec<Array2<f64>>> {
        let xi = compute_xi_with_policy(bands, &self.deep_water, self.domain_policy)?;
        let di = depth_invariant(&self.rotation, &xi)?;
        let corrected = reshape_di(&di, bands)?;

        info!(pixels = xi.ncols(), "Depth invariant bands computed");

        Ok(corrected)
    }
}
