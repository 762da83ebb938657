//! Water column correction of multispectral imagery after Lyzenga (1978).
//!
//! Bottom reflectance seen through water of varying depth is attenuated differently in every
//! band. Given the deep water radiance of each band and a set of pixels of known depth, this
//! crate derives depth invariant band combinations in four steps:
//!
//! 1. [`compute_xi`]: `Xi = ln(L - Ls)` for every band, flattened row-major
//! 2. [`linear_regression`]: per band attenuation slopes from `Xi = a - b * z`
//! 3. [`aij`]: rotation matrix built from the slopes
//! 4. [`depth_invariant`] and [`reshape_di`]: rotated bands, back in raster shape
//!
//! [`WaterColumnCorrection`] chains the steps from a [`Config`].
//!
//! ## Reference
//!
//! - Lyzenga, D.R. (1978). Passive remote sensing techniques for mapping water depth and bottom
//!   features. *Applied Optics*, 17(3), 379-383. doi:10.1364/AO.17.000379
//!
//! ## Usage Example
//!
//! ```rust
//! use lyzenga::{Config, WaterColumnCorrection};
//! use ndarray::array;
//!
//! let bands = vec![
//!     array![[5.0, 6.0], [7.0, 8.0]],
//!     array![[3.0, 4.0], [5.0, 6.0]],
//! ];
//! let depths = array![1.0, 2.0, 3.0, 4.0];
//!
//! let correction = WaterColumnCorrection::new(Config::new(&[1.0, 1.0]).unwrap());
//! let (model, corrected) = correction.correct(&bands, &[0, 1, 2, 3], &depths).unwrap();
//!
//! assert_eq!(model.rotation().dim(), (2, 2));
//! assert_eq!(corrected[0].dim(), (2, 2));
//! ```

pub mod config;
pub mod correction;
pub mod depth_invariant;
pub mod error;
pub mod logger;
pub mod raster;
pub mod regression;
pub mod rotation;
pub mod xi;

pub use config::{BandSpec, Config, ConfigError, DomainPolicy};
pub use correction::{CorrectionModel, WaterColumnCorrection};
pub use depth_invariant::{depth_invariant, reshape_di, y_i};
pub use error::{LyzengaError, Result};
pub use regression::{AttenuationFit, linear_regression};
pub use rotation::aij;
pub use xi::{compute_xi, compute_xi_with_policy, sample_xi};
