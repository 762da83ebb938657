use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub mod error;
pub use error::ConfigError;

pub mod domain_policy;
pub use domain_policy::DomainPolicy;

/// A band to correct and the mean radiance of that band over optically deep water.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BandSpec {
    pub name: String,
    pub deep_water: f64,
}

#[derive(Debug, Clone)]
pub struct Config {
    bands: Vec<BandSpec>,
    domain_policy: DomainPolicy,
}

// Deserializes a Config, making sure there is at least one band, that every deep water offset is
// finite and that band names are unique.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            bands: Vec<BandSpec>,
            #[serde(default)]
            domain_policy: DomainPolicy,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        validate_bands(&helper.bands).map_err(D::Error::custom)?;

        Ok(Config {
            bands: helper.bands,
            domain_policy: helper.domain_policy,
        })
    }
}

fn validate_bands(bands: &[BandSpec]) -> Result<(), ConfigError> {
    if bands.is_empty() {
        return Err(ConfigError::EmptyBands);
    }

    let mut seen = HashSet::new();
    for (i, band) in bands.iter().enumerate() {
        if !band.deep_water.is_finite() {
            return Err(ConfigError::NonFiniteOffset { band: i });
        }
        if !seen.insert(band.name.as_str()) {
            return Err(ConfigError::DuplicateBandName(band.name.clone()));
        }
    }

    Ok(())
}

impl Config {
    /// Builds a config from bare deep water offsets. Bands are named `band_0`, `band_1`, ...
    pub fn new(deep_water: &[f64]) -> Result<Self, ConfigError> {
        let bands: Vec<BandSpec> = deep_water
            .iter()
            .enumerate()
            .map(|(i, &dw)| BandSpec {
                name: format!("band_{}", i),
                deep_water: dw,
            })
            .collect();

        validate_bands(&bands)?;

        Ok(Self {
            bands,
            domain_policy: DomainPolicy::default(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.domain_policy = policy;
        self
    }

    pub fn bands(&self) -> &[BandSpec] {
        &self.bands
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn band_names(&self) -> Vec<&str> {
        self.bands.iter().map(|b| b.name.as_str()).collect()
    }

    /// Deep water offsets, in band order.
    pub fn deep_water(&self) -> Vec<f64> {
        self.bands.iter().map(|b| b.deep_water).collect()
    }

    pub fn domain_policy(&self) -> DomainPolicy {
        self.domain_policy
    }
}
