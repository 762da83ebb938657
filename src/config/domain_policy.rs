use serde::Deserialize;
use std::fmt;

/// What to do when `radiance - deep_water` is not positive and the logarithm is undefined.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainPolicy {
    /// NaN / -inf flow through the remaining stages untouched.
    #[default]
    #[serde(rename(deserialize = "silent"))]
    Silent,
    /// Same numerics as `Silent`, plus a warning per affected band.
    #[serde(rename(deserialize = "warn"))]
    Warn,
    /// Fail on the first non-positive argument.
    #[serde(rename(deserialize = "strict"))]
    Strict,
}

impl fmt::Display for DomainPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DomainPolicy::Silent => write!(f, "silent"),
            DomainPolicy::Warn => write!(f, "warn"),
            DomainPolicy::Strict => write!(f, "strict"),
        }
    }
}
