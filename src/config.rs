use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Tuning for [`GcMetadata::estimated_bytes_with`](crate::gc::GcMetadata::estimated_bytes_with).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GcPolicy {
    /// Weight in `[0, 1]` on the prorated share of current non-live bytes
    /// that the histogram doesn't already account for. 1.0 counts all of it.
    pub non_live_weight: f64,
}

impl Default for GcPolicy {
    fn default() -> Self {
        Self {
            non_live_weight: 1.0,
        }
    }
}

impl GcPolicy {
    pub fn with_non_live_weight(mut self, weight: f64) -> Self {
        self.non_live_weight = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.non_live_weight) {
            return Err(Error::InvalidConfig(format!(
                "non_live_weight must be within [0, 1], got {}",
                self.non_live_weight
            )));
        }
        Ok(())
    }

    /// Parse and validate a policy from TOML. Missing fields take defaults.
    ///
    /// ```toml
    /// non_live_weight = 0.5
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let policy: GcPolicy = toml::from_str(s)?;
        policy.validate()?;
        debug!(non_live_weight = policy.non_live_weight, "loaded gc policy");
        Ok(policy)
    }
}
