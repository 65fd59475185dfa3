//! Baseline-dependent relative drop threshold.
//!
//! Naturally narrow eyes swing by a larger fraction of their baseline for the
//! same noise, so the required relative drop decreases linearly from
//! `max_threshold` at `min_openness` to `min_threshold` at `max_openness`.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdModel {
    /// Used when no positive baseline is available
    pub default_threshold: f64,
    pub min_openness: f64,
    pub max_openness: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_RELATIVE_DROP_THRESHOLD,
            min_openness: THRESHOLD_MIN_OPENNESS,
            max_openness: THRESHOLD_MAX_OPENNESS,
            min_threshold: THRESHOLD_MIN_DROP,
            max_threshold: THRESHOLD_MAX_DROP,
        }
    }
}

impl ThresholdModel {
    pub fn threshold_for(&self, baseline: f64) -> f64 {
        if baseline <= 0.0 || baseline.is_nan() {
            return self.default_threshold;
        }

        let clamped = baseline.clamp(self.min_openness, self.max_openness);
        let slope =
            (self.max_threshold - self.min_threshold) / (self.max_openness - self.min_openness);

        self.max_threshold - slope * (clamped - self.min_openness)
    }
}
