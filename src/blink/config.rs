use serde::{Deserialize, Serialize};

use crate::blink::threshold::ThresholdModel;
use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaselineConfig {
    pub window_size: usize,
    pub min_samples: usize,
    /// EMA alpha applied to each fresh window average
    pub smoothing_factor: f64,
    /// Linear weight of the oldest window sample (newest = 1.0)
    pub weight_floor: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_BASELINE_WINDOW,
            min_samples: DEFAULT_MIN_BASELINE_SAMPLES,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            weight_floor: DEFAULT_WINDOW_WEIGHT_FLOOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectionConfig {
    pub min_absolute_drop: f64,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub recovery_fraction: f64,
    pub cooldown_secs: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_absolute_drop: DEFAULT_MIN_ABSOLUTE_DROP,
            min_duration_secs: DEFAULT_MIN_BLINK_SECS,
            max_duration_secs: DEFAULT_MAX_BLINK_SECS,
            recovery_fraction: DEFAULT_RECOVERY_FRACTION,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkConfig {
    #[serde(default)]
    pub baseline: BaselineConfig,
    #[serde(default)]
    pub threshold: ThresholdModel,
    #[serde(default)]
    pub detection: DetectionConfig,
}

impl BlinkConfig {
    pub fn from_env(env_config: &crate::config::BlinkEnvConfig) -> Self {
        let mut config = Self::default();
        config.baseline.window_size = env_config.baseline_window;
        config.baseline.min_samples = env_config.min_baseline_samples;
        config.baseline.smoothing_factor = env_config.smoothing_factor;
        config.detection.min_absolute_drop = env_config.min_absolute_drop;
        config.detection.min_duration_secs = env_config.min_duration_secs;
        config.detection.max_duration_secs = env_config.max_duration_secs;
        config.detection.recovery_fraction = env_config.recovery_fraction;
        config.detection.cooldown_secs = env_config.cooldown_secs;
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        // NaN slips through every range comparison below
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(format!("{name} must be finite"));
            }
        }

        // BaselineConfig
        if self.baseline.window_size == 0 {
            return Err("baseline.window_size must be > 0".to_string());
        }
        if self.baseline.min_samples == 0 {
            return Err("baseline.min_samples must be > 0".to_string());
        }
        if self.baseline.min_samples > self.baseline.window_size {
            return Err(format!(
                "baseline.min_samples ({}) must be <= baseline.window_size ({})",
                self.baseline.min_samples, self.baseline.window_size
            ));
        }
        if !(0.0..=1.0).contains(&self.baseline.smoothing_factor)
            || self.baseline.smoothing_factor == 0.0
        {
            return Err("baseline.smoothing_factor must be in (0,1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.baseline.weight_floor) || self.baseline.weight_floor == 0.0
        {
            return Err("baseline.weight_floor must be in (0,1]".to_string());
        }

        // ThresholdModel
        let t = &self.threshold;
        if !(0.0..1.0).contains(&t.default_threshold) {
            return Err("threshold.default_threshold must be in [0,1)".to_string());
        }
        if t.min_openness <= 0.0 || t.min_openness >= t.max_openness {
            return Err("threshold.min_openness must be in (0, max_openness)".to_string());
        }
        if !(0.0..1.0).contains(&t.min_threshold) || !(0.0..1.0).contains(&t.max_threshold) {
            return Err("threshold.min_threshold/max_threshold must be in [0,1)".to_string());
        }
        if t.min_threshold > t.max_threshold {
            return Err("threshold.min_threshold must be <= threshold.max_threshold".to_string());
        }

        // DetectionConfig
        let d = &self.detection;
        if d.min_absolute_drop < 0.0 {
            return Err("detection.min_absolute_drop must be >= 0".to_string());
        }
        if d.min_duration_secs < 0.0 || d.min_duration_secs >= d.max_duration_secs {
            return Err(
                "detection.min_duration_secs must be in [0, max_duration_secs)".to_string(),
            );
        }
        if !(0.0..=1.0).contains(&d.recovery_fraction) || d.recovery_fraction == 0.0 {
            return Err("detection.recovery_fraction must be in (0,1]".to_string());
        }
        if d.cooldown_secs < 0.0 {
            return Err("detection.cooldown_secs must be >= 0".to_string());
        }

        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f64); 12] {
        [
            ("baseline.smoothing_factor", self.baseline.smoothing_factor),
            ("baseline.weight_floor", self.baseline.weight_floor),
            ("threshold.default_threshold", self.threshold.default_threshold),
            ("threshold.min_openness", self.threshold.min_openness),
            ("threshold.max_openness", self.threshold.max_openness),
            ("threshold.min_threshold", self.threshold.min_threshold),
            ("threshold.max_threshold", self.threshold.max_threshold),
            ("detection.min_absolute_drop", self.detection.min_absolute_drop),
            ("detection.min_duration_secs", self.detection.min_duration_secs),
            ("detection.max_duration_secs", self.detection.max_duration_secs),
            ("detection.recovery_fraction", self.detection.recovery_fraction),
            ("detection.cooldown_secs", self.detection.cooldown_secs),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = BlinkConfig::default();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = BlinkConfig::default();
        cfg.baseline.min_samples = 20;
        assert!(cfg.validate().is_err());

        let mut cfg = BlinkConfig::default();
        cfg.detection.min_duration_secs = 0.7;
        assert!(cfg.validate().is_err());

        let mut cfg = BlinkConfig::default();
        cfg.threshold.min_threshold = 0.3;
        assert!(cfg.validate().is_err());

        let mut cfg = BlinkConfig::default();
        cfg.baseline.smoothing_factor = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let setters: [fn(&mut BlinkConfig, f64); 12] = [
            |c, v| c.baseline.smoothing_factor = v,
            |c, v| c.baseline.weight_floor = v,
            |c, v| c.threshold.default_threshold = v,
            |c, v| c.threshold.min_openness = v,
            |c, v| c.threshold.max_openness = v,
            |c, v| c.threshold.min_threshold = v,
            |c, v| c.threshold.max_threshold = v,
            |c, v| c.detection.min_absolute_drop = v,
            |c, v| c.detection.min_duration_secs = v,
            |c, v| c.detection.max_duration_secs = v,
            |c, v| c.detection.recovery_fraction = v,
            |c, v| c.detection.cooldown_secs = v,
        ];

        for (i, set) in setters.iter().enumerate() {
            for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut cfg = BlinkConfig::default();
                set(&mut cfg, bad);
                assert!(cfg.validate().is_err(), "field #{i} accepted {bad}");
            }
        }

        let mut cfg = BlinkConfig::default();
        cfg.detection.min_duration_secs = "nan".parse().expect("parse nan");
        assert!(crate::blink::BlinkEngine::new(cfg).is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: BlinkConfig =
            serde_json::from_str(r#"{"detection":{"cooldownSecs":0.5}}"#).expect("parse config");
        assert_eq!(cfg.detection.cooldown_secs, 0.5);
        assert_eq!(cfg.detection.max_duration_secs, DEFAULT_MAX_BLINK_SECS);
        assert_eq!(cfg.baseline, BaselineConfig::default());
        assert_eq!(cfg.threshold, ThresholdModel::default());
    }
}
