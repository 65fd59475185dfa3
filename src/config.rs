use std::env;
use std::str::FromStr;

use crate::constants::*;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub display_hold_secs: f64,
    pub blink: BlinkEnvConfig,
}

#[derive(Debug, Clone)]
pub struct BlinkEnvConfig {
    pub cooldown_secs: f64,
    pub baseline_window: usize,
    pub min_baseline_samples: usize,
    pub smoothing_factor: f64,
    pub min_absolute_drop: f64,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub recovery_fraction: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            display_hold_secs: env_or_parse("BLINK_DISPLAY_HOLD_SECS", DEFAULT_DISPLAY_HOLD_SECS),
            blink: BlinkEnvConfig {
                cooldown_secs: env_or_parse("BLINK_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS),
                baseline_window: env_or_parse("BLINK_BASELINE_WINDOW", DEFAULT_BASELINE_WINDOW),
                min_baseline_samples: env_or_parse(
                    "BLINK_MIN_BASELINE_SAMPLES",
                    DEFAULT_MIN_BASELINE_SAMPLES,
                ),
                smoothing_factor: env_or_parse("BLINK_SMOOTHING_FACTOR", DEFAULT_SMOOTHING_FACTOR),
                min_absolute_drop: env_or_parse(
                    "BLINK_MIN_ABSOLUTE_DROP",
                    DEFAULT_MIN_ABSOLUTE_DROP,
                ),
                min_duration_secs: env_or_parse("BLINK_MIN_DURATION_SECS", DEFAULT_MIN_BLINK_SECS),
                max_duration_secs: env_or_parse("BLINK_MAX_DURATION_SECS", DEFAULT_MAX_BLINK_SECS),
                recovery_fraction: env_or_parse(
                    "BLINK_RECOVERY_FRACTION",
                    DEFAULT_RECOVERY_FRACTION,
                ),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
