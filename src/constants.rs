/// Minimum time between two validated blinks (seconds)
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.3;

/// Number of recent samples kept for the baseline estimate
pub const DEFAULT_BASELINE_WINDOW: usize = 15;

/// Samples required before a baseline is defined
pub const DEFAULT_MIN_BASELINE_SAMPLES: usize = 5;

/// Weight of the fresh window average in the baseline EMA
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.3;

/// Weight given to the oldest window sample; the newest always weighs 1.0
pub const DEFAULT_WINDOW_WEIGHT_FLOOR: f64 = 0.5;

/// Relative drop threshold used when the baseline is not positive
pub const DEFAULT_RELATIVE_DROP_THRESHOLD: f64 = 0.19;

/// Minimum absolute openness drop for a blink candidate
pub const DEFAULT_MIN_ABSOLUTE_DROP: f64 = 0.03;

/// Shortest plausible blink (seconds)
pub const DEFAULT_MIN_BLINK_SECS: f64 = 0.1;

/// Longest plausible blink (seconds)
pub const DEFAULT_MAX_BLINK_SECS: f64 = 0.6;

/// Fraction of the baseline the eye must reopen past to end a blink
pub const DEFAULT_RECOVERY_FRACTION: f64 = 0.7;

/// Baseline at or below which the threshold model saturates ("small eyes")
pub const THRESHOLD_MIN_OPENNESS: f64 = 0.15;

/// Baseline at or above which the threshold model saturates ("large eyes")
pub const THRESHOLD_MAX_OPENNESS: f64 = 0.35;

/// Relative drop threshold for large eyes
pub const THRESHOLD_MIN_DROP: f64 = 0.15;

/// Relative drop threshold for small eyes
pub const THRESHOLD_MAX_DROP: f64 = 0.20;

/// How long the host keeps showing a validated blink (seconds)
pub const DEFAULT_DISPLAY_HOLD_SECS: f64 = 0.2;

/// Guards the EAR denominator against degenerate eye contours
pub const EAR_EPSILON: f64 = 1e-6;
