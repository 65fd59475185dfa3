use serde::{Deserialize, Serialize};

/// One openness measurement with its monotonic timestamp (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpennessSample {
    pub openness: f64,
    pub time: f64,
}

impl OpennessSample {
    pub fn new(openness: f64, time: f64) -> Self {
        Self { openness, time }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BlinkState {
    #[default]
    Idle,
    InProgress {
        start_time: f64,
        max_drop: f64,
    },
}

impl BlinkState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscardReason {
    TooShort,
    TooLong,
    TooShallow,
    Cooldown,
}

impl DiscardReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "tooShort",
            Self::TooLong => "tooLong",
            Self::TooShallow => "tooShallow",
            Self::Cooldown => "cooldown",
        }
    }
}

/// A blink candidate that ended without being validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discard {
    pub reason: DiscardReason,
    pub duration: f64,
    pub max_drop: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum BlinkPhase {
    /// Baseline undefined: still bootstrapping, or every sample so far was zero.
    #[serde(rename_all = "camelCase")]
    NotReady {
        samples_seen: usize,
        baseline: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Start {
        baseline: f64,
        relative_drop: f64,
        absolute_drop: f64,
        threshold: f64,
    },
    #[serde(rename_all = "camelCase")]
    Monitoring {
        baseline: f64,
        relative_drop: f64,
        absolute_drop: f64,
        threshold: f64,
        /// Seconds since the tracked candidate started, if one is open.
        elapsed: Option<f64>,
        discarded: Option<Discard>,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        baseline: f64,
        max_drop: f64,
        max_drop_openness: f64,
        duration: f64,
        threshold: f64,
    },
}

impl BlinkPhase {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NotReady { .. } => "notReady",
            Self::Start { .. } => "start",
            Self::Monitoring { .. } => "monitoring",
            Self::Complete { .. } => "complete",
        }
    }

    pub fn baseline(&self) -> Option<f64> {
        match *self {
            Self::NotReady { .. } => None,
            Self::Start { baseline, .. }
            | Self::Monitoring { baseline, .. }
            | Self::Complete { baseline, .. } => Some(baseline),
        }
    }

    pub fn threshold(&self) -> Option<f64> {
        match *self {
            Self::NotReady { .. } => None,
            Self::Start { threshold, .. }
            | Self::Monitoring { threshold, .. }
            | Self::Complete { threshold, .. } => Some(threshold),
        }
    }
}

/// Result of one `observe` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionEvent {
    pub time: f64,
    pub openness: f64,
    #[serde(flatten)]
    pub phase: BlinkPhase,
}

impl DetectionEvent {
    pub fn blink_detected(&self) -> bool {
        matches!(self.phase, BlinkPhase::Complete { .. })
    }

    pub fn discarded(&self) -> Option<Discard> {
        match self.phase {
            BlinkPhase::Monitoring { discarded, .. } => discarded,
            _ => None,
        }
    }
}
