use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlinkError {
    #[error("invalid blink config: {0}")]
    InvalidConfig(String),
    #[error("openness must be finite and >= 0 (got {value})")]
    InvalidOpenness { value: f64 },
    #[error("timestamp must be finite (got {value})")]
    InvalidTimestamp { value: f64 },
    #[error("timestamp went backwards: previous={previous}, current={current}")]
    TimestampRegression { previous: f64, current: f64 },
    #[error("eye landmarks contain non-finite coordinates")]
    InvalidLandmarks,
}

impl BlinkError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidOpenness { .. } => "INVALID_OPENNESS",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::TimestampRegression { .. } => "TIMESTAMP_REGRESSION",
            Self::InvalidLandmarks => "INVALID_LANDMARKS",
        }
    }
}
