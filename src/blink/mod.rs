pub mod baseline;
pub mod config;
pub mod engine;
pub mod threshold;
pub mod types;

pub use config::BlinkConfig;
pub use engine::BlinkEngine;
pub use threshold::ThresholdModel;
pub use types::{BlinkPhase, BlinkState, DetectionEvent, Discard, DiscardReason, OpennessSample};
