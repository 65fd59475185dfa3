pub mod blink;
pub mod config;
pub mod constants;
pub mod ear;
pub mod error;
pub mod host;
pub mod logging;
pub mod report;
