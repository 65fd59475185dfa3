//! Command protocol for embedding the engine in a host process.
//!
//! Each stdin line is one JSON command tagged by `type`; each command yields
//! zero or more [`Record`]s for stdout.

use serde::Deserialize;

use crate::blink::engine::BlinkEngine;
use crate::ear::{EyeContour, EyePair};
use crate::error::BlinkError;
use crate::report::{Record, Reporter};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostCommand {
    Sample {
        time: f64,
        openness: f64,
    },
    Landmarks {
        time: f64,
        left: EyeContour,
        right: EyeContour,
    },
    NoFace {
        time: f64,
    },
    /// Drops all engine history, e.g. after the subject changed.
    Reset,
    /// The signal source was (re)acquired; history from before is discarded.
    StartStream,
    StopStream,
}

pub struct Session {
    engine: BlinkEngine,
    reporter: Reporter,
    streaming: bool,
}

impl Session {
    pub fn new(engine: BlinkEngine, reporter: Reporter) -> Self {
        Self {
            engine,
            reporter,
            streaming: true,
        }
    }

    pub fn engine(&self) -> &BlinkEngine {
        &self.engine
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn handle_line(&mut self, line: &str) -> Vec<Record> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<HostCommand>(line) {
            Ok(command) => self.handle(command),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to decode host command");
                vec![Record::error("BAD_COMMAND", format!("JSON decode error: {e}"))]
            }
        }
    }

    pub fn handle(&mut self, command: HostCommand) -> Vec<Record> {
        match command {
            HostCommand::Sample { time, openness } => self.observe(openness, time),
            HostCommand::Landmarks { time, left, right } => {
                match (EyePair { left, right }).openness() {
                    Some(openness) => self.observe(openness, time),
                    None => vec![Record::from(&BlinkError::InvalidLandmarks)],
                }
            }
            HostCommand::NoFace { .. } => {
                if !self.streaming {
                    return Vec::new();
                }
                vec![self.reporter.no_face()]
            }
            HostCommand::Reset => {
                self.reset();
                vec![Record::status("Blink detection reset")]
            }
            HostCommand::StartStream => {
                if self.streaming {
                    return vec![Record::status("Stream already active")];
                }
                self.reset();
                self.streaming = true;
                tracing::info!("Stream started");
                vec![Record::status("Stream started")]
            }
            HostCommand::StopStream => {
                self.streaming = false;
                tracing::info!("Stream stopped");
                vec![Record::status("Stream stopped")]
            }
        }
    }

    fn observe(&mut self, openness: f64, time: f64) -> Vec<Record> {
        if !self.streaming {
            return vec![Record::debug("Stream stopped, sample ignored")];
        }

        match self.engine.observe(openness, time) {
            Ok(event) => self.reporter.frame(&event),
            Err(e) => vec![Record::from(&e)],
        }
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.reporter.reset();
    }
}
