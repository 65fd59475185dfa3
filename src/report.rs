//! Line-oriented JSON records for a host process.

use serde::Serialize;

use crate::blink::types::{BlinkPhase, DetectionEvent, DiscardReason};
use crate::constants::DEFAULT_DISPLAY_HOLD_SECS;
use crate::error::BlinkError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlinkRecord {
    pub blink: bool,
    /// Openness at the deepest point of the blink
    pub ear: f64,
    pub baseline: f64,
    pub drop_percentage: f64,
    pub duration: f64,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceData {
    pub face_detected: bool,
    pub ear: f64,
    pub blink: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink_phase: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear_drop_absolute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear_drop_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarded: Option<DiscardReason>,
}

impl FaceData {
    fn no_face() -> Self {
        Self {
            face_detected: false,
            ear: 0.0,
            blink: false,
            baseline: None,
            blink_phase: None,
            threshold: None,
            ear_drop_absolute: None,
            ear_drop_percentage: None,
            discarded: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Blink(BlinkRecord),
    #[serde(rename_all = "camelCase")]
    Face {
        face_data: FaceData,
    },
    Status {
        status: String,
    },
    Error {
        error: String,
        code: &'static str,
    },
    Debug {
        debug: String,
    },
}

impl Record {
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            status: message.into(),
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::Debug {
            debug: message.into(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
            code,
        }
    }

    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&BlinkError> for Record {
    fn from(err: &BlinkError) -> Self {
        Self::error(err.code(), err.to_string())
    }
}

/// Turns detection events into host records, holding the displayed blink
/// flag for `display_hold_secs` after each validated blink.
#[derive(Debug, Clone)]
pub struct Reporter {
    display_hold_secs: f64,
    last_blink_display: Option<f64>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_HOLD_SECS)
    }
}

impl Reporter {
    pub fn new(display_hold_secs: f64) -> Self {
        Self {
            display_hold_secs: display_hold_secs.max(0.0),
            last_blink_display: None,
        }
    }

    pub fn reset(&mut self) {
        self.last_blink_display = None;
    }

    pub fn frame(&mut self, event: &DetectionEvent) -> Vec<Record> {
        let mut records = Vec::with_capacity(2);

        if let BlinkPhase::Complete {
            baseline,
            max_drop,
            max_drop_openness,
            duration,
            ..
        } = event.phase
        {
            self.last_blink_display = Some(event.time);
            records.push(Record::Blink(BlinkRecord {
                blink: true,
                ear: max_drop_openness,
                baseline,
                drop_percentage: max_drop,
                duration,
                time: event.time,
            }));
        }

        let held = self
            .last_blink_display
            .is_some_and(|t| event.time - t < self.display_hold_secs);

        let mut face = FaceData {
            face_detected: true,
            ear: event.openness,
            blink: event.blink_detected() || held,
            baseline: event.phase.baseline(),
            blink_phase: Some(event.phase.tag()),
            threshold: event.phase.threshold(),
            ear_drop_absolute: None,
            ear_drop_percentage: None,
            discarded: event.discarded().map(|d| d.reason),
        };

        match event.phase {
            BlinkPhase::NotReady { .. } => face.blink_phase = Some("initializing"),
            BlinkPhase::Monitoring {
                relative_drop,
                absolute_drop,
                ..
            } if absolute_drop > 0.0 => {
                face.ear_drop_absolute = Some(absolute_drop);
                face.ear_drop_percentage = Some(relative_drop);
            }
            _ => {}
        }

        records.push(Record::Face { face_data: face });
        records
    }

    pub fn no_face(&self) -> Record {
        Record::Face {
            face_data: FaceData::no_face(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::types::Discard;

    fn complete(time: f64) -> DetectionEvent {
        DetectionEvent {
            time,
            openness: 0.29,
            phase: BlinkPhase::Complete {
                baseline: 0.3,
                max_drop: 0.6,
                max_drop_openness: 0.12,
                duration: 0.15,
                threshold: 0.1625,
            },
        }
    }

    fn monitoring(time: f64, openness: f64) -> DetectionEvent {
        DetectionEvent {
            time,
            openness,
            phase: BlinkPhase::Monitoring {
                baseline: 0.3,
                relative_drop: (0.3 - openness) / 0.3,
                absolute_drop: 0.3 - openness,
                threshold: 0.1625,
                elapsed: None,
                discarded: None,
            },
        }
    }

    #[test]
    fn blink_emits_event_record_then_face_data() {
        let mut reporter = Reporter::default();
        let records = reporter.frame(&complete(1.0));
        assert_eq!(records.len(), 2);
        let line = records[0].to_line().expect("serialize");
        let json: serde_json::Value = serde_json::from_str(&line).expect("json");
        assert_eq!(json["blink"], true);
        assert_eq!(json["ear"], 0.12);
        assert_eq!(json["dropPercentage"], 0.6);

        let line = records[1].to_line().expect("serialize");
        let json: serde_json::Value = serde_json::from_str(&line).expect("json");
        assert_eq!(json["faceData"]["blink"], true);
        assert_eq!(json["faceData"]["blinkPhase"], "complete");
    }

    #[test]
    fn blink_flag_is_held_for_display() {
        let mut reporter = Reporter::new(0.2);
        reporter.frame(&complete(1.0));

        let held = reporter.frame(&monitoring(1.1, 0.3));
        assert!(matches!(&held[0], Record::Face { face_data } if face_data.blink));

        let released = reporter.frame(&monitoring(1.25, 0.3));
        assert!(matches!(&released[0], Record::Face { face_data } if !face_data.blink));
    }

    #[test]
    fn not_ready_is_reported_as_initializing() {
        let mut reporter = Reporter::default();
        let event = DetectionEvent {
            time: 0.0,
            openness: 0.3,
            phase: BlinkPhase::NotReady {
                samples_seen: 1,
                baseline: None,
            },
        };
        let records = reporter.frame(&event);
        let json: serde_json::Value =
            serde_json::from_str(&records[0].to_line().expect("serialize")).expect("json");
        assert_eq!(json["faceData"]["blinkPhase"], "initializing");
        assert!(json["faceData"].get("baseline").is_none());
    }

    #[test]
    fn monitoring_reports_positive_drops_only() {
        let mut reporter = Reporter::default();
        let dropped = reporter.frame(&monitoring(1.0, 0.27));
        let Record::Face { face_data } = &dropped[0] else {
            panic!("expected face data");
        };
        assert!(face_data.ear_drop_absolute.is_some());

        let above = reporter.frame(&monitoring(1.1, 0.32));
        let Record::Face { face_data } = &above[0] else {
            panic!("expected face data");
        };
        assert!(face_data.ear_drop_absolute.is_none());
    }

    #[test]
    fn discard_reason_is_surfaced() {
        let mut reporter = Reporter::default();
        let event = DetectionEvent {
            time: 1.0,
            openness: 0.3,
            phase: BlinkPhase::Monitoring {
                baseline: 0.3,
                relative_drop: 0.0,
                absolute_drop: 0.0,
                threshold: 0.1625,
                elapsed: None,
                discarded: Some(Discard {
                    reason: DiscardReason::TooShort,
                    duration: 0.05,
                    max_drop: 0.6,
                }),
            },
        };
        let line = reporter.frame(&event)[0].to_line().expect("serialize");
        assert!(line.contains(r#""discarded":"tooShort""#));
    }
}
