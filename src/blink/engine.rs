use crate::blink::baseline::BaselineTracker;
use crate::blink::config::BlinkConfig;
use crate::blink::types::*;
use crate::error::BlinkError;

/// Per-stream blink detector. Callers must serialize access and feed samples
/// in non-decreasing time order; one instance per camera/face stream.
#[derive(Debug, Clone)]
pub struct BlinkEngine {
    config: BlinkConfig,
    baseline: BaselineTracker,
    state: BlinkState,
    last_blink_time: Option<f64>,
    last_sample_time: Option<f64>,
    /// Set after a candidate times out while the eye is still closed; no new
    /// candidate may start until the eye reopens.
    awaiting_reopen: bool,
}

impl Default for BlinkEngine {
    fn default() -> Self {
        Self::from_validated(BlinkConfig::default())
    }
}

impl BlinkEngine {
    pub fn new(config: BlinkConfig) -> Result<Self, BlinkError> {
        config.validate().map_err(BlinkError::InvalidConfig)?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: BlinkConfig) -> Self {
        Self {
            baseline: BaselineTracker::new(config.baseline.clone()),
            config,
            state: BlinkState::Idle,
            last_blink_time: None,
            last_sample_time: None,
            awaiting_reopen: false,
        }
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline.estimate()
    }

    pub fn last_blink_time(&self) -> Option<f64> {
        self.last_blink_time
    }

    pub fn observe_sample(&mut self, sample: OpennessSample) -> Result<DetectionEvent, BlinkError> {
        self.observe(sample.openness, sample.time)
    }

    /// Consumes one openness sample. Invalid input is rejected before any
    /// state is touched.
    pub fn observe(&mut self, openness: f64, time: f64) -> Result<DetectionEvent, BlinkError> {
        self.check_input(openness, time)?;
        self.last_sample_time = Some(time);

        let phase = self.step(openness, time);
        Ok(DetectionEvent {
            time,
            openness,
            phase,
        })
    }

    /// Drops all history. Call whenever the upstream stream is discontinuous.
    pub fn reset(&mut self) {
        self.baseline.reset();
        self.state = BlinkState::Idle;
        self.last_blink_time = None;
        self.last_sample_time = None;
        self.awaiting_reopen = false;
        tracing::info!("Blink engine reset");
    }

    fn check_input(&self, openness: f64, time: f64) -> Result<(), BlinkError> {
        if !openness.is_finite() || openness < 0.0 {
            tracing::warn!(openness, time, "Rejected openness sample");
            return Err(BlinkError::InvalidOpenness { value: openness });
        }
        if !time.is_finite() {
            tracing::warn!(openness, time, "Rejected non-finite timestamp");
            return Err(BlinkError::InvalidTimestamp { value: time });
        }
        if let Some(previous) = self.last_sample_time {
            if time < previous {
                tracing::warn!(previous, current = time, "Rejected out-of-order sample");
                return Err(BlinkError::TimestampRegression {
                    previous,
                    current: time,
                });
            }
        }
        Ok(())
    }

    fn step(&mut self, current: f64, now: f64) -> BlinkPhase {
        let baseline = match self.baseline.update(current) {
            Some(b) if b > 0.0 => b,
            other => {
                return BlinkPhase::NotReady {
                    samples_seen: self.baseline.len(),
                    baseline: other,
                }
            }
        };

        let relative_drop = (baseline - current) / baseline;
        let absolute_drop = baseline - current;
        let threshold = self.config.threshold.threshold_for(baseline);
        let recovered = current > baseline * self.config.detection.recovery_fraction;

        let monitoring = |elapsed: Option<f64>, discarded: Option<Discard>| {
            BlinkPhase::Monitoring {
                baseline,
                relative_drop,
                absolute_drop,
                threshold,
                elapsed,
                discarded,
            }
        };

        match self.state {
            BlinkState::Idle => {
                if self.awaiting_reopen {
                    if recovered {
                        self.awaiting_reopen = false;
                        tracing::debug!(time = now, "Eye reopened after long closure");
                    }
                    return monitoring(None, None);
                }

                if relative_drop > threshold
                    && absolute_drop > self.config.detection.min_absolute_drop
                    && relative_drop > 0.0
                {
                    self.state = BlinkState::InProgress {
                        start_time: now,
                        max_drop: relative_drop,
                    };
                    tracing::debug!(
                        time = now,
                        baseline,
                        relative_drop,
                        threshold,
                        "Blink candidate started"
                    );
                    return BlinkPhase::Start {
                        baseline,
                        relative_drop,
                        absolute_drop,
                        threshold,
                    };
                }

                monitoring(None, None)
            }
            BlinkState::InProgress {
                start_time,
                max_drop,
            } => {
                let max_drop = if relative_drop > max_drop {
                    relative_drop
                } else {
                    max_drop
                };
                let elapsed = now - start_time;
                let timed_out = elapsed > self.config.detection.max_duration_secs;

                if !recovered && !timed_out {
                    self.state = BlinkState::InProgress {
                        start_time,
                        max_drop,
                    };
                    return monitoring(Some(elapsed), None);
                }

                self.state = BlinkState::Idle;

                match self.judge(baseline, max_drop, threshold, elapsed, now) {
                    None => {
                        self.last_blink_time = Some(now);
                        // Approximates the minimum openness from the peak relative drop.
                        let max_drop_openness = baseline * (1.0 - max_drop);
                        tracing::debug!(
                            time = now,
                            baseline,
                            max_drop,
                            max_drop_openness,
                            duration = elapsed,
                            "Blink validated"
                        );
                        BlinkPhase::Complete {
                            baseline,
                            max_drop,
                            max_drop_openness,
                            duration: elapsed,
                            threshold,
                        }
                    }
                    Some(reason) => {
                        if timed_out && !recovered {
                            self.awaiting_reopen = true;
                        }
                        tracing::debug!(
                            time = now,
                            reason = reason.as_str(),
                            duration = elapsed,
                            max_drop,
                            "Blink candidate discarded"
                        );
                        monitoring(
                            None,
                            Some(Discard {
                                reason,
                                duration: elapsed,
                                max_drop,
                            }),
                        )
                    }
                }
            }
        }
    }

    /// Returns the reason a finished candidate is rejected, or `None` if it is
    /// a valid blink.
    fn judge(
        &self,
        baseline: f64,
        max_drop: f64,
        threshold: f64,
        elapsed: f64,
        now: f64,
    ) -> Option<DiscardReason> {
        let d = &self.config.detection;

        if elapsed < d.min_duration_secs {
            return Some(DiscardReason::TooShort);
        }
        if elapsed > d.max_duration_secs {
            return Some(DiscardReason::TooLong);
        }
        if max_drop <= threshold || baseline * max_drop <= d.min_absolute_drop {
            return Some(DiscardReason::TooShallow);
        }
        if let Some(last) = self.last_blink_time {
            if now - last <= d.cooldown_secs {
                return Some(DiscardReason::Cooldown);
            }
        }
        None
    }
}
