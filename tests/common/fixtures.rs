use blink_sense::blink::{BlinkEngine, DetectionEvent, OpennessSample};

/// `count` samples of constant openness starting at `from`, `step` seconds apart.
pub fn steady(from: f64, count: usize, step: f64, openness: f64) -> Vec<OpennessSample> {
    (0..count)
        .map(|i| OpennessSample::new(openness, from + i as f64 * step))
        .collect()
}

/// Eye held at `closed` from `start` for `duration` seconds, then one sample at
/// `reopen` exactly `duration` after `start`.
pub fn dip(start: f64, duration: f64, step: f64, closed: f64, reopen: f64) -> Vec<OpennessSample> {
    let frames = (duration / step).round() as usize;
    let mut samples: Vec<OpennessSample> = (0..frames)
        .map(|i| OpennessSample::new(closed, start + i as f64 * step))
        .collect();
    samples.push(OpennessSample::new(reopen, start + duration));
    samples
}

pub fn run(engine: &mut BlinkEngine, samples: &[OpennessSample]) -> Vec<DetectionEvent> {
    samples
        .iter()
        .map(|s| engine.observe_sample(*s).expect("valid sample"))
        .collect()
}

pub fn blinks(events: &[DetectionEvent]) -> Vec<DetectionEvent> {
    events.iter().filter(|e| e.blink_detected()).copied().collect()
}

/// Warm-up at 0.30, one dip to 0.10 at t=1.0 lasting `duration`, then open eyes.
pub fn single_dip(duration: f64) -> Vec<OpennessSample> {
    let step = 0.05;
    let mut samples = steady(0.0, 20, step, 0.30);
    samples.extend(dip(1.0, duration, step, 0.10, 0.30));
    samples.extend(steady(1.0 + duration + step, 20, step, 0.30));
    samples
}
