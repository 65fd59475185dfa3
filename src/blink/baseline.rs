//! Rolling "eyes open" reference level.
//!
//! Samples enter a fixed-capacity FIFO. Once `min_samples` have been seen, each
//! update computes a linearly weighted window average (oldest weighs
//! `weight_floor`, newest weighs 1.0) and folds it into the running estimate
//! with an EMA of factor `smoothing_factor`.

use std::collections::VecDeque;

use crate::blink::config::BaselineConfig;

#[derive(Debug, Clone)]
pub struct BaselineTracker {
    config: BaselineConfig,
    window: VecDeque<f64>,
    estimate: Option<f64>,
}

impl BaselineTracker {
    pub fn new(config: BaselineConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.window_size),
            estimate: None,
            config,
        }
    }

    /// Pushes a sample and returns the updated estimate, or `None` while
    /// bootstrapping.
    pub fn update(&mut self, openness: f64) -> Option<f64> {
        if self.window.len() == self.config.window_size {
            self.window.pop_front();
        }
        self.window.push_back(openness);

        if self.window.len() < self.config.min_samples {
            return None;
        }

        let fresh = self.weighted_average();
        // An all-zero window carries no "open" information; keep the prior estimate.
        if fresh == 0.0 {
            return self.estimate;
        }
        let next = match self.estimate {
            Some(prior) if prior > 0.0 => {
                let alpha = self.config.smoothing_factor;
                alpha * fresh + (1.0 - alpha) * prior
            }
            _ => fresh,
        };
        self.estimate = Some(next);
        self.estimate
    }

    pub fn estimate(&self) -> Option<f64> {
        self.estimate
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn window(&self) -> impl Iterator<Item = f64> + '_ {
        self.window.iter().copied()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.estimate = None;
    }

    fn weighted_average(&self) -> f64 {
        let n = self.window.len();
        if n == 1 {
            return self.window[0];
        }

        let floor = self.config.weight_floor;
        let step = (1.0 - floor) / (n - 1) as f64;

        let (weighted_sum, total_weight) = self.window.iter().enumerate().fold(
            (0.0, 0.0),
            |(sum, total), (i, &value)| {
                let w = floor + step * i as f64;
                (sum + value * w, total + w)
            },
        );

        weighted_sum / total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> BaselineTracker {
        BaselineTracker::new(BaselineConfig::default())
    }

    #[test]
    fn bootstraps_after_min_samples() {
        let mut t = tracker();
        for _ in 0..4 {
            assert!(t.update(0.3).is_none());
        }
        let first = t.update(0.3).expect("baseline after 5 samples");
        assert!((first - 0.3).abs() < 1e-12);
    }

    #[test]
    fn window_is_capped_and_fifo() {
        let mut t = tracker();
        for i in 0..20 {
            t.update(i as f64);
        }
        assert_eq!(t.len(), 15);
        let values: Vec<f64> = t.window().collect();
        assert_eq!(values.first().copied(), Some(5.0));
        assert_eq!(values.last().copied(), Some(19.0));
    }

    #[test]
    fn recent_samples_weigh_more() {
        let mut t = tracker();
        for v in [0.1, 0.1, 0.1, 0.1, 0.5] {
            t.update(v);
        }
        // weights 0.5, 0.625, 0.75, 0.875, 1.0 -> 0.1 + 0.4 * 1.0 / 3.75
        let estimate = t.estimate().expect("estimate");
        assert!((estimate - (0.1 + 0.4 / 3.75)).abs() < 1e-12);
        // plain mean would be 0.18
        assert!(estimate > 0.18);
    }

    #[test]
    fn smoothing_blends_prior_estimate() {
        let mut t = tracker();
        for _ in 0..5 {
            t.update(0.3);
        }
        let next = t.update(0.0).expect("estimate");
        // six samples: weights 0.5..1.0, total 4.5, newest (0.0) weighs 1.0
        let fresh = 0.3 * 3.5 / 4.5;
        assert!((next - (0.3 * fresh + 0.7 * 0.3)).abs() < 1e-12);
    }

    #[test]
    fn zero_window_average_keeps_prior_estimate() {
        let mut t = BaselineTracker::new(BaselineConfig {
            window_size: 5,
            ..BaselineConfig::default()
        });
        for _ in 0..5 {
            assert!(t.update(0.0).is_none());
        }

        for _ in 0..5 {
            t.update(0.3);
        }
        let settled = t.estimate().expect("estimate");
        for _ in 0..5 {
            t.update(0.0);
        }
        // once the window is all zero the estimate stops decaying
        let after_zeros = t.estimate().expect("estimate");
        assert!(after_zeros > 0.0);
        assert_eq!(t.update(0.0), Some(after_zeros));
        assert!(after_zeros < settled);
    }

    #[test]
    fn reset_clears_everything() {
        let mut t = tracker();
        for _ in 0..8 {
            t.update(0.3);
        }
        t.reset();
        assert!(t.is_empty());
        assert!(t.estimate().is_none());
        assert!(t.update(0.3).is_none());
    }
}
