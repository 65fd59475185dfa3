//! Eye aspect ratio (EAR) from 6-point eye contours.
//!
//! Contour order: p0/p3 are the eye corners, p1/p2 the upper lid, p5/p4 the
//! lower lid opposite them.
//!
//! EAR = (|p1-p5| + |p2-p4|) / (2 * |p0-p3|)

use serde::{Deserialize, Serialize};

use crate::constants::EAR_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

pub type EyeContour = [Point; 6];

/// Returns `None` when any coordinate is not finite.
pub fn eye_aspect_ratio(eye: &EyeContour) -> Option<f64> {
    if !eye.iter().all(Point::is_finite) {
        return None;
    }

    let vertical1 = eye[1].distance(&eye[5]);
    let vertical2 = eye[2].distance(&eye[4]);
    let horizontal = eye[0].distance(&eye[3]);

    Some((vertical1 + vertical2) / (2.0 * horizontal + EAR_EPSILON))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyePair {
    pub left: EyeContour,
    pub right: EyeContour,
}

impl EyePair {
    /// Mean EAR of both eyes.
    pub fn openness(&self) -> Option<f64> {
        let left = eye_aspect_ratio(&self.left)?;
        let right = eye_aspect_ratio(&self.right)?;
        Some((left + right) * 0.5)
    }
}
