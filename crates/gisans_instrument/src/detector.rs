//! Rectangular detector geometry.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A flat rectangular pixel detector.
///
/// Sizes and positions are in internal units (nm); `u0`/`v0` give the point
/// where the direct beam hits the detector, in detector-local coordinates
/// measured from the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularDetector {
    /// Number of pixels along the horizontal axis.
    pub n_x: u32,
    /// Width of the sensitive area.
    pub width: f64,
    /// Number of pixels along the vertical axis.
    pub n_y: u32,
    /// Height of the sensitive area.
    pub height: f64,
    /// Position of the detector center relative to the sample.
    pub position: DVec3,
    /// Direct-beam coordinate along the horizontal axis.
    pub u0: f64,
    /// Direct-beam coordinate along the vertical axis.
    pub v0: f64,
}

impl RectangularDetector {
    /// Create a detector at the origin; position it with
    /// [`positioned`](Self::positioned).
    #[must_use]
    pub fn new(n_x: u32, width: f64, n_y: u32, height: f64) -> Self {
        Self {
            n_x,
            width,
            n_y,
            height,
            position: DVec3::ZERO,
            u0: width / 2.0,
            v0: height / 2.0,
        }
    }

    /// Place the detector center at `position` with the direct beam hitting
    /// detector-local `(u0, v0)`.
    #[must_use]
    pub fn positioned(mut self, position: DVec3, u0: f64, v0: f64) -> Self {
        self.position = position;
        self.u0 = u0;
        self.v0 = v0;
        self
    }

    /// Place the detector perpendicular to the direct beam at the given
    /// distance. The beam travels downhill at `alpha_i` after the sample, so
    /// the detector center sits below the horizon.
    #[must_use]
    pub fn perpendicular_to_beam(self, distance: f64, alpha_i: f64, u0: f64, v0: f64) -> Self {
        let position = distance * DVec3::new((-alpha_i).cos(), 0.0, (-alpha_i).sin());
        self.positioned(position, u0, v0)
    }

    /// Sample-to-detector distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.position.length()
    }

    /// Width of one pixel.
    #[must_use]
    pub fn pixel_width(&self) -> f64 {
        self.width / f64::from(self.n_x)
    }

    /// Height of one pixel.
    #[must_use]
    pub fn pixel_height(&self) -> f64 {
        self.height / f64::from(self.n_y)
    }
}
