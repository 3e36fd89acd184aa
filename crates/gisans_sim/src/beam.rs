//! The incident beam.

use serde::{Deserialize, Serialize};

/// Beam direction in beam coordinates: inclination below the horizon and
/// azimuth within the sample plane, both in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// Inclination angle (rad).
    pub alpha: f64,
    /// Azimuthal angle (rad).
    pub phi: f64,
}

impl Direction {
    /// Create a direction.
    #[must_use]
    pub fn new(alpha: f64, phi: f64) -> Self {
        Self { alpha, phi }
    }
}

/// The incident beam of a scattering simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Intensity scale.
    pub intensity: f64,
    /// Wavelength (nm).
    pub wavelength: f64,
    /// Incidence direction.
    pub direction: Direction,
}

impl Beam {
    /// Create a beam.
    #[must_use]
    pub fn new(intensity: f64, wavelength: f64, direction: Direction) -> Self {
        Self {
            intensity,
            wavelength,
            direction,
        }
    }
}
