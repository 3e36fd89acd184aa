//! The experiment abstraction consumed by simulation builders.

use serde::{Deserialize, Serialize};

use crate::detector::RectangularDetector;
use crate::distribution::Distribution1D;

/// Fixed alignment parameters of an instrument.
///
/// These are determined once per beamtime (hardware alignment) and do not
/// change between simulations, unlike the user-configurable instrument
/// parameters. Unset coordinates fall back to the detector center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Direct-beam pixel along the horizontal detector axis.
    pub center_x_px: Option<f64>,
    /// Direct-beam pixel along the vertical detector axis.
    pub center_y_px: Option<f64>,
}

impl Alignment {
    /// Alignment with an explicitly measured direct-beam pixel.
    #[must_use]
    pub fn beam_center(x_px: f64, y_px: f64) -> Self {
        Self {
            center_x_px: Some(x_px),
            center_y_px: Some(y_px),
        }
    }
}

/// An instrument description: everything a simulation needs about the beam,
/// the detector, and the resolutions.
///
/// Constructors of implementing types should take all necessary instrument
/// parameters; the trait only exposes derived values in internal units.
pub trait Experiment {
    /// Incident beam intensity scale. Defaults to one.
    fn beam_intensity(&self) -> f64 {
        1.0
    }

    /// Constant background level. Defaults to zero.
    fn background(&self) -> f64 {
        0.0
    }

    /// Angle of incidence on the sample (rad).
    fn alpha_i(&self) -> f64;

    /// Incident wavelength (nm).
    fn wavelength(&self) -> f64;

    /// Detector geometry.
    fn detector(&self) -> RectangularDetector;

    /// Wavelength resolution.
    fn res_wavelength(&self) -> Distribution1D;

    /// Incidence-angle resolution.
    fn res_alpha(&self) -> Distribution1D;

    /// Azimuthal-angle resolution.
    fn res_phi(&self) -> Distribution1D;
}
