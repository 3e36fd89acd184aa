//! Resolution and polarization options.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How the resolution along one beam parameter is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisResolution {
    /// No resolution effect simulated for this axis.
    Off,
    /// Sample the parameter distribution with the given number of bins and
    /// run one sub-simulation per bin. `Binned(0)` is equivalent to `Off`.
    Binned(u32),
    /// Skip re-simulation and convolve the finished detector image with the
    /// distribution instead. Cheaper, but ignores how the scattering itself
    /// changes across the distribution.
    Fast,
}

impl AxisResolution {
    /// Whether this axis contributes sub-simulations.
    #[must_use]
    pub fn is_binned(&self) -> bool {
        matches!(self, AxisResolution::Binned(n) if *n > 0)
    }
}

/// Resolution treatment for the three beam parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOptions {
    /// Wavelength resolution.
    pub wavelength: AxisResolution,
    /// Incidence-angle resolution.
    pub alpha: AxisResolution,
    /// Azimuthal-angle resolution.
    pub phi: AxisResolution,
}

impl ResolutionOptions {
    /// No resolution effects at all.
    pub const NO_RES: Self = Self {
        wavelength: AxisResolution::Off,
        alpha: AxisResolution::Off,
        phi: AxisResolution::Off,
    };

    /// Fast image convolution on every axis.
    pub const FAST_RES: Self = Self {
        wavelength: AxisResolution::Fast,
        alpha: AxisResolution::Fast,
        phi: AxisResolution::Fast,
    };

    /// Create resolution options axis by axis.
    #[must_use]
    pub fn new(wavelength: AxisResolution, alpha: AxisResolution, phi: AxisResolution) -> Self {
        Self {
            wavelength,
            alpha,
            phi,
        }
    }
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self::NO_RES
    }
}

/// Spin flipper settings of a polarized measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarizationOptions {
    /// First flipper (before the sample) on.
    pub f1: bool,
    /// Second flipper (before the analyzer) on.
    pub f2: bool,
}

impl PolarizationOptions {
    /// Beam polarization vector for the flipper settings.
    #[must_use]
    pub fn beam_polarization(&self) -> DVec3 {
        if self.f1 {
            DVec3::new(0.0, -1.0, 0.0)
        } else {
            DVec3::new(0.0, 1.0, 0.0)
        }
    }

    /// Analyzer direction for the flipper settings.
    #[must_use]
    pub fn analyzer_direction(&self) -> DVec3 {
        if self.f2 {
            DVec3::new(0.0, -1.0, 0.0)
        } else {
            DVec3::new(0.0, 1.0, 0.0)
        }
    }
}

/// Resolved polarization state attached to a simulation description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarizationState {
    /// Polarization of the incident beam.
    pub beam_polarization: DVec3,
    /// Transmission direction of the analyzer.
    pub analyzer_direction: DVec3,
}

impl From<PolarizationOptions> for PolarizationState {
    fn from(options: PolarizationOptions) -> Self {
        Self {
            beam_polarization: options.beam_polarization(),
            analyzer_direction: options.analyzer_direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_res_turns_everything_off() {
        let res = ResolutionOptions::NO_RES;
        assert_eq!(res.wavelength, AxisResolution::Off);
        assert_eq!(res.alpha, AxisResolution::Off);
        assert_eq!(res.phi, AxisResolution::Off);
        assert_eq!(ResolutionOptions::default(), res);
    }

    #[test]
    fn test_binned_zero_counts_as_off() {
        assert!(!AxisResolution::Binned(0).is_binned());
        assert!(AxisResolution::Binned(11).is_binned());
        assert!(!AxisResolution::Fast.is_binned());
    }

    #[test]
    fn test_flippers_select_polarization_vectors() {
        let pol = PolarizationOptions { f1: true, f2: false };
        assert_eq!(pol.beam_polarization(), DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(pol.analyzer_direction(), DVec3::new(0.0, 1.0, 0.0));

        let state = PolarizationState::from(PolarizationOptions { f1: false, f2: true });
        assert_eq!(state.beam_polarization, DVec3::new(0.0, 1.0, 0.0));
        assert_eq!(state.analyzer_direction, DVec3::new(0.0, -1.0, 0.0));
    }
}
