//! A generic pinhole SANS/GISANS instrument.

use serde::{Deserialize, Serialize};

use gisans_units::{ANGSTROM, DEG, M, MM};

use crate::detector::RectangularDetector;
use crate::distribution::Distribution1D;
use crate::experiment::{Alignment, Experiment};

/// A simple SANS instrument described by geometry parameters in common
/// units, with all resolutions derived from that geometry.
///
/// Builder methods take the unit a beamline scientist would use (degrees,
/// ångström, metres, millimetres) and convert once; accessors and the
/// [`Experiment`] impl work in internal units.
///
/// # Examples
///
/// ```
/// use gisans_instrument::{Alignment, Experiment, GenericSans};
///
/// let inst = GenericSans::default()
///     .with_detector_distance(5.0)
///     .with_collimation_length(5.0)
///     .with_alpha_i(2.0)
///     .with_alignment(Alignment::beam_center(100.0, 15.0));
/// assert!(inst.detector().distance() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenericSans {
    alpha_i: f64,
    wavelength: f64,
    collimation_length: f64,
    detector_distance: f64,
    sample_size: f64,
    guide_size: f64,
    detector_size: f64,
    detector_pixels: u32,
    dlambda_rel: f64,
    alignment: Alignment,
}

impl Default for GenericSans {
    fn default() -> Self {
        Self {
            alpha_i: 0.5 * DEG,
            wavelength: 6.0 * ANGSTROM,
            collimation_length: 10.0 * M,
            detector_distance: 10.0 * M,
            sample_size: 20.0 * MM,
            guide_size: 50.0 * MM,
            detector_size: 1000.0 * MM,
            detector_pixels: 200,
            dlambda_rel: 0.1,
            alignment: Alignment::default(),
        }
    }
}

impl GenericSans {
    /// Set the incidence angle, in degrees.
    #[must_use]
    pub fn with_alpha_i(mut self, degrees: f64) -> Self {
        self.alpha_i = degrees * DEG;
        self
    }

    /// Set the wavelength, in ångström.
    #[must_use]
    pub fn with_wavelength(mut self, angstrom: f64) -> Self {
        self.wavelength = angstrom * ANGSTROM;
        self
    }

    /// Set the distance from the entrance slit / guide exit to the sample,
    /// in metres.
    #[must_use]
    pub fn with_collimation_length(mut self, metres: f64) -> Self {
        self.collimation_length = metres * M;
        self
    }

    /// Set the sample-to-detector distance, in metres.
    #[must_use]
    pub fn with_detector_distance(mut self, metres: f64) -> Self {
        self.detector_distance = metres * M;
        self
    }

    /// Set the size of the (square) sample, in millimetres.
    #[must_use]
    pub fn with_sample_size(mut self, millimetres: f64) -> Self {
        self.sample_size = millimetres * MM;
        self
    }

    /// Set the size of the (square) entrance slit / guide exit, in
    /// millimetres.
    #[must_use]
    pub fn with_guide_size(mut self, millimetres: f64) -> Self {
        self.guide_size = millimetres * MM;
        self
    }

    /// Set the total size of the (square) detector, in millimetres.
    #[must_use]
    pub fn with_detector_size(mut self, millimetres: f64) -> Self {
        self.detector_size = millimetres * MM;
        self
    }

    /// Set the number of pixels across the detection area.
    #[must_use]
    pub fn with_detector_pixels(mut self, pixels: u32) -> Self {
        self.detector_pixels = pixels;
        self
    }

    /// Set the relative wavelength spread Δλ/λ of the velocity selector.
    #[must_use]
    pub fn with_dlambda_rel(mut self, dlambda_rel: f64) -> Self {
        self.dlambda_rel = dlambda_rel;
        self
    }

    /// Set the fixed alignment parameters.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Collimation length in internal units.
    #[must_use]
    pub fn collimation_length(&self) -> f64 {
        self.collimation_length
    }

    /// Sample-to-detector distance in internal units.
    #[must_use]
    pub fn detector_distance(&self) -> f64 {
        self.detector_distance
    }

    /// Relative wavelength spread Δλ/λ.
    #[must_use]
    pub fn dlambda_rel(&self) -> f64 {
        self.dlambda_rel
    }
}

impl Experiment for GenericSans {
    fn alpha_i(&self) -> f64 {
        self.alpha_i
    }

    fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Detector perpendicular to and centred on the direct beam, unless the
    /// alignment gives an explicit direct-beam pixel.
    fn detector(&self) -> RectangularDetector {
        let pixel = self.detector_size / f64::from(self.detector_pixels);
        let u0 = self
            .alignment
            .center_x_px
            .map_or(self.detector_size / 2.0, |px| px * pixel);
        let v0 = self
            .alignment
            .center_y_px
            .map_or(self.detector_size / 2.0, |px| px * pixel);
        RectangularDetector::new(
            self.detector_pixels,
            self.detector_size,
            self.detector_pixels,
            self.detector_size,
        )
        .perpendicular_to_beam(self.detector_distance, self.alpha_i, u0, v0)
    }

    /// Triangular resolution of the velocity selector.
    fn res_wavelength(&self) -> Distribution1D {
        let fwhm = self.dlambda_rel * self.wavelength;
        Distribution1D::Trapezoid {
            center: self.wavelength,
            left: fwhm / 2.0,
            middle: 0.0,
            right: fwhm / 2.0,
        }
    }

    /// Divergence gate for a point-like sample: the last aperture seen over
    /// the collimation length.
    fn res_alpha(&self) -> Distribution1D {
        let half_width = (self.guide_size / 2.0).atan2(self.collimation_length);
        Distribution1D::Gate {
            min: self.alpha_i - half_width,
            max: self.alpha_i + half_width,
        }
    }

    /// Trapezoidal divergence from the guide exit and sample aperture pair:
    /// full illumination inside the umbra, linear falloff to the penumbra.
    fn res_phi(&self) -> Distribution1D {
        let umbra =
            ((self.guide_size - self.sample_size).abs() / 2.0).atan2(self.collimation_length);
        let penumbra =
            ((self.guide_size + self.sample_size) / 2.0).atan2(self.collimation_length);
        Distribution1D::Trapezoid {
            center: 0.0,
            left: penumbra - umbra,
            middle: 2.0 * umbra,
            right: penumbra - umbra,
        }
    }
}
