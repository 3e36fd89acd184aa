//! Simulation results with physical axes.

use std::f64::consts::PI;
use std::io::Write;

use gisans_instrument::RectangularDetector;
use gisans_units::{ANGSTROM, DEG, MM};
use serde::{Deserialize, Serialize};

use crate::beam::Beam;
use crate::codec;
use crate::error::SimError;
use crate::map::IntensityMap;

/// A post-processed detector image together with its axis extents.
///
/// Extents are `[left, right, bottom, top]` over the outer pixel edges, in
/// three coordinate systems:
///
/// * millimetres on the detector, relative to the direct-beam position,
/// * exit angles in degrees (azimuth `phi_f` and inclination `alpha_f`),
/// * momentum transfer in reciprocal angstroms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    data: IntensityMap,
    mm: [f64; 4],
    degrees: [f64; 4],
    q: [f64; 4],
}

impl SimulationResult {
    /// Wrap a detector image, computing the axis extents from the detector
    /// geometry and the beam.
    ///
    /// `origin` is the detector pixel at the lower-left corner of `data`,
    /// nonzero when the image was cropped to a region of interest.
    #[must_use]
    pub fn from_detector(
        data: IntensityMap,
        detector: &RectangularDetector,
        beam: &Beam,
        origin: (u32, u32),
    ) -> Self {
        let distance = detector.distance();
        let alpha_i = beam.direction.alpha;

        // Outer pixel edges relative to the direct-beam position (nm).
        let x_lo = f64::from(origin.0) * detector.pixel_width() - detector.u0;
        let x_hi = f64::from(origin.0 + data.n_x()) * detector.pixel_width() - detector.u0;
        let y_lo = f64::from(origin.1) * detector.pixel_height() - detector.v0;
        let y_hi = f64::from(origin.1 + data.n_y()) * detector.pixel_height() - detector.v0;

        let phi_lo = x_lo.atan2(distance);
        let phi_hi = x_hi.atan2(distance);
        let alpha_lo = y_lo.atan2(distance) - alpha_i;
        let alpha_hi = y_hi.atan2(distance) - alpha_i;

        let k = 2.0 * PI / (beam.wavelength / ANGSTROM);

        Self {
            data,
            mm: [x_lo / MM, x_hi / MM, y_lo / MM, y_hi / MM],
            degrees: [
                phi_lo / DEG,
                phi_hi / DEG,
                alpha_lo / DEG,
                alpha_hi / DEG,
            ],
            q: [
                k * phi_lo.sin(),
                k * phi_hi.sin(),
                k * (alpha_lo.sin() + alpha_i.sin()),
                k * (alpha_hi.sin() + alpha_i.sin()),
            ],
        }
    }

    /// The detector image.
    #[must_use]
    pub fn data(&self) -> &IntensityMap {
        &self.data
    }

    /// Extent in millimetres relative to the direct beam.
    #[must_use]
    pub fn extent_mm(&self) -> [f64; 4] {
        self.mm
    }

    /// Extent in exit angles (degrees).
    #[must_use]
    pub fn extent_degrees(&self) -> [f64; 4] {
        self.degrees
    }

    /// Extent in momentum transfer (reciprocal angstroms).
    #[must_use]
    pub fn extent_q(&self) -> [f64; 4] {
        self.q
    }

    /// Serialize the result to MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Encode`] if serialisation fails.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, SimError> {
        codec::encode(self)
    }

    /// Restore a result from MessagePack bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Decode`] if deserialisation fails.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, SimError> {
        codec::decode(bytes)
    }

    /// Write the image as comma-separated values, one detector row per line,
    /// bottom row first.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if writing fails.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), SimError> {
        for y in 0..self.data.n_y() {
            for x in 0..self.data.n_x() {
                if x > 0 {
                    write!(writer, ",")?;
                }
                write!(writer, "{}", self.data.get(x, y))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::beam::Direction;

    use super::*;

    // 200 x 200 pixels of 5 mm at 5 m distance, direct beam at (500, 75) mm;
    // 6 angstrom beam at 2 degrees.
    fn test_setup() -> (RectangularDetector, Beam) {
        let detector = RectangularDetector::new(200, 1.0e9, 200, 1.0e9).positioned(
            DVec3::new(5.0e9, 0.0, 0.0),
            500.0e6,
            75.0e6,
        );
        let beam = Beam::new(1.0, 0.6, Direction::new(2.0 * DEG, 0.0));
        (detector, beam)
    }

    #[test]
    fn test_extent_mm_relative_to_direct_beam() {
        let (detector, beam) = test_setup();
        let result =
            SimulationResult::from_detector(IntensityMap::new(200, 200), &detector, &beam, (0, 0));
        let mm = result.extent_mm();
        assert!((mm[0] - -500.0).abs() < 1e-9);
        assert!((mm[1] - 500.0).abs() < 1e-9);
        assert!((mm[2] - -75.0).abs() < 1e-9);
        assert!((mm[3] - 925.0).abs() < 1e-9);
    }

    #[test]
    fn test_extent_degrees() {
        let (detector, beam) = test_setup();
        let result =
            SimulationResult::from_detector(IntensityMap::new(200, 200), &detector, &beam, (0, 0));
        let degrees = result.extent_degrees();
        // atan(0.1) either side of the beam.
        assert!((degrees[0] - -5.7105931).abs() < 1e-3);
        assert!((degrees[1] - 5.7105931).abs() < 1e-3);
        assert!((degrees[0] + degrees[1]).abs() < 1e-12);
        // Exit angles span atan(-0.015) - 2 deg to atan(0.185) - 2 deg.
        assert!((degrees[2] - -2.8594).abs() < 1e-3);
        assert!((degrees[3] - 8.4812).abs() < 1e-3);
    }

    #[test]
    fn test_extent_q() {
        let (detector, beam) = test_setup();
        let result =
            SimulationResult::from_detector(IntensityMap::new(200, 200), &detector, &beam, (0, 0));
        let q = result.extent_q();
        // k = 2 pi / 6 inverse angstroms.
        assert!((q[0] - -0.1042000).abs() < 1e-4);
        assert!((q[1] - 0.1042000).abs() < 1e-4);
        assert!((q[2] - -0.0156925).abs() < 1e-4);
        assert!((q[3] - 0.1909934).abs() < 1e-4);
    }

    #[test]
    fn test_cropped_extents_use_origin() {
        let (detector, beam) = test_setup();
        let result = SimulationResult::from_detector(
            IntensityMap::new(100, 50),
            &detector,
            &beam,
            (50, 100),
        );
        let mm = result.extent_mm();
        assert!((mm[0] - -250.0).abs() < 1e-9);
        assert!((mm[1] - 250.0).abs() < 1e-9);
        assert!((mm[2] - 425.0).abs() < 1e-9);
        assert!((mm[3] - 675.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_csv() {
        let (detector, beam) = test_setup();
        let data = IntensityMap::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let result = SimulationResult::from_detector(data, &detector, &beam, (0, 0));

        let mut buffer = Vec::new();
        result.write_csv(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1,2\n3,4\n");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let (detector, beam) = test_setup();
        let mut data = IntensityMap::new(4, 4);
        data.set(1, 2, 3.5);
        let result = SimulationResult::from_detector(data, &detector, &beam, (0, 0));

        let bytes = result.to_msgpack().unwrap();
        let restored = SimulationResult::from_msgpack(&bytes).unwrap();
        assert_eq!(result, restored);
    }
}
