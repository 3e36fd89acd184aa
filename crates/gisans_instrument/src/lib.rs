//! # gisans_instrument
//!
//! Instrument descriptions for the GISANS toolkit. An instrument is anything
//! implementing [`Experiment`]: it provides the beam parameters, the detector
//! geometry, and the three resolution distributions (wavelength, incidence
//! angle, azimuthal angle) that a simulation needs.
//!
//! [`GenericSans`] is a ready-made pinhole SANS/GISANS instrument whose
//! resolutions are derived from its geometry (apertures, collimation length,
//! velocity selector) rather than given by hand.

pub mod detector;
pub mod distribution;
pub mod experiment;
pub mod generic;

pub use detector::RectangularDetector;
pub use distribution::{Distribution1D, WeightedValue};
pub use experiment::{Alignment, Experiment};
pub use generic::GenericSans;
