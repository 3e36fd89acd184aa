//! # gisans_sim
//!
//! Simulation assembly for the GISANS toolkit. A [`Simulation`] combines a
//! [`Sample`](gisans_model::Sample) with an
//! [`Experiment`](gisans_instrument::Experiment) and assembles a
//! [`ScatteringSimulation`]: the complete, serializable description of one
//! GISANS measurement, including the beam, the detector, the resolved
//! multilayer, and the requested resolution treatment.
//!
//! The toolkit deliberately stops short of solving the scattering problem.
//! An external engine computes the raw detector image for the description
//! (sub-simulation by sub-simulation via [`ScatteringSimulation::sampling_plan`]);
//! [`ScatteringSimulation::postprocess`] then applies the fast resolution
//! smears, background, masks, and region of interest, and wraps the image
//! into a [`SimulationResult`] with axes in detector, angle, and q space.

pub mod beam;
pub mod codec;
pub mod error;
pub mod map;
pub mod options;
pub mod result;
pub mod simulation;
pub mod smear;

pub use beam::{Beam, Direction};
pub use error::SimError;
pub use map::{IntensityMap, PixelRect};
pub use options::{AxisResolution, PolarizationOptions, PolarizationState, ResolutionOptions};
pub use result::SimulationResult;
pub use simulation::{
    BeamVariant, DistributionTarget, FastAxis, ParameterDistribution, ScatteringSimulation,
    Simulation, SimulationOptions,
};
