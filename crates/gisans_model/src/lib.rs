//! # gisans_model
//!
//! Sample models for the GISANS toolkit. A sample is described either
//! directly as a [`Multilayer`] of materials and particle layouts, or through
//! the higher-level slab description ([`SlabStack`]) that mirrors how layer
//! parameters come out of specular reflectometry fits.
//!
//! All lengths are in nanometres and all angles in radians (the workspace
//! convention); scattering length densities are carried verbatim in Å⁻².

pub mod error;
pub mod layer;
pub mod layout;
pub mod material;
pub mod sample;
pub mod slab;

pub use error::ModelError;
pub use layer::{Layer, Multilayer, Roughness};
pub use layout::{DecayFunction2D, FormFactor, Interference, Lattice2D, Particle, ParticleLayout};
pub use material::{Material, MaterialKind, Sld};
pub use sample::Sample;
pub use slab::{Radiation, Slab, SlabSample, SlabStack};
