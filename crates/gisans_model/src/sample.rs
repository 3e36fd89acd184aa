//! The sample abstraction consumed by simulation builders.

use crate::error::ModelError;
use crate::layer::Multilayer;

/// Anything that can produce a multilayer for simulation.
///
/// Implement this for your sample type; the simulation builder only needs
/// the resolved [`Multilayer`] and the averaging flag.
pub trait Sample {
    /// Build the multilayer describing this sample.
    ///
    /// # Errors
    ///
    /// Implementations report invalid model descriptions as [`ModelError`].
    fn multilayer(&self) -> Result<Multilayer, ModelError>;

    /// Whether layer-averaged materials should be used when solving the
    /// full structural model. Defaults to `true`.
    fn use_average_materials(&self) -> bool {
        true
    }
}
