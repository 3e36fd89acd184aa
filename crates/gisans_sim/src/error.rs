//! Simulation-layer error types.

use gisans_model::ModelError;

/// Errors that can occur while assembling or post-processing a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The sample failed to resolve into a multilayer.
    #[error("sample model error: {0}")]
    Model(#[from] ModelError),

    /// An intensity map does not match the detector pixel grid.
    #[error("intensity map is {got_x}x{got_y} pixels, detector expects {expected_x}x{expected_y}")]
    DimensionMismatch {
        /// Expected horizontal pixel count.
        expected_x: u32,
        /// Expected vertical pixel count.
        expected_y: u32,
        /// Actual horizontal pixel count.
        got_x: u32,
        /// Actual vertical pixel count.
        got_y: u32,
    },

    /// Raw data length does not match the requested map dimensions.
    #[error("intensity data of length {len} cannot fill a {n_x}x{n_y} map")]
    DataLength {
        /// Number of values supplied.
        len: usize,
        /// Requested horizontal pixel count.
        n_x: u32,
        /// Requested vertical pixel count.
        n_y: u32,
    },

    /// The region of interest is empty or exceeds the detector area.
    #[error("region of interest is empty or exceeds the detector area")]
    InvalidRoi,

    /// Failed to encode a value to MessagePack.
    #[error("failed to encode: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Failed to decode a value from MessagePack.
    #[error("failed to decode: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// An I/O error while writing exported data.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
