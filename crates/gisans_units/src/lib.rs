//! # gisans_units
//!
//! Unit handling for the GISANS toolkit. Re-exports [`glam`] for linear
//! algebra and defines the internal unit convention shared by every crate in
//! the workspace: **lengths in nanometres, angles in radians**.
//!
//! Values are converted into internal units once, at the point where they
//! enter the system; all downstream code works with plain `f64` in internal
//! units. Multiply by a unit constant to convert in, divide to convert out:
//!
//! ```
//! use gisans_units::{ANGSTROM, MM};
//!
//! let wavelength = 4.0 * ANGSTROM; // 0.4 nm
//! let aperture = 25.0 * MM;
//! assert!((wavelength - 0.4).abs() < 1e-12);
//! assert!((aperture / MM - 25.0).abs() < 1e-12);
//! ```

pub mod unit;

// Re-export glam types for convenience.
pub use glam::{DVec2, DVec3};

pub use unit::{ANGSTROM, DEG, M, MM, NM, NM2, RAD};
pub use unit::{Quantity, Unit, UnitError};
