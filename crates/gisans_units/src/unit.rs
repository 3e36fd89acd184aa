//! Unit constants, parsing, and unit-tagged quantities.
//!
//! The internal convention is nanometres for lengths and radians for angles,
//! so `NM` and `RAD` are exactly `1.0` and every other constant is the factor
//! that converts one of that unit into internal units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nanometre, the internal length unit.
pub const NM: f64 = 1.0;
/// Square nanometre, the internal area unit.
pub const NM2: f64 = 1.0;
/// Ångström.
pub const ANGSTROM: f64 = 0.1;
/// Millimetre.
pub const MM: f64 = 1.0e6;
/// Metre, defined through [`MM`].
pub const M: f64 = 1000.0 * MM;
/// Degree.
pub const DEG: f64 = std::f64::consts::PI / 180.0;
/// Radian, the internal angle unit.
pub const RAD: f64 = 1.0;

/// Error raised when a unit spelling is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The given string names no supported unit.
    #[error("unsupported unit `{0}`")]
    Unsupported(String),
}

/// A supported measurement unit.
///
/// Parsing accepts the spellings listed per variant; `nm2` is an ASCII
/// fallback for `nm²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// `nm`
    Nanometer,
    /// `nm²` or `nm2`
    NanometerSq,
    /// `angstrom`
    Angstrom,
    /// `mm`
    Millimeter,
    /// `m`
    Meter,
    /// `deg`
    Degree,
    /// `rad`
    Radian,
}

impl Unit {
    /// Multiplier that converts a value in this unit into internal units.
    #[must_use]
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Nanometer => NM,
            Unit::NanometerSq => NM2,
            Unit::Angstrom => ANGSTROM,
            Unit::Millimeter => MM,
            Unit::Meter => M,
            Unit::Degree => DEG,
            Unit::Radian => RAD,
        }
    }

    /// Canonical spelling used when formatting values.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Nanometer => "nm",
            Unit::NanometerSq => "nm²",
            Unit::Angstrom => "angstrom",
            Unit::Millimeter => "mm",
            Unit::Meter => "m",
            Unit::Degree => "deg",
            Unit::Radian => "rad",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nm" => Ok(Unit::Nanometer),
            "nm²" | "nm2" => Ok(Unit::NanometerSq),
            "angstrom" => Ok(Unit::Angstrom),
            "mm" => Ok(Unit::Millimeter),
            "m" => Ok(Unit::Meter),
            "deg" => Ok(Unit::Degree),
            "rad" => Ok(Unit::Radian),
            other => Err(UnitError::Unsupported(other.to_string())),
        }
    }
}

/// A value tagged with the unit it was given in.
///
/// The value is converted to internal units on construction and stays there;
/// the original unit is only remembered for display and for converting back
/// out. Units are not dimension-checked against each other.
///
/// # Examples
///
/// ```
/// use gisans_units::{Quantity, Unit};
///
/// let d = Quantity::new(10.0, Unit::Meter);
/// assert!((d.in_unit(Unit::Millimeter) - 10_000.0).abs() < 1e-9);
/// assert_eq!(d.to_string(), "10 m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity from a value expressed in `unit`.
    #[must_use]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            value: value * unit.factor(),
            unit,
        }
    }

    /// The value in internal units.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit the quantity was given in.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The value converted out into `unit`.
    #[must_use]
    pub fn in_unit(&self, unit: Unit) -> f64 {
        self.value / unit.factor()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value / self.unit.factor(), self.unit)
    }
}
