//! Materials and scattering length densities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scattering length density as a real/imaginary pair, in Å⁻².
///
/// SLD values are carried verbatim; no unit conversion is applied to them
/// anywhere in the toolkit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sld {
    /// Real part.
    pub re: f64,
    /// Imaginary (absorption) part.
    pub im: f64,
}

impl Sld {
    /// The zero SLD (vacuum).
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Create an SLD from its real and imaginary parts.
    #[must_use]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Sld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im < 0.0 { '-' } else { '+' };
        write!(f, "{:e}{}{:e}j", self.re, sign, self.im.abs())
    }
}

/// How a material's optical properties are given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Scattering length density pair (the usual neutron description).
    Sld(Sld),
    /// Refractive index as `1 - delta + i*beta` (the usual x-ray description).
    Refractive {
        /// Dispersion term δ.
        delta: f64,
        /// Absorption term β.
        beta: f64,
    },
}

/// A named material assigned to layers and particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Human-readable material name (e.g. `"Substrate"`).
    pub name: String,
    /// Optical description of the material.
    pub kind: MaterialKind,
}

impl Material {
    /// Create a material from its scattering length density.
    #[must_use]
    pub fn by_sld(name: impl Into<String>, re: f64, im: f64) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Sld(Sld::new(re, im)),
        }
    }

    /// Create a material from its refractive index terms.
    #[must_use]
    pub fn refractive(name: impl Into<String>, delta: f64, beta: f64) -> Self {
        Self {
            name: name.into(),
            kind: MaterialKind::Refractive { delta, beta },
        }
    }

    /// The vacuum material: zero delta, zero beta.
    #[must_use]
    pub fn vacuum() -> Self {
        Self::refractive("Vacuum", 0.0, 0.0)
    }
}
