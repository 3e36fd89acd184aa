//! Particle layouts: form factors, lattices, and interference functions.

use serde::{Deserialize, Serialize};

use crate::material::Material;

/// Particle form factors available to layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FormFactor {
    /// A full sphere of the given radius (nm).
    FullSphere {
        /// Sphere radius in nm.
        radius: f64,
    },
}

/// A particle: a material plus a form factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Material the particle is made of.
    pub material: Material,
    /// Shape of the particle.
    pub form_factor: FormFactor,
}

impl Particle {
    /// Create a particle.
    #[must_use]
    pub fn new(material: Material, form_factor: FormFactor) -> Self {
        Self {
            material,
            form_factor,
        }
    }
}

/// A two-dimensional Bravais lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice2D {
    /// Length of the first basis vector (nm).
    pub length1: f64,
    /// Length of the second basis vector (nm).
    pub length2: f64,
    /// Angle between the basis vectors (rad).
    pub angle: f64,
    /// Rotation of the lattice within the sample plane (rad).
    pub xi: f64,
}

impl Lattice2D {
    /// Create a lattice from its basis vector lengths and angles.
    #[must_use]
    pub fn new(length1: f64, length2: f64, angle: f64, xi: f64) -> Self {
        Self {
            length1,
            length2,
            angle,
            xi,
        }
    }

    /// Area of the unit cell (nm²).
    #[must_use]
    pub fn unit_cell_area(&self) -> f64 {
        self.length1 * self.length2 * self.angle.sin()
    }
}

/// Fourier-transformed decay functions describing finite lattice coherence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecayFunction2D {
    /// Cauchy (exponential) decay.
    Cauchy {
        /// Decay length along the first lattice axis (nm).
        decay_x: f64,
        /// Decay length along the second lattice axis (nm).
        decay_y: f64,
        /// Orientation of the decay axes (rad).
        gamma: f64,
    },
}

/// Interference function between particles in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interference {
    /// Particles ordered on a 2-D lattice with finite coherence.
    Lattice2D {
        /// The underlying lattice.
        lattice: Lattice2D,
        /// Coherence decay of the lattice peaks.
        decay: DecayFunction2D,
    },
}

/// Arrangement of particles within a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleLayout {
    /// Particles contained in the layout.
    pub particles: Vec<Particle>,
    /// Interference function, if the particles are correlated.
    pub interference: Option<Interference>,
    /// Total particle surface density in nm⁻², if set explicitly.
    pub total_density: Option<f64>,
}

impl ParticleLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            interference: None,
            total_density: None,
        }
    }

    /// Add a particle to the layout.
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Set the interference function.
    pub fn set_interference(&mut self, interference: Interference) {
        self.interference = Some(interference);
    }

    /// Set the total particle surface density (nm⁻²).
    pub fn set_total_density(&mut self, density: f64) {
        self.total_density = Some(density);
    }
}

impl Default for ParticleLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagonal_unit_cell_area() {
        // 20 nm hexagonal lattice; 1/area is the usual surface density choice.
        let lattice = Lattice2D::new(20.0, 20.0, 120.0_f64.to_radians(), 0.0);
        let area = lattice.unit_cell_area();
        assert!((1.0 / area - 0.00288675134595).abs() < 1e-12);
    }

    #[test]
    fn test_layout_accumulates_particles() {
        let mut layout = ParticleLayout::new();
        layout.add_particle(Particle::new(
            Material::refractive("Particle", 6e-4, 2e-8),
            FormFactor::FullSphere { radius: 10.0 },
        ));
        layout.set_total_density(0.00288675134595);
        assert_eq!(layout.particles.len(), 1);
        assert_eq!(layout.total_density, Some(0.00288675134595));
        assert!(layout.interference.is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut layout = ParticleLayout::new();
        layout.add_particle(Particle::new(
            Material::refractive("Particle", 6e-4, 2e-8),
            FormFactor::FullSphere { radius: 10.0 },
        ));
        layout.set_interference(Interference::Lattice2D {
            lattice: Lattice2D::new(20.0, 20.0, 120.0_f64.to_radians(), 0.0),
            decay: DecayFunction2D::Cauchy {
                decay_x: 10.0,
                decay_y: 10.0,
                gamma: 0.0,
            },
        });
        let bytes = rmp_serde::to_vec(&layout).unwrap();
        let restored: ParticleLayout = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(layout, restored);
    }
}
