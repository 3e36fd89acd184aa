//! Slab description of a layered sample.
//!
//! A [`SlabStack`] carries the layer parameters the way they come out of a
//! specular reflectometry fit: one [`Slab`] per layer with a name, SLDs for
//! both neutrons and x-rays, a thickness, and a roughness sigma. Resolving a
//! stack for a given [`Radiation`] turns it into a [`Multilayer`] ready for
//! simulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::layer::{Layer, Multilayer, Roughness};
use crate::material::{Material, Sld};
use crate::sample::Sample;

/// Radiation kind a slab description is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Radiation {
    /// Use the neutron SLDs.
    Neutron,
    /// Use the x-ray SLDs.
    Xray,
}

/// One slab of a layered sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    /// Unique name of the slab within its stack.
    pub name: String,
    /// Neutron scattering length density (Å⁻²).
    pub n_sld: Sld,
    /// X-ray scattering length density (Å⁻²).
    pub x_sld: Sld,
    /// Thickness in nm; `0.0` marks a semi-infinite slab.
    pub thickness: f64,
    /// RMS roughness of the top interface in nm; `0.0` means sharp.
    pub sigma: f64,
}

impl Slab {
    /// Create a slab.
    #[must_use]
    pub fn new(name: impl Into<String>, n_sld: Sld, x_sld: Sld, thickness: f64, sigma: f64) -> Self {
        Self {
            name: name.into(),
            n_sld,
            x_sld,
            thickness,
            sigma,
        }
    }

    /// The SLD appropriate for the given radiation.
    #[must_use]
    pub fn sld_for(&self, radiation: Radiation) -> Sld {
        match radiation {
            Radiation::Neutron => self.n_sld,
            Radiation::Xray => self.x_sld,
        }
    }
}

impl fmt::Display for Slab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slab(name='{}', n_sld={}, x_sld={}, thickness={} nm, sigma={} nm)",
            self.name, self.n_sld, self.x_sld, self.thickness, self.sigma
        )
    }
}

/// Layer stack described by slabs, starting with the ambient medium and
/// ending with the substrate.
///
/// The hurst exponent and lateral correlation length are shared by every
/// rough interface in the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabStack {
    /// The slabs, ambient first.
    pub slabs: Vec<Slab>,
    /// Hurst exponent for all rough interfaces.
    pub hurst: f64,
    /// Lateral correlation length in nm for all rough interfaces.
    pub corr_length: f64,
}

impl SlabStack {
    /// Default hurst exponent.
    pub const DEFAULT_HURST: f64 = 0.3;
    /// Default lateral correlation length in nm.
    pub const DEFAULT_CORR_LENGTH: f64 = 500.0;

    /// Create a stack with the default roughness parameters.
    #[must_use]
    pub fn new(slabs: Vec<Slab>) -> Self {
        Self {
            slabs,
            hurst: Self::DEFAULT_HURST,
            corr_length: Self::DEFAULT_CORR_LENGTH,
        }
    }

    /// Override the shared roughness parameters.
    #[must_use]
    pub fn with_roughness_params(mut self, hurst: f64, corr_length: f64) -> Self {
        self.hurst = hurst;
        self.corr_length = corr_length;
        self
    }

    /// Check the stack invariants: at least ambient and substrate, and
    /// unique slab names.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooFewSlabs`] or [`ModelError::DuplicateSlabName`].
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.slabs.len() < 2 {
            return Err(ModelError::TooFewSlabs(self.slabs.len()));
        }
        let mut seen: Vec<&str> = Vec::with_capacity(self.slabs.len());
        for slab in &self.slabs {
            if seen.contains(&slab.name.as_str()) {
                return Err(ModelError::DuplicateSlabName(slab.name.clone()));
            }
            seen.push(&slab.name);
        }
        Ok(())
    }

    /// Resolve the slabs into layers for the given radiation.
    ///
    /// Each slab becomes a layer of its named material; slabs with
    /// `sigma > 0` get a top-interface roughness built from the stack's
    /// shared hurst/correlation parameters.
    ///
    /// # Errors
    ///
    /// Fails when [`validate`](Self::validate) fails.
    pub fn resolve_layers(&self, radiation: Radiation) -> Result<Vec<Layer>, ModelError> {
        self.validate()?;
        let mut output = Vec::with_capacity(self.slabs.len());
        for slab in &self.slabs {
            let sld = slab.sld_for(radiation);
            let material = Material::by_sld(slab.name.clone(), sld.re, sld.im);
            let mut layer = if slab.thickness == 0.0 {
                Layer::semi_infinite(material)
            } else {
                Layer::new(material, slab.thickness)
            };
            if slab.sigma != 0.0 {
                layer = layer.with_roughness(Roughness::new(slab.sigma, self.hurst, self.corr_length));
            }
            output.push(layer);
        }
        debug!(slabs = output.len(), radiation = ?radiation, "resolved slab stack");
        Ok(output)
    }

    /// Append the resolved layers to an existing multilayer.
    ///
    /// # Errors
    ///
    /// Fails when [`validate`](Self::validate) fails.
    pub fn add_to(&self, multilayer: &mut Multilayer, radiation: Radiation) -> Result<(), ModelError> {
        for layer in self.resolve_layers(radiation)? {
            multilayer.add_layer(layer);
        }
        Ok(())
    }

    /// Build a multilayer from this stack alone.
    ///
    /// # Errors
    ///
    /// Fails when [`validate`](Self::validate) fails.
    pub fn to_multilayer(&self, radiation: Radiation) -> Result<Multilayer, ModelError> {
        let mut multilayer = Multilayer::new();
        self.add_to(&mut multilayer, radiation)?;
        Ok(multilayer)
    }
}

impl fmt::Display for SlabStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SlabStack(")?;
        writeln!(f, "    slabs=[")?;
        for slab in &self.slabs {
            writeln!(
                f,
                "        Slab({:>16}, {:>20}, {:>20}, {:>10} nm, {:>10} nm),",
                format!("'{}'", slab.name),
                slab.n_sld.to_string(),
                slab.x_sld.to_string(),
                slab.thickness,
                slab.sigma
            )?;
        }
        write!(
            f,
            "    ], hurst={}, corr_length={} nm)",
            self.hurst, self.corr_length
        )
    }
}

/// A [`Sample`] backed by a slab description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabSample {
    /// The slab stack describing the layers.
    pub stack: SlabStack,
    /// Which SLD set to resolve with.
    pub radiation: Radiation,
}

impl SlabSample {
    /// Create a slab-backed sample.
    #[must_use]
    pub fn new(stack: SlabStack, radiation: Radiation) -> Self {
        Self { stack, radiation }
    }
}

impl Sample for SlabSample {
    fn multilayer(&self) -> Result<Multilayer, ModelError> {
        self.stack.to_multilayer(self.radiation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_stack() -> SlabStack {
        SlabStack::new(vec![
            Slab::new("ambient", Sld::ZERO, Sld::ZERO, 0.0, 0.0),
            Slab::new("layer1", Sld::new(3e-6, 0.0), Sld::new(2.0e-5, 3e-8), 8.0, 0.6),
            Slab::new("layer2", Sld::new(5e-6, 0.0), Sld::new(2.3e-5, 3e-8), 12.0, 0.0),
            Slab::new("substrate", Sld::new(2e-6, 0.0), Sld::new(4e-5, 3e-8), 0.0, 1.1),
        ])
    }

    #[test]
    fn test_validate_requires_two_slabs() {
        let stack = SlabStack::new(vec![Slab::new("only", Sld::ZERO, Sld::ZERO, 0.0, 0.0)]);
        assert_eq!(stack.validate(), Err(ModelError::TooFewSlabs(1)));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let stack = SlabStack::new(vec![
            Slab::new("ambient", Sld::ZERO, Sld::ZERO, 0.0, 0.0),
            Slab::new("film", Sld::new(3e-6, 0.0), Sld::ZERO, 8.0, 0.0),
            Slab::new("film", Sld::new(5e-6, 0.0), Sld::ZERO, 4.0, 0.0),
        ]);
        assert_eq!(
            stack.validate(),
            Err(ModelError::DuplicateSlabName("film".to_string()))
        );
    }

    #[test]
    fn test_resolve_selects_neutron_sld() {
        let layers = example_stack().resolve_layers(Radiation::Neutron).unwrap();
        match layers[1].material.kind {
            crate::material::MaterialKind::Sld(sld) => assert_eq!(sld.re, 3e-6),
            _ => panic!("expected SLD material"),
        }
    }

    #[test]
    fn test_resolve_selects_xray_sld() {
        let layers = example_stack().resolve_layers(Radiation::Xray).unwrap();
        match layers[1].material.kind {
            crate::material::MaterialKind::Sld(sld) => {
                assert_eq!(sld.re, 2.0e-5);
                assert_eq!(sld.im, 3e-8);
            }
            _ => panic!("expected SLD material"),
        }
    }

    #[test]
    fn test_resolve_marks_zero_thickness_semi_infinite() {
        let layers = example_stack().resolve_layers(Radiation::Neutron).unwrap();
        assert_eq!(layers[0].thickness, 0.0);
        assert_eq!(layers[1].thickness, 8.0);
        assert_eq!(layers[3].thickness, 0.0);
    }

    #[test]
    fn test_resolve_attaches_roughness_only_for_nonzero_sigma() {
        let layers = example_stack().resolve_layers(Radiation::Neutron).unwrap();
        assert!(layers[0].roughness.is_none());
        assert_eq!(
            layers[1].roughness,
            Some(Roughness::new(0.6, SlabStack::DEFAULT_HURST, SlabStack::DEFAULT_CORR_LENGTH))
        );
        assert!(layers[2].roughness.is_none());
        assert!(layers[3].roughness.is_some());
    }

    #[test]
    fn test_roughness_params_shared_from_stack() {
        let stack = example_stack().with_roughness_params(0.8, 250.0);
        let layers = stack.resolve_layers(Radiation::Neutron).unwrap();
        let roughness = layers[1].roughness.unwrap();
        assert_eq!(roughness.hurst, 0.8);
        assert_eq!(roughness.corr_length, 250.0);
    }

    #[test]
    fn test_slab_sample_builds_multilayer() {
        let sample = SlabSample::new(example_stack(), Radiation::Neutron);
        let ml = sample.multilayer().unwrap();
        assert_eq!(ml.len(), 4);
        assert!(sample.use_average_materials());
    }

    #[test]
    fn test_display_lists_every_slab() {
        let text = example_stack().to_string();
        assert!(text.contains("'ambient'"));
        assert!(text.contains("'substrate'"));
        assert!(text.contains("hurst=0.3"));
        assert!(text.contains("corr_length=500 nm"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let stack = example_stack();
        let bytes = rmp_serde::to_vec(&stack).unwrap();
        let restored: SlabStack = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(stack, restored);
    }
}
