//! Layers and multilayer stacks.

use serde::{Deserialize, Serialize};

use crate::layout::ParticleLayout;
use crate::material::Material;

/// Self-affine roughness of a layer's top interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Roughness {
    /// RMS roughness in nm.
    pub sigma: f64,
    /// Hurst exponent of the fractal interface profile.
    pub hurst: f64,
    /// Lateral correlation length in nm.
    pub corr_length: f64,
}

impl Roughness {
    /// Create a roughness description.
    #[must_use]
    pub fn new(sigma: f64, hurst: f64, corr_length: f64) -> Self {
        Self {
            sigma,
            hurst,
            corr_length,
        }
    }
}

/// A single layer in a multilayer stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// The layer material.
    pub material: Material,
    /// Thickness in nm; `0.0` marks a semi-infinite layer.
    pub thickness: f64,
    /// Roughness of the top interface, if any.
    pub roughness: Option<Roughness>,
    /// Particle layouts embedded in this layer.
    pub layouts: Vec<ParticleLayout>,
}

impl Layer {
    /// Create a layer of finite thickness (nm).
    #[must_use]
    pub fn new(material: Material, thickness: f64) -> Self {
        Self {
            material,
            thickness,
            roughness: None,
            layouts: Vec::new(),
        }
    }

    /// Create a semi-infinite layer (ambient or substrate).
    #[must_use]
    pub fn semi_infinite(material: Material) -> Self {
        Self::new(material, 0.0)
    }

    /// Attach a roughness to the top interface.
    #[must_use]
    pub fn with_roughness(mut self, roughness: Roughness) -> Self {
        self.roughness = Some(roughness);
        self
    }

    /// Embed a particle layout in this layer.
    #[must_use]
    pub fn with_layout(mut self, layout: ParticleLayout) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Embed a particle layout in this layer.
    pub fn add_layout(&mut self, layout: ParticleLayout) {
        self.layouts.push(layout);
    }
}

/// An ordered stack of layers, from ambient (top) to substrate (bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multilayer {
    /// The layers, top to bottom.
    pub layers: Vec<Layer>,
}

impl Multilayer {
    /// Create an empty multilayer.
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a layer at the bottom of the stack.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Append a layer with an explicit top-interface roughness.
    pub fn add_layer_with_top_roughness(&mut self, layer: Layer, roughness: Roughness) {
        self.layers.push(layer.with_roughness(roughness));
    }

    /// Append a layer, builder style.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Number of layers in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no layers yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for Multilayer {
    fn default() -> Self {
        Self::new()
    }
}
