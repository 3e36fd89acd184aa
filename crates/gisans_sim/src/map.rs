//! Detector intensity maps.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A rectangle of detector pixels: `[x0, x1) × [y0, y1)`.
///
/// Pixel `(0, 0)` is the lower-left detector corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x0: u32,
    /// Bottom edge (inclusive).
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Top edge (exclusive).
    pub y1: u32,
}

impl PixelRect {
    /// Create a pixel rectangle.
    #[must_use]
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// A detector image: intensities on a rectangular pixel grid.
///
/// Stored row-major with row `y = 0` at the bottom, matching detector-local
/// coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityMap {
    n_x: u32,
    n_y: u32,
    data: Vec<f64>,
}

impl IntensityMap {
    /// Create a zero-filled map.
    #[must_use]
    pub fn new(n_x: u32, n_y: u32) -> Self {
        Self {
            n_x,
            n_y,
            data: vec![0.0; (n_x as usize) * (n_y as usize)],
        }
    }

    /// Create a map filled with a constant value.
    #[must_use]
    pub fn constant(n_x: u32, n_y: u32, value: f64) -> Self {
        Self {
            n_x,
            n_y,
            data: vec![value; (n_x as usize) * (n_y as usize)],
        }
    }

    /// Wrap existing row-major data into a map.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataLength`] when the data length does not match
    /// the dimensions.
    pub fn from_vec(n_x: u32, n_y: u32, data: Vec<f64>) -> Result<Self, SimError> {
        if data.len() != (n_x as usize) * (n_y as usize) {
            return Err(SimError::DataLength {
                len: data.len(),
                n_x,
                n_y,
            });
        }
        Ok(Self { n_x, n_y, data })
    }

    /// Horizontal pixel count.
    #[must_use]
    pub fn n_x(&self) -> u32 {
        self.n_x
    }

    /// Vertical pixel count.
    #[must_use]
    pub fn n_y(&self) -> u32 {
        self.n_y
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.n_x as usize) + (x as usize)
    }

    /// Intensity at pixel `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Set the intensity at pixel `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    /// Add a constant to every pixel.
    pub fn add_constant(&mut self, value: f64) {
        for v in &mut self.data {
            *v += value;
        }
    }

    /// Zero every pixel inside `rect` (clipped to the map).
    pub fn zero_rect(&mut self, rect: PixelRect) {
        let x1 = rect.x1.min(self.n_x);
        let y1 = rect.y1.min(self.n_y);
        for y in rect.y0.min(y1)..y1 {
            for x in rect.x0.min(x1)..x1 {
                let i = self.index(x, y);
                self.data[i] = 0.0;
            }
        }
    }

    /// Copy out the sub-map covered by `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRoi`] when the rectangle is empty or
    /// exceeds the map.
    pub fn crop(&self, rect: PixelRect) -> Result<Self, SimError> {
        if rect.x0 >= rect.x1 || rect.y0 >= rect.y1 || rect.x1 > self.n_x || rect.y1 > self.n_y {
            return Err(SimError::InvalidRoi);
        }
        let mut out = Self::new(rect.width(), rect.height());
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                out.set(x - rect.x0, y - rect.y0, self.get(x, y));
            }
        }
        Ok(out)
    }

    /// Sum of all pixel intensities.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// The raw row-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
