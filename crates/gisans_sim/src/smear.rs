//! Detector-space resolution smearing.
//!
//! Fast resolution trades the weighted sub-simulations of a binned
//! distribution for a single simulation smeared in detector space. Angular
//! distributions map to one-dimensional pixel kernels convolved along the
//! matching detector axis; a wavelength distribution rescales the image
//! radially around the direct-beam position.

use gisans_instrument::{Distribution1D, RectangularDetector};

use crate::map::IntensityMap;

/// Detector axis a kernel is applied along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Along pixel rows.
    Horizontal,
    /// Along pixel columns.
    Vertical,
}

/// A one-dimensional convolution kernel over pixel offsets.
///
/// Tap `i` applies to pixel offset `i - center`; weights sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    weights: Vec<f64>,
    center: usize,
}

impl Kernel1D {
    fn identity() -> Self {
        Self {
            weights: vec![1.0],
            center: 0,
        }
    }

    /// The kernel taps.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Index of the zero-offset tap.
    #[must_use]
    pub fn center(&self) -> usize {
        self.center
    }
}

/// Build the pixel kernel for an angular distribution around `center_angle`.
///
/// The angle subtended by pixel offset `k` is `atan2(k * pitch, distance)`;
/// each tap is weighted by the distribution density at that angle. A
/// distribution narrower than one pixel collapses to the identity kernel.
#[must_use]
pub fn angular_kernel(
    detector: &RectangularDetector,
    distribution: &Distribution1D,
    center_angle: f64,
    axis: Axis,
) -> Kernel1D {
    let pitch = match axis {
        Axis::Horizontal => detector.pixel_width(),
        Axis::Vertical => detector.pixel_height(),
    };
    let distance = detector.distance();
    if pitch <= 0.0 || distance <= 0.0 {
        return Kernel1D::identity();
    }

    let (lo, hi) = distribution.support();
    let offset_px = |angle: f64| distance * (angle - center_angle).tan() / pitch;
    let k_min = (offset_px(lo).floor() as i64).min(0);
    let k_max = (offset_px(hi).ceil() as i64).max(0);

    let mut weights = Vec::with_capacity((k_max - k_min + 1) as usize);
    for k in k_min..=k_max {
        let angle = center_angle + (k as f64 * pitch).atan2(distance);
        weights.push(distribution.density(angle));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Kernel1D::identity();
    }
    for w in &mut weights {
        *w /= total;
    }
    Kernel1D {
        weights,
        center: (-k_min) as usize,
    }
}

/// Convolve a map with a pixel kernel along one axis.
///
/// At the detector edges the kernel is renormalized over its in-bounds taps,
/// so a uniform field stays uniform.
#[must_use]
pub fn convolve(map: &IntensityMap, kernel: &Kernel1D, axis: Axis) -> IntensityMap {
    if kernel.weights.len() == 1 {
        return map.clone();
    }
    let (n_x, n_y) = (map.n_x(), map.n_y());
    let mut out = IntensityMap::new(n_x, n_y);
    for y in 0..n_y {
        for x in 0..n_x {
            let mut value = 0.0;
            let mut in_bounds = 0.0;
            for (i, w) in kernel.weights.iter().enumerate() {
                let offset = i as i64 - kernel.center as i64;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (x as i64 + offset, y as i64),
                    Axis::Vertical => (x as i64, y as i64 + offset),
                };
                if sx < 0 || sy < 0 || sx >= n_x as i64 || sy >= n_y as i64 {
                    continue;
                }
                value += w * map.get(sx as u32, sy as u32);
                in_bounds += w;
            }
            if in_bounds > 0.0 {
                out.set(x, y, value / in_bounds);
            }
        }
    }
    out
}

/// Number of wavelength samples blended in [`wavelength_rescale`].
const WAVELENGTH_SAMPLES: u32 = 11;

/// Smear a map for a wavelength distribution around `wavelength`.
///
/// For small scattering angles the detector position of a feature scales
/// linearly with wavelength, so each sampled wavelength contributes the
/// image rescaled by `sample / wavelength` around the direct-beam pixel.
/// The blend is renormalized to conserve the total intensity.
#[must_use]
pub fn wavelength_rescale(
    map: &IntensityMap,
    detector: &RectangularDetector,
    distribution: &Distribution1D,
    wavelength: f64,
) -> IntensityMap {
    if wavelength <= 0.0 {
        return map.clone();
    }
    let samples = distribution.sample(WAVELENGTH_SAMPLES);
    if samples.is_empty() {
        return map.clone();
    }

    // Direct-beam position in pixel coordinates.
    let cx = detector.u0 / detector.pixel_width() - 0.5;
    let cy = detector.v0 / detector.pixel_height() - 0.5;

    let mut out = IntensityMap::new(map.n_x(), map.n_y());
    for sample in &samples {
        let scale = sample.value / wavelength;
        if scale <= 0.0 {
            continue;
        }
        for y in 0..map.n_y() {
            for x in 0..map.n_x() {
                let sx = (f64::from(x) - cx) / scale + cx;
                let sy = (f64::from(y) - cy) / scale + cy;
                let value = bilinear(map, sx, sy);
                if value != 0.0 {
                    out.set(x, y, out.get(x, y) + sample.weight * value);
                }
            }
        }
    }

    let total_out = out.total();
    if total_out > 0.0 {
        let factor = map.total() / total_out;
        for y in 0..map.n_y() {
            for x in 0..map.n_x() {
                out.set(x, y, out.get(x, y) * factor);
            }
        }
    }
    out
}

fn bilinear(map: &IntensityMap, x: f64, y: f64) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let mut value = 0.0;
    for (dx, wx) in [(0.0, 1.0 - fx), (1.0, fx)] {
        for (dy, wy) in [(0.0, 1.0 - fy), (1.0, fy)] {
            let w = wx * wy;
            if w > 0.0 {
                value += w * pixel_or_zero(map, x0 + dx, y0 + dy);
            }
        }
    }
    value
}

fn pixel_or_zero(map: &IntensityMap, x: f64, y: f64) -> f64 {
    if x < 0.0 || y < 0.0 {
        return 0.0;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= map.n_x() || y >= map.n_y() {
        return 0.0;
    }
    map.get(x, y)
}
