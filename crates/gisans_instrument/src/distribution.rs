//! One-dimensional parameter distributions.
//!
//! Distributions are sampled deterministically: `n` equidistant points over
//! the support, weighted by the probability density and renormalized to sum
//! to one. A single-sample request always yields the central value.

use serde::{Deserialize, Serialize};

/// A sampled distribution point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedValue {
    /// The parameter value.
    pub value: f64,
    /// Normalized weight of this value.
    pub weight: f64,
}

/// A one-dimensional probability distribution over a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distribution1D {
    /// Flat distribution between `min` and `max`.
    Gate {
        /// Lower edge.
        min: f64,
        /// Upper edge.
        max: f64,
    },
    /// Trapezoidal distribution: linear rise over `left`, plateau of width
    /// `middle` centred on `center`, linear fall over `right`.
    Trapezoid {
        /// Center of the plateau.
        center: f64,
        /// Width of the rising edge.
        left: f64,
        /// Full width of the plateau.
        middle: f64,
        /// Width of the falling edge.
        right: f64,
    },
    /// Gaussian distribution, sampled over ±2σ.
    Gaussian {
        /// Mean value.
        mean: f64,
        /// Standard deviation.
        std_dev: f64,
    },
}

impl Distribution1D {
    /// The central value of the distribution.
    #[must_use]
    pub fn center(&self) -> f64 {
        match self {
            Distribution1D::Gate { min, max } => 0.5 * (min + max),
            Distribution1D::Trapezoid { center, .. } => *center,
            Distribution1D::Gaussian { mean, .. } => *mean,
        }
    }

    /// The sampled support `(low, high)` of the distribution.
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        match self {
            Distribution1D::Gate { min, max } => (*min, *max),
            Distribution1D::Trapezoid {
                center,
                left,
                middle,
                right,
            } => (center - left - middle / 2.0, center + middle / 2.0 + right),
            Distribution1D::Gaussian { mean, std_dev } => {
                (mean - 2.0 * std_dev, mean + 2.0 * std_dev)
            }
        }
    }

    /// Normalized probability density at `x`.
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        match self {
            Distribution1D::Gate { min, max } => {
                if x < *min || x > *max || max <= min {
                    0.0
                } else {
                    1.0 / (max - min)
                }
            }
            Distribution1D::Trapezoid {
                center,
                left,
                middle,
                right,
            } => {
                let plateau_lo = center - middle / 2.0;
                let plateau_hi = center + middle / 2.0;
                let lo = plateau_lo - left;
                let hi = plateau_hi + right;
                let height = 1.0 / (middle + (left + right) / 2.0);
                if x < lo || x > hi {
                    0.0
                } else if x < plateau_lo {
                    height * (x - lo) / left
                } else if x > plateau_hi {
                    height * (hi - x) / right
                } else {
                    height
                }
            }
            Distribution1D::Gaussian { mean, std_dev } => {
                let t = (x - mean) / std_dev;
                (-0.5 * t * t).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
            }
        }
    }

    /// Sample `n` equidistant points over the support with normalized
    /// weights. `n == 1` yields the central value with weight one; `n == 0`
    /// yields nothing.
    #[must_use]
    pub fn sample(&self, n: u32) -> Vec<WeightedValue> {
        match n {
            0 => Vec::new(),
            1 => vec![WeightedValue {
                value: self.center(),
                weight: 1.0,
            }],
            _ => {
                let (lo, hi) = self.support();
                if hi <= lo {
                    return vec![WeightedValue {
                        value: self.center(),
                        weight: 1.0,
                    }];
                }
                let step = (hi - lo) / f64::from(n - 1);
                let mut points: Vec<WeightedValue> = (0..n)
                    .map(|i| {
                        let value = lo + f64::from(i) * step;
                        WeightedValue {
                            value,
                            weight: self.density(value),
                        }
                    })
                    .collect();
                let total: f64 = points.iter().map(|p| p.weight).sum();
                if total > 0.0 {
                    for p in &mut points {
                        p.weight /= total;
                    }
                }
                points
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_is_center() {
        let gate = Distribution1D::Gate { min: 2.0, max: 4.0 };
        let samples = gate.sample(1);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].value, 3.0);
        assert_eq!(samples[0].weight, 1.0);
    }

    #[test]
    fn test_gate_samples_flat_and_normalized() {
        let gate = Distribution1D::Gate { min: 0.0, max: 1.0 };
        let samples = gate.sample(5);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].value, 0.0);
        assert_eq!(samples[4].value, 1.0);
        let total: f64 = samples.iter().map(|p| p.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        for p in &samples {
            assert!((p.weight - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_triangle_weights_peak_at_center() {
        // Trapezoid with no plateau is a triangle.
        let tri = Distribution1D::Trapezoid {
            center: 0.0,
            left: 1.0,
            middle: 0.0,
            right: 1.0,
        };
        let samples = tri.sample(5);
        let weights: Vec<f64> = samples.iter().map(|p| p.weight).collect();
        assert!((weights[0] - 0.0).abs() < 1e-12);
        assert!((weights[1] - 0.25).abs() < 1e-12);
        assert!((weights[2] - 0.5).abs() < 1e-12);
        assert!((weights[3] - 0.25).abs() < 1e-12);
        assert!((weights[4] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_support_and_plateau_density() {
        let trap = Distribution1D::Trapezoid {
            center: 6.0,
            left: 0.5,
            middle: 1.0,
            right: 0.5,
        };
        assert_eq!(trap.support(), (5.0, 7.0));
        // Area = middle*h + (left+right)*h/2 must be one.
        let h = trap.density(6.0);
        assert!((h * (1.0 + 0.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_samples_symmetric() {
        let gauss = Distribution1D::Gaussian {
            mean: 10.0,
            std_dev: 0.5,
        };
        let samples = gauss.sample(7);
        assert_eq!(samples.len(), 7);
        assert!((samples[0].value - 9.0).abs() < 1e-12);
        assert!((samples[6].value - 11.0).abs() < 1e-12);
        let total: f64 = samples.iter().map(|p| p.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        for i in 0..3 {
            assert!((samples[i].weight - samples[6 - i].weight).abs() < 1e-12);
        }
        assert!(samples[3].weight > samples[2].weight);
    }

    #[test]
    fn test_zero_samples_yield_nothing() {
        let gate = Distribution1D::Gate { min: 0.0, max: 1.0 };
        assert!(gate.sample(0).is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let trap = Distribution1D::Trapezoid {
            center: 0.6,
            left: 0.03,
            middle: 0.0,
            right: 0.03,
        };
        let bytes = rmp_serde::to_vec(&trap).unwrap();
        let restored: Distribution1D = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(trap, restored);
    }
}
