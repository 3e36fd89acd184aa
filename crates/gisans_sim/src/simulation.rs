//! Simulation assembly and post-processing.

use gisans_instrument::{Distribution1D, Experiment, RectangularDetector};
use gisans_model::{Multilayer, Sample};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::beam::{Beam, Direction};
use crate::error::SimError;
use crate::map::{IntensityMap, PixelRect};
use crate::options::{AxisResolution, PolarizationOptions, PolarizationState, ResolutionOptions};
use crate::result::SimulationResult;
use crate::smear::{self, Axis};

/// The beam parameter an instrument resolution acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionTarget {
    /// Incident wavelength.
    BeamWavelength,
    /// Angle of incidence on the sample.
    BeamInclinationAngle,
    /// Azimuthal angle within the sample plane.
    BeamAzimuthalAngle,
}

impl DistributionTarget {
    /// Parameter path understood by the scattering engine.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            DistributionTarget::BeamWavelength => "*/Beam/Wavelength",
            DistributionTarget::BeamInclinationAngle => "*/Beam/InclinationAngle",
            DistributionTarget::BeamAzimuthalAngle => "*/Beam/AzimuthalAngle",
        }
    }
}

/// A beam parameter distribution sampled into weighted sub-simulations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterDistribution {
    /// The parameter the distribution applies to.
    pub target: DistributionTarget,
    /// The distribution over that parameter.
    pub distribution: Distribution1D,
    /// Number of samples drawn from the distribution.
    pub n_samples: u32,
}

/// A beam parameter distribution applied as a detector-space smear instead
/// of sub-simulations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastAxis {
    /// The parameter the distribution applies to.
    pub target: DistributionTarget,
    /// The distribution over that parameter.
    pub distribution: Distribution1D,
}

/// Engine switches carried alongside the physical description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Keep the specular peak in the detector image.
    pub include_specular: bool,
    /// Average out particle materials into their layers.
    pub use_average_materials: bool,
}

/// One concrete beam setting of the sampling plan, with its weight in the
/// final image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamVariant {
    /// Wavelength (nm).
    pub wavelength: f64,
    /// Inclination angle (rad).
    pub alpha: f64,
    /// Azimuthal angle (rad).
    pub phi: f64,
    /// Weight of this variant; weights of a plan sum to one.
    pub weight: f64,
}

/// A complete, serializable description of one GISANS measurement.
///
/// Everything the scattering engine needs is in here: the nominal beam, the
/// detector geometry, the resolved sample multilayer, and the resolution
/// treatment. [`sampling_plan`](Self::sampling_plan) expands the binned
/// distributions into weighted beam variants for the engine to run;
/// [`postprocess`](Self::postprocess) turns the summed raw image into a
/// [`SimulationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringSimulation {
    /// Nominal incident beam.
    pub beam: Beam,
    /// Detector geometry.
    pub detector: RectangularDetector,
    /// Resolved sample multilayer.
    pub sample: Multilayer,
    /// Beam parameter distributions run as sub-simulations.
    pub distributions: Vec<ParameterDistribution>,
    /// Beam parameter distributions applied as detector-space smears.
    pub fast_axes: Vec<FastAxis>,
    /// Constant background added to every pixel, when present.
    pub background: Option<f64>,
    /// Detector region kept in the result.
    pub region_of_interest: Option<PixelRect>,
    /// Detector regions zeroed in the result.
    pub masks: Vec<PixelRect>,
    /// Polarization state of a polarized measurement.
    pub polarization: Option<PolarizationState>,
    /// Engine switches.
    pub options: SimulationOptions,
}

impl ScatteringSimulation {
    /// Expand the binned distributions into weighted beam variants.
    ///
    /// The plan is the cartesian product of all distribution samples applied
    /// to the nominal beam; without distributions it is the nominal beam
    /// alone with weight one.
    #[must_use]
    pub fn sampling_plan(&self) -> Vec<BeamVariant> {
        let mut variants = vec![BeamVariant {
            wavelength: self.beam.wavelength,
            alpha: self.beam.direction.alpha,
            phi: self.beam.direction.phi,
            weight: 1.0,
        }];
        for dist in &self.distributions {
            let samples = dist.distribution.sample(dist.n_samples);
            if samples.is_empty() {
                continue;
            }
            let mut next = Vec::with_capacity(variants.len() * samples.len());
            for variant in &variants {
                for sample in &samples {
                    let mut expanded = *variant;
                    expanded.weight *= sample.weight;
                    match dist.target {
                        DistributionTarget::BeamWavelength => expanded.wavelength = sample.value,
                        DistributionTarget::BeamInclinationAngle => expanded.alpha = sample.value,
                        DistributionTarget::BeamAzimuthalAngle => expanded.phi = sample.value,
                    }
                    next.push(expanded);
                }
            }
            variants = next;
        }
        variants
    }

    /// Post-process the raw detector image produced by the engine.
    ///
    /// Applies the fast smears in their stored order, then the background,
    /// the masks, and finally the region of interest.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DimensionMismatch`] when the image does not match
    /// the detector grid and [`SimError::InvalidRoi`] when the region of
    /// interest is empty or exceeds it.
    pub fn postprocess(&self, raw: IntensityMap) -> Result<SimulationResult, SimError> {
        let detector = self.detector;
        if raw.n_x() != detector.n_x || raw.n_y() != detector.n_y {
            return Err(SimError::DimensionMismatch {
                expected_x: detector.n_x,
                expected_y: detector.n_y,
                got_x: raw.n_x(),
                got_y: raw.n_y(),
            });
        }

        let mut map = raw;
        for fast in &self.fast_axes {
            map = match fast.target {
                DistributionTarget::BeamWavelength => smear::wavelength_rescale(
                    &map,
                    &detector,
                    &fast.distribution,
                    self.beam.wavelength,
                ),
                DistributionTarget::BeamInclinationAngle => {
                    let kernel = smear::angular_kernel(
                        &detector,
                        &fast.distribution,
                        fast.distribution.center(),
                        Axis::Vertical,
                    );
                    smear::convolve(&map, &kernel, Axis::Vertical)
                }
                DistributionTarget::BeamAzimuthalAngle => {
                    let kernel = smear::angular_kernel(
                        &detector,
                        &fast.distribution,
                        fast.distribution.center(),
                        Axis::Horizontal,
                    );
                    smear::convolve(&map, &kernel, Axis::Horizontal)
                }
            };
        }

        if let Some(background) = self.background {
            map.add_constant(background);
        }
        for mask in &self.masks {
            map.zero_rect(*mask);
        }
        let origin = match self.region_of_interest {
            Some(roi) => {
                map = map.crop(roi)?;
                (roi.x0, roi.y0)
            }
            None => (0, 0),
        };
        Ok(SimulationResult::from_detector(
            map, &detector, &self.beam, origin,
        ))
    }
}

/// Combines a sample with an experiment and assembles simulation
/// descriptions from them.
#[derive(Debug, Clone)]
pub struct Simulation<S, E> {
    sample: S,
    experiment: E,
    include_specular: bool,
    polarization: Option<PolarizationOptions>,
    region_of_interest: Option<PixelRect>,
    masks: Vec<PixelRect>,
}

impl<S: Sample, E: Experiment> Simulation<S, E> {
    /// Create a simulation builder for a sample on an instrument.
    pub fn new(sample: S, experiment: E) -> Self {
        Self {
            sample,
            experiment,
            include_specular: true,
            polarization: None,
            region_of_interest: None,
            masks: Vec::new(),
        }
    }

    /// Keep or drop the specular peak.
    #[must_use]
    pub fn with_specular(mut self, include_specular: bool) -> Self {
        self.include_specular = include_specular;
        self
    }

    /// Mark the measurement as polarized with the given flipper settings.
    #[must_use]
    pub fn with_polarization(mut self, polarization: PolarizationOptions) -> Self {
        self.polarization = Some(polarization);
        self
    }

    /// Restrict the result to a detector region.
    #[must_use]
    pub fn with_region_of_interest(mut self, region: PixelRect) -> Self {
        self.region_of_interest = Some(region);
        self
    }

    /// Zero a detector region in the result. May be called repeatedly.
    #[must_use]
    pub fn with_mask(mut self, mask: PixelRect) -> Self {
        self.masks.push(mask);
        self
    }

    /// Assemble the GISANS simulation description for the requested
    /// resolution treatment.
    ///
    /// Binned axes become weighted sub-simulations, fast axes become
    /// detector-space smears; `Binned(0)` and `Off` leave an axis alone.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Model`] when the sample fails to resolve into a
    /// multilayer.
    pub fn gisans(&self, resolution: &ResolutionOptions) -> Result<ScatteringSimulation, SimError> {
        let beam = Beam::new(
            self.experiment.beam_intensity(),
            self.experiment.wavelength(),
            Direction::new(self.experiment.alpha_i(), 0.0),
        );
        let detector = self.experiment.detector();
        let sample = self.sample.multilayer()?;

        let mut distributions = Vec::new();
        let mut fast_axes = Vec::new();
        let axes = [
            (
                resolution.wavelength,
                DistributionTarget::BeamWavelength,
                self.experiment.res_wavelength(),
            ),
            (
                resolution.alpha,
                DistributionTarget::BeamInclinationAngle,
                self.experiment.res_alpha(),
            ),
            (
                resolution.phi,
                DistributionTarget::BeamAzimuthalAngle,
                self.experiment.res_phi(),
            ),
        ];
        for (axis, target, distribution) in axes {
            match axis {
                AxisResolution::Off => {}
                AxisResolution::Binned(n_samples) => {
                    if n_samples > 0 {
                        distributions.push(ParameterDistribution {
                            target,
                            distribution,
                            n_samples,
                        });
                    }
                }
                AxisResolution::Fast => fast_axes.push(FastAxis {
                    target,
                    distribution,
                }),
            }
        }

        let background = self.experiment.background();
        let description = ScatteringSimulation {
            beam,
            detector,
            sample,
            distributions,
            fast_axes,
            background: (background != 0.0).then_some(background),
            region_of_interest: self.region_of_interest,
            masks: self.masks.clone(),
            polarization: self.polarization.map(PolarizationState::from),
            options: SimulationOptions {
                include_specular: self.include_specular,
                use_average_materials: self.sample.use_average_materials(),
            },
        };
        debug!(
            layers = description.sample.len(),
            distributions = description.distributions.len(),
            fast_axes = description.fast_axes.len(),
            "assembled GISANS simulation"
        );
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use gisans_model::{Layer, Material, ModelError};
    use gisans_units::DVec3;

    use super::*;

    struct TestExperiment {
        background: f64,
    }

    impl TestExperiment {
        fn new() -> Self {
            Self { background: 0.0 }
        }
    }

    impl Experiment for TestExperiment {
        fn background(&self) -> f64 {
            self.background
        }

        fn alpha_i(&self) -> f64 {
            0.03
        }

        fn wavelength(&self) -> f64 {
            0.6
        }

        fn detector(&self) -> RectangularDetector {
            // 10 x 10 pixels of 10 mm at 1 m distance; direct beam at the
            // center of pixel (4, 4).
            RectangularDetector::new(10, 100.0e6, 10, 100.0e6).positioned(
                DVec3::new(1.0e9, 0.0, 0.0),
                45.0e6,
                45.0e6,
            )
        }

        fn res_wavelength(&self) -> Distribution1D {
            Distribution1D::Trapezoid {
                center: 0.6,
                left: 0.03,
                middle: 0.0,
                right: 0.03,
            }
        }

        fn res_alpha(&self) -> Distribution1D {
            Distribution1D::Gate {
                min: 0.02,
                max: 0.04,
            }
        }

        fn res_phi(&self) -> Distribution1D {
            // Support of +-0.015 rad covers the direct pixel neighbours.
            Distribution1D::Trapezoid {
                center: 0.0,
                left: 0.01,
                middle: 0.01,
                right: 0.01,
            }
        }
    }

    struct TestSample;

    impl Sample for TestSample {
        fn multilayer(&self) -> Result<Multilayer, ModelError> {
            Ok(Multilayer::new()
                .with_layer(Layer::semi_infinite(Material::vacuum()))
                .with_layer(Layer::semi_infinite(Material::refractive(
                    "Si", 6.0e-6, 2.0e-8,
                ))))
        }
    }

    struct BrokenSample;

    impl Sample for BrokenSample {
        fn multilayer(&self) -> Result<Multilayer, ModelError> {
            Err(ModelError::TooFewSlabs(1))
        }
    }

    #[test]
    fn test_gisans_assembles_nominal_beam_and_detector() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();

        assert_eq!(description.beam.intensity, 1.0);
        assert_eq!(description.beam.wavelength, 0.6);
        assert_eq!(description.beam.direction.alpha, 0.03);
        assert_eq!(description.beam.direction.phi, 0.0);
        assert_eq!(description.detector.n_x, 10);
        assert_eq!(description.sample.len(), 2);
        assert!(description.distributions.is_empty());
        assert!(description.fast_axes.is_empty());
        assert_eq!(description.background, None);
        assert_eq!(description.polarization, None);
        assert!(description.options.include_specular);
        assert!(description.options.use_average_materials);
    }

    #[test]
    fn test_binned_axes_become_distributions_in_order() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let resolution = ResolutionOptions::new(
            AxisResolution::Binned(5),
            AxisResolution::Binned(3),
            AxisResolution::Off,
        );
        let description = sim.gisans(&resolution).unwrap();

        assert_eq!(description.distributions.len(), 2);
        assert_eq!(
            description.distributions[0].target,
            DistributionTarget::BeamWavelength
        );
        assert_eq!(description.distributions[0].n_samples, 5);
        assert_eq!(
            description.distributions[1].target,
            DistributionTarget::BeamInclinationAngle
        );
        assert_eq!(description.distributions[1].n_samples, 3);
        assert!(description.fast_axes.is_empty());
    }

    #[test]
    fn test_binned_zero_leaves_axis_alone() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let resolution = ResolutionOptions::new(
            AxisResolution::Binned(0),
            AxisResolution::Off,
            AxisResolution::Binned(0),
        );
        let description = sim.gisans(&resolution).unwrap();
        assert!(description.distributions.is_empty());
        assert!(description.fast_axes.is_empty());
    }

    #[test]
    fn test_fast_res_fills_fast_axes_in_order() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let description = sim.gisans(&ResolutionOptions::FAST_RES).unwrap();

        assert!(description.distributions.is_empty());
        let targets: Vec<DistributionTarget> =
            description.fast_axes.iter().map(|f| f.target).collect();
        assert_eq!(
            targets,
            vec![
                DistributionTarget::BeamWavelength,
                DistributionTarget::BeamInclinationAngle,
                DistributionTarget::BeamAzimuthalAngle,
            ]
        );
    }

    #[test]
    fn test_background_carried_only_when_nonzero() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();
        assert_eq!(description.background, None);

        let sim = Simulation::new(TestSample, TestExperiment { background: 0.05 });
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();
        assert_eq!(description.background, Some(0.05));
    }

    #[test]
    fn test_polarization_resolved_from_flippers() {
        let sim = Simulation::new(TestSample, TestExperiment::new())
            .with_polarization(PolarizationOptions { f1: true, f2: false });
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();

        let state = description.polarization.unwrap();
        assert_eq!(state.beam_polarization, DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(state.analyzer_direction, DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_model_error_propagates() {
        let sim = Simulation::new(BrokenSample, TestExperiment::new());
        let err = sim.gisans(&ResolutionOptions::NO_RES).unwrap_err();
        assert!(matches!(err, SimError::Model(ModelError::TooFewSlabs(1))));
    }

    #[test]
    fn test_parameter_paths() {
        assert_eq!(
            DistributionTarget::BeamWavelength.path(),
            "*/Beam/Wavelength"
        );
        assert_eq!(
            DistributionTarget::BeamInclinationAngle.path(),
            "*/Beam/InclinationAngle"
        );
        assert_eq!(
            DistributionTarget::BeamAzimuthalAngle.path(),
            "*/Beam/AzimuthalAngle"
        );
    }

    #[test]
    fn test_sampling_plan_without_distributions_is_nominal_beam() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();
        let plan = description.sampling_plan();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].wavelength, 0.6);
        assert_eq!(plan[0].alpha, 0.03);
        assert_eq!(plan[0].phi, 0.0);
        assert_eq!(plan[0].weight, 1.0);
    }

    #[test]
    fn test_sampling_plan_expands_cartesian_product() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let resolution = ResolutionOptions::new(
            AxisResolution::Binned(3),
            AxisResolution::Binned(5),
            AxisResolution::Off,
        );
        let description = sim.gisans(&resolution).unwrap();
        let plan = description.sampling_plan();

        assert_eq!(plan.len(), 15);
        let total: f64 = plan.iter().map(|v| v.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        for variant in &plan {
            assert!(variant.wavelength >= 0.57 && variant.wavelength <= 0.63);
            assert!(variant.alpha >= 0.02 && variant.alpha <= 0.04);
            assert_eq!(variant.phi, 0.0);
        }
    }

    #[test]
    fn test_postprocess_rejects_wrong_dimensions() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();
        let err = description.postprocess(IntensityMap::new(5, 5)).unwrap_err();
        assert!(matches!(
            err,
            SimError::DimensionMismatch {
                expected_x: 10,
                expected_y: 10,
                got_x: 5,
                got_y: 5,
            }
        ));
    }

    #[test]
    fn test_postprocess_background_masks_and_roi() {
        let sim = Simulation::new(TestSample, TestExperiment { background: 0.5 })
            .with_mask(PixelRect::new(4, 4, 6, 6))
            .with_region_of_interest(PixelRect::new(2, 2, 8, 8));
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();

        let raw = IntensityMap::constant(10, 10, 1.0);
        let result = description.postprocess(raw).unwrap();
        let data = result.data();

        assert_eq!(data.n_x(), 6);
        assert_eq!(data.n_y(), 6);
        // Unmasked pixels carry signal plus background, masked pixels zero.
        assert!((data.get(0, 0) - 1.5).abs() < 1e-12);
        assert_eq!(data.get(2, 2), 0.0);
        assert_eq!(data.get(3, 3), 0.0);
        assert!((data.get(4, 4) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_postprocess_rejects_roi_outside_detector() {
        let sim = Simulation::new(TestSample, TestExperiment::new())
            .with_region_of_interest(PixelRect::new(2, 2, 11, 8));
        let description = sim.gisans(&ResolutionOptions::NO_RES).unwrap();
        let err = description
            .postprocess(IntensityMap::new(10, 10))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidRoi));
    }

    #[test]
    fn test_postprocess_fast_phi_spreads_horizontally() {
        let sim = Simulation::new(TestSample, TestExperiment::new());
        let resolution = ResolutionOptions::new(
            AxisResolution::Off,
            AxisResolution::Off,
            AxisResolution::Fast,
        );
        let description = sim.gisans(&resolution).unwrap();

        let mut raw = IntensityMap::new(10, 10);
        raw.set(5, 5, 1.0);
        let result = description.postprocess(raw).unwrap();
        let data = result.data();

        assert!(data.get(5, 5) > 0.0);
        assert!(data.get(4, 5) > 0.0);
        assert!(data.get(6, 5) > 0.0);
        // Vertical neighbours stay untouched by an azimuthal smear.
        assert_eq!(data.get(5, 4), 0.0);
        assert_eq!(data.get(5, 6), 0.0);
        assert!((data.total() - 1.0).abs() < 1e-12);
    }
}
