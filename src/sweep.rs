//! Loss-sweep runner: repeated tree builds, counting, and aggregation.
//!
//! For every loss value the pipeline regenerates the encoded state, rebuilds
//! the probability tree, counts a Monte Carlo batch through the loss-aware
//! counter, and aggregates rates; the repetitions give a mean and standard
//! deviation per loss point. Each repetition owns its RNG and accumulators,
//! so repetitions shard across threads when the `parallel` feature is enabled
//! and merge by simple collection.

use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::aggregate::{logical_error_rates, mean_std};
use crate::code::StabilizerCode;
use crate::configurations::enumerate_configurations;
use crate::error::SimError;
use crate::interfaces::{
    DensityMatrixGenerator, DirectTransmissionBaseline, GraphTag, LossAwareCounter,
    NoiseParameters,
};
use crate::operators::{build_projector_pattern, ProjectorPattern};
use crate::tree::ProbabilityTree;

/// Parameters for one loss sweep.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// The stabilizer code under test.
    pub code: StabilizerCode,
    /// Noise and measurement-rotation parameters.
    pub noise: NoiseParameters,
    /// Graph topology handed to the state generator and the counter.
    pub graph: GraphTag,
    /// Per-photon loss probabilities to sweep.
    pub loss_values: Vec<f64>,
    /// Monte Carlo samples per tree build.
    pub monte_steps: usize,
    /// Independent tree rebuilds per loss value.
    pub rebuilds: usize,
    /// Base RNG seed; every rebuild derives its own stream from it.
    pub seed: u64,
}

/// Aggregated rates for one loss value.
#[derive(Debug, Clone)]
pub struct LossSweepPoint {
    /// Per-photon loss probability.
    pub loss: f64,
    /// Mean corrected logical error rate across rebuilds.
    pub mean_corrected: f64,
    /// Standard deviation of the corrected rate.
    pub std_corrected: f64,
    /// Mean uncorrected error rate across rebuilds.
    pub mean_uncorrected: f64,
    /// Standard deviation of the uncorrected rate.
    pub std_uncorrected: f64,
    /// Direct-transmission (estimate, standard deviation), when requested.
    pub baseline: Option<(f64, f64)>,
}

/// One rebuild: fresh state, fresh tree, one counted batch, aggregated rates.
fn rebuild_rates<G, C>(
    config: &RunConfig,
    pattern: &ProjectorPattern,
    configurations: &[String],
    generator: &G,
    counter: &C,
    loss: f64,
    stream: u64,
) -> Result<(f64, f64), SimError>
where
    G: DensityMatrixGenerator + Sync,
    C: LossAwareCounter + Sync,
{
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(stream.wrapping_mul(7919)));
    let num_photons = config.code.num_qubits() - 1;
    let rho = generator.generate(config.graph, &config.noise, num_photons)?;
    let tree = ProbabilityTree::build(pattern, &rho, configurations)?;
    let counted = counter.count(
        &tree,
        &config.code,
        loss,
        config.graph,
        config.monte_steps,
        &mut rng,
    )?;
    Ok(logical_error_rates(
        &counted.error_cooccurrence,
        &counted.syndrome_counts,
        counted.effective_steps,
    ))
}

fn sweep_inner<G, C>(
    config: &RunConfig,
    generator: &G,
    counter: &C,
    baseline: Option<&dyn DirectTransmissionBaseline>,
) -> Result<Vec<LossSweepPoint>, SimError>
where
    G: DensityMatrixGenerator + Sync,
    C: LossAwareCounter + Sync,
{
    let configurations = enumerate_configurations(config.code.num_qubits())?;
    let basis = config.code.basis_assignment();
    let pattern = build_projector_pattern(&basis, config.noise.theta, config.noise.axis);

    let mut points = Vec::with_capacity(config.loss_values.len());
    for (loss_index, &loss) in config.loss_values.iter().enumerate() {
        let run = |rebuild: usize| {
            let stream = (loss_index * config.rebuilds + rebuild) as u64;
            rebuild_rates(
                config,
                &pattern,
                &configurations,
                generator,
                counter,
                loss,
                stream,
            )
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<(f64, f64), SimError>> =
            (0..config.rebuilds).into_par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<(f64, f64), SimError>> =
            (0..config.rebuilds).map(run).collect();

        let mut corrected = Vec::with_capacity(config.rebuilds);
        let mut uncorrected = Vec::with_capacity(config.rebuilds);
        for outcome in outcomes {
            let (c, u) = outcome?;
            corrected.push(c);
            uncorrected.push(u);
        }

        let (mean_corrected, std_corrected) = mean_std(&corrected);
        let (mean_uncorrected, std_uncorrected) = mean_std(&uncorrected);
        let baseline_point = match baseline {
            Some(b) => Some(b.estimate(&config.noise, loss)?),
            None => None,
        };

        log::info!(
            "loss {:.3}: corrected {:.4} ± {:.4}, uncorrected {:.4} ± {:.4}",
            loss,
            mean_corrected,
            std_corrected,
            mean_uncorrected,
            std_uncorrected
        );

        points.push(LossSweepPoint {
            loss,
            mean_corrected,
            std_corrected,
            mean_uncorrected,
            std_uncorrected,
            baseline: baseline_point,
        });
    }
    Ok(points)
}

/// Run a loss sweep and report aggregated rates per loss value.
pub fn run_loss_sweep<G, C>(
    config: &RunConfig,
    generator: &G,
    counter: &C,
) -> Result<Vec<LossSweepPoint>, SimError>
where
    G: DensityMatrixGenerator + Sync,
    C: LossAwareCounter + Sync,
{
    sweep_inner(config, generator, counter, None)
}

/// Run a loss sweep alongside a direct-transmission comparison curve.
pub fn run_loss_sweep_with_baseline<G, C>(
    config: &RunConfig,
    generator: &G,
    counter: &C,
    baseline: &dyn DirectTransmissionBaseline,
) -> Result<Vec<LossSweepPoint>, SimError>
where
    G: DensityMatrixGenerator + Sync,
    C: LossAwareCounter + Sync,
{
    sweep_inner(config, generator, counter, Some(baseline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TRIVIAL_SYNDROME;
    use crate::interfaces::CountedSamples;
    use crate::matrix::Matrix;
    use crate::operators::RotationAxis;
    use crate::sampler::{sample_outcome, syndrome_key, ZeroLossCounter};
    use rand::Rng;

    /// Identity-mixture state: the maximally mixed density matrix.
    struct MixedStateGenerator;

    impl DensityMatrixGenerator for MixedStateGenerator {
        fn generate(
            &self,
            _graph: GraphTag,
            _noise: &NoiseParameters,
            num_photons: usize,
        ) -> Result<Matrix, SimError> {
            let dim = 4usize.pow((num_photons + 1) as u32);
            Ok(Matrix::identity(dim).scaled(1.0 / dim as f64))
        }
    }

    /// Erasure model: a sample with any lost photon has no usable syndrome
    /// and is filed under the trivial key.
    struct ErasureCounter;

    impl LossAwareCounter for ErasureCounter {
        fn count<R: Rng>(
            &self,
            tree: &ProbabilityTree,
            code: &StabilizerCode,
            loss_probability: f64,
            _graph: GraphTag,
            target_steps: usize,
            rng: &mut R,
        ) -> Result<CountedSamples, SimError> {
            let photons = code.num_qubits() - 1;
            let keep = (1.0 - loss_probability).powi(photons as i32);
            let mut counted = CountedSamples::default();
            for _ in 0..target_steps {
                if rng.gen::<f64>() < keep {
                    let sample = sample_outcome(tree, code, rng)?;
                    let key = syndrome_key(&sample.syndrome);
                    *counted.syndrome_counts.entry(key.clone()).or_insert(0) += 1;
                    let errors = counted.error_cooccurrence.entry(key).or_insert(0);
                    if sample.logical < 0 {
                        *errors += 1;
                    }
                } else {
                    let key = TRIVIAL_SYNDROME.to_string();
                    *counted.syndrome_counts.entry(key.clone()).or_insert(0) += 1;
                    *counted.error_cooccurrence.entry(key).or_insert(0) += 1;
                }
            }
            counted.effective_steps = target_steps as u64;
            Ok(counted)
        }
    }

    fn base_config(logical: &str) -> RunConfig {
        RunConfig {
            code: StabilizerCode::new(&["XXX", "ZZI"], logical).unwrap(),
            noise: NoiseParameters {
                theta: 0.0,
                axis: RotationAxis::Z,
                ..NoiseParameters::default()
            },
            graph: GraphTag::StarMiddle,
            loss_values: vec![0.0],
            monte_steps: 10_000,
            rebuilds: 3,
            seed: 42,
        }
    }

    #[test]
    fn lossless_sweep_of_qubit_zero_logical_has_no_errors() {
        // Logical "ZII" reads only the pinned qubit-0 reference, so the
        // logical value is always +1 and both rates vanish.
        let config = base_config("ZII");
        let points = run_loss_sweep(&config, &MixedStateGenerator, &ZeroLossCounter).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].mean_corrected.abs() < 1e-12);
        assert!(points[0].mean_uncorrected.abs() < 1e-12);
        assert!(points[0].baseline.is_none());
    }

    #[test]
    fn syndrome_determined_logical_corrects_fully() {
        // With the maximally mixed state the photon outcomes are uniform and
        // "ZZZ" is fixed by the syndrome, so correction removes the whole
        // uncorrected rate of one half.
        let config = base_config("ZZZ");
        let points = run_loss_sweep(&config, &MixedStateGenerator, &ZeroLossCounter).unwrap();
        let point = &points[0];
        assert!(
            point.mean_corrected < 0.05,
            "corrected rate {} should vanish",
            point.mean_corrected
        );
        assert!(
            (point.mean_uncorrected - 0.5).abs() < 0.05,
            "uncorrected rate {} should be one half",
            point.mean_uncorrected
        );
    }

    #[test]
    fn sweep_is_deterministic_for_a_fixed_seed() {
        let config = base_config("ZZZ");
        let first = run_loss_sweep(&config, &MixedStateGenerator, &ZeroLossCounter).unwrap();
        let second = run_loss_sweep(&config, &MixedStateGenerator, &ZeroLossCounter).unwrap();
        assert_eq!(first[0].mean_corrected, second[0].mean_corrected);
        assert_eq!(first[0].mean_uncorrected, second[0].mean_uncorrected);
    }

    #[test]
    fn corrected_error_grows_with_loss() {
        let mut config = base_config("ZZZ");
        config.loss_values = vec![0.0, 0.16, 0.32, 0.48, 0.64, 0.8];
        config.monte_steps = 4_000;
        let points = run_loss_sweep(&config, &MixedStateGenerator, &ErasureCounter).unwrap();
        for pair in points.windows(2) {
            let band = pair[0].std_corrected + pair[1].std_corrected + 1e-9;
            assert!(
                pair[1].mean_corrected >= pair[0].mean_corrected - band,
                "corrected rate fell from {} to {} between loss {} and {}",
                pair[0].mean_corrected,
                pair[1].mean_corrected,
                pair[0].loss,
                pair[1].loss
            );
        }
        assert!(points.last().unwrap().mean_corrected > points[0].mean_corrected);
    }

    #[test]
    fn baseline_curve_is_attached_when_requested() {
        struct FlatBaseline;
        impl DirectTransmissionBaseline for FlatBaseline {
            fn estimate(
                &self,
                _noise: &NoiseParameters,
                loss_probability: f64,
            ) -> Result<(f64, f64), SimError> {
                Ok((0.1 + loss_probability / 2.0, 0.01))
            }
        }
        let mut config = base_config("ZZZ");
        config.loss_values = vec![0.0, 0.4];
        config.monte_steps = 500;
        let points = run_loss_sweep_with_baseline(
            &config,
            &MixedStateGenerator,
            &ZeroLossCounter,
            &FlatBaseline,
        )
        .unwrap();
        let (first, first_std) = points[0].baseline.unwrap();
        let (second, second_std) = points[1].baseline.unwrap();
        assert!((first - 0.1).abs() < 1e-12);
        assert!((second - 0.3).abs() < 1e-12);
        assert_eq!(first_std, 0.01);
        assert_eq!(second_std, 0.01);
    }

    #[test]
    fn unsupported_code_size_fails_before_sampling() {
        let mut config = base_config("ZII");
        config.code = StabilizerCode::new(&["XX"], "ZI").unwrap();
        let err = run_loss_sweep(&config, &MixedStateGenerator, &ZeroLossCounter).unwrap_err();
        assert_eq!(err, SimError::UnsupportedSize { qubits: 2 });
    }
}
