// =============================================================================
// Monte Carlo Reference Distribution
// =============================================================================
//
// Builds the sampling distribution of X² under the null hypothesis by brute
// force:
//
//     repeat `trials` times:
//         draw n digits from the law        (simulate_one)
//         compute X² against n × P(d)       (compute_statistic)
//
// RANDOM STREAMS
// --------------
// Every trial gets its own ChaCha8 stream: same 64-bit seed, stream number =
// trial index. Consequences:
//   - trials never share an RNG, so they can run on the rayon pool
//   - trial t produces the same draws whether we run serially or in parallel
//   - a fixed seed reproduces the whole distribution bit for bit
//
// Without a seed we take one from OS entropy, once per call.
//
// =============================================================================

use ndarray::Array1;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use super::compute_statistic;
use crate::digits::NUM_DIGITS;
use crate::error::{BenfordError, Result};
use crate::frequency::FrequencyTable;
use crate::law::{expected_counts, probability_table};

/// Number of trials used when none is given.
pub const DEFAULT_TRIALS: usize = 10_000;

// =============================================================================
// Configuration
// =============================================================================

/// Options for building the simulated reference distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloConfig {
    /// Number of simulated samples.
    /// Default: 10,000
    pub trials: usize,

    /// Seed for the random streams. `None` draws one from OS entropy.
    /// Default: None
    pub seed: Option<u64>,

    /// Run trials on the rayon thread pool.
    /// The result is identical either way for a fixed seed.
    /// Default: true
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

// =============================================================================
// Sampling
// =============================================================================

fn law_sampler() -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(probability_table())
        .map_err(|e| BenfordError::InvalidArgument(format!("digit law weights rejected: {}", e)))
}

fn draw_table<R: Rng + ?Sized>(n: usize, sampler: &WeightedIndex<f64>, rng: &mut R) -> FrequencyTable {
    // WeightedIndex yields category 0..9, i.e. digit - 1
    let mut counts = [0u64; NUM_DIGITS];
    for _ in 0..n {
        counts[sampler.sample(rng)] += 1;
    }
    FrequencyTable::from(counts)
}

fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

/// Draw `n` leading digits from the law and tabulate them.
///
/// Pass a seeded RNG for reproducible draws.
///
/// # Errors
/// `InvalidArgument` if `n` is 0.
pub fn simulate_one<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<FrequencyTable> {
    if n == 0 {
        return Err(BenfordError::InvalidArgument(
            "sample size must be positive".to_string(),
        ));
    }
    let sampler = law_sampler()?;
    Ok(draw_table(n, &sampler, rng))
}

/// Simulated X² values for `config.trials` samples of size `n`, in trial order.
///
/// # Errors
/// `InvalidArgument` if `n` or `config.trials` is 0. Checked before any
/// sampling happens.
pub fn simulate_distribution(n: usize, config: &MonteCarloConfig) -> Result<Array1<f64>> {
    if n == 0 {
        return Err(BenfordError::InvalidArgument(
            "sample size must be positive".to_string(),
        ));
    }
    if config.trials == 0 {
        return Err(BenfordError::InvalidArgument(
            "number of trials must be positive".to_string(),
        ));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let sampler = law_sampler()?;
    let expected = expected_counts(n)?;

    debug!(
        n,
        trials = config.trials,
        seed,
        parallel = config.parallel,
        "simulating chi-square reference distribution"
    );

    let run_trial = |trial: usize| -> Result<f64> {
        let mut rng = trial_rng(seed, trial);
        let table = draw_table(n, &sampler, &mut rng);
        compute_statistic(table.counts(), &expected)
    };

    let statistics: Vec<f64> = if config.parallel {
        (0..config.trials).into_par_iter().map(run_trial).collect::<Result<Vec<f64>>>()?
    } else {
        (0..config.trials).map(run_trial).collect::<Result<Vec<f64>>>()?
    };

    let simulated = Array1::from_vec(statistics);
    debug!(
        n,
        trials = config.trials,
        mean = simulated.mean().unwrap_or(f64::NAN),
        "simulation finished"
    );
    Ok(simulated)
}

/// Shorthand for a seeded run with an explicit trial count.
pub fn simulate_distribution_seeded(n: usize, trials: usize, seed: u64) -> Result<Array1<f64>> {
    let config = MonteCarloConfig::default().with_trials(trials).with_seed(seed);
    simulate_distribution(n, &config)
}

// =============================================================================
// Tests
// =============================================================================
