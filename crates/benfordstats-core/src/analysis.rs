// =============================================================================
// Leading-Digit Analysis
// =============================================================================
//
// Glues the pieces into the single call a report actually makes:
//
//     observations ─► frequency table ─► X² ─┬─► Monte Carlo p-value
//                                            └─► χ²₈ p-value
//
// SIMULATION REUSE
// ----------------
// The reference distribution depends only on (n, trials, seed), not on the
// data. A report that tests population and GDP for the same year (same n)
// or draws a histogram next to the p-value needs the SAME simulation several
// times. `SimulationCache` keeps one copy per configuration and hands out
// `Arc`s to it.
//
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use ndarray::Array1;
use tracing::{debug, warn};

use crate::dataset::{select_column, Column, Panel};
use crate::digits::NUM_DIGITS;
use crate::error::{BenfordError, Result};
use crate::frequency::{build_frequency, FrequencyTable};
use crate::goodness_of_fit::{
    compute_statistic, estimate_pvalue, simulate_distribution, MonteCarloConfig,
    DEGREES_OF_FREEDOM,
};
use crate::inference::{chi2_critical_value, empirical_critical_value, pvalue_chi2, significance_stars};
use crate::law::{expected_counts, probability_table};

/// Rule of thumb for the χ² approximation: every expected count at least 5.
const MIN_EXPECTED_COUNT: f64 = 5.0;

/// True when the sample is too small for the χ² approximation. Digit 9 has
/// the smallest share, so this holds for every n below 110.
fn is_small_sample(expected: &[f64]) -> bool {
    expected.iter().any(|&e| e < MIN_EXPECTED_COUNT)
}

// =============================================================================
// Configuration
// =============================================================================

/// Options for a full analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Reference distribution settings.
    pub monte_carlo: MonteCarloConfig,

    /// Significance level for critical values and the conformity verdict.
    /// Default: 0.05
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            monte_carlo: MonteCarloConfig::default(),
            alpha: 0.05,
        }
    }
}

impl AnalysisConfig {
    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloConfig) -> Self {
        self.monte_carlo = monte_carlo;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

// =============================================================================
// Result Structure
// =============================================================================

/// Everything a report needs about one observation set.
#[derive(Debug, Clone)]
pub struct BenfordAnalysis {
    /// Number of observations
    pub n: usize,
    /// Observed leading-digit counts
    pub frequency: FrequencyTable,
    /// Observed share per digit
    pub proportions: [f64; NUM_DIGITS],
    /// log10(1 + 1/d) per digit
    pub theoretical: [f64; NUM_DIGITS],
    /// n × theoretical
    pub expected: [f64; NUM_DIGITS],
    /// Pearson X² of observed vs expected
    pub statistic: f64,
    /// Simulated X² values under the law, shared with the cache
    pub simulated: Arc<Array1<f64>>,
    /// Share of simulated X² at least as large as `statistic`
    pub pvalue_monte_carlo: f64,
    /// P(χ²₈ ≥ statistic)
    pub pvalue_chi2: f64,
    /// χ²₈ critical value at `alpha`
    pub critical_value_chi2: f64,
    /// Simulated (1 - alpha) quantile
    pub critical_value_monte_carlo: f64,
    /// Significance level used for the critical values
    pub alpha: f64,
}

impl BenfordAnalysis {
    /// True when the Monte Carlo test does not reject the law at `alpha`.
    pub fn conforms(&self) -> bool {
        self.pvalue_monte_carlo >= self.alpha
    }

    pub fn significance_stars(&self) -> &'static str {
        significance_stars(self.pvalue_monte_carlo)
    }
}

// =============================================================================
// Simulation Cache
// =============================================================================

type CacheKey = (usize, usize, Option<u64>);

/// Reference distributions keyed by (n, trials, seed).
///
/// Unseeded configurations are cached too: the first unseeded run for a
/// given (n, trials) is reused by later unseeded requests.
#[derive(Debug, Default)]
pub struct SimulationCache {
    entries: HashMap<CacheKey, Arc<Array1<f64>>>,
}

impl SimulationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached distribution for this configuration, simulating it on a miss.
    pub fn get_or_simulate(&mut self, n: usize, config: &MonteCarloConfig) -> Result<Arc<Array1<f64>>> {
        let key = (n, config.trials, config.seed);
        if let Some(hit) = self.entries.get(&key) {
            debug!(n, trials = config.trials, "simulation cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(n, trials = config.trials, "simulation cache miss");
        let simulated = Arc::new(simulate_distribution(n, config)?);
        self.entries.insert(key, Arc::clone(&simulated));
        Ok(simulated)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Analyse one observation set with a fresh simulation.
pub fn analyze(observations: &[f64], config: &AnalysisConfig) -> Result<BenfordAnalysis> {
    let mut cache = SimulationCache::new();
    analyze_cached(observations, config, &mut cache)
}

/// Analyse one observation set, reusing a cached simulation when possible.
///
/// # Errors
/// - `EmptyDataset` for no observations
/// - `InvalidInput` for a non-positive or non-finite observation
/// - `InvalidArgument` for alpha outside (0, 1) or zero trials
pub fn analyze_cached(
    observations: &[f64],
    config: &AnalysisConfig,
    cache: &mut SimulationCache,
) -> Result<BenfordAnalysis> {
    // -------------------------------------------------------------------------
    // Step 0: Validate everything before simulating
    // -------------------------------------------------------------------------
    if observations.is_empty() {
        return Err(BenfordError::EmptyDataset("no observations to analyse".to_string()));
    }
    if !(config.alpha > 0.0 && config.alpha < 1.0) {
        return Err(BenfordError::InvalidArgument(format!(
            "alpha must be in (0, 1), got {}",
            config.alpha
        )));
    }
    if config.monte_carlo.trials == 0 {
        return Err(BenfordError::InvalidArgument(
            "number of trials must be positive".to_string(),
        ));
    }

    // -------------------------------------------------------------------------
    // Step 1: Observed vs expected
    // -------------------------------------------------------------------------
    let n = observations.len();
    let frequency = build_frequency(observations)?;
    let proportions = frequency.proportions()?;
    let theoretical = probability_table();
    let expected = expected_counts(n)?;
    let statistic = compute_statistic(frequency.counts(), &expected)?;

    if is_small_sample(&expected) {
        warn!(
            n,
            "some expected digit counts are below {}; the chi-square approximation is rough",
            MIN_EXPECTED_COUNT
        );
    }

    // -------------------------------------------------------------------------
    // Step 2: Reference distribution and p-values
    // -------------------------------------------------------------------------
    let simulated = cache.get_or_simulate(n, &config.monte_carlo)?;
    let simulated_slice = simulated.as_slice().ok_or_else(|| {
        BenfordError::InvalidArgument("simulated statistics are not contiguous".to_string())
    })?;

    let df = DEGREES_OF_FREEDOM as f64;
    let pvalue_monte_carlo = estimate_pvalue(simulated_slice, statistic)?;
    let critical_value_monte_carlo = empirical_critical_value(simulated_slice, config.alpha)?;

    let analysis = BenfordAnalysis {
        n,
        frequency,
        proportions,
        theoretical,
        expected,
        statistic,
        pvalue_monte_carlo,
        pvalue_chi2: pvalue_chi2(statistic, df),
        critical_value_chi2: chi2_critical_value(config.alpha, df),
        critical_value_monte_carlo,
        alpha: config.alpha,
        simulated,
    };

    debug!(
        n,
        statistic = analysis.statistic,
        pvalue_monte_carlo = analysis.pvalue_monte_carlo,
        pvalue_chi2 = analysis.pvalue_chi2,
        "leading-digit analysis finished"
    );
    Ok(analysis)
}

/// Select a column (optionally for one year) from a panel and analyse it.
pub fn analyze_panel(
    panel: &Panel,
    column: Column,
    year: Option<i32>,
    config: &AnalysisConfig,
    cache: &mut SimulationCache,
) -> Result<BenfordAnalysis> {
    let observations = select_column(panel, column, year)?;
    debug!(%column, ?year, n = observations.len(), "analysing panel column");
    analyze_cached(&observations, config, cache)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::goodness_of_fit::simulate_one;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn quick_config(seed: u64) -> AnalysisConfig {
        AnalysisConfig::default().with_monte_carlo(
            MonteCarloConfig::default().with_trials(2_000).with_seed(seed),
        )
    }

    /// Values whose leading digits follow the law: 10^U for U uniform.
    fn benford_like(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| 10f64.powf(rng.gen_range(0.0..6.0))).collect()
    }

    #[test]
    fn test_benford_data_conforms() {
        let data = benford_like(2_000, 17);
        let analysis = analyze(&data, &quick_config(1)).unwrap();

        assert_eq!(analysis.n, 2_000);
        assert_eq!(analysis.frequency.total(), 2_000);
        assert!(analysis.pvalue_monte_carlo > 0.001);
        assert!(analysis.pvalue_chi2 > 0.001);
        assert_eq!(analysis.simulated.len(), 2_000);
    }

    #[test]
    fn test_uniform_digits_rejected() {
        // Each leading digit equally often: far from the law
        let data: Vec<f64> = (0..900).map(|i| f64::from(i % 9 + 1) * 1_000.0).collect();
        let analysis = analyze(&data, &quick_config(2)).unwrap();

        assert!(analysis.statistic > analysis.critical_value_chi2);
        assert_abs_diff_eq!(analysis.pvalue_monte_carlo, 0.0);
        assert!(!analysis.conforms());
        assert_eq!(analysis.significance_stars(), "***");
    }

    #[test]
    fn test_critical_values_agree() {
        let data = benford_like(142, 3);
        let analysis = analyze(&data, &quick_config(3)).unwrap();
        assert_abs_diff_eq!(analysis.critical_value_chi2, 15.507, epsilon = 1e-3);
        assert_abs_diff_eq!(
            analysis.critical_value_monte_carlo,
            analysis.critical_value_chi2,
            epsilon = 2.0
        );
    }

    #[test]
    fn test_fields_are_consistent() {
        let data = benford_like(300, 9);
        let a = analyze(&data, &quick_config(4)).unwrap();
        let sum_props: f64 = a.proportions.iter().sum();
        let sum_expected: f64 = a.expected.iter().sum();
        assert_abs_diff_eq!(sum_props, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sum_expected, 300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.theoretical[0], 0.30103, epsilon = 1e-5);
        assert_eq!(a.alpha, 0.05);
    }

    #[test]
    fn test_cache_reuses_simulation() {
        let mut cache = SimulationCache::new();
        let config = quick_config(5);

        let pop = analyze_cached(&benford_like(142, 1), &config, &mut cache).unwrap();
        let gdp = analyze_cached(&benford_like(142, 2), &config, &mut cache).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&pop.simulated, &gdp.simulated));

        // Different n means a different reference distribution
        analyze_cached(&benford_like(100, 3), &config, &mut cache).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_matches_direct_simulation() {
        let mut cache = SimulationCache::new();
        let mc = MonteCarloConfig::default().with_trials(300).with_seed(8);
        let cached = cache.get_or_simulate(60, &mc).unwrap();
        let direct = simulate_distribution(60, &mc).unwrap();
        assert_eq!(*cached, direct);
    }

    #[test]
    fn test_simulated_table_analysed_like_data() {
        // A table drawn from the law should not look extreme
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let table = simulate_one(5_000, &mut rng).unwrap();
        let expected = expected_counts(5_000).unwrap();
        let x2 = compute_statistic(table.counts(), &expected).unwrap();
        assert!(pvalue_chi2(x2, DEGREES_OF_FREEDOM as f64) > 0.001);
    }

    #[test]
    fn test_small_sample_threshold() {
        assert!(is_small_sample(&expected_counts(109).unwrap()));
        assert!(!is_small_sample(&expected_counts(110).unwrap()));

        // A small sample is still analysed, only flagged
        let data = benford_like(30, 8);
        let analysis = analyze(&data, &quick_config(8)).unwrap();
        assert_eq!(analysis.n, 30);
        assert!((0.0..=1.0).contains(&analysis.pvalue_monte_carlo));
    }

    #[test]
    fn test_validation_errors() {
        let config = quick_config(6);
        assert!(matches!(analyze(&[], &config), Err(BenfordError::EmptyDataset(_))));
        assert!(matches!(
            analyze(&[10.0, -2.0], &config),
            Err(BenfordError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze(&[10.0], &config.clone().with_alpha(1.5)),
            Err(BenfordError::InvalidArgument(_))
        ));
        let zero_trials = config.with_monte_carlo(MonteCarloConfig::default().with_trials(0));
        assert!(matches!(
            analyze(&[10.0], &zero_trials),
            Err(BenfordError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_analyze_panel() {
        let records = (0..50)
            .flat_map(|i| {
                let base = 10f64.powf(1.0 + f64::from(i) * 0.11);
                [
                    Record {
                        entity: format!("C{}", i),
                        year: 2002,
                        population: base * 1_000.0,
                        gdp_per_capita: base,
                    },
                    Record {
                        entity: format!("C{}", i),
                        year: 2007,
                        population: base * 1_100.0,
                        gdp_per_capita: base * 1.2,
                    },
                ]
            })
            .collect();
        let panel = Panel::new(records);

        let mut cache = SimulationCache::new();
        let config = quick_config(7);
        let pop = analyze_panel(&panel, Column::Population, Some(2007), &config, &mut cache).unwrap();
        let gdp = analyze_panel(&panel, Column::GdpPerCapita, Some(2007), &config, &mut cache).unwrap();
        assert_eq!(pop.n, 50);
        assert_eq!(gdp.n, 50);
        assert_eq!(cache.len(), 1);

        let missing = analyze_panel(&panel, Column::Population, Some(1990), &config, &mut cache);
        assert!(matches!(missing, Err(BenfordError::EmptyDataset(_))));
    }
}
