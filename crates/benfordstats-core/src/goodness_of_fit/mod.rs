// =============================================================================
// Goodness of Fit
// =============================================================================
//
// Does an observed leading-digit table look like it came from the law?
//
// THE STATISTIC
// -------------
// Pearson's chi-square:
//
//     X² = Σ_d (O_d - E_d)² / E_d
//
// where O_d is the observed count for digit d and E_d = n × P(d) is what the
// law expects for a sample of size n. X² = 0 means a perfect match; big
// values mean big deviations.
//
// Under the null hypothesis (the data really follow the law) X² is
// approximately χ² with 8 degrees of freedom: nine digit categories, minus
// one because the counts must add up to n.
//
// THE P-VALUE, TWO WAYS
// ---------------------
// 1. Closed form: P(χ²₈ ≥ X²), see `inference::pvalue_chi2`.
// 2. Monte Carlo (`monte_carlo`): draw many synthetic samples of size n from
//    the law, compute X² for each, and count how often the synthetic value is
//    at least as large as the observed one.
//
// The Monte Carlo route needs no large-sample approximation. The simulated
// values can also be drawn as a histogram next to the χ²₈ density. The two
// p-values should agree closely, and the tests check that they do.
//
// Only the upper tail matters: a SMALL X² is a good fit, never evidence
// against the law.
//
// =============================================================================

mod monte_carlo;

pub use monte_carlo::{
    simulate_distribution, simulate_distribution_seeded, simulate_one, MonteCarloConfig,
    DEFAULT_TRIALS,
};

use crate::digits::NUM_DIGITS;
use crate::error::{BenfordError, Result};

/// Degrees of freedom of the statistic: nine digits minus the sum constraint.
pub const DEGREES_OF_FREEDOM: usize = NUM_DIGITS - 1;

/// Pearson chi-square statistic between observed and expected digit counts.
///
/// Both slices are digit tables (digit 1 first) and must have nine entries.
///
/// # Errors
/// - `InvalidArgument` if either slice does not have exactly nine entries
/// - `InvalidExpectedValue` if an expected count is not strictly positive
///   and finite
pub fn compute_statistic(observed: &[u64], expected: &[f64]) -> Result<f64> {
    check_table_len("observed", observed.len())?;
    check_table_len("expected", expected.len())?;

    if let Some((i, &e)) = expected
        .iter()
        .enumerate()
        .find(|(_, &e)| !(e.is_finite() && e > 0.0))
    {
        return Err(BenfordError::InvalidExpectedValue(format!(
            "expected count for digit {} is {}",
            i + 1,
            e
        )));
    }

    Ok(observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| {
            let diff = o as f64 - e;
            diff * diff / e
        })
        .sum())
}

/// Share of simulated statistics at least as large as the observed one.
///
/// One-sided upper-tail estimate: `#{s ≥ observed} / #simulated`.
///
/// # Errors
/// - `EmptyDataset` if `simulated` is empty
/// - `InvalidArgument` if `observed_statistic` is NaN
pub fn estimate_pvalue(simulated: &[f64], observed_statistic: f64) -> Result<f64> {
    if simulated.is_empty() {
        return Err(BenfordError::EmptyDataset(
            "no simulated statistics to compare against".to_string(),
        ));
    }
    if observed_statistic.is_nan() {
        return Err(BenfordError::InvalidArgument(
            "observed statistic is NaN".to_string(),
        ));
    }

    let at_least = simulated.iter().filter(|&&s| s >= observed_statistic).count();
    Ok(at_least as f64 / simulated.len() as f64)
}

fn check_table_len(name: &str, len: usize) -> Result<()> {
    if len != NUM_DIGITS {
        return Err(BenfordError::InvalidArgument(format!(
            "{} table must have {} digit entries, got {}",
            name, NUM_DIGITS, len
        )));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
