// =============================================================================
// Statistical Inference
// =============================================================================
//
// Closed-form counterparts to the Monte Carlo machinery:
//   - P-values: chi-square survival function
//   - Critical values: the X² above which we reject at level α
//   - Significance stars for summary tables
//
// FOR REPORT WRITERS:
// -------------------
// The Monte Carlo p-value answers "how often does data that truly follows the
// law deviate this much?" by simulation. The χ² survival function answers the
// same question with the large-sample approximation. Report both: if they
// disagree badly, the sample is too small for the approximation.
//
// IMPORTANT CAVEATS:
// - With thousands of observations, tiny departures from the law become
//   "significant". Look at the bar chart, not just the p-value.
// - A large p-value does not prove the data follow the law, it only says we
//   found no evidence against it.
//
// =============================================================================

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::{BenfordError, Result};

// =============================================================================
// P-Value Calculation
// =============================================================================

/// Upper-tail p-value of a chi-square statistic.
///
/// # Arguments
/// * `statistic` - The observed X² (non-negative)
/// * `df` - Degrees of freedom (8 for leading digits)
///
/// # Returns
/// P(χ²(df) ≥ statistic), or NaN for a non-finite statistic or df ≤ 0.
pub fn pvalue_chi2(statistic: f64, df: f64) -> f64 {
    if !statistic.is_finite() || df <= 0.0 {
        return f64::NAN;
    }
    if statistic <= 0.0 {
        return 1.0;
    }

    let chi2 = match ChiSquared::new(df) {
        Ok(d) => d,
        Err(_) => return f64::NAN,
    };

    chi2.sf(statistic)
}

// =============================================================================
// Critical Values
// =============================================================================

/// Chi-square critical value for an upper-tail test at level `alpha`.
///
/// For df = 8 and α = 0.05 this is about 15.507: any X² above it rejects the
/// logarithmic law at the 5% level.
///
/// Returns NaN unless 0 < alpha < 1 and df > 0.
pub fn chi2_critical_value(alpha: f64, df: f64) -> f64 {
    if !(alpha > 0.0 && alpha < 1.0) || df <= 0.0 {
        return f64::NAN;
    }

    let chi2 = match ChiSquared::new(df) {
        Ok(d) => d,
        Err(_) => return f64::NAN,
    };

    chi2.inverse_cdf(1.0 - alpha)
}

/// Empirical (1 - alpha) quantile of a simulated statistic sample.
///
/// Nearest-rank definition: the smallest simulated value with at least
/// (1 - alpha) of the sample at or below it. The Monte Carlo analogue of
/// [`chi2_critical_value`].
///
/// # Errors
/// - `EmptyDataset` if `simulated` is empty
/// - `InvalidArgument` unless 0 < alpha < 1, or if the sample contains NaN
pub fn empirical_critical_value(simulated: &[f64], alpha: f64) -> Result<f64> {
    if simulated.is_empty() {
        return Err(BenfordError::EmptyDataset(
            "no simulated statistics".to_string(),
        ));
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(BenfordError::InvalidArgument(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }
    if simulated.iter().any(|s| s.is_nan()) {
        return Err(BenfordError::InvalidArgument(
            "simulated statistics contain NaN".to_string(),
        ));
    }

    let mut sorted = simulated.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let rank = ((1.0 - alpha) * n as f64).ceil() as usize;
    Ok(sorted[rank.clamp(1, n) - 1])
}

// =============================================================================
// Significance Stars (for summary tables)
// =============================================================================

/// Get significance stars for a p-value.
///
/// Returns a string of stars indicating significance level:
/// - "***" : p < 0.001
/// - "**"  : p < 0.01
/// - "*"   : p < 0.05
/// - "."   : p < 0.1
/// - ""    : p >= 0.1
pub fn significance_stars(pvalue: f64) -> &'static str {
    if pvalue < 0.001 {
        "***"
    } else if pvalue < 0.01 {
        "**"
    } else if pvalue < 0.05 {
        "*"
    } else if pvalue < 0.1 {
        "."
    } else {
        ""
    }
}

// =============================================================================
// Tests
// =============================================================================
