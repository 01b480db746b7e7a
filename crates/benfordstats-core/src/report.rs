//! Chart-ready data for the reporting layer.
//!
//! Nothing here draws anything. These are the numbers behind the two charts a
//! leading-digit report shows: observed vs theoretical digit shares, and the
//! histogram of simulated X² with the observed value marked.

use serde::Serialize;

use crate::analysis::BenfordAnalysis;
use crate::digits::DIGITS;
use crate::error::{BenfordError, Result};

/// One bar group of the digit comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DigitComparison {
    pub digit: u8,
    pub observed: u64,
    pub expected: f64,
    pub empirical: f64,
    pub theoretical: f64,
}

/// One histogram bin, `[lower, upper)` (the last bin includes `upper`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// count / (total × width), so the bars integrate to 1 and can sit under
    /// a χ² density curve.
    pub density: f64,
}

/// Per-digit rows for a grouped bar chart.
pub fn digit_comparison(analysis: &BenfordAnalysis) -> Vec<DigitComparison> {
    DIGITS
        .zip(analysis.frequency.counts().iter())
        .enumerate()
        .map(|(i, (digit, &observed))| DigitComparison {
            digit,
            observed,
            expected: analysis.expected[i],
            empirical: analysis.proportions[i],
            theoretical: analysis.theoretical[i],
        })
        .collect()
}

/// Equal-width histogram of `values` over [min, max].
///
/// # Errors
/// - `InvalidArgument` if `n_bins` is 0, a value is not finite, or
///   max - min overflows
/// - `EmptyDataset` if `values` is empty
pub fn histogram(values: &[f64], n_bins: usize) -> Result<Vec<HistogramBin>> {
    if n_bins == 0 {
        return Err(BenfordError::InvalidArgument(
            "histogram needs at least one bin".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(BenfordError::EmptyDataset("no values to bin".to_string()));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(BenfordError::InvalidArgument(
            "histogram values must be finite".to_string(),
        ));
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // All-equal input: one unit-wide span so every bin has positive width
    let span = if max > min { max - min } else { 1.0 };
    if !span.is_finite() {
        return Err(BenfordError::InvalidArgument(
            "histogram range overflows f64".to_string(),
        ));
    }
    let width = span / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    let total = values.len() as f64;
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
            density: count as f64 / (total * width),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, AnalysisConfig};
    use crate::goodness_of_fit::MonteCarloConfig;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_histogram_counts() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0, 4.0];
        let bins = histogram(&values, 4).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 2, 1, 1]);
        assert_abs_diff_eq!(bins[0].lower, 0.0);
        assert_abs_diff_eq!(bins[3].upper, 4.0);
    }

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let values: Vec<f64> = (0..1000).map(|i| (f64::from(i) * 0.37).sin().abs() * 20.0).collect();
        let bins = histogram(&values, 30).unwrap();
        let area: f64 = bins.iter().map(|b| b.density * (b.upper - b.lower)).sum();
        assert_abs_diff_eq!(area, 1.0, epsilon = 1e-9);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 1000);
    }

    #[test]
    fn test_histogram_constant_values() {
        let bins = histogram(&[3.0; 5], 2).unwrap();
        assert_eq!(bins[0].count, 5);
        assert_eq!(bins[1].count, 0);
    }

    #[test]
    fn test_histogram_errors() {
        assert!(matches!(histogram(&[1.0], 0), Err(BenfordError::InvalidArgument(_))));
        assert!(matches!(histogram(&[], 5), Err(BenfordError::EmptyDataset(_))));
        assert!(histogram(&[1.0, f64::NAN], 5).is_err());
        assert!(matches!(
            histogram(&[-f64::MAX, f64::MAX], 4),
            Err(BenfordError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_digit_comparison_rows() {
        let data: Vec<f64> = (1..=500).map(|i| f64::from(i) * 1.7).collect();
        let config = AnalysisConfig::default()
            .with_monte_carlo(MonteCarloConfig::default().with_trials(200).with_seed(1));
        let analysis = analyze(&data, &config).unwrap();

        let rows = digit_comparison(&analysis);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].digit, 1);
        assert_eq!(rows[8].digit, 9);
        assert_eq!(rows.iter().map(|r| r.observed).sum::<u64>(), 500);
        assert_abs_diff_eq!(rows.iter().map(|r| r.theoretical).sum::<f64>(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[2].empirical, analysis.proportions[2]);
    }
}
