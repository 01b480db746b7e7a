// =============================================================================
// The Logarithmic Digit Law (Benford's Law)
// =============================================================================
//
// For data spread over several orders of magnitude, leading digits are not
// uniform. Small digits dominate:
//
//     P(d) = log10(1 + 1/d),   d = 1, ..., 9
//
//     d    :   1     2     3     4     5     6     7     8     9
//     P(d) : .301  .176  .125  .097  .079  .067  .058  .051  .046
//
// The nine terms telescope: Σ log10((d+1)/d) = log10(10/1) = 1, so this is
// a proper probability distribution with no normalising constant.
//
// Populations, prices and river lengths tend to follow it. Lists of human
// heights or phone numbers do not (they live inside a single decade).
//
// =============================================================================

use crate::digits::{digit_index, DIGITS, NUM_DIGITS};
use crate::error::{BenfordError, Result};

/// Theoretical probability that a leading digit equals `digit`.
///
/// # Errors
/// `InvalidArgument` if `digit` is not in 1..=9.
pub fn theoretical_probability(digit: u8) -> Result<f64> {
    if !DIGITS.contains(&digit) {
        return Err(BenfordError::InvalidArgument(format!(
            "digit must be in 1..=9, got {}",
            digit
        )));
    }
    Ok(probability_of(digit))
}

#[inline]
fn probability_of(digit: u8) -> f64 {
    (1.0 + 1.0 / f64::from(digit)).log10()
}

/// The full probability table, indexed by `digit - 1`.
pub fn probability_table() -> [f64; NUM_DIGITS] {
    let mut table = [0.0; NUM_DIGITS];
    for d in DIGITS {
        table[digit_index(d)] = probability_of(d);
    }
    table
}

/// Expected count per digit for a sample of size `n` drawn from the law.
///
/// These are real numbers, not rounded: with n = 142, digit 9 expects
/// about 6.51 occurrences.
pub fn expected_counts(n: usize) -> Result<[f64; NUM_DIGITS]> {
    if n == 0 {
        return Err(BenfordError::InvalidArgument(
            "sample size must be positive".to_string(),
        ));
    }
    let scale = n as f64;
    Ok(probability_table().map(|p| p * scale))
}
