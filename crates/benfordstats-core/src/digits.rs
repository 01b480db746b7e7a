// =============================================================================
// Digit Extraction
// =============================================================================
//
// The leading digit of a positive number is the first non-zero digit of its
// significant-digit (scientific notation) form:
//
//     123        = 1.23   × 10²   →  1
//     5_000_000  = 5      × 10⁶   →  5
//     0.034      = 3.4    × 10⁻²  →  3
//
// WHY NOT log10?
// --------------
// The textbook formula is  d = floor(x / 10^floor(log10(x))).  It breaks on
// exact powers of ten whenever log10 rounds down by one ulp (log10(1000) can
// come out as 2.9999999999999996), and then 1000 reports digit 9.
//
// Rust's `{:e}` formatting prints the SHORTEST decimal that round-trips to
// the same f64, so its first character is exactly the digit a human would
// read off the number. No rounding games, no "0." prefix for values below 1.
//
// =============================================================================

use std::ops::RangeInclusive;

use crate::error::{BenfordError, Result};

/// Number of possible leading digits.
pub const NUM_DIGITS: usize = 9;

/// All possible leading digits, in order.
pub const DIGITS: RangeInclusive<u8> = 1..=9;

/// Position of a digit in a nine-element digit table (digit 1 → index 0).
#[inline]
pub(crate) fn digit_index(digit: u8) -> usize {
    usize::from(digit - 1)
}

/// Leading (first significant) decimal digit of `x`.
///
/// # Errors
/// `InvalidInput` if `x` is zero, negative, NaN or infinite. Those values
/// have no leading digit under the logarithmic law.
///
/// # Example
/// ```
/// use benfordstats_core::digits::leading_digit;
/// assert_eq!(leading_digit(0.034).unwrap(), 3);
/// assert_eq!(leading_digit(5_000_000.0).unwrap(), 5);
/// ```
pub fn leading_digit(x: f64) -> Result<u8> {
    if !x.is_finite() {
        return Err(BenfordError::InvalidInput(format!(
            "observation {} is not finite",
            x
        )));
    }
    if x <= 0.0 {
        return Err(BenfordError::InvalidInput(format!(
            "observation {} is not strictly positive",
            x
        )));
    }

    // "1.23e2", "5e6", "3.4e-2", "4.9406564584124654e-324"
    let sci = format!("{:e}", x);
    match sci.as_bytes().first() {
        Some(&b) if (b'1'..=b'9').contains(&b) => Ok(b - b'0'),
        _ => Err(BenfordError::InvalidInput(format!(
            "observation {} has no significant digit",
            x
        ))),
    }
}

/// Leading digit of every observation, in input order.
///
/// Fails on the first invalid observation.
pub fn leading_digits(observations: &[f64]) -> Result<Vec<u8>> {
    observations.iter().map(|&x| leading_digit(x)).collect()
}
