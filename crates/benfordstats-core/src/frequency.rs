// =============================================================================
// Empirical Digit Distribution
// =============================================================================
//
// Turns a set of observations into a frequency table: how many observations
// start with 1, with 2, ..., with 9. All nine digits are always present, so a
// dataset with no 7s still has a "7 → 0" entry. Downstream code indexes the
// table positionally and would silently misalign if a digit were missing.
//
// =============================================================================

use std::fmt;

use crate::digits::{digit_index, leading_digit, DIGITS, NUM_DIGITS};
use crate::error::{BenfordError, Result};

/// Observed leading-digit counts.
///
/// Built once from a set of observations, then read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: [u64; NUM_DIGITS],
}

impl FrequencyTable {
    /// Build a table from exactly nine counts (digit 1 first).
    pub fn from_counts(counts: &[u64]) -> Result<Self> {
        let counts: [u64; NUM_DIGITS] = counts.try_into().map_err(|_| {
            BenfordError::InvalidArgument(format!(
                "frequency table needs {} counts, got {}",
                NUM_DIGITS,
                counts.len()
            ))
        })?;
        Ok(Self { counts })
    }

    /// Build a table from already-extracted digits.
    pub fn from_digits<I>(digits: I) -> Result<Self>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut counts = [0u64; NUM_DIGITS];
        for d in digits {
            if !DIGITS.contains(&d) {
                return Err(BenfordError::InvalidArgument(format!(
                    "digit must be in 1..=9, got {}",
                    d
                )));
            }
            counts[digit_index(d)] += 1;
        }
        Ok(Self { counts })
    }

    /// Count for one digit (0 for anything outside 1..=9).
    pub fn count(&self, digit: u8) -> u64 {
        if DIGITS.contains(&digit) {
            self.counts[digit_index(digit)]
        } else {
            0
        }
    }

    /// All nine counts, digit 1 first.
    pub fn counts(&self) -> &[u64; NUM_DIGITS] {
        &self.counts
    }

    /// Number of observations the table was built from.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of observations per digit.
    pub fn proportions(&self) -> Result<[f64; NUM_DIGITS]> {
        to_proportions(self, self.total())
    }

    /// `(digit, count)` pairs in digit order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        DIGITS.zip(self.counts.iter().copied())
    }
}

impl From<[u64; NUM_DIGITS]> for FrequencyTable {
    fn from(counts: [u64; NUM_DIGITS]) -> Self {
        Self { counts }
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (d, c) in self.iter() {
            if d > 1 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", d, c)?;
        }
        Ok(())
    }
}

/// Count leading digits across `observations`.
///
/// # Errors
/// `InvalidInput` if any observation is not strictly positive and finite.
/// The table is all-or-nothing.
pub fn build_frequency(observations: &[f64]) -> Result<FrequencyTable> {
    let mut counts = [0u64; NUM_DIGITS];
    for &x in observations {
        counts[digit_index(leading_digit(x)?)] += 1;
    }
    Ok(FrequencyTable { counts })
}

/// Divide each count by `total_count`.
///
/// # Errors
/// - `EmptyDataset` if `total_count` is 0
/// - `InvalidArgument` if `total_count` does not equal the sum of the counts
pub fn to_proportions(frequency: &FrequencyTable, total_count: u64) -> Result<[f64; NUM_DIGITS]> {
    if total_count == 0 {
        return Err(BenfordError::EmptyDataset(
            "cannot compute proportions of zero observations".to_string(),
        ));
    }
    let actual = frequency.total();
    if actual != total_count {
        return Err(BenfordError::InvalidArgument(format!(
            "total count {} does not match table total {}",
            total_count, actual
        )));
    }
    let n = total_count as f64;
    Ok(frequency.counts.map(|c| c as f64 / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_build_counts_each_digit() {
        let obs = [1.0, 19.0, 0.15, 2_000.0, 9.9, 950_000.0, 3.3];
        let table = build_frequency(&obs).unwrap();
        assert_eq!(table.counts(), &[3, 1, 1, 0, 0, 0, 0, 0, 2]);
        assert_eq!(table.total(), 7);
        assert_eq!(table.count(4), 0);
    }

    #[test]
    fn test_empty_input_gives_all_zero_table() {
        let table = build_frequency(&[]).unwrap();
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 9);
        assert!(matches!(table.proportions(), Err(BenfordError::EmptyDataset(_))));
    }

    #[test]
    fn test_build_rejects_invalid_observation() {
        let result = build_frequency(&[12.0, 0.0, 3.0]);
        assert!(matches!(result, Err(BenfordError::InvalidInput(_))));
    }

    #[test]
    fn test_proportions() {
        let table = FrequencyTable::from_counts(&[2, 1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        let props = to_proportions(&table, 4).unwrap();
        assert_abs_diff_eq!(props[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(props[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(props[8], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(props.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_proportions_total_mismatch() {
        let table = FrequencyTable::from_counts(&[2, 1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(matches!(to_proportions(&table, 5), Err(BenfordError::InvalidArgument(_))));
        assert!(matches!(to_proportions(&table, 0), Err(BenfordError::EmptyDataset(_))));
    }

    #[test]
    fn test_from_counts_wrong_length() {
        assert!(FrequencyTable::from_counts(&[1, 2, 3]).is_err());
        assert!(FrequencyTable::from_counts(&[0; 10]).is_err());
    }

    #[test]
    fn test_from_digits() {
        let table = FrequencyTable::from_digits([1, 1, 9, 5]).unwrap();
        assert_eq!(table.count(1), 2);
        assert_eq!(table.count(5), 1);
        assert_eq!(table.count(9), 1);
        assert!(FrequencyTable::from_digits([0]).is_err());
    }

    #[test]
    fn test_display() {
        let table = FrequencyTable::from_counts(&[3, 0, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(table.to_string(), "1:3 2:0 3:0 4:0 5:0 6:0 7:0 8:0 9:1");
    }

    proptest! {
        #[test]
        fn counts_sum_to_len_and_cover_all_digits(
            obs in proptest::collection::vec(1e-6f64..1e12, 1..300),
        ) {
            let table = build_frequency(&obs).unwrap();
            prop_assert_eq!(table.total(), obs.len() as u64);
            prop_assert_eq!(table.iter().count(), 9);
            let props = table.proportions().unwrap();
            prop_assert!((props.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
