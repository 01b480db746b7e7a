// =============================================================================
// BenfordStats Core Library
// =============================================================================
//
// This is the entry point for the pure Rust leading-digit analysis library.
// All the statistics happen here - no Python code involved.
//
// STRUCTURE:
// ----------
// The library is organized into modules, each handling a specific concern:
//
//   - digits:          Leading-digit extraction
//   - law:             The logarithmic digit law P(d) = log10(1 + 1/d)
//   - frequency:       Observed digit counts and proportions
//   - goodness_of_fit: Chi-square statistic and Monte Carlo reference runs
//   - inference:       Closed-form p-values and critical values
//   - dataset:         Country-year panel input
//   - analysis:        One-call analysis with simulation reuse
//   - report:          Chart-ready tables (digit bars, histograms)
//   - error:           Error types used throughout the library
//
// FOR MAINTAINERS:
// ----------------
// When adding new functionality:
//   1. Add it to the appropriate module (or create a new one)
//   2. Write tests in that module (see existing tests for examples)
//   3. Re-export public items here so users can access them easily
//   4. Update the Python bindings in the `benfordstats` crate
//
// =============================================================================

pub mod analysis;
pub mod dataset;
pub mod digits;
pub mod error;
pub mod frequency;
pub mod goodness_of_fit;
pub mod inference;
pub mod law;
pub mod report;

// Re-export commonly used items at the top level for convenience
// Users can write `use benfordstats_core::analyze` instead of
// `use benfordstats_core::analysis::analyze`
pub use analysis::{analyze, analyze_cached, analyze_panel, AnalysisConfig, BenfordAnalysis, SimulationCache};
pub use dataset::{select_column, Column, Panel, Record};
pub use digits::{leading_digit, DIGITS, NUM_DIGITS};
pub use error::{BenfordError, Result};
pub use frequency::{build_frequency, to_proportions, FrequencyTable};
pub use goodness_of_fit::{
    compute_statistic, estimate_pvalue, simulate_distribution, simulate_one, MonteCarloConfig,
    DEGREES_OF_FREEDOM,
};
pub use inference::{chi2_critical_value, pvalue_chi2};
pub use law::{expected_counts, probability_table, theoretical_probability};
