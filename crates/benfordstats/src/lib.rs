// =============================================================================
// BenfordStats Python Bindings
// =============================================================================
//
// This module creates the bridge between Rust and Python using PyO3.
// It wraps the pure Rust code from `benfordstats-core` and exposes it as
// a Python extension module that can be imported with `import _benfordstats`.
//
// The Python side owns everything visual: bar charts of observed vs
// theoretical digit shares, the histogram of simulated statistics, and the
// narrative text. This module only hands it numbers.
//
// STRUCTURE:
// ----------
// - distribution_py: leading digits, the law, frequency tables
// - inference_py:    statistic, Monte Carlo, p-values, histograms
// - analysis_py:     one-call analysis and the `Panel` class
//
// FOR MAINTAINERS:
// ----------------
// When adding new functionality:
// 1. Implement the logic in `benfordstats-core` first
// 2. Create a Python wrapper in the matching *_py module
// 3. Add it to the module in the `_benfordstats` function at the bottom
//
// =============================================================================

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use benfordstats_core::error::BenfordError;

mod analysis_py;
mod distribution_py;
mod inference_py;

use analysis_py::{analyze_py, PyPanel};
use distribution_py::{
    build_frequency_py, expected_counts_py, leading_digit_py, theoretical_probabilities_py,
    to_proportions_py,
};
use inference_py::{
    chi2_critical_value_py, chi2_pvalue_py, compute_statistic_py, estimate_pvalue_py,
    histogram_py, simulate_distribution_py,
};

/// Core errors surface in Python as ValueError with the error's message.
pub(crate) fn to_py_err(err: BenfordError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// =============================================================================
// Module Registration
// =============================================================================
//
// This is where we tell Python what's available when you import the module.
// Everything added here with `m.add_class` or `m.add_function` becomes
// accessible from Python.
// =============================================================================

/// BenfordStats: leading-digit conformity testing with a Rust backend
///
/// Digit tables are 9-element lists, digit 1 first. Errors raise ValueError.
#[pymodule]
fn _benfordstats(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Digit distribution
    m.add_function(wrap_pyfunction!(leading_digit_py, m)?)?;
    m.add_function(wrap_pyfunction!(theoretical_probabilities_py, m)?)?;
    m.add_function(wrap_pyfunction!(expected_counts_py, m)?)?;
    m.add_function(wrap_pyfunction!(build_frequency_py, m)?)?;
    m.add_function(wrap_pyfunction!(to_proportions_py, m)?)?;

    // Goodness of fit and inference
    m.add_function(wrap_pyfunction!(compute_statistic_py, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_distribution_py, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_pvalue_py, m)?)?;
    m.add_function(wrap_pyfunction!(chi2_pvalue_py, m)?)?;
    m.add_function(wrap_pyfunction!(chi2_critical_value_py, m)?)?;
    m.add_function(wrap_pyfunction!(histogram_py, m)?)?;

    // Analysis
    m.add_function(wrap_pyfunction!(analyze_py, m)?)?;
    m.add_class::<PyPanel>()?;

    m.add("DEGREES_OF_FREEDOM", benfordstats_core::DEGREES_OF_FREEDOM)?;

    Ok(())
}
