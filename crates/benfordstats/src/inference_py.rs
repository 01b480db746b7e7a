// =============================================================================
// Goodness-of-Fit and Inference Python Bindings
// =============================================================================
//
// Chi-square statistic, Monte Carlo reference distribution, p-values,
// critical values and histogram bins for plotting.
// =============================================================================

use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use benfordstats_core::goodness_of_fit::{
    compute_statistic, estimate_pvalue, simulate_distribution, MonteCarloConfig,
    DEFAULT_TRIALS,
};
use benfordstats_core::inference::{chi2_critical_value, pvalue_chi2};
use benfordstats_core::report::histogram;

use crate::to_py_err;

/// Pearson chi-square statistic between 9 observed and 9 expected counts.
#[pyfunction]
#[pyo3(name = "compute_statistic")]
pub fn compute_statistic_py(observed: Vec<u64>, expected: Vec<f64>) -> PyResult<f64> {
    compute_statistic(&observed, &expected).map_err(to_py_err)
}

/// Simulate the statistic's distribution under the digit law.
///
/// # Arguments
/// * `n` - Sample size of each synthetic dataset
/// * `trials` - Number of synthetic datasets (default 10,000)
/// * `seed` - Seed for reproducible runs (default: random)
/// * `parallel` - Spread trials over threads (same result for a fixed seed)
///
/// Runs without holding the GIL.
#[pyfunction]
#[pyo3(name = "simulate_distribution")]
#[pyo3(signature = (n, trials=DEFAULT_TRIALS, seed=None, parallel=true))]
pub fn simulate_distribution_py<'py>(
    py: Python<'py>,
    n: usize,
    trials: usize,
    seed: Option<u64>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let config = MonteCarloConfig {
        trials,
        seed,
        parallel,
    };
    let simulated = py
        .allow_threads(|| simulate_distribution(n, &config))
        .map_err(to_py_err)?;
    Ok(simulated.into_pyarray_bound(py))
}

/// Share of simulated statistics >= the observed statistic (upper tail).
#[pyfunction]
#[pyo3(name = "estimate_pvalue")]
pub fn estimate_pvalue_py(simulated: PyReadonlyArray1<f64>, observed_statistic: f64) -> PyResult<f64> {
    let sims = simulated.as_array().to_vec();
    estimate_pvalue(&sims, observed_statistic).map_err(to_py_err)
}

/// Chi-square survival function P(X >= statistic), X ~ χ²(df)
#[pyfunction]
#[pyo3(name = "chi2_pvalue")]
#[pyo3(signature = (statistic, df=8.0))]
pub fn chi2_pvalue_py(statistic: f64, df: f64) -> f64 {
    pvalue_chi2(statistic, df)
}

/// Chi-square upper-tail critical value at level alpha
#[pyfunction]
#[pyo3(name = "chi2_critical_value")]
#[pyo3(signature = (alpha=0.05, df=8.0))]
pub fn chi2_critical_value_py(alpha: f64, df: f64) -> f64 {
    chi2_critical_value(alpha, df)
}

/// Equal-width histogram bins as a list of dicts
#[pyfunction]
#[pyo3(name = "histogram")]
#[pyo3(signature = (values, n_bins=30))]
pub fn histogram_py<'py>(
    py: Python<'py>,
    values: PyReadonlyArray1<'py, f64>,
    n_bins: usize,
) -> PyResult<Vec<PyObject>> {
    let vals = values.as_array().to_vec();
    let bins = histogram(&vals, n_bins).map_err(to_py_err)?;

    bins.into_iter()
        .map(|bin| {
            let dict = PyDict::new_bound(py);
            dict.set_item("lower", bin.lower)?;
            dict.set_item("upper", bin.upper)?;
            dict.set_item("count", bin.count)?;
            dict.set_item("density", bin.density)?;
            Ok(dict.into_py(py))
        })
        .collect()
}
