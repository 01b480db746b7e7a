// =============================================================================
// Analysis and Panel Python Bindings
// =============================================================================
//
// One-call analysis returning a dict with every number a report interpolates,
// plus a `Panel` class that owns the dataset and a simulation cache so
// population and GDP for the same year share one Monte Carlo run.
// =============================================================================

use numpy::{IntoPyArray, PyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use benfordstats_core::analysis::{analyze, analyze_panel, AnalysisConfig, BenfordAnalysis, SimulationCache};
use benfordstats_core::dataset::{select_column, Column, Panel};
use benfordstats_core::goodness_of_fit::{MonteCarloConfig, DEFAULT_TRIALS};
use benfordstats_core::report::digit_comparison;

use crate::to_py_err;

fn make_config(trials: usize, seed: Option<u64>, alpha: f64, parallel: bool) -> AnalysisConfig {
    AnalysisConfig {
        monte_carlo: MonteCarloConfig {
            trials,
            seed,
            parallel,
        },
        alpha,
    }
}

/// Convert an analysis into a Python dict.
fn analysis_to_dict<'py>(py: Python<'py>, analysis: &BenfordAnalysis) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("n", analysis.n)?;
    dict.set_item("counts", analysis.frequency.counts().to_vec())?;
    dict.set_item("proportions", analysis.proportions.to_vec())?;
    dict.set_item("theoretical", analysis.theoretical.to_vec())?;
    dict.set_item("expected", analysis.expected.to_vec())?;
    dict.set_item("statistic", analysis.statistic)?;
    dict.set_item("simulated", (*analysis.simulated).clone().into_pyarray_bound(py))?;
    dict.set_item("pvalue_monte_carlo", analysis.pvalue_monte_carlo)?;
    dict.set_item("pvalue_chi2", analysis.pvalue_chi2)?;
    dict.set_item("critical_value_chi2", analysis.critical_value_chi2)?;
    dict.set_item("critical_value_monte_carlo", analysis.critical_value_monte_carlo)?;
    dict.set_item("alpha", analysis.alpha)?;
    dict.set_item("conforms", analysis.conforms())?;
    dict.set_item("significance", analysis.significance_stars())?;

    let rows: PyResult<Vec<PyObject>> = digit_comparison(analysis)
        .into_iter()
        .map(|row| {
            let r = PyDict::new_bound(py);
            r.set_item("digit", row.digit)?;
            r.set_item("observed", row.observed)?;
            r.set_item("expected", row.expected)?;
            r.set_item("empirical", row.empirical)?;
            r.set_item("theoretical", row.theoretical)?;
            Ok(r.into_py(py))
        })
        .collect();
    dict.set_item("digits", rows?)?;

    Ok(dict)
}

/// Full leading-digit analysis of one observation set.
///
/// # Returns
/// Dict with counts, proportions, theoretical, expected, statistic,
/// simulated, pvalue_monte_carlo, pvalue_chi2, critical values, conforms,
/// significance and per-digit rows.
#[pyfunction]
#[pyo3(name = "analyze")]
#[pyo3(signature = (observations, trials=DEFAULT_TRIALS, seed=None, alpha=0.05, parallel=true))]
pub fn analyze_py<'py>(
    py: Python<'py>,
    observations: numpy::PyReadonlyArray1<'py, f64>,
    trials: usize,
    seed: Option<u64>,
    alpha: f64,
    parallel: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let obs = observations.as_array().to_vec();
    let config = make_config(trials, seed, alpha, parallel);
    let analysis = py
        .allow_threads(|| analyze(&obs, &config))
        .map_err(to_py_err)?;
    analysis_to_dict(py, &analysis)
}

// =============================================================================
// Panel
// =============================================================================

/// Country-year panel with population and GDP per capita.
///
/// Holds its own simulation cache: repeated analyses with the same sample
/// size, trial count and seed reuse one Monte Carlo run.
#[pyclass(name = "Panel")]
pub struct PyPanel {
    inner: Panel,
    cache: SimulationCache,
}

#[pymethods]
impl PyPanel {
    /// Load from a JSON array of {country, year, pop, gdpPercap} records.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let inner = Panel::from_json_str(json).map_err(to_py_err)?;
        Ok(Self {
            inner,
            cache: SimulationCache::new(),
        })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Distinct years, ascending
    fn years(&self) -> Vec<i32> {
        self.inner.years()
    }

    /// Number of records for a year
    fn entities_in_year(&self, year: i32) -> usize {
        self.inner.entities_in_year(year)
    }

    /// Values of 'population' or 'gdp_per_capita', optionally for one year
    #[pyo3(signature = (column, year=None))]
    fn select_column<'py>(
        &self,
        py: Python<'py>,
        column: &str,
        year: Option<i32>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let col: Column = column.parse().map_err(to_py_err)?;
        let values = select_column(&self.inner, col, year).map_err(to_py_err)?;
        Ok(values.into_pyarray_bound(py))
    }

    /// Analyse one column, optionally for one year
    #[pyo3(signature = (column, year=None, trials=DEFAULT_TRIALS, seed=None, alpha=0.05, parallel=true))]
    #[allow(clippy::too_many_arguments)]
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        column: &str,
        year: Option<i32>,
        trials: usize,
        seed: Option<u64>,
        alpha: f64,
        parallel: bool,
    ) -> PyResult<Bound<'py, PyDict>> {
        let col: Column = column.parse().map_err(to_py_err)?;
        let config = make_config(trials, seed, alpha, parallel);
        let analysis = analyze_panel(&self.inner, col, year, &config, &mut self.cache)
            .map_err(to_py_err)?;
        analysis_to_dict(py, &analysis)
    }

    /// Number of cached Monte Carlo runs
    fn cached_simulations(&self) -> usize {
        self.cache.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Panel(records={}, years={:?})",
            self.inner.len(),
            self.inner.years()
        )
    }
}
