// =============================================================================
// Digit Distribution Python Bindings
// =============================================================================
//
// Leading digits, the theoretical law, and observed frequency tables.
// Digit tables cross the boundary as plain 9-element lists, digit 1 first.
// =============================================================================

use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use benfordstats_core::digits::leading_digit;
use benfordstats_core::frequency::{build_frequency, to_proportions, FrequencyTable};
use benfordstats_core::law::{expected_counts, probability_table};

use crate::to_py_err;

/// Leading (first significant) digit of a positive number.
///
/// Raises ValueError for zero, negative, NaN or infinite input.
#[pyfunction]
#[pyo3(name = "leading_digit")]
pub fn leading_digit_py(x: f64) -> PyResult<u8> {
    leading_digit(x).map_err(to_py_err)
}

/// Probabilities log10(1 + 1/d) for d = 1..9.
#[pyfunction]
#[pyo3(name = "theoretical_probabilities")]
pub fn theoretical_probabilities_py<'py>(py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
    probability_table().to_vec().into_pyarray_bound(py)
}

/// Expected count per digit for a sample of size n.
#[pyfunction]
#[pyo3(name = "expected_counts")]
pub fn expected_counts_py<'py>(py: Python<'py>, n: usize) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let expected = expected_counts(n).map_err(to_py_err)?;
    Ok(expected.to_vec().into_pyarray_bound(py))
}

/// Count leading digits of the observations.
///
/// Returns a list of 9 counts (digit 1 first). Zero-count digits are kept.
#[pyfunction]
#[pyo3(name = "build_frequency")]
pub fn build_frequency_py(observations: PyReadonlyArray1<f64>) -> PyResult<Vec<u64>> {
    let obs = observations.as_array().to_vec();
    let table = build_frequency(&obs).map_err(to_py_err)?;
    Ok(table.counts().to_vec())
}

/// Divide a 9-element count list by its total.
#[pyfunction]
#[pyo3(name = "to_proportions")]
pub fn to_proportions_py(counts: Vec<u64>, total: u64) -> PyResult<Vec<f64>> {
    let table = FrequencyTable::from_counts(&counts).map_err(to_py_err)?;
    let props = to_proportions(&table, total).map_err(to_py_err)?;
    Ok(props.to_vec())
}
