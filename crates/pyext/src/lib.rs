// This code is part of paulidecomp.
//
// (C) Copyright the paulidecomp developers 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use num_complex::Complex64;
use numpy::{PyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use paulidecomp_core::{DecomposeError, Method};

fn value_error(err: DecomposeError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Decompose a dense complex operator of side `2 ** num_qubits` into the coefficients of all
/// `4 ** num_qubits` Pauli strings.
///
/// Args:
///     operator: the square complex matrix to decompose.  It is not modified.
///     method: one of ``"direct_recurrence"``, ``"composed_sparse"``, ``"transform_reorder"`` or
///         ``"recursive_split"``.
///
/// Returns:
///     A 1D complex array indexed by Pauli label.  Base-4 digit ``t`` of the label (least
///     significant first) selects ``I``, ``X``, ``Y`` or ``Z`` on qubit ``t``.
///
/// Raises:
///     ValueError: if the operator is not square with a power-of-two side, or the method is
///         unknown.
#[pyfunction]
#[pyo3(signature = (operator, method="recursive_split"))]
pub fn decompose_dense<'py>(
    py: Python<'py>,
    operator: PyReadonlyArray2<'py, Complex64>,
    method: &str,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let method = method.parse::<Method>().map_err(value_error)?;
    let array_view = operator.as_array();
    let out = py
        .detach(|| method.decompose(array_view))
        .map_err(value_error)?;
    Ok(PyArray1::from_vec(py, out))
}

/// Compute the coefficients of the given Pauli labels only.
///
/// The output has one entry per label, in order, including repeats.  Methods that cannot
/// evaluate single labels cheaply compute the full decomposition and select from it.
///
/// Raises:
///     ValueError: on a malformed operator, an unknown method, or a label that is not less than
///         ``4 ** num_qubits``.
#[pyfunction]
#[pyo3(signature = (operator, labels, method="direct_recurrence"))]
pub fn inner_products<'py>(
    py: Python<'py>,
    operator: PyReadonlyArray2<'py, Complex64>,
    labels: Vec<usize>,
    method: &str,
) -> PyResult<Bound<'py, PyArray1<Complex64>>> {
    let method = method.parse::<Method>().map_err(value_error)?;
    let array_view = operator.as_array();
    let out = py
        .detach(|| method.inner_products(array_view, &labels))
        .map_err(value_error)?;
    Ok(PyArray1::from_vec(py, out))
}

/// Names of the available methods, in a fixed order.
#[pyfunction]
pub fn methods() -> Vec<&'static str> {
    Method::ALL.iter().map(Method::name).collect()
}

#[pymodule]
fn _paulidecomp(m: &Bound<PyModule>) -> PyResult<()> {
    m.add_wrapped(wrap_pyfunction!(decompose_dense))?;
    m.add_wrapped(wrap_pyfunction!(inner_products))?;
    m.add_wrapped(wrap_pyfunction!(methods))?;
    Ok(())
}
