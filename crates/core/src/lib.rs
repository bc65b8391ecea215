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

use std::env;

use ndarray::ArrayView2;
use num_complex::Complex64;
use num_traits::Zero;
use thiserror::Error;

pub mod bit_ops;
pub mod composed_sparse;
pub mod direct_recurrence;
pub mod method;
pub mod pauli;
pub mod recursive_split;
pub mod transform_reorder;
pub mod util;


pub use method::Method;
pub use pauli::Pauli;

/// Operators with at least this many qubits are decomposed with Rayon, if threading is allowed.
pub const PARALLEL_THRESHOLD: usize = 7;

/// Whether the kernels may spawn work onto the Rayon thread pool.
///
/// If the caller has set `PAULIDECOMP_IN_PARALLEL=TRUE` it is already parallelising over calls
/// into this library, so we stay single-threaded unless `PAULIDECOMP_FORCE_THREADS=TRUE`.
#[inline]
pub fn getenv_use_multiple_threads() -> bool {
    let parallel_context = env::var("PAULIDECOMP_IN_PARALLEL")
        .unwrap_or_else(|_| "FALSE".to_string())
        .to_uppercase()
        == "TRUE";
    let force_threads = env::var("PAULIDECOMP_FORCE_THREADS")
        .unwrap_or_else(|_| "FALSE".to_string())
        .to_uppercase()
        == "TRUE";
    !parallel_context || force_threads
}

/// Should a kernel on this many qubits run in parallel?
#[inline]
pub(crate) fn run_in_parallel(num_qubits: usize) -> bool {
    num_qubits >= PARALLEL_THRESHOLD && getenv_use_multiple_threads()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    #[error("operators must be square with a power-of-two side length, not {0:?}")]
    BadShape([usize; 2]),
    #[error("label {label} is out of range for an operator on {num_qubits} qubits")]
    LabelOutOfRange { label: usize, num_qubits: usize },
    #[error("coefficient vectors must have a power-of-four length, not {0}")]
    BadLength(usize),
    #[error("'{0}' is not a valid Pauli label")]
    BadLabel(String),
    #[error("'{0}' is not a known decomposition method")]
    BadMethod(String),
}

/// The number of qubits an operator acts on, or an error if it isn't a non-empty square matrix
/// with a power-of-two side length.
pub fn num_qubits_of(operator: &ArrayView2<Complex64>) -> Result<usize, DecomposeError> {
    let shape = [operator.nrows(), operator.ncols()];
    if shape[0].is_zero() || !shape[0].is_power_of_two() || shape[0] != shape[1] {
        return Err(DecomposeError::BadShape(shape));
    }
    Ok(shape[0].ilog2() as usize)
}

/// Validate an operator together with a set of labels to evaluate on it.
pub(crate) fn check_labels(
    operator: &ArrayView2<Complex64>,
    labels: &[usize],
) -> Result<usize, DecomposeError> {
    let num_qubits = num_qubits_of(operator)?;
    labels
        .iter()
        .try_for_each(|&label| pauli::check_label(label, num_qubits))?;
    Ok(num_qubits)
}

/// Pick out the coefficients for `labels` from a full decomposition, in order and with repeats.
pub fn select_labels(coeffs: &[Complex64], labels: &[usize]) -> Vec<Complex64> {
    labels.iter().map(|&label| coeffs[label]).collect()
}
