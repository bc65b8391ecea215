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

//! Per-coefficient evaluation by composing the sparse Pauli matrix of each label.
//!
//! Every Pauli string is a permutation matrix with phases: each row has exactly one non-zero.  We
//! build the column index and the value of that non-zero for every row by doubling over the
//! qubits, and the coefficient is then a single gather-and-sum against the operator.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::pauli::{count_y, num_labels, pauli_at, xy_mask};
use crate::util::{C_M_ONE, C_ONE, C_ZERO, IM, M_IM};
use crate::{DecomposeError, check_labels, num_qubits_of, run_in_parallel};

/// The value of the row-0 entry of a Pauli string, indexed by the number of Y operators mod 4.
const Y_PHASES: [Complex64; 4] = [C_ONE, M_IM, C_M_ONE, IM];

/// The dense Pauli matrix of a single label, stored as one `(column, value)` pair per row.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedPauli {
    num_qubits: usize,
    col_indices: Vec<usize>,
    coeffs: Vec<Complex64>,
}

impl ComposedPauli {
    /// Build the row tables for `label`.
    ///
    /// Row 0 has its non-zero in the column whose bits are the X/Y qubits, with the phase
    /// `(-i) ** num_y`.  Setting bit `q` of the row index moves the column by `+2**q` if qubit `q`
    /// is diagonal (the column bit goes from 0 to 1) or `-2**q` if it is off-diagonal (1 to 0),
    /// and negates the value if the operator on `q` is Y or Z.  So rows `[2**q, 2**(q+1))` are
    /// rows `[0, 2**q)` with one fix-up applied.
    pub fn new(label: usize, num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut col_indices = Vec::with_capacity(dim);
        let mut coeffs = Vec::with_capacity(dim);
        col_indices.push(xy_mask(label, num_qubits));
        coeffs.push(Y_PHASES[(count_y(label, num_qubits) & 3) as usize]);

        for qubit in 0..num_qubits as u32 {
            let pauli = pauli_at(label, qubit);
            let step = 1usize << qubit;

            col_indices.extend_from_within(..step);
            if pauli.is_diagonal() {
                col_indices[step..].iter_mut().for_each(|col| *col += step);
            } else {
                col_indices[step..].iter_mut().for_each(|col| *col -= step);
            }

            coeffs.extend_from_within(..step);
            if pauli.flips_sign() {
                coeffs[step..].iter_mut().for_each(|coeff| *coeff = -*coeff);
            }
        }
        Self {
            num_qubits,
            col_indices,
            coeffs,
        }
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The column of the non-zero entry in each row.
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// The value of the non-zero entry in each row.
    #[inline]
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coeffs
    }

    /// `Tr(P @ operator) / dim` for an operator of the same size.
    pub fn inner_product(&self, operator: &ArrayView2<Complex64>) -> Complex64 {
        let dim = self.col_indices.len();
        let sum = self
            .col_indices
            .iter()
            .zip(self.coeffs.iter())
            .enumerate()
            .fold(C_ZERO, |acc, (row, (&col, &coeff))| {
                acc + coeff * operator[[col, row]]
            });
        sum / dim as f64
    }

    /// The dense matrix of this Pauli string.
    pub fn to_dense(&self) -> Array2<Complex64> {
        let dim = self.col_indices.len();
        let mut out = Array2::zeros((dim, dim));
        for (row, (&col, &coeff)) in self.col_indices.iter().zip(self.coeffs.iter()).enumerate() {
            out[[row, col]] = coeff;
        }
        out
    }
}

/// Compute every coefficient of the Pauli decomposition of `operator`.
pub fn decompose(operator: ArrayView2<Complex64>) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = num_qubits_of(&operator)?;
    let coeff_fn = |label: usize| ComposedPauli::new(label, num_qubits).inner_product(&operator);
    if run_in_parallel(num_qubits) {
        Ok((0..num_labels(num_qubits))
            .into_par_iter()
            .map(coeff_fn)
            .collect())
    } else {
        Ok((0..num_labels(num_qubits)).map(coeff_fn).collect())
    }
}

/// Compute only the coefficients of the given labels, in order.  Repeated labels are allowed.
pub fn inner_products(
    operator: ArrayView2<Complex64>,
    labels: &[usize],
) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = check_labels(&operator, labels)?;
    let coeff_fn =
        |&label: &usize| ComposedPauli::new(label, num_qubits).inner_product(&operator);
    if run_in_parallel(num_qubits) {
        Ok(labels.par_iter().map(coeff_fn).collect())
    } else {
        Ok(labels.iter().map(coeff_fn).collect())
    }
}

/// Rebuild the dense operator `sum_L coeffs[L] * P_L` from a full coefficient vector.
pub fn reconstruct(coeffs: &[Complex64]) -> Result<Array2<Complex64>, DecomposeError> {
    let len = coeffs.len();
    if !len.is_power_of_two() || len.trailing_zeros() % 2 != 0 {
        return Err(DecomposeError::BadLength(len));
    }
    let num_qubits = (len.trailing_zeros() / 2) as usize;
    let dim = 1usize << num_qubits;
    let mut out = Array2::<Complex64>::zeros((dim, dim));
    for (label, &weight) in coeffs.iter().enumerate() {
        if weight == C_ZERO {
            continue;
        }
        let pauli = ComposedPauli::new(label, num_qubits);
        for (row, (&col, &coeff)) in pauli.col_indices.iter().zip(pauli.coeffs.iter()).enumerate()
        {
            out[[row, col]] += weight * coeff;
        }
    }
    Ok(out)
}
