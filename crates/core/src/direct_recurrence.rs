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

//! Per-coefficient evaluation by a Gray-code recurrence over the contributing matrix elements.
//!
//! The Pauli matrix `P` of a label has exactly one non-zero in each row: row `i` has it in column
//! `i ^ mask`, where `mask` marks the qubits carrying an X or a Y.  The coefficient is therefore
//!
//! ```text
//!     Tr(P M) / dim = (1 / dim) * sum_i  P[i, i ^ mask] * M[i ^ mask, i]
//! ```
//!
//! and `P[i, i ^ mask]` is a product of one single-qubit matrix element per qubit.  Visiting the
//! rows in Gray-code order means exactly one of those factors changes between consecutive rows, so
//! we update the running product with one multiply and one divide rather than recomputing all
//! `num_qubits` factors.  Every single-qubit Pauli element on the non-zero pattern has unit
//! modulus, so the divisor is never zero.

use ndarray::ArrayView2;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::bit_ops::{bit_at, changed_bit, gray_code};
use crate::pauli::{PAULI_MATRICES, num_labels, pauli_flag, xy_mask};
use crate::util::C_ONE;
use crate::{DecomposeError, check_labels, num_qubits_of, run_in_parallel};

/// The factor contributed by `qubit` to the non-zero element in row `row` of the Pauli matrix for
/// `label`.
#[inline(always)]
fn pauli_element(label: usize, qubit: u32, row: usize, mask: usize) -> Complex64 {
    let a = bit_at(row, qubit);
    let b = a ^ bit_at(mask, qubit);
    PAULI_MATRICES[pauli_flag(label, qubit)][a][b]
}

/// The full product of single-qubit elements for row `row`, evaluated from scratch.
#[inline]
fn row_factor(label: usize, row: usize, mask: usize, num_qubits: usize) -> Complex64 {
    (0..num_qubits as u32).fold(C_ONE, |factor, qubit| {
        factor * pauli_element(label, qubit, row, mask)
    })
}

/// The coefficient of a single label.  The operator must already be validated.
pub(crate) fn pauli_coeff(
    label: usize,
    operator: &ArrayView2<Complex64>,
    num_qubits: usize,
) -> Complex64 {
    let dim = 1usize << num_qubits;
    let mask = xy_mask(label, num_qubits);

    let mut factor = row_factor(label, 0, mask, num_qubits);
    let mut coeff = factor * operator[[mask, 0]];

    let mut prev = 0;
    for k in 1..dim {
        let row = gray_code(k);
        let qubit = changed_bit(row, prev);
        let new = pauli_element(label, qubit, row, mask);
        let old = pauli_element(label, qubit, prev, mask);
        factor *= new / old;
        coeff += factor * operator[[row ^ mask, row]];
        prev = row;
    }
    coeff / dim as f64
}

/// Compute every coefficient of the Pauli decomposition of `operator`.
///
/// The output has `4 ** num_qubits` entries indexed by label.
pub fn decompose(operator: ArrayView2<Complex64>) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = num_qubits_of(&operator)?;
    let num_coeffs = num_labels(num_qubits);
    let coeff_fn = |label: usize| pauli_coeff(label, &operator, num_qubits);
    if run_in_parallel(num_qubits) {
        Ok((0..num_coeffs).into_par_iter().map(coeff_fn).collect())
    } else {
        Ok((0..num_coeffs).map(coeff_fn).collect())
    }
}

/// Compute only the coefficients of the given labels, in order.  Repeated labels are allowed.
pub fn inner_products(
    operator: ArrayView2<Complex64>,
    labels: &[usize],
) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = check_labels(&operator, labels)?;
    let coeff_fn = |&label: &usize| pauli_coeff(label, &operator, num_qubits);
    if run_in_parallel(num_qubits) {
        Ok(labels.par_iter().map(coeff_fn).collect())
    } else {
        Ok(labels.iter().map(coeff_fn).collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::AbsDiffEq;
    use ndarray::{Array2, aview2};

    use super::*;
    use crate::pauli::label_from_str;
    use crate::util::{C_ZERO, c64};

    /// The slow variant: evaluate every row's factor independently.
    fn slow_coeff(
        label: usize,
        operator: &ArrayView2<Complex64>,
        num_qubits: usize,
    ) -> Complex64 {
        let dim = 1usize << num_qubits;
        let mask = xy_mask(label, num_qubits);
        (0..dim)
            .map(|row| row_factor(label, row, mask, num_qubits) * operator[[row ^ mask, row]])
            .sum::<Complex64>()
            / dim as f64
    }

    fn test_operator(num_qubits: usize) -> Array2<Complex64> {
        let dim = 1 << num_qubits;
        Array2::from_shape_fn((dim, dim), |(i, j)| {
            c64(((3 * i + j) % 7) as f64 - 2.5, ((i * j + 1) % 5) as f64 * 0.5)
        })
    }

    #[test]
    fn recurrence_matches_direct_evaluation() {
        let num_qubits = 3;
        let op = test_operator(num_qubits);
        for label in 0..num_labels(num_qubits) {
            let fast = pauli_coeff(label, &op.view(), num_qubits);
            let slow = slow_coeff(label, &op.view(), num_qubits);
            assert!(fast.abs_diff_eq(&slow, 1e-12), "label {label}");
        }
    }

    #[test]
    fn decompose_0q_operator() {
        let coeff = c64(1.5, -0.5);
        let arr = [[coeff]];
        assert_eq!(decompose(aview2(&arr)).unwrap(), vec![coeff]);
    }

    #[test]
    fn decompose_pauli_z() {
        let arr = [[c64(1, 0), C_ZERO], [C_ZERO, c64(-1, 0)]];
        let out = decompose(aview2(&arr)).unwrap();
        assert_eq!(out, vec![C_ZERO, C_ZERO, C_ZERO, c64(1, 0)]);
    }

    #[test]
    fn decompose_pauli_y() {
        let arr = [[C_ZERO, c64(0, -1)], [c64(0, 1), C_ZERO]];
        let out = decompose(aview2(&arr)).unwrap();
        assert_eq!(out, vec![C_ZERO, C_ZERO, c64(1, 0), C_ZERO]);
    }

    #[test]
    fn inner_products_of_tensor_product() {
        // X on qubit 1, Z on qubit 0: rows |q1 q0>.
        let arr = [
            [C_ZERO, C_ZERO, c64(1, 0), C_ZERO],
            [C_ZERO, C_ZERO, C_ZERO, c64(-1, 0)],
            [c64(1, 0), C_ZERO, C_ZERO, C_ZERO],
            [C_ZERO, c64(-1, 0), C_ZERO, C_ZERO],
        ];
        let xz = label_from_str("XZ").unwrap();
        let zx = label_from_str("ZX").unwrap();
        let out = inner_products(aview2(&arr), &[xz, zx, xz, 0]).unwrap();
        assert_eq!(out, vec![c64(1, 0), C_ZERO, c64(1, 0), C_ZERO]);
    }

    #[test]
    fn out_of_range_label_fails() {
        let arr = [[C_ZERO, C_ZERO], [C_ZERO, C_ZERO]];
        assert!(matches!(
            inner_products(aview2(&arr), &[4]),
            Err(DecomposeError::LabelOutOfRange { label: 4, .. })
        ));
    }
}
