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

//! Full decomposition by a two-dimensional Walsh-Hadamard-like transform.
//!
//! At level `k` every aligned `2 x 2` block of `2**k`-sized sub-blocks is replaced in-place by its
//! single-qubit Pauli components:
//!
//!   +---------+---------+          +---------+---------+
//!   |         |         |          |         |         |
//!   |   TL    |   TR    |          |  TL+BR  |  TR+BL  |
//!   |         |         |          |   (I)   |   (X)   |
//!   +---------+---------+  =====>  +---------+---------+
//!   |         |         |          |         |         |
//!   |   BL    |   BR    |          | i(TR-BL)|  TL-BR  |
//!   |         |         |          |   (Y)   |   (Z)   |
//!   +---------+---------+          +---------+---------+
//!
//! After all levels, the cell at `(row, col)` holds `dim` times the coefficient of the label whose
//! digit for qubit `t` is `(row_t, col_t)` read as a two-bit number; that is, the label is the
//! Morton interleaving of the row and column bits.  There is no partial mode: the cost is all in
//! the transform, which produces every coefficient at once.

use ndarray::ArrayView2;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::bit_ops::{compact_even_bits, interlace_zeros};
use crate::pauli::num_labels;
use crate::util::{C_ZERO, IM};
use crate::{DecomposeError, num_qubits_of, run_in_parallel};

/// Apply one level of the butterfly, pairing indices that differ in the bit `shift`.
///
/// All four cells of a butterfly are read before any is written.
fn butterfly_level(scratch: &mut [Complex64], side: usize, shift: usize) {
    for row_offset in (0..side).step_by(2 * shift) {
        for col_offset in (0..side).step_by(2 * shift) {
            for row in row_offset..row_offset + shift {
                let top = row * side;
                let bottom = (row + shift) * side;
                for col in col_offset..col_offset + shift {
                    let top_left = scratch[top + col];
                    let top_right = scratch[top + col + shift];
                    let bottom_left = scratch[bottom + col];
                    let bottom_right = scratch[bottom + col + shift];
                    scratch[top + col] = top_left + bottom_right;
                    scratch[bottom + col + shift] = top_left - bottom_right;
                    scratch[top + col + shift] = top_right + bottom_left;
                    scratch[bottom + col] = (top_right - bottom_left) * IM;
                }
            }
        }
    }
}

/// Compute every coefficient of the Pauli decomposition of `operator`.
pub fn decompose(operator: ArrayView2<Complex64>) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = num_qubits_of(&operator)?;
    let side = 1usize << num_qubits;

    // The transform is in place, and the operator isn't ours to overwrite.  The copy is also
    // guaranteed contiguous and row-major, whatever the strides of the input view.
    let mut scratch = operator.iter().copied().collect::<Vec<_>>();
    for qubit in 0..num_qubits {
        butterfly_level(&mut scratch, side, 1 << qubit);
    }

    let norm = 1.0 / side as f64;
    if run_in_parallel(num_qubits) {
        // Scattered writes can't be split between threads, so each label gathers its own cell.
        return Ok((0..num_labels(num_qubits))
            .into_par_iter()
            .map(|label| {
                let row = compact_even_bits(label >> 1, num_qubits as u32);
                let col = compact_even_bits(label, num_qubits as u32);
                scratch[row * side + col] * norm
            })
            .collect());
    }
    let interlaced = (0..side)
        .map(|index| interlace_zeros(index, num_qubits as u32))
        .collect::<Vec<_>>();
    let mut out = vec![C_ZERO; num_labels(num_qubits)];
    for row in 0..side {
        for col in 0..side {
            out[(interlaced[row] << 1) | interlaced[col]] = scratch[row * side + col] * norm;
        }
    }
    Ok(out)
}
