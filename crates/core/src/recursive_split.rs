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

//! The "tensorized Pauli decomposition" by recursive block splitting.
//!
//! This follows `Hantzko, Binkowski and Gupta (2023) <https://arxiv.org/abs/2310.13421>`__.  An
//! operator on `k` qubits is written as `sum_P P (x) M_P` over the single-qubit Paulis acting on
//! the most significant qubit, where each `M_P` is a combination of the four quadrants:
//!
//!   +---------+---------+
//!   |         |         |          M_I =  (TL + BR) / 2
//!   |   TL    |   TR    |          M_X =  (BL + TR) / 2
//!   |         |         |          M_Y = -i (BL - TR) / 2
//!   +---------+---------+          M_Z =  (TL - BR) / 2
//!   |         |         |
//!   |   BL    |   BR    |
//!   |         |         |
//!   +---------+---------+
//!
//! and then each `M_P` is decomposed in turn.  The most significant qubit is therefore the most
//! significant base-4 digit of the label, and the output of each `M_P` fills one contiguous
//! quarter of the output in I, X, Y, Z order.
//!
//! Every branch owns its own copy of its block and writes to its own disjoint quarter of the
//! output, so sibling branches can run on separate threads without sharing anything mutable.  A
//! block is dropped as soon as its four children are built.

use ndarray::{Array2, ArrayView2, Zip, s};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::pauli::num_labels;
use crate::util::C_ZERO;
use crate::{DecomposeError, check_labels, num_qubits_of, run_in_parallel, select_labels};

const HALF: f64 = 0.5;
const M_HALF_IM: Complex64 = Complex64::new(0., -0.5);

/// Children with fewer coefficients than this are always handled on the current thread.
const MIN_PARALLEL_CHUNK: usize = 1 << 8;

/// The four weighted quadrant combinations of a block with side length at least 2, in I, X, Y, Z
/// order.
fn split_components(block: ArrayView2<Complex64>) -> [Array2<Complex64>; 4] {
    let half = block.nrows() / 2;
    let top_left = block.slice(s![..half, ..half]);
    let top_right = block.slice(s![..half, half..]);
    let bottom_left = block.slice(s![half.., ..half]);
    let bottom_right = block.slice(s![half.., half..]);
    [
        Zip::from(top_left)
            .and(bottom_right)
            .map_collect(|&a, &b| (a + b) * HALF),
        Zip::from(bottom_left)
            .and(top_right)
            .map_collect(|&a, &b| (a + b) * HALF),
        Zip::from(bottom_left)
            .and(top_right)
            .map_collect(|&a, &b| (a - b) * M_HALF_IM),
        Zip::from(top_left)
            .and(bottom_right)
            .map_collect(|&a, &b| (a - b) * HALF),
    ]
}

/// Decompose each of the four children into its own quarter of `out`.
fn decompose_children(children: [Array2<Complex64>; 4], out: &mut [Complex64], parallel: bool) {
    let quarter = out.len() / 4;
    let parallel = parallel && quarter >= MIN_PARALLEL_CHUNK;
    if parallel {
        out.par_chunks_mut(quarter)
            .zip(children.into_par_iter())
            .for_each(|(chunk, child)| decompose_owned(child, chunk, parallel));
    } else {
        out.chunks_mut(quarter)
            .zip(children)
            .for_each(|(chunk, child)| decompose_owned(child, chunk, parallel));
    }
}

/// Decompose a block that this branch owns, releasing it before recursing.
fn decompose_owned(block: Array2<Complex64>, out: &mut [Complex64], parallel: bool) {
    if block.nrows() == 1 {
        out[0] = block[[0, 0]];
        return;
    }
    let children = split_components(block.view());
    drop(block);
    decompose_children(children, out, parallel);
}

/// Decompose a borrowed operator into `out`, which must have `side * side` entries.
fn decompose_into(operator: ArrayView2<Complex64>, out: &mut [Complex64], parallel: bool) {
    if operator.nrows() == 1 {
        out[0] = operator[[0, 0]];
        return;
    }
    decompose_children(split_components(operator), out, parallel);
}

/// Compute every coefficient of the Pauli decomposition of `operator`.
pub fn decompose(operator: ArrayView2<Complex64>) -> Result<Vec<Complex64>, DecomposeError> {
    let num_qubits = num_qubits_of(&operator)?;
    let mut out = vec![C_ZERO; num_labels(num_qubits)];
    decompose_into(operator, &mut out, run_in_parallel(num_qubits));
    Ok(out)
}

/// Compute the coefficients of the given labels, in order.
///
/// The recursion doesn't split along arbitrary subsets of labels, so this computes the full
/// decomposition and selects from it.
pub fn inner_products(
    operator: ArrayView2<Complex64>,
    labels: &[usize],
) -> Result<Vec<Complex64>, DecomposeError> {
    check_labels(&operator, labels)?;
    Ok(select_labels(&decompose(operator)?, labels))
}
