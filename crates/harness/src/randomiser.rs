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

use ndarray::Array2;
use num_complex::Complex64;
use rand::prelude::*;
use rand::seq::index;
use rand_distr::StandardNormal;

use paulidecomp_core::Pauli;
use paulidecomp_core::pauli::label_from_paulis;

/// A dense operator on `num_qubits` qubits whose real and imaginary parts are each uniform in
/// `[0, 1)`.
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, num_qubits: usize) -> Array2<Complex64> {
    let side = 1 << num_qubits;
    Array2::from_shape_simple_fn((side, side), || {
        Complex64::new(rng.random::<f64>(), rng.random::<f64>())
    })
}

/// A dense operator drawn from the Ginibre ensemble: independent complex normal entries with unit
/// variance.
pub fn random_ginibre_matrix<R: Rng + ?Sized>(rng: &mut R, num_qubits: usize) -> Array2<Complex64> {
    let side = 1 << num_qubits;
    Array2::from_shape_simple_fn((side, side), || {
        Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal))
            * std::f64::consts::FRAC_1_SQRT_2
    })
}

/// A Pauli label on `num_qubits` qubits with exactly `num_non_identity` non-identity operators,
/// placed on distinct qubits chosen uniformly, each independently one of X, Y or Z.
///
/// # Panics
///
/// If `num_non_identity > num_qubits`.
pub fn random_pauli_label<R: Rng + ?Sized>(
    rng: &mut R,
    num_qubits: usize,
    num_non_identity: usize,
) -> usize {
    assert!(
        num_non_identity <= num_qubits,
        "cannot place {num_non_identity} operators on {num_qubits} qubits"
    );
    let mut paulis = vec![Pauli::I; num_qubits];
    for qubit in index::sample(rng, num_qubits, num_non_identity) {
        paulis[qubit] = Pauli::ALL[rng.random_range(1..4)];
    }
    label_from_paulis(&paulis)
}
