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

use ndarray::ArrayView2;
use num_complex::Complex64;
use rand::Rng;
use tracing::{info, warn};

use paulidecomp_core::{Method, num_qubits_of};

use crate::HarnessError;
use crate::randomiser::random_matrix;

/// Largest absolute difference tolerated between two methods' coefficients.
pub const MAX_DIFFERENCE: f64 = 1e-10;

/// The first label at which `left` and `right` differ by at least [MAX_DIFFERENCE], with the size
/// of that difference.  Vectors of different lengths disagree at the end of the shorter one.
pub fn first_disagreement(left: &[Complex64], right: &[Complex64]) -> Option<(usize, f64)> {
    if let Some((label, difference)) = left
        .iter()
        .zip(right)
        .map(|(a, b)| (a - b).norm())
        .enumerate()
        .find(|(_, difference)| difference.is_nan() || *difference >= MAX_DIFFERENCE)
    {
        return Some((label, difference));
    }
    (left.len() != right.len()).then_some((left.len().min(right.len()), f64::INFINITY))
}

/// Decompose `operator` with every method in `methods` and check each result against the first.
pub fn compare_outputs(
    methods: &[Method],
    operator: ArrayView2<Complex64>,
) -> Result<(), HarnessError> {
    let num_qubits = num_qubits_of(&operator)?;
    let Some((&reference, others)) = methods.split_first() else {
        return Ok(());
    };
    let expected = reference.decompose(operator)?;
    for &method in others {
        let actual = method.decompose(operator)?;
        if let Some((label, difference)) = first_disagreement(&actual, &expected) {
            warn!(
                %method,
                %reference,
                num_qubits,
                label,
                difference,
                "methods disagree"
            );
            return Err(HarnessError::Disagreement {
                method,
                reference,
                num_qubits,
                label,
                difference,
            });
        }
    }
    Ok(())
}

/// Check that all `methods` agree on a fresh random operator for every qubit count from 1 to
/// `max_num_qubits` inclusive, stopping at the first disagreement.
pub fn check_methods<R: Rng + ?Sized>(
    methods: &[Method],
    max_num_qubits: usize,
    rng: &mut R,
) -> Result<(), HarnessError> {
    for num_qubits in 1..=max_num_qubits {
        info!(num_qubits, "checking methods agree");
        let operator = random_matrix(rng, num_qubits);
        compare_outputs(methods, operator.view())?;
    }
    info!(num_methods = methods.len(), max_num_qubits, "all methods agree");
    Ok(())
}
