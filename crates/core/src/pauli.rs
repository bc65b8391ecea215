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

//! Single-qubit Pauli operators and the integer encoding of Pauli strings.
//!
//! A Pauli string on `n` qubits is encoded as a label in `[0, 4**n)`.  Base-4 digit `t` of the
//! label, `(label >> 2t) & 3`, selects the operator on qubit `t`, and qubit `t` acts on bit `t`
//! of a row or column index of the matrix.  The digit values are the discriminants of [Pauli].
//!
//! When written out as a string, qubit 0 is the rightmost letter, so `"XZ"` is the label with a Z
//! on qubit 0 and an X on qubit 1.

use std::fmt;

use num_complex::Complex64;
use thiserror::Error;

use crate::DecomposeError;
use crate::bit_ops::compact_even_bits;
use crate::util::{C_M_ONE, C_ONE, C_ZERO, IM, M_IM};

/// A single-qubit Pauli operator, with the discriminant used as its base-4 digit in a label.
///
/// In the two-bit representation, the low bit is set for X and Z and the high bit is set for Y and
/// Z, so the operator is off-diagonal exactly when the two bits differ, and it negates the
/// amplitude of `|1>` exactly when the high bit is set.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pauli {
    I = 0b00,
    X = 0b01,
    Y = 0b10,
    Z = 0b11,
}

/// The dense matrices of the single-qubit Paulis, indexed by `[pauli][row][column]`.
pub const PAULI_MATRICES: [[[Complex64; 2]; 2]; 4] = [
    [[C_ONE, C_ZERO], [C_ZERO, C_ONE]],
    [[C_ZERO, C_ONE], [C_ONE, C_ZERO]],
    [[C_ZERO, M_IM], [IM, C_ZERO]],
    [[C_ONE, C_ZERO], [C_ZERO, C_M_ONE]],
];

impl Pauli {
    /// All four operators, in label-digit order.
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    /// The letter used for this operator in a Pauli-string label.
    #[inline]
    pub fn label(&self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Parse a single label letter.  Lower-case letters are accepted.
    #[inline]
    pub fn from_char(letter: char) -> Option<Self> {
        match letter {
            'I' | 'i' => Some(Self::I),
            'X' | 'x' => Some(Self::X),
            'Y' | 'y' => Some(Self::Y),
            'Z' | 'z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Does this operator swap `|0>` and `|1>`?  True for X and Y.
    #[inline]
    pub fn is_off_diagonal(&self) -> bool {
        let bits = *self as u8;
        ((bits ^ (bits >> 1)) & 1) == 1
    }

    /// True for I and Z.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        !self.is_off_diagonal()
    }

    /// Is the matrix element in the `|1>` row the negative of the one in the `|0>` row?  True for
    /// Y and Z.
    #[inline]
    pub fn flips_sign(&self) -> bool {
        (*self as u8) & 0b10 != 0
    }

    /// The dense 2x2 matrix of this operator.
    #[inline]
    pub fn matrix(&self) -> &'static [[Complex64; 2]; 2] {
        &PAULI_MATRICES[*self as usize]
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<Pauli> for u8 {
    fn from(value: Pauli) -> u8 {
        value as u8
    }
}

/// The error type for a failed conversion into [Pauli].
#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0} is not a valid Pauli digit")]
pub struct PauliFromU8Error(u8);

impl TryFrom<u8> for Pauli {
    type Error = PauliFromU8Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::I),
            1 => Ok(Self::X),
            2 => Ok(Self::Y),
            3 => Ok(Self::Z),
            _ => Err(PauliFromU8Error(value)),
        }
    }
}

/// The number of Pauli labels (equivalently, decomposition coefficients) on `num_qubits` qubits.
#[inline]
pub fn num_labels(num_qubits: usize) -> usize {
    1 << (2 * num_qubits)
}

/// The two-bit digit of `label` for the given qubit.
#[inline(always)]
pub fn pauli_flag(label: usize, qubit: u32) -> usize {
    (label >> (2 * qubit)) & 0b11
}

/// The operator that `label` places on `qubit`.
#[inline]
pub fn pauli_at(label: usize, qubit: u32) -> Pauli {
    match pauli_flag(label, qubit) {
        0 => Pauli::I,
        1 => Pauli::X,
        2 => Pauli::Y,
        _ => Pauli::Z,
    }
}

/// The qubits on which `label` has an off-diagonal operator (X or Y), as a bitmask.
///
/// Row `i` of the Pauli matrix has its single non-zero entry in column `i ^ xy_mask`.
#[inline]
pub fn xy_mask(label: usize, num_qubits: usize) -> usize {
    compact_even_bits(label ^ (label >> 1), num_qubits as u32)
}

/// The qubits on which `label` has a sign-flipping operator (Y or Z), as a bitmask.
#[inline]
pub fn sign_mask(label: usize, num_qubits: usize) -> usize {
    compact_even_bits(label >> 1, num_qubits as u32)
}

/// The number of Y operators in `label`.
#[inline]
pub fn count_y(label: usize, num_qubits: usize) -> u32 {
    (xy_mask(label, num_qubits) & sign_mask(label, num_qubits)).count_ones()
}

/// Pack a list of operators into a label.  Index `t` of the slice is the operator on qubit `t`.
pub fn label_from_paulis(paulis: &[Pauli]) -> usize {
    paulis
        .iter()
        .enumerate()
        .fold(0, |acc, (qubit, pauli)| {
            acc | ((*pauli as usize) << (2 * qubit))
        })
}

/// Unpack a label into its operators.  Index `t` of the output is the operator on qubit `t`.
pub fn paulis_from_label(label: usize, num_qubits: usize) -> Vec<Pauli> {
    (0..num_qubits as u32).map(|q| pauli_at(label, q)).collect()
}

/// Write out a label as a string of letters, with qubit 0 on the right.
pub fn label_to_string(label: usize, num_qubits: usize) -> String {
    (0..num_qubits as u32)
        .rev()
        .map(|q| pauli_at(label, q).label())
        .collect()
}

/// Parse a string of letters (qubit 0 on the right) into a label.  The number of qubits is the
/// length of the string.
pub fn label_from_str(letters: &str) -> Result<usize, DecomposeError> {
    letters
        .chars()
        .rev()
        .enumerate()
        .try_fold(0usize, |acc, (qubit, letter)| {
            let pauli = Pauli::from_char(letter)
                .ok_or_else(|| DecomposeError::BadLabel(letters.to_owned()))?;
            if 2 * qubit >= usize::BITS as usize {
                return Err(DecomposeError::BadLabel(letters.to_owned()));
            }
            Ok(acc | ((pauli as usize) << (2 * qubit)))
        })
}

/// Check that `label` addresses a Pauli string on `num_qubits` qubits.
#[inline]
pub fn check_label(label: usize, num_qubits: usize) -> Result<(), DecomposeError> {
    if label >= num_labels(num_qubits) {
        return Err(DecomposeError::LabelOutOfRange { label, num_qubits });
    }
    Ok(())
}
