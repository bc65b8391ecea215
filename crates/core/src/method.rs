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

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView2;
use num_complex::Complex64;
use tracing::debug;

use crate::{
    DecomposeError, check_labels, composed_sparse, direct_recurrence, recursive_split,
    select_labels, transform_reorder,
};

/// The interchangeable decomposition algorithms.  All of them produce identical coefficient
/// vectors (up to floating-point rounding) under the same label convention.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Method {
    /// Per-label Gray-code recurrence over the contributing matrix elements.
    DirectRecurrence,
    /// Per-label gather against the composed sparse Pauli matrix.
    ComposedSparse,
    /// One in-place butterfly transform over the whole matrix, then a Morton reordering.
    TransformReorder,
    /// Recursive quadrant splitting on the most significant qubit.
    RecursiveSplit,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::DirectRecurrence,
        Method::ComposedSparse,
        Method::TransformReorder,
        Method::RecursiveSplit,
    ];

    /// The name used to refer to this method in results files and from Python space.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectRecurrence => "direct_recurrence",
            Self::ComposedSparse => "composed_sparse",
            Self::TransformReorder => "transform_reorder",
            Self::RecursiveSplit => "recursive_split",
        }
    }

    /// Does this method evaluate a subset of labels for less than the cost of all of them?
    pub fn has_partial_mode(&self) -> bool {
        matches!(self, Self::DirectRecurrence | Self::ComposedSparse)
    }

    /// Compute all `4 ** num_qubits` coefficients of `operator`, indexed by label.
    pub fn decompose(
        &self,
        operator: ArrayView2<Complex64>,
    ) -> Result<Vec<Complex64>, DecomposeError> {
        debug!(
            method = self.name(),
            side = operator.nrows(),
            "full decomposition"
        );
        match self {
            Self::DirectRecurrence => direct_recurrence::decompose(operator),
            Self::ComposedSparse => composed_sparse::decompose(operator),
            Self::TransformReorder => transform_reorder::decompose(operator),
            Self::RecursiveSplit => recursive_split::decompose(operator),
        }
    }

    /// Compute the coefficients of `labels`, in order and with repeats.
    ///
    /// Methods without a partial mode compute the full decomposition and select from it.
    pub fn inner_products(
        &self,
        operator: ArrayView2<Complex64>,
        labels: &[usize],
    ) -> Result<Vec<Complex64>, DecomposeError> {
        debug!(
            method = self.name(),
            side = operator.nrows(),
            num_labels = labels.len(),
            "inner products"
        );
        match self {
            Self::DirectRecurrence => direct_recurrence::inner_products(operator, labels),
            Self::ComposedSparse => composed_sparse::inner_products(operator, labels),
            Self::TransformReorder => {
                check_labels(&operator, labels)?;
                Ok(select_labels(
                    &transform_reorder::decompose(operator)?,
                    labels,
                ))
            }
            Self::RecursiveSplit => recursive_split::inner_products(operator, labels),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = DecomposeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| DecomposeError::BadMethod(name.to_owned()))
    }
}
