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

//! Tooling that drives the decomposition methods from the outside: random inputs, pairwise
//! correctness checks, and timing runs whose results are persisted as they are produced.

use paulidecomp_core::{DecomposeError, Method};
use thiserror::Error;

pub mod benchmarker;
pub mod correcter;
pub mod randomiser;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "{method} disagrees with {reference} on {num_qubits} qubits at label {label} by {difference:e}"
    )]
    Disagreement {
        method: Method,
        reference: Method,
        num_qubits: usize,
        label: usize,
        difference: f64,
    },
}
