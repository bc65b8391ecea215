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

//! Wall-clock timing of the decomposition methods over growing problem sizes.
//!
//! Each benchmark rewrites its whole results file after every completed step, so a run that is
//! interrupted leaves behind a valid file describing everything measured so far.  The `reached_*`
//! markers record the last completed step.

use std::collections::BTreeMap;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use ndarray::Array2;
use num_complex::Complex64;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use paulidecomp_core::Method;

use crate::HarnessError;
use crate::randomiser::{random_matrix, random_pauli_label};

/// Durations in nanoseconds for each repetition, keyed by method name.
pub type MethodDurations = BTreeMap<String, Vec<u64>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Timed repetitions per method and problem size.  Every repetition gets fresh inputs.
    pub num_reps: usize,
    pub min_qubits: usize,
    pub max_qubits: usize,
    /// Seed for the random inputs.
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            num_reps: 10,
            min_qubits: 1,
            max_qubits: 8,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FullDecompositionResults {
    pub config: BenchmarkConfig,
    /// The largest qubit count for which every method has been timed.
    pub reached_qubits: Option<usize>,
    /// `durations[num_qubits][method]`.
    pub durations: BTreeMap<usize, MethodDurations>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InnerProductsResults {
    pub config: BenchmarkConfig,
    pub reached_qubits: Option<usize>,
    pub reached_non_identity: Option<usize>,
    pub reached_products: Option<usize>,
    /// `durations[num_qubits][num_non_identity][num_products][method]`.
    pub durations: BTreeMap<usize, BTreeMap<usize, BTreeMap<usize, MethodDurations>>>,
}

/// Call `func` `num_reps` times, each on a fresh value from `make_args`, and return how long each
/// call took in nanoseconds.  Only the call itself is timed.  The first error aborts the run.
pub fn repeatedly_time<A, T, E>(
    mut func: impl FnMut(A) -> Result<T, E>,
    mut make_args: impl FnMut() -> A,
    num_reps: usize,
) -> Result<Vec<u64>, E> {
    let mut durations = Vec::with_capacity(num_reps);
    for _ in 0..num_reps {
        let args = make_args();
        let start = Instant::now();
        let out = func(args)?;
        let elapsed = start.elapsed();
        black_box(out);
        durations.push(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
    }
    Ok(durations)
}

/// Serialize `results` to `path`, replacing any previous contents.
///
/// The file is written beside its destination and renamed over it, so readers never observe a
/// partially written file.
pub fn save_results<T: Serialize>(path: &Path, results: &T) -> Result<(), HarnessError> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".partial");
    fs::write(&staging, serde_json::to_vec_pretty(results)?)?;
    fs::rename(&staging, path)?;
    Ok(())
}

/// Time the full decomposition of every method on random operators of each size in the
/// configured qubit range, saving to `path` after each size.
pub fn benchmark_full_decomposition(
    path: &Path,
    methods: &[Method],
    config: &BenchmarkConfig,
) -> Result<FullDecompositionResults, HarnessError> {
    let mut rng = Pcg64Mcg::seed_from_u64(config.seed);
    let mut results = FullDecompositionResults {
        config: config.clone(),
        reached_qubits: None,
        durations: BTreeMap::new(),
    };
    save_results(path, &results)?;
    for num_qubits in config.min_qubits..=config.max_qubits {
        info!(num_qubits, "timing full decompositions");
        let mut by_method = MethodDurations::new();
        for &method in methods {
            let durations = repeatedly_time(
                |operator: Array2<Complex64>| method.decompose(operator.view()),
                || random_matrix(&mut rng, num_qubits),
                config.num_reps,
            )?;
            debug!(%method, num_qubits, ?durations, "timed");
            by_method.insert(method.name().to_owned(), durations);
        }
        results.durations.insert(num_qubits, by_method);
        results.reached_qubits = Some(num_qubits);
        save_results(path, &results)?;
    }
    info!(path = %path.display(), "full decomposition benchmark complete");
    Ok(results)
}

/// Time computing a handful of inner products with every method.
///
/// For each qubit count in the configured range, each number of non-identity operators from 1 to
/// the qubit count, and each number of products from 1 to `max_num_products(num_qubits)`, every
/// repetition draws a fresh operator and fresh labels with exactly that many non-identity
/// operators.  Results are saved to `path` after each innermost step.
pub fn benchmark_inner_products(
    path: &Path,
    methods: &[Method],
    config: &BenchmarkConfig,
    max_num_products: impl Fn(usize) -> usize,
) -> Result<InnerProductsResults, HarnessError> {
    let mut rng = Pcg64Mcg::seed_from_u64(config.seed);
    let mut results = InnerProductsResults {
        config: config.clone(),
        reached_qubits: None,
        reached_non_identity: None,
        reached_products: None,
        durations: BTreeMap::new(),
    };
    save_results(path, &results)?;
    for num_qubits in config.min_qubits..=config.max_qubits {
        info!(num_qubits, "timing inner products");
        for num_non_identity in 1..=num_qubits {
            for num_products in 1..=max_num_products(num_qubits) {
                let mut by_method = MethodDurations::new();
                for &method in methods {
                    let durations = repeatedly_time(
                        |(operator, labels): (Array2<Complex64>, Vec<usize>)| {
                            method.inner_products(operator.view(), &labels)
                        },
                        || {
                            let operator = random_matrix(&mut rng, num_qubits);
                            let labels = (0..num_products)
                                .map(|_| random_pauli_label(&mut rng, num_qubits, num_non_identity))
                                .collect::<Vec<_>>();
                            (operator, labels)
                        },
                        config.num_reps,
                    )?;
                    by_method.insert(method.name().to_owned(), durations);
                }
                results
                    .durations
                    .entry(num_qubits)
                    .or_default()
                    .entry(num_non_identity)
                    .or_default()
                    .insert(num_products, by_method);
                results.reached_qubits = Some(num_qubits);
                results.reached_non_identity = Some(num_non_identity);
                results.reached_products = Some(num_products);
                save_results(path, &results)?;
            }
        }
    }
    info!(path = %path.display(), "inner products benchmark complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            num_reps: 3,
            min_qubits: 1,
            max_qubits: 3,
            seed: 5,
        }
    }

    #[test]
    fn times_every_repetition_on_fresh_arguments() {
        let mut next = 0;
        let mut seen = Vec::new();
        let durations = repeatedly_time(
            |arg: usize| {
                seen.push(arg);
                Ok::<_, ()>(arg)
            },
            || {
                next += 1;
                next
            },
            4,
        )
        .unwrap();
        assert_eq!(durations.len(), 4);
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn timing_stops_at_first_error() {
        let mut calls = 0;
        let out = repeatedly_time(
            |arg: usize| {
                calls += 1;
                if arg == 2 { Err("boom") } else { Ok(arg) }
            },
            {
                let mut next = 0;
                move || {
                    next += 1;
                    next
                }
            },
            5,
        );
        assert_eq!(out, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = small_config();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<BenchmarkConfig>(&text).unwrap(), config);
    }

    #[test]
    fn full_decomposition_results_are_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("full.json");
        let config = small_config();
        let results = benchmark_full_decomposition(&path, &Method::ALL, &config).unwrap();

        assert_eq!(results.reached_qubits, Some(3));
        assert_eq!(results.durations.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        for by_method in results.durations.values() {
            assert_eq!(by_method.len(), Method::ALL.len());
            for method in Method::ALL {
                assert_eq!(by_method[method.name()].len(), config.num_reps);
            }
        }

        let saved: FullDecompositionResults =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, results);
        assert!(!dir.path().join("full.json.partial").exists());
    }

    #[test]
    fn inner_products_results_are_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inner.json");
        let config = BenchmarkConfig {
            num_reps: 2,
            min_qubits: 2,
            max_qubits: 3,
            seed: 11,
        };
        let methods = [Method::DirectRecurrence, Method::RecursiveSplit];
        let results = benchmark_inner_products(&path, &methods, &config, |n| n).unwrap();

        assert_eq!(results.reached_qubits, Some(3));
        assert_eq!(results.reached_non_identity, Some(3));
        assert_eq!(results.reached_products, Some(3));
        let two = &results.durations[&2];
        assert_eq!(two.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(two[&2].keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(two[&1][&2]["recursive_split"].len(), 2);

        let saved: InnerProductsResults =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, results);
    }

    #[test]
    fn empty_range_still_writes_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let config = BenchmarkConfig {
            min_qubits: 4,
            max_qubits: 3,
            ..small_config()
        };
        let results = benchmark_full_decomposition(&path, &Method::ALL, &config).unwrap();
        assert_eq!(results.reached_qubits, None);
        let saved: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved["reached_qubits"], serde_json::Value::Null);
        assert_eq!(saved["config"]["min_qubits"], 4);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "this is not json and is longer than the replacement").unwrap();
        save_results(&path, &vec![1, 2]).unwrap();
        let saved: Vec<u32> = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved, vec![1, 2]);
    }
}
