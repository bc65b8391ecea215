use approx::AbsDiffEq;
use ndarray::{Array2, aview2};
use num_complex::Complex64;
use paulidecomp_core::composed_sparse::{ComposedPauli, reconstruct};
use paulidecomp_core::pauli::{label_from_str, label_to_string, num_labels};
use paulidecomp_core::{Method, Pauli};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

const MAX_DIFFERENCE: f64 = 1e-10;

fn random_operator(num_qubits: usize, seed: u64) -> Array2<Complex64> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let side = 1 << num_qubits;
    Array2::from_shape_simple_fn((side, side), || {
        Complex64::new(rng.random::<f64>(), rng.random::<f64>())
    })
}

/// The dense matrix of a Pauli string given by its letters, qubit 0 rightmost, built with
/// Kronecker products independently of any of the label arithmetic.
fn dense_from_letters(letters: &str) -> Array2<Complex64> {
    letters.chars().fold(
        Array2::from_elem((1, 1), Complex64::new(1., 0.)),
        |acc, letter| {
            let single = Pauli::from_char(letter).unwrap().matrix();
            let side = acc.nrows();
            Array2::from_shape_fn((2 * side, 2 * side), |(i, j)| {
                acc[[i / 2, j / 2]] * single[i % 2][j % 2]
            })
        },
    )
}

fn operator_strategy(max_qubits: usize) -> impl Strategy<Value = (usize, Array2<Complex64>)> {
    (1..=max_qubits, any::<u64>())
        .prop_map(|(num_qubits, seed)| (num_qubits, random_operator(num_qubits, seed)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn all_methods_agree((_num_qubits, op) in operator_strategy(5)) {
        let reference = Method::ALL[0].decompose(op.view()).unwrap();
        for method in &Method::ALL[1..] {
            let out = method.decompose(op.view()).unwrap();
            prop_assert_eq!(out.len(), reference.len());
            for (label, (a, b)) in out.iter().zip(reference.iter()).enumerate() {
                prop_assert!(
                    (*a - *b).norm() < MAX_DIFFERENCE,
                    "{} disagrees at label {}: {} vs {}", method, label, a, b
                );
            }
        }
    }

    #[test]
    fn inner_products_match_full_decomposition(
        (num_qubits, op) in operator_strategy(5),
        raw_labels in prop::collection::vec(any::<usize>(), 1..24),
    ) {
        let labels = raw_labels
            .iter()
            .map(|label| label % num_labels(num_qubits))
            .chain(raw_labels.first().map(|label| label % num_labels(num_qubits)))
            .collect::<Vec<_>>();
        for method in Method::ALL {
            let full = method.decompose(op.view()).unwrap();
            let partial = method.inner_products(op.view(), &labels).unwrap();
            prop_assert_eq!(partial.len(), labels.len());
            for (coeff, &label) in partial.iter().zip(labels.iter()) {
                prop_assert!((*coeff - full[label]).norm() < MAX_DIFFERENCE);
            }
        }
    }

    #[test]
    fn input_is_not_mutated((_num_qubits, op) in operator_strategy(4)) {
        let before = op.clone();
        for method in Method::ALL {
            method.decompose(op.view()).unwrap();
            method.inner_products(op.view(), &[0, 1]).unwrap();
            prop_assert_eq!(&op, &before);
        }
    }

    #[test]
    fn one_by_one_is_its_own_coefficient(re in -1e6f64..1e6, im in -1e6f64..1e6) {
        let z = Complex64::new(re, im);
        for method in Method::ALL {
            prop_assert_eq!(method.decompose(aview2(&[[z]])).unwrap(), vec![z]);
        }
    }

    #[test]
    fn reconstruction_round_trips((_num_qubits, op) in operator_strategy(4)) {
        for method in Method::ALL {
            let coeffs = method.decompose(op.view()).unwrap();
            let rebuilt = reconstruct(&coeffs).unwrap();
            prop_assert!(rebuilt.abs_diff_eq(&op, MAX_DIFFERENCE));
        }
    }
}

#[test]
fn pauli_z_has_only_a_z_coefficient() {
    let zero = Complex64::new(0., 0.);
    let one = Complex64::new(1., 0.);
    let arr = [[one, zero], [zero, -one]];
    for method in Method::ALL {
        let out = method.decompose(aview2(&arr)).unwrap();
        let expected = [zero, zero, zero, one];
        assert!(out[..].abs_diff_eq(&expected[..], MAX_DIFFERENCE), "{method}");
    }
}

#[test]
fn label_order_matches_letters() {
    for num_qubits in 1..=3 {
        for label in 0..num_labels(num_qubits) {
            let letters = label_to_string(label, num_qubits);
            assert_eq!(label_from_str(&letters).unwrap(), label);

            let basis = dense_from_letters(&letters);
            assert_eq!(ComposedPauli::new(label, num_qubits).to_dense(), basis);
            for method in Method::ALL {
                let out = method.decompose(basis.view()).unwrap();
                assert_eq!(out.len(), basis.nrows() * basis.nrows());
                for (other, coeff) in out.iter().enumerate() {
                    let expected = if other == label { 1.0 } else { 0.0 };
                    assert!(
                        (*coeff - expected).norm() < MAX_DIFFERENCE,
                        "{method}: {letters} has coefficient {coeff} at label {other}"
                    );
                }
            }
        }
    }
}

#[test]
fn large_operators_agree() {
    // Big enough to cross the threshold for the threaded kernels.
    let num_qubits = paulidecomp_core::PARALLEL_THRESHOLD;
    let op = random_operator(num_qubits, 2024);
    let reference = Method::TransformReorder.decompose(op.view()).unwrap();
    for method in Method::ALL {
        let out = method.decompose(op.view()).unwrap();
        assert!(out[..].abs_diff_eq(&reference[..], MAX_DIFFERENCE), "{method}");
    }
}
