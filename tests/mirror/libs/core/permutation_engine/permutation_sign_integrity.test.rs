// [tests/mirror/libs/core/permutation_engine/permutation_sign_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: PERMUTATION SIGN CERTIFIER (V7.2 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE
 * RESPONSABILIDAD: CERTIFICACIÓN DE PARIDAD, DETERMINANTE Y TABLA D(n)
 *
 * # Mathematical Proof (Dual Path Parity):
 * El signo por conteo de inversiones y el determinante de la matriz de
 * permutación son definiciones equivalentes; este certificador los
 * confronta exhaustivamente para n ≤ 6 y por muestreo proptest, y sella
 * la recurrencia subfactorial contra una evaluación independiente.
 * =================================================================
 */

use signum_core_perm::prelude::*;

/// Genera todas las permutaciones de {1,…,n} por recursión simple.
fn full_symmetric_group(dimension: usize) -> Vec<Vec<u8>> {
    fn recurse(dimension: usize, scratch: &mut Vec<u8>, used: &mut Vec<bool>, sink: &mut Vec<Vec<u8>>) {
        if scratch.len() == dimension {
            sink.push(scratch.clone());
            return;
        }
        for value in 1..=dimension as u8 {
            if used[value as usize] {
                continue;
            }
            used[value as usize] = true;
            scratch.push(value);
            recurse(dimension, scratch, used, sink);
            scratch.pop();
            used[value as usize] = false;
        }
    }
    let mut sink = Vec::new();
    recurse(dimension, &mut Vec::new(), &mut vec![false; dimension + 1], &mut sink);
    sink
}

/// Composición (p ∘ q)[i] = p[q[i] − 1].
fn compose(outer: &[u8], inner: &[u8]) -> Vec<u8> {
    inner.iter().map(|&value| outer[value as usize - 1]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * Confronta exhaustivamente la paridad por inversiones contra el
     * determinante de Bareiss para todo el grupo simétrico con n ≤ 6.
     */
    #[test]
    fn certify_inversion_parity_equals_determinant_sign() {
        for dimension in 1..=6usize {
            for permutation in full_symmetric_group(dimension) {
                let inversion_sign = i128::from(parity_sign(&permutation));
                let determinant_sign = permutation_matrix_determinant(&permutation)
                    .expect("DET_FAULT: permutation matrix must resolve");
                assert_eq!(
                    inversion_sign, determinant_sign,
                    "parity divergence at {permutation:?}"
                );
            }
        }
    }

    /**
     * Sella la recurrencia D(n) = (n−1)(D(n−1) + D(n−2)) contra una
     * evaluación independiente para n ∈ [0, 12].
     */
    #[test]
    fn certify_subfactorial_recurrence_window() {
        let mut independent: Vec<u128> = vec![1, 0];
        for order in 2..=12usize {
            let next = (order as u128 - 1) * (independent[order - 1] + independent[order - 2]);
            independent.push(next);
        }
        for (order, &expected) in independent.iter().enumerate() {
            assert_eq!(derangement_count(order).unwrap(), expected);
        }
    }

    /// El signo de cada clase de conjugación de S4 coincide con su paridad de ciclo.
    #[test]
    fn certify_sign_by_cycle_structure() {
        assert_eq!(parity_sign(&[1, 2, 3, 4]), 1); // identidad
        assert_eq!(parity_sign(&[2, 1, 3, 4]), -1); // transposición
        assert_eq!(parity_sign(&[2, 3, 1, 4]), 1); // 3-ciclo
        assert_eq!(parity_sign(&[2, 3, 4, 1]), -1); // 4-ciclo
        assert_eq!(parity_sign(&[2, 1, 4, 3]), 1); // (12)(34)
    }

    #[test]
    fn certify_validated_frontier_rejects_malformed_input() {
        assert!(validated_sign(&[1, 1, 2]).is_err());
        assert!(validated_sign(&[2, 4, 3]).is_err());
        assert!(validated_sign(&[]).is_err());
    }

    mod randomized {
        use super::*;
        use proptest::prelude::*;

        /// Permutación aleatoria por argsort de llaves arbitrarias.
        fn arbitrary_permutation(dimension: usize) -> impl Strategy<Value = Vec<u8>> {
            proptest::collection::vec(any::<u64>(), dimension).prop_map(|sort_keys| {
                let mut order: Vec<usize> = (0..sort_keys.len()).collect();
                order.sort_by_key(|&slot| (sort_keys[slot], slot));
                let mut permutation = vec![0u8; sort_keys.len()];
                for (rank, &slot) in order.iter().enumerate() {
                    permutation[slot] = rank as u8 + 1;
                }
                permutation
            })
        }

        proptest! {
            /// sign(p ∘ q) = sign(p) · sign(q): el signo es un homomorfismo.
            #[test]
            fn certify_sign_homomorphism(
                outer in arbitrary_permutation(7),
                inner in arbitrary_permutation(7),
            ) {
                let composed = compose(&outer, &inner);
                prop_assert_eq!(
                    parity_sign(&composed),
                    parity_sign(&outer) * parity_sign(&inner)
                );
            }

            /// El determinante coincide con la paridad también bajo muestreo.
            #[test]
            fn certify_randomized_determinant_agreement(
                permutation in arbitrary_permutation(6),
            ) {
                let determinant_sign = permutation_matrix_determinant(&permutation).unwrap();
                prop_assert_eq!(determinant_sign, i128::from(parity_sign(&permutation)));
            }
        }
    }
}
