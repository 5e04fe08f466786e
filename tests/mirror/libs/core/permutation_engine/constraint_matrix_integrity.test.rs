// [tests/mirror/libs/core/permutation_engine/constraint_matrix_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: CONSTRAINT MATRIX CERTIFIER (V6.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE
 * RESPONSABILIDAD: CERTIFICACIÓN DE MÁSCARAS Y ENUMERACIÓN LEX
 * =================================================================
 */

use signum_core_perm::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * Certifica el contrato completo del generador de desarreglos para
     * n ∈ [3, 8]: volumen D(n), orden lexicográfico estricto, unicidad,
     * ausencia de puntos fijos y paridad de signo coherente.
     */
    #[test]
    fn certify_derangement_emission_contract() {
        for order in 3..=8usize {
            let mut generator = DerangementGenerator::new(order)
                .expect("FORGE_FAULT: generator must materialize");
            let mut previous: Option<Vec<u8>> = None;
            let mut emitted_volume: u128 = 0;
            while let Some((derangement, sign)) = generator.advance() {
                assert!(is_permutation(derangement));
                assert!(is_derangement(derangement));
                assert_eq!(sign, parity_sign(derangement));
                if let Some(ref earlier) = previous {
                    assert!(
                        earlier.as_slice() < derangement,
                        "lexicographic order broken at order {order}"
                    );
                }
                previous = Some(derangement.to_vec());
                emitted_volume += 1;
            }
            assert_eq!(emitted_volume, derangement_count(order).unwrap());
        }
    }

    /**
     * Confronta el flujo restringido contra el filtro de fuerza bruta
     * sobre un rectángulo parcial real (identidad + dos desarreglos).
     */
    #[test]
    fn certify_constrained_stream_against_brute_force() {
        let mut matrix = ColumnConstraintMatrix::new(6).unwrap();
        matrix.add_row(&[1, 2, 3, 4, 5, 6]);
        matrix.add_row(&[2, 3, 1, 6, 4, 5]);
        matrix.add_row(&[3, 1, 5, 2, 6, 4]);

        let mut stream = matrix.stream();
        let mut emitted: Vec<Vec<u8>> = Vec::new();
        while let Some(permutation) = stream.advance() {
            emitted.push(permutation.to_vec());
        }

        // Oráculo: generador sin restricciones + filtro columna a columna.
        let unconstrained = ColumnConstraintMatrix::new(6).unwrap();
        let mut oracle_stream = unconstrained.stream();
        let mut oracle: Vec<Vec<u8>> = Vec::new();
        let blocked_rows: [[u8; 6]; 3] =
            [[1, 2, 3, 4, 5, 6], [2, 3, 1, 6, 4, 5], [3, 1, 5, 2, 6, 4]];
        while let Some(permutation) = oracle_stream.advance() {
            let collides = blocked_rows.iter().any(|blocked| {
                blocked
                    .iter()
                    .zip(permutation)
                    .any(|(&occupied, &candidate)| occupied == candidate)
            });
            if !collides {
                oracle.push(permutation.to_vec());
            }
        }
        assert_eq!(emitted, oracle);
        assert!(!emitted.is_empty());
    }

    /**
     * Certifica la simetría add/remove y el conteo de disponibilidad.
     */
    #[test]
    fn certify_occupancy_bookkeeping() {
        let mut matrix = ColumnConstraintMatrix::new(5).unwrap();
        for column in 0..5 {
            assert_eq!(matrix.available_value_count(column), 5);
        }
        let first_row = [2u8, 1, 4, 5, 3];
        let second_row = [3u8, 4, 5, 1, 2];
        matrix.add_row(&first_row);
        matrix.add_row(&second_row);
        for column in 0..5 {
            assert_eq!(matrix.available_value_count(column), 3);
            assert!(matrix.is_forbidden(column, first_row[column]));
            assert!(matrix.is_forbidden(column, second_row[column]));
        }
        matrix.remove_row(&second_row);
        for column in 0..5 {
            assert_eq!(matrix.available_value_count(column), 4);
            assert!(!matrix.is_forbidden(column, second_row[column]));
        }
    }

    /**
     * Dos pasadas independientes del mismo flujo emiten exactamente la
     * misma secuencia (contrato de reproducibilidad del caché binario).
     */
    #[test]
    fn certify_independent_runs_are_bit_identical() {
        let collect_run = || {
            let mut generator = DerangementGenerator::new(6).unwrap();
            let mut run: Vec<(Vec<u8>, i8)> = Vec::new();
            while let Some((derangement, sign)) = generator.advance() {
                run.push((derangement.to_vec(), sign));
            }
            run
        };
        assert_eq!(collect_run(), collect_run());
    }
}
