// [libs/domain/counting-strategy/src/reducer.rs]
/*!
 * =================================================================
 * APARATO: FIRST-COLUMN SYMMETRY REDUCER (V10.2 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: PLANIFICACIÓN DE UNIDADES Y FACTOR DE SIMETRÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CANONICAL REPRESENTATIVE: El representante de cada clase es la
 *    primera columna ascendente [1, a_1 < … < a_{r−1}]; toda permutación
 *    de las filas 1..r−1 preserva el conjunto de columna y el signo del
 *    rectángulo, de modo que cada clase aporta exactamente (r−1)! miembros.
 * 2. DETERMINISTIC PLAN: Las combinaciones se emiten en orden
 *    lexicográfico con identidad ordinal; el reparto round-robin del
 *    driver hereda ese orden.
 * 3. EXACT ARITHMETIC: Factor (r−1)! y volumen C(n−1, r−1) en aritmética
 *    entera exacta; cero punto flotante.
 * =================================================================
 */

use signum_domain_models::FirstColumnChoice;

/// Planificador de la reducción de simetría de primera columna.
pub struct FirstColumnSymmetryReducer;

impl FirstColumnSymmetryReducer {
    /// Factor de simetría (r−1)! aplicado a cada clase canónica.
    #[must_use]
    pub fn symmetry_factor(rows: u32) -> u128 {
        (1..u128::from(rows)).product()
    }

    /// Volumen de unidades planificadas: C(n−1, r−1).
    #[must_use]
    pub fn unit_volume(rows: u32, symbols: u32) -> u64 {
        Self::binomial(u64::from(symbols) - 1, u64::from(rows) - 1)
    }

    /**
     * Emite el plan completo de unidades de trabajo en orden lexicográfico.
     *
     * Cada unidad porta la primera columna `[1, a_1, …, a_{r−1}]` con
     * `2 ≤ a_1 < … < a_{r−1} ≤ n` y su identidad ordinal dentro del plan.
     */
    #[must_use]
    pub fn plan_work_units(rows: u32, symbols: u32) -> Vec<FirstColumnChoice> {
        let selection_size = (rows - 1) as usize;
        let highest_value = symbols as u8;
        let mut plan = Vec::with_capacity(Self::unit_volume(rows, symbols) as usize);

        // Combinación inicial: [2, 3, …, r].
        let mut selection: Vec<u8> = (2..2 + selection_size as u8).collect();
        let mut ordinal: u64 = 0;
        loop {
            let mut column_values = Vec::with_capacity(selection_size + 1);
            column_values.push(1u8);
            column_values.extend_from_slice(&selection);
            plan.push(FirstColumnChoice {
                ordinal,
                column_values,
            });
            ordinal += 1;

            // Avance lexicográfico: el índice más a la derecha aún elevable.
            let mut pivot = selection_size;
            loop {
                if pivot == 0 {
                    return plan;
                }
                pivot -= 1;
                let ceiling = highest_value - (selection_size - 1 - pivot) as u8;
                if selection[pivot] < ceiling {
                    break;
                }
            }
            selection[pivot] += 1;
            for follower in (pivot + 1)..selection_size {
                selection[follower] = selection[follower - 1] + 1;
            }
        }
    }

    fn binomial(pool: u64, take: u64) -> u64 {
        if take > pool {
            return 0;
        }
        let take = take.min(pool - take);
        let mut accumulator: u128 = 1;
        for step in 0..take {
            accumulator = accumulator * u128::from(pool - step) / u128::from(step + 1);
        }
        accumulator as u64
    }
}
