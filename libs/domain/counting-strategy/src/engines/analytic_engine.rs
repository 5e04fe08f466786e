// [libs/domain/counting-strategy/src/engines/analytic_engine.rs]
/*!
 * =================================================================
 * APARATO: ANALYTIC TWO-ROW ENGINE (V6.1 - CLOSED FORM SEAL)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: CENSO r = 2 POR FORMA CERRADA, SIN ENUMERACIÓN
 *
 * # Mathematical Proof (Two-Row Closed Form):
 * Un rectángulo normalizado 2 × n es la identidad más un desarreglo, de
 * modo que total = D(n). La diferencia par−impar de desarreglos es
 * det(J_n − I_n) = (−1)^(n−1)·(n−1), certificada contra el motor de
 * Bareiss en el Proving Grounds L1. Ambas mitades
 * (total ± diferencia) / 2 son enteros no negativos para todo n ≥ 2.
 * =================================================================
 */

use signum_domain_models::CensusFault;

use signum_core_perm::prelude::derangement_count;

/// Motor analítico del censo de dos filas.
pub struct AnalyticTwoRowEngine;

impl AnalyticTwoRowEngine {
    /// Resuelve el censo (2, n) en forma cerrada.
    ///
    /// # Errors:
    /// `Internal` si la tabla subfactorial no cubre la dimensión (el
    /// despachador ya aplicó el techo operativo antes de llegar aquí).
    pub fn resolve(symbols: u32) -> Result<(u128, u128), CensusFault> {
        debug_assert!(symbols >= 2);
        let total = derangement_count(symbols as usize).map_err(|fault| {
            CensusFault::Internal(format!("subfactorial table unavailable: {fault}"))
        })?;

        let magnitude = i128::from(symbols) - 1;
        let signed_difference = if symbols % 2 == 1 { magnitude } else { -magnitude };

        let positive = ((total as i128 + signed_difference) / 2) as u128;
        let negative = total - positive;
        Ok((positive, negative))
    }
}
