// [libs/core/permutation-engine/src/derangement.rs]
/*!
 * =================================================================
 * APARATO: LEXICOGRAPHIC DERANGEMENT FORGE (V13.0 - ZENITH GOLD)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: GENERACIÓN LEX DE DESARREGLOS Y TABLA SOBERANA D(n)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ORDER CONTRACT: Dos ejecuciones independientes emiten exactamente
 *    la misma secuencia; el orden lexicográfico es parte del contrato
 *    binario del caché de desarreglos.
 * 2. LAZY TABULATION: D(n) se tabula una única vez por proceso mediante
 *    inicialización perezosa; cero punto flotante.
 * 3. SIGN FUSION: Cada desarreglo emitido viaja con su signo de paridad,
 *    evitando un segundo barrido en el constructor del caché.
 *
 * # Mathematical Proof (Subfactorial Recurrence):
 * D(0) = 1, D(1) = 0, D(n) = (n−1)·(D(n−1) + D(n−2)). La recurrencia se
 * obtiene condicionando sobre el destino del símbolo 1 y es exacta en
 * aritmética entera; u128 cubre todos los órdenes tabulados.
 * =================================================================
 */

use once_cell::sync::Lazy;
use tracing::debug;

use crate::bitset::{ColumnConstraintMatrix, ConstrainedPermutationStream};
use crate::errors::PermutationError;
use crate::permutation::parity_sign;

/// Orden máximo tabulado para D(n); más allá, u128 desbordaría.
pub const MAX_TABULATED_DERANGEMENT_ORDER: usize = 34;

/// Tabla soberana D(0..=34), materializada en el primer acceso.
static DERANGEMENT_COUNT_TABLE: Lazy<Vec<u128>> = Lazy::new(|| {
    let mut table = vec![0u128; MAX_TABULATED_DERANGEMENT_ORDER + 1];
    table[0] = 1;
    if MAX_TABULATED_DERANGEMENT_ORDER >= 1 {
        table[1] = 0;
    }
    for order in 2..=MAX_TABULATED_DERANGEMENT_ORDER {
        table[order] = (order as u128 - 1) * (table[order - 1] + table[order - 2]);
    }
    table
});

/// Número exacto de desarreglos de orden `order` (subfactorial D(n)).
///
/// # Errors:
/// `DerangementOrderOverflow` si `order` excede la tabla soberana.
pub fn derangement_count(order: usize) -> Result<u128, PermutationError> {
    if order > MAX_TABULATED_DERANGEMENT_ORDER {
        return Err(PermutationError::DerangementOrderOverflow {
            requested: order,
            ceiling: MAX_TABULATED_DERANGEMENT_ORDER,
        });
    }
    Ok(DERANGEMENT_COUNT_TABLE[order])
}

/// Generador reanudable de desarreglos en orden lexicográfico con signos.
///
/// Implementado sobre el flujo restringido de [`ColumnConstraintMatrix`]
/// prohibiendo la diagonal identidad: forbidden[i] = { i + 1 }.
pub struct DerangementGenerator {
    stream: ConstrainedPermutationStream,
    emitted_count: u128,
}

impl DerangementGenerator {
    /// Construye el generador para el orden solicitado.
    ///
    /// # Errors:
    /// Propaga `DimensionOutOfRange` para órdenes fuera del estrato u32.
    pub fn new(order: usize) -> Result<Self, PermutationError> {
        let mut diagonal_constraints = ColumnConstraintMatrix::new(order)?;
        for position in 0..order {
            diagonal_constraints.forbid_value(position, (position + 1) as u8);
        }
        debug!("⚙️ [DERANGEMENT_FORGE]: Lexicographic stream armed for order {order}.");
        Ok(Self {
            stream: diagonal_constraints.stream(),
            emitted_count: 0,
        })
    }

    /// Emite el siguiente desarreglo junto a su signo de paridad.
    ///
    /// El slice retornado referencia el buffer interno del flujo y es
    /// válido hasta la próxima llamada.
    pub fn advance(&mut self) -> Option<(&[u8], i8)> {
        match self.stream.advance() {
            Some(derangement) => {
                self.emitted_count += 1;
                let sign = parity_sign(derangement);
                Some((derangement, sign))
            }
            None => None,
        }
    }

    /// Cantidad de desarreglos emitidos hasta el momento.
    #[must_use]
    pub fn emitted_count(&self) -> u128 {
        self.emitted_count
    }
}
