// [libs/core/permutation-engine/src/errors.rs]
/*!
 * =================================================================
 * APARATO: COMBINATORIAL ERROR CATALOG (V4.1 - SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS COMBINATORIOS
 * =================================================================
 */

use thiserror::Error;

/// Catálogo de fallos del motor combinatorio L1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// La secuencia de entrada no es una permutación de {1,…,n}.
    #[error("[L1_PERM_FAULT]: PERMUTATION_CONTRACT_VIOLATION -> {0}")]
    InvalidPermutation(String),

    /// El orden solicitado excede la tabla soberana de desarreglos.
    #[error("[L1_PERM_FAULT]: DERANGEMENT_ORDER_OVERFLOW -> requested {requested}, ceiling {ceiling}")]
    DerangementOrderOverflow {
        /// Orden solicitado por el llamador.
        requested: usize,
        /// Techo tabulado soportado por la aritmética u128.
        ceiling: usize,
    },

    /// La matriz suministrada al determinante está vacía o no es cuadrada.
    #[error("[L1_DET_FAULT]: MATRIX_SHAPE_VIOLATION -> {0}")]
    MatrixShapeViolation(String),

    /// Desbordamiento aritmético durante la eliminación de Bareiss.
    #[error("[L1_DET_FAULT]: BAREISS_ARITHMETIC_OVERFLOW")]
    DeterminantOverflow,

    /// Dimensión fuera del rango operable por las máscaras de bits.
    #[error("[L1_BITSET_FAULT]: DIMENSION_OUT_OF_STRATA -> requested {requested}, ceiling {ceiling}")]
    DimensionOutOfRange {
        /// Dimensión solicitada.
        requested: usize,
        /// Ancho máximo de la máscara de valores.
        ceiling: usize,
    },
}
