// [libs/core/permutation-engine/src/lib.rs]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: CORE COMBINATORIAL MASTER HUB (V8.0 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS DE PERMUTACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRATA REGISTRATION: Expone los módulos de paridad, desarreglos,
 *    determinante exacto y matrices de restricción bajo un preludio único.
 * 2. NOMINAL PRELUDE ALIGNMENT: Los estratos superiores (L2-Strategy,
 *    L1-Cache) importan exclusivamente desde 'prelude'.
 * 3. PURITY CONTRACT: Todas las operaciones son puras y deterministas;
 *    cero estado global mutable fuera de la tabla perezosa D(n).
 * 4. HYGIENE: Cero advertencias de compilación y documentación completa.
 *
 * # Mathematical Proof (Parity Integrity):
 * El signo de una permutación por conteo de inversiones coincide con el
 * determinante de su matriz de permutación. Ambos caminos conviven en este
 * aparato y se certifican mutuamente en el Proving Grounds.
 * =================================================================
 */

/// Matrices de restricción por columna y enumeración lexicográfica restringida.
pub mod bitset;
/// Generación lexicográfica de desarreglos con signos y tabla D(n).
pub mod derangement;
/// Determinante entero exacto (algoritmo de Bareiss, libre de fracciones).
pub mod determinant;
/// Catálogo de fallos combinatorios del estrato L1.
pub mod errors;
/// Paridad de permutaciones, validación y pruebas de desarreglo.
pub mod permutation;

/**
 * PRELUDIO COMBINATORIO SOBERANO
 *
 * Única autoridad de importación autorizada para los estratos superiores
 * (L1-Cache y L2-Strategy). Centraliza la nomenclatura nominal.
 */
pub mod prelude {
    // Paridad y validación
    pub use crate::permutation::{
        is_derangement,
        is_permutation,
        parity_sign,
        validated_sign,
    };

    // Desarreglos y conteo exacto
    pub use crate::derangement::{
        derangement_count,
        DerangementGenerator,
        MAX_TABULATED_DERANGEMENT_ORDER,
    };

    // Determinante exacto
    pub use crate::determinant::{exact_integer_determinant, permutation_matrix_determinant};

    // Restricciones por bitset
    pub use crate::bitset::{ColumnConstraintMatrix, ConstrainedPermutationStream};

    // Catálogo de fallos
    pub use crate::errors::PermutationError;
}
