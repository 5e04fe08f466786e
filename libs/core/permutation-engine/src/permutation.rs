// [libs/core/permutation-engine/src/permutation.rs]
/*!
 * =================================================================
 * APARATO: PERMUTATION PARITY ENGINE (V9.2 - ZENITH GOLD)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: PARIDAD POR INVERSIONES Y CONTRATOS DE PERMUTACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL CONTRACT: 'parity_sign' opera bajo garantía del llamador para
 *    el Hot-Loop; 'validated_sign' sella la frontera pública con
 *    validación completa del contrato de permutación.
 * 2. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta.
 * 3. PURITY: Funciones libres de efectos secundarios y de asignación.
 *
 * # Mathematical Proof (Inversion Parity):
 * sign(p) = (-1)^inv(p), donde inv(p) es el número de pares (i, j) con
 * i < j y p[i] > p[j]. Este valor coincide con det(P_p), el determinante
 * de la matriz de permutación, certificado en el Proving Grounds.
 * =================================================================
 */

/// Calcula el signo de una permutación por paridad de inversiones.
///
/// Contrato del llamador: `permutation` es una permutación válida de
/// {1,…,n} en bytes. La identidad retorna +1.
///
/// # Performance:
/// O(n²) por barrido de pares; n ≤ 13 en todo el sistema, de modo que la
/// cota cuadrática es despreciable frente al costo de enumeración.
#[must_use]
pub fn parity_sign(permutation: &[u8]) -> i8 {
    let mut inversion_count: u32 = 0;
    for anchor_index in 0..permutation.len() {
        for probe_index in (anchor_index + 1)..permutation.len() {
            if permutation[anchor_index] > permutation[probe_index] {
                inversion_count += 1;
            }
        }
    }
    if inversion_count % 2 == 0 { 1 } else { -1 }
}

/// Evalúa si la secuencia es una permutación de {1,…,n}.
///
/// Utiliza una máscara de bits de 32 posiciones; dimensiones mayores a 32
/// se rechazan de plano (fuera del estrato operable).
#[must_use]
pub fn is_permutation(candidate: &[u8]) -> bool {
    let dimension = candidate.len();
    if dimension == 0 || dimension > 32 {
        return false;
    }
    let mut seen_value_mask: u32 = 0;
    for &value in candidate {
        if value == 0 || (value as usize) > dimension {
            return false;
        }
        let value_bit = 1u32 << (value - 1);
        if seen_value_mask & value_bit != 0 {
            return false;
        }
        seen_value_mask |= value_bit;
    }
    true
}

/// Evalúa si la permutación es un desarreglo respecto de la identidad.
///
/// Convención del sistema: valores 1-based sobre posiciones 0-based, de
/// modo que el punto fijo prohibido en la posición `i` es el valor `i + 1`.
#[must_use]
pub fn is_derangement(candidate: &[u8]) -> bool {
    candidate
        .iter()
        .enumerate()
        .all(|(position, &value)| value as usize != position + 1)
}

/// Variante validada de [`parity_sign`] para la frontera pública.
///
/// # Errors:
/// Retorna `PermutationError::InvalidPermutation` si la entrada viola el
/// contrato de permutación.
pub fn validated_sign(permutation: &[u8]) -> Result<i8, crate::errors::PermutationError> {
    if !is_permutation(permutation) {
        return Err(crate::errors::PermutationError::InvalidPermutation(format!(
            "sequence of length {} is not a permutation of 1..=n",
            permutation.len()
        )));
    }
    Ok(parity_sign(permutation))
}
