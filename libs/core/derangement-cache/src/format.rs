// [libs/core/derangement-cache/src/format.rs]
/*!
 * =================================================================
 * APARATO: BINARY CACHE LAYOUT AUTHORITY (V7.1 - LRCC SEAL)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: DEFINICIÓN BIT-PERFECTA DEL FORMATO EN DISCO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LITTLE-ENDIAN SOVEREIGNTY: Todos los campos multibyte viajan en
 *    little-endian vía 'byteorder'; el artefacto es portable entre hosts.
 * 2. VERSION DISCIPLINE: La versión 1 reserva 32 bytes de cabecera;
 *    cualquier evolución del layout incrementa la versión y rechaza
 *    artefactos antiguos en lugar de migrarlos en silencio.
 * 3. CRC GOVERNANCE: El CRC32 cubre todos los bytes desde el offset 64
 *    hasta EOF; la cabecera se auto-describe y la carga se auto-verifica.
 *
 * # Layout (little-endian):
 *  offset  size  field
 *  0       4     magic = "LRCC"
 *  4       4     version (u32, actualmente 1)
 *  8       4     n (u32)
 *  12      4     count = D(n) (u32)
 *  16      4     offset_derangements (u32)
 *  20      4     offset_signs (u32)
 *  24      4     offset_pv_index (u32)
 *  28      4     crc32 de la carga útil (u32)
 *  32      32    reservado (cero)
 *  64      …     derangements: count × n bytes (u8, valores 1..n)
 *                signs: count × 1 byte (i8, ±1)
 *                position_value_index: para cada (p, v), p∈[0..n), v∈[1..n],
 *                  una máscara de ceil(count/8) bytes, orden row-major (p, v).
 * =================================================================
 */

use byteorder::{ByteOrder, LittleEndian};

use crate::errors::CacheError;

/// Firma mágica del artefacto binario de desarreglos.
pub const CACHE_MAGIC: [u8; 4] = *b"LRCC";

/// Versión vigente del layout. Evoluciones futuras la incrementan.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Tamaño total de la cabecera, incluidos los 32 bytes reservados.
pub const HEADER_SIZE_BYTES: usize = 64;

/// Techo operativo del formato: D(13) es el último subfactorial < 2³².
pub const MAXIMUM_SUPPORTED_DIMENSION: u32 = 13;

/// Piso operativo del censo normalizado.
pub const MINIMUM_SUPPORTED_DIMENSION: u32 = 2;

/// Nombre canónico del artefacto para una dimensión dada.
#[must_use]
pub fn cache_file_name(dimension: u32) -> String {
    format!("smart_derangements_n{dimension}.bin")
}

/// Cabecera decodificada del artefacto binario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheFileHeader {
    /// Versión del layout declarada por el artefacto.
    pub version: u32,
    /// Dimensión n del censo.
    pub dimension: u32,
    /// Cantidad de desarreglos D(n) contenidos.
    pub derangement_count: u32,
    /// Offset absoluto de las filas de desarreglos.
    pub offset_derangements: u32,
    /// Offset absoluto del vector de signos.
    pub offset_signs: u32,
    /// Offset absoluto del índice (posición, valor).
    pub offset_pv_index: u32,
    /// CRC32 de la carga útil (offset 64 hasta EOF).
    pub payload_crc32: u32,
}

impl CacheFileHeader {
    /// Compone la cabecera canónica para (dimensión, count), con offsets
    /// derivados del layout secuencial de la versión 1.
    #[must_use]
    pub fn compose(dimension: u32, derangement_count: u32, payload_crc32: u32) -> Self {
        let offset_derangements = HEADER_SIZE_BYTES as u32;
        let offset_signs = offset_derangements + derangement_count * dimension;
        let offset_pv_index = offset_signs + derangement_count;
        Self {
            version: CACHE_FORMAT_VERSION,
            dimension,
            derangement_count,
            offset_derangements,
            offset_signs,
            offset_pv_index,
            payload_crc32,
        }
    }

    /// Bytes por máscara densa de índices: ceil(count / 8).
    #[must_use]
    pub fn mask_stride_bytes(&self) -> usize {
        (self.derangement_count as usize).div_ceil(8)
    }

    /// Tamaño total esperado del archivo según la cabecera.
    #[must_use]
    pub fn expected_file_size(&self) -> usize {
        let pair_slots = (self.dimension as usize) * (self.dimension as usize);
        self.offset_pv_index as usize + pair_slots * self.mask_stride_bytes()
    }

    /// Serializa la cabecera a sus 64 bytes canónicos.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_SIZE_BYTES] {
        let mut buffer = [0u8; HEADER_SIZE_BYTES];
        buffer[0..4].copy_from_slice(&CACHE_MAGIC);
        LittleEndian::write_u32(&mut buffer[4..8], self.version);
        LittleEndian::write_u32(&mut buffer[8..12], self.dimension);
        LittleEndian::write_u32(&mut buffer[12..16], self.derangement_count);
        LittleEndian::write_u32(&mut buffer[16..20], self.offset_derangements);
        LittleEndian::write_u32(&mut buffer[20..24], self.offset_signs);
        LittleEndian::write_u32(&mut buffer[24..28], self.offset_pv_index);
        LittleEndian::write_u32(&mut buffer[28..32], self.payload_crc32);
        // Bytes 32..64 reservados en cero por contrato de versión 1.
        buffer
    }

    /// Decodifica y valida estructuralmente una cabecera.
    ///
    /// # Errors:
    /// `Corrupt` ante magia desconocida, versión no soportada, dimensiones
    /// fuera de estrato u offsets inconsistentes con el layout canónico.
    pub fn decode(bytes: &[u8]) -> Result<Self, CacheError> {
        if bytes.len() < HEADER_SIZE_BYTES {
            return Err(CacheError::Corrupt(format!(
                "header truncated: {} bytes, expected {HEADER_SIZE_BYTES}",
                bytes.len()
            )));
        }
        if bytes[0..4] != CACHE_MAGIC {
            return Err(CacheError::Corrupt("unknown magic signature".to_string()));
        }
        let version = LittleEndian::read_u32(&bytes[4..8]);
        if version != CACHE_FORMAT_VERSION {
            return Err(CacheError::Corrupt(format!(
                "unsupported layout version {version}, expected {CACHE_FORMAT_VERSION}"
            )));
        }
        let dimension = LittleEndian::read_u32(&bytes[8..12]);
        if !(MINIMUM_SUPPORTED_DIMENSION..=MAXIMUM_SUPPORTED_DIMENSION).contains(&dimension) {
            return Err(CacheError::Corrupt(format!(
                "dimension {dimension} outside operational strata"
            )));
        }
        let derangement_count = LittleEndian::read_u32(&bytes[12..16]);
        let decoded = Self {
            version,
            dimension,
            derangement_count,
            offset_derangements: LittleEndian::read_u32(&bytes[16..20]),
            offset_signs: LittleEndian::read_u32(&bytes[20..24]),
            offset_pv_index: LittleEndian::read_u32(&bytes[24..28]),
            payload_crc32: LittleEndian::read_u32(&bytes[28..32]),
        };
        let canonical = Self::compose(dimension, derangement_count, decoded.payload_crc32);
        if decoded != canonical {
            return Err(CacheError::Corrupt(
                "section offsets diverge from canonical layout".to_string(),
            ));
        }
        Ok(decoded)
    }
}

/// CRC32 de la carga útil: todos los bytes desde el offset 64 hasta EOF.
#[must_use]
pub fn payload_checksum(file_bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&file_bytes[HEADER_SIZE_BYTES.min(file_bytes.len())..]);
    hasher.finalize()
}
