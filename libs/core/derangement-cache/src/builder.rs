// [libs/core/derangement-cache/src/builder.rs]
/*!
 * =================================================================
 * APARATO: DERANGEMENT CACHE FORGE (V9.0 - CRYSTALLIZATION MASTER)
 * CLASIFICACIÓN: CORE INFRASTRUCTURE (ESTRATO L1)
 * RESPONSABILIDAD: CRISTALIZACIÓN ATÓMICA DEL ARTEFACTO BINARIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC CRYSTALLIZATION: La carga útil se forja en RAM, se vuelca a
 *    un archivo temporal y se sella con 'rename' atómico; nunca existe
 *    un artefacto parcial visible para otros workers.
 * 2. SINGLE SWEEP: Filas, signos y máscaras (posición, valor) se forjan
 *    en un único barrido del generador lexicográfico L1.
 * 3. CEILING GOVERNANCE: Dimensiones fuera de [2, 13] se rechazan antes
 *    de tocar el sistema de archivos.
 * =================================================================
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, instrument};

use signum_core_perm::prelude::{derangement_count, DerangementGenerator};

use crate::errors::CacheError;
use crate::format::{
    cache_file_name, payload_checksum, CacheFileHeader, HEADER_SIZE_BYTES,
    MAXIMUM_SUPPORTED_DIMENSION, MINIMUM_SUPPORTED_DIMENSION,
};

/// Forja del artefacto binario de desarreglos.
pub struct CacheForge;

impl CacheForge {
    /**
     * Cristaliza el artefacto completo para `dimension` dentro de
     * `cache_directory` y retorna la ruta sellada.
     *
     * # Errors:
     * - `TooLarge` / `DimensionFloor` fuera del estrato [2, 13].
     * - `Io` si el directorio no puede reclamarse o el volcado falla.
     *
     * # Performance:
     * Un único barrido O(D(n) · n) del generador lexicográfico; las
     * máscaras densas se pueblan bit a bit durante el mismo barrido.
     */
    #[instrument(skip(cache_directory))]
    pub fn crystallize(dimension: u32, cache_directory: &Path) -> Result<PathBuf, CacheError> {
        if dimension < MINIMUM_SUPPORTED_DIMENSION {
            return Err(CacheError::DimensionFloor(dimension));
        }
        if dimension > MAXIMUM_SUPPORTED_DIMENSION {
            return Err(CacheError::TooLarge {
                requested: dimension,
                ceiling: MAXIMUM_SUPPORTED_DIMENSION,
            });
        }

        let forge_ignition_timestamp = Instant::now();
        let expected_count_u128 = derangement_count(dimension as usize)?;
        // El techo de dimensión garantiza que D(n) cabe en u32 (contrato v1).
        let expected_count = expected_count_u128 as u32;

        let header_probe = CacheFileHeader::compose(dimension, expected_count, 0);
        let mask_stride = header_probe.mask_stride_bytes();
        let total_file_size = header_probe.expected_file_size();

        let mut file_image = vec![0u8; total_file_size];
        let rows_base = header_probe.offset_derangements as usize;
        let signs_base = header_probe.offset_signs as usize;
        let pv_base = header_probe.offset_pv_index as usize;
        let dimension_usize = dimension as usize;

        // --- FASE 1: BARRIDO ÚNICO DEL GENERADOR LEXICOGRÁFICO ---
        let mut generator = DerangementGenerator::new(dimension_usize)?;
        let mut emitted_index: usize = 0;
        while let Some((derangement_row, row_sign)) = generator.advance() {
            let row_base = rows_base + emitted_index * dimension_usize;
            file_image[row_base..row_base + dimension_usize].copy_from_slice(derangement_row);
            file_image[signs_base + emitted_index] = row_sign as u8;

            for (position, &value) in derangement_row.iter().enumerate() {
                let slot = position * dimension_usize + (value as usize - 1);
                let mask_byte = pv_base + slot * mask_stride + emitted_index / 8;
                file_image[mask_byte] |= 1u8 << (emitted_index % 8);
            }
            emitted_index += 1;
        }

        if emitted_index as u32 != expected_count {
            return Err(CacheError::Corrupt(format!(
                "forge emitted {emitted_index} derangements, subfactorial table expected {expected_count}"
            )));
        }

        // --- FASE 2: SELLADO DE CABECERA Y CRC ---
        let payload_crc32 = payload_checksum(&file_image);
        let sealed_header = CacheFileHeader::compose(dimension, expected_count, payload_crc32);
        file_image[..HEADER_SIZE_BYTES].copy_from_slice(&sealed_header.encode());

        // --- FASE 3: CRISTALIZACIÓN ATÓMICA (TEMP + RENAME) ---
        fs::create_dir_all(cache_directory)?;
        let final_path = cache_directory.join(cache_file_name(dimension));
        let staging_path = cache_directory.join(format!(
            "{}.staging-{}",
            cache_file_name(dimension),
            std::process::id()
        ));
        fs::write(&staging_path, &file_image)?;
        fs::rename(&staging_path, &final_path)?;

        info!(
            "💎 [CACHE_FORGE]: Artifact n={} sealed. {} derangements, {} bytes, crc32 {:#010x}, {} ms.",
            dimension,
            expected_count,
            total_file_size,
            payload_crc32,
            forge_ignition_timestamp.elapsed().as_millis()
        );
        debug!(
            "   Sections: rows @{rows_base}, signs @{signs_base}, pv-index @{pv_base} (stride {mask_stride})."
        );

        Ok(final_path)
    }
}
