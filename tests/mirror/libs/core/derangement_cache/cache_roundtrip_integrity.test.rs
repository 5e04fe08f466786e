// [tests/mirror/libs/core/derangement_cache/cache_roundtrip_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: CACHE ROUNDTRIP CERTIFIER (V8.1 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-INFRA
 * RESPONSABILIDAD: CERTIFICACIÓN DE IDA Y VUELTA BINARIA Y CRC32
 *
 * # Logic:
 * La forja debe ser determinista (artefactos bit-idénticos entre
 * ejecuciones), la carga debe reconstruir filas, signos e índices
 * exactos, y una manipulación de un solo byte de la carga útil debe
 * disparar el veredicto Corrupt y la reconstrucción Phoenix.
 * =================================================================
 */

use std::fs;

use signum_core_cache::prelude::*;
use signum_core_perm::prelude::{parity_sign, DerangementGenerator};

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * Dos forjas independientes producen artefactos bit-idénticos.
     */
    #[test]
    fn certify_forge_determinism() {
        let first_scratch = tempfile::tempdir().unwrap();
        let second_scratch = tempfile::tempdir().unwrap();
        let first_path = CacheForge::crystallize(6, first_scratch.path()).unwrap();
        let second_path = CacheForge::crystallize(6, second_scratch.path()).unwrap();
        assert_eq!(fs::read(&first_path).unwrap(), fs::read(&second_path).unwrap());
    }

    /**
     * La carga reconstruye filas y signos byte a byte contra el
     * generador lexicográfico L1, para n ∈ [3, 7].
     */
    #[test]
    fn certify_load_reconstructs_generator_output() {
        let scratch = tempfile::tempdir().unwrap();
        for dimension in 3..=7u32 {
            let artifact_path = CacheForge::crystallize(dimension, scratch.path()).unwrap();
            let handle = DerangementCacheHandle::load_from_path(&artifact_path, dimension).unwrap();

            let mut generator = DerangementGenerator::new(dimension as usize).unwrap();
            let mut index: u32 = 0;
            while let Some((derangement, sign)) = generator.advance() {
                assert_eq!(handle.derangement_row(index), derangement);
                assert_eq!(handle.sign(index), sign);
                assert_eq!(handle.sign(index), parity_sign(derangement));
                index += 1;
            }
            assert_eq!(index, handle.derangement_count());
        }
    }

    /**
     * Manipular un byte de la carga útil dispara el veredicto Corrupt;
     * el registro aplica la Política Phoenix y reconstruye en silencio
     * operativo (con advertencia en el rastro).
     */
    #[test]
    fn certify_single_byte_tamper_detection_and_phoenix_rebuild() {
        let scratch = tempfile::tempdir().unwrap();
        let artifact_path = CacheForge::crystallize(5, scratch.path()).unwrap();

        let mut tampered_image = fs::read(&artifact_path).unwrap();
        let payload_slot = 64 + 17;
        tampered_image[payload_slot] ^= 0b0000_0100;
        fs::write(&artifact_path, &tampered_image).unwrap();

        match DerangementCacheHandle::load_from_path(&artifact_path, 5) {
            Err(CacheError::Corrupt(detail)) => assert!(detail.contains("crc32")),
            Err(other_fault) => panic!("expected Corrupt verdict, received {other_fault:?}"),
            Ok(_) => panic!("tampered artifact must not load"),
        }

        let registry = CacheRegistry::new(scratch.path());
        let rebuilt = registry.acquire(5).expect("Phoenix rebuild must succeed");
        assert_eq!(rebuilt.derangement_count(), 44);
        // El artefacto en disco quedó re-sellado con CRC válido.
        let audit = registry.audit_artifact(5).unwrap();
        assert!(audit.integrity_verdict);
    }

    /**
     * Cabecera con magia o versión ajena: rechazo sin pánico.
     */
    #[test]
    fn certify_foreign_header_rejection() {
        let scratch = tempfile::tempdir().unwrap();
        let artifact_path = CacheForge::crystallize(4, scratch.path()).unwrap();

        let mut image = fs::read(&artifact_path).unwrap();
        image[0..4].copy_from_slice(b"XXXX");
        assert!(matches!(
            DerangementCacheHandle::from_owned_bytes(image.clone()),
            Err(CacheError::Corrupt(_))
        ));

        let mut future_version = fs::read(&artifact_path).unwrap();
        future_version[4] = 2; // versión futura: rechazo, jamás migración silenciosa
        assert!(matches!(
            DerangementCacheHandle::from_owned_bytes(future_version),
            Err(CacheError::Corrupt(_))
        ));

        let truncated = fs::read(&artifact_path).unwrap()[..40].to_vec();
        assert!(matches!(
            DerangementCacheHandle::from_owned_bytes(truncated),
            Err(CacheError::Corrupt(_))
        ));
    }

    /**
     * El umbral de mapeo en memoria no altera el contenido observable.
     */
    #[test]
    fn certify_mapped_and_owned_residency_parity() {
        let scratch = tempfile::tempdir().unwrap();
        // n = 8 cruza el umbral de mmap; n = 5 permanece en heap.
        for dimension in [5u32, 8] {
            let artifact_path = CacheForge::crystallize(dimension, scratch.path()).unwrap();
            let mapped = DerangementCacheHandle::load_from_path(&artifact_path, dimension).unwrap();
            let owned =
                DerangementCacheHandle::from_owned_bytes(fs::read(&artifact_path).unwrap())
                    .unwrap();
            assert_eq!(mapped.derangement_count(), owned.derangement_count());
            for index in [0u32, mapped.derangement_count() / 2, mapped.derangement_count() - 1] {
                assert_eq!(mapped.derangement_row(index), owned.derangement_row(index));
                assert_eq!(mapped.sign(index), owned.sign(index));
            }
            for value in 2..=dimension as u8 {
                assert_eq!(
                    mapped.single_prefix_range(value),
                    owned.single_prefix_range(value)
                );
            }
        }
    }

    /**
     * El nombre canónico del artefacto sigue el contrato del formato.
     */
    #[test]
    fn certify_canonical_artifact_naming() {
        assert_eq!(cache_file_name(9), "smart_derangements_n9.bin");
        let scratch = tempfile::tempdir().unwrap();
        let artifact_path = CacheForge::crystallize(4, scratch.path()).unwrap();
        assert!(artifact_path.ends_with("smart_derangements_n4.bin"));
    }
}
