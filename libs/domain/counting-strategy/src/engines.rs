// [libs/domain/counting-strategy/src/engines.rs]
/*!
 * =================================================================
 * APARATO: ENGINES MODULE HUB (V5.0 - CENSUS SYNCED)
 * CLASIFICACIÓN: DOMAIN STRATEGY (ESTRATO L2)
 * RESPONSABILIDAD: EXPOSICIÓN DE MOTORES DE CENSO ESPECIALIZADOS
 * =================================================================
 */

/// Motor analítico r = 2 por forma cerrada (sin enumeración).
pub mod analytic_engine;

/// Motor de backtracking por cascada de máscaras con fusión de completación.
pub mod backtracking_engine;
