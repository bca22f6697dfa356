//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Recolección y agregación de métricas de la simulación:
//! - Contadores de solicitudes exitosas/fallidas
//! - Tiempos de espera, servicio y turnaround (p50, p95, p99)
//! - Reporte final serializable a JSON

pub mod collector;

pub use collector::{LatencySummary, MetricsCollector, MetricsSnapshot, SimulationReport};
