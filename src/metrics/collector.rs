//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Acumula tiempos de espera, servicio y turnaround de las solicitudes
//! completadas y arma el reporte final de la simulación.

use crate::sim::types::{RequestRecord, RequestStatus};
use serde::{Deserialize, Serialize};

/// Collector de métricas de la simulación
#[derive(Debug, Default)]
pub struct MetricsCollector {
    /// Solicitudes recibidas
    arrivals: u64,

    /// Solicitudes procesadas correctamente
    succeeded: u64,

    /// Solicitudes fallidas
    failed: u64,

    /// Tiempo en cola (admisión - llegada), en ms
    waiting: Vec<u64>,

    /// Tiempo ocupando un slot, en ms
    service: Vec<u64>,

    /// Tiempo total (fin - llegada), en ms
    turnaround: Vec<u64>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una nueva llegada
    pub fn record_arrival(&mut self) {
        self.arrivals += 1;
    }

    /// Registra una solicitud en estado terminal
    pub fn record_finished(&mut self, record: &RequestRecord) {
        match record.status {
            RequestStatus::Succeeded => self.succeeded += 1,
            RequestStatus::Failed => self.failed += 1,
            // Solo se registran estados terminales
            RequestStatus::Queued | RequestStatus::Admitted => return,
        }

        if let Some(waiting) = record.waiting_ms() {
            self.waiting.push(waiting);
        }
        if let Some(service) = record.service_ms() {
            self.service.push(service);
        }
        if let Some(turnaround) = record.turnaround_ms() {
            self.turnaround.push(turnaround);
        }
    }

    /// Obtiene un snapshot de las métricas
    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            arrivals: self.arrivals,
            succeeded: self.succeeded,
            failed: self.failed,
            waiting_ms: LatencySummary::from_samples(&self.waiting),
            service_ms: LatencySummary::from_samples(&self.service),
            turnaround_ms: LatencySummary::from_samples(&self.turnaround),
        }
    }
}

/// Snapshot de métricas (para uso externo)
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub arrivals: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub waiting_ms: LatencySummary,
    pub service_ms: LatencySummary,
    pub turnaround_ms: LatencySummary,
}

impl MetricsSnapshot {
    pub fn completed(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Resumen de una serie de tiempos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub avg: f64,
    pub max: u64,
    pub samples: usize,
}

impl LatencySummary {
    /// Calcula percentiles, promedio y máximo
    pub fn from_samples(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let len = sorted.len();
        let percentile = |p: usize| sorted[(len * p / 100).min(len - 1)];

        let sum: u64 = sorted.iter().sum();

        Self {
            p50: percentile(50),
            p95: percentile(95),
            p99: percentile(99),
            avg: sum as f64 / len as f64,
            max: sorted[len - 1],
            samples: len,
        }
    }
}

/// Reporte final de una corrida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub total_arrivals: u64,
    pub succeeded: u64,
    pub failed: u64,

    /// Tiempo simulado al terminar la corrida
    pub elapsed_ms: u64,

    pub max_concurrent: usize,
    pub peak_active: usize,
    pub peak_queue_len: usize,

    /// Primer (y único) reporte de inactividad
    pub idle_reported_at_ms: Option<u64>,

    pub waiting_ms: LatencySummary,
    pub service_ms: LatencySummary,
    pub turnaround_ms: LatencySummary,

    /// Historial por solicitud, ordenado por id
    pub requests: Vec<RequestRecord>,
}

impl SimulationReport {
    /// Serializa el reporte a JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Imprime un resumen legible del reporte
    pub fn print_summary(&self) {
        println!();
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║                 Resumen de la Simulación                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("📊 Solicitudes:");
        println!("   Recibidas:    {}", self.total_arrivals);
        println!("   Exitosas:     {}", self.succeeded);
        println!("   Fallidas:     {}", self.failed);
        println!("   Duración:     {:.1} s simulados", self.elapsed_ms as f64 / 1000.0);
        println!();
        println!("🚦 Concurrencia:");
        println!("   Slots:        {} (pico: {})", self.max_concurrent, self.peak_active);
        println!("   Cola pico:    {}", self.peak_queue_len);
        match self.idle_reported_at_ms {
            Some(t) => println!("   Inactividad:  reportada en t={} ms", t),
            None => println!("   Inactividad:  no reportada"),
        }
        println!();
        println!("⏱️  Tiempos (ms):");
        println!("   ┌──────────────┬──────────┬──────────┬──────────┬──────────┐");
        println!("   │ Serie        │   p50    │   p95    │   p99    │   avg    │");
        println!("   ├──────────────┼──────────┼──────────┼──────────┼──────────┤");
        for (name, summary) in [
            ("Espera", &self.waiting_ms),
            ("Servicio", &self.service_ms),
            ("Turnaround", &self.turnaround_ms),
        ] {
            println!(
                "   │ {:<12} │ {:>8} │ {:>8} │ {:>8} │ {:>8.1} │",
                name, summary.p50, summary.p95, summary.p99, summary.avg
            );
        }
        println!("   └──────────────┴──────────┴──────────┴──────────┴──────────┘");
        println!();
    }
}
