//! # Procesador de Solicitudes
//! src/sim/processor.rs
//!
//! Sortea la latencia de procesamiento al admitir una solicitud y el
//! resultado (éxito/fallo) al completarla.

use crate::sim::types::{Outcome, ProcessingFailure, RequestId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Procesador con latencia y resultado aleatorios
pub struct RequestProcessor {
    rng: StdRng,

    /// Latencia mínima (inclusive) en ms
    min_latency_ms: u64,

    /// Latencia máxima (exclusiva) en ms
    max_latency_ms: u64,

    /// Probabilidad de éxito (0.0 - 1.0)
    success_probability: f64,
}

impl RequestProcessor {
    /// Crea un procesador. Con `seed` la secuencia es reproducible
    pub fn new(
        min_latency_ms: u64,
        max_latency_ms: u64,
        success_probability: f64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            min_latency_ms,
            max_latency_ms: max_latency_ms.max(min_latency_ms + 1),
            success_probability: success_probability.clamp(0.0, 1.0),
        }
    }

    /// Latencia uniforme en `[min, max)`
    pub fn draw_latency(&mut self) -> u64 {
        self.rng.gen_range(self.min_latency_ms..self.max_latency_ms)
    }

    /// Resultado del procesamiento de `id`
    pub fn draw_outcome(&mut self, id: RequestId) -> Outcome {
        if self.rng.gen_bool(self.success_probability) {
            Ok(())
        } else {
            Err(ProcessingFailure { id })
        }
    }
}
