//! # Generador de Llegadas
//! src/sim/arrivals.rs
//!
//! Asigna ids monotónicos desde 1 hasta `max_arrivals`. Al llegar al tope
//! deja de generar; lo ya encolado sigue su curso.

use crate::sim::types::RequestId;

#[derive(Debug)]
pub struct ArrivalGenerator {
    next_id: u64,
    max_arrivals: u64,
    interval_ms: u64,
}

impl ArrivalGenerator {
    pub fn new(max_arrivals: u64, interval_ms: u64) -> Self {
        Self {
            next_id: 1,
            max_arrivals,
            interval_ms,
        }
    }

    /// Siguiente id, None si ya se alcanzó el tope
    pub fn next_id(&mut self) -> Option<RequestId> {
        if !self.has_more() {
            return None;
        }

        let id = RequestId(self.next_id);
        self.next_id += 1;
        Some(id)
    }

    /// Quedan llegadas por generar
    pub fn has_more(&self) -> bool {
        self.next_id <= self.max_arrivals
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
