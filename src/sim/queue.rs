//! # Cola de Solicitudes
//! src/sim/queue.rs
//!
//! Cola FIFO sin límite de solicitudes pendientes. Solo se modifica al
//! llegar una solicitud (encolar) y al admitirla (desencolar).

use crate::sim::types::RequestId;
use std::collections::VecDeque;

/// Cola FIFO de solicitudes pendientes
#[derive(Debug, Default)]
pub struct RequestQueue {
    queue: VecDeque<RequestId>,

    /// Mayor longitud observada
    peak_len: usize,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            peak_len: 0,
        }
    }

    /// Encola al final (orden de llegada)
    pub fn enqueue(&mut self, id: RequestId) {
        self.queue.push_back(id);
        self.peak_len = self.peak_len.max(self.queue.len());
    }

    /// Desencola la cabeza, None si está vacía
    pub fn dequeue(&mut self) -> Option<RequestId> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}
