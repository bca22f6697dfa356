//! # Eventos Observables
//! src/sim/events.rs
//!
//! Una línea de progreso por llegada, admisión, éxito, fallo y reporte de
//! inactividad. El simulador las guarda en orden y las imprime.

use crate::sim::types::{ProcessingFailure, RequestId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    /// Nueva solicitud encolada
    Arrived(RequestId),

    /// Solicitud admitida con su latencia sorteada
    Admitted { id: RequestId, latency_ms: u64 },

    Succeeded(RequestId),

    Failed(ProcessingFailure),

    /// Cola vacía y nada en vuelo
    IdleReported,
}

impl SimEventKind {
    /// Id de la solicitud afectada (None para el reporte de inactividad)
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            SimEventKind::Arrived(id) | SimEventKind::Succeeded(id) => Some(*id),
            SimEventKind::Admitted { id, .. } => Some(*id),
            SimEventKind::Failed(failure) => Some(failure.id),
            SimEventKind::IdleReported => None,
        }
    }

    /// Verifica si el evento cierra el ciclo de vida de una solicitud
    pub fn is_completion(&self) -> bool {
        matches!(self, SimEventKind::Succeeded(_) | SimEventKind::Failed(_))
    }
}

/// Evento con su tiempo simulado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimEvent {
    pub at_ms: u64,
    pub kind: SimEventKind,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6} ms] ", self.at_ms)?;

        match &self.kind {
            SimEventKind::Arrived(id) => write!(f, "📥 Nueva solicitud recibida: {}", id),
            SimEventKind::Admitted { id, latency_ms } => write!(
                f,
                "▶️  Solicitud {} en proceso. Tardará {} segundos.",
                id,
                *latency_ms as f64 / 1000.0
            ),
            SimEventKind::Succeeded(id) => {
                write!(f, "✅ Solicitud {} procesada correctamente.", id)
            }
            SimEventKind::Failed(failure) => write!(f, "❌ {}.", failure),
            SimEventKind::IdleReported => {
                write!(f, "💤 El servidor se ha detenido por inactividad.")
            }
        }
    }
}
