//! # Tipos del Simulador
//! src/sim/types.rs
//!
//! Define los identificadores, estados y registros de cada solicitud.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador único de una solicitud (monotónico, empieza en 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Estado de una solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// En la cola esperando un slot libre
    Queued,

    /// Ocupando un slot, en procesamiento
    Admitted,

    /// Procesada correctamente
    Succeeded,

    /// Procesamiento fallido (no se reintenta)
    Failed,
}

impl RequestStatus {
    /// Verifica si la solicitud está en estado terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Succeeded | RequestStatus::Failed)
    }
}

/// Fallo simulado del procesamiento de una solicitud.
///
/// Es un resultado esperado (probabilístico), no una condición excepcional:
/// se registra, libera el slot y nunca se propaga más allá del procesador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingFailure {
    pub id: RequestId,
}

impl fmt::Display for ProcessingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Solicitud {} falló", self.id)
    }
}

impl std::error::Error for ProcessingFailure {}

/// Resultado del procesamiento de una solicitud
pub type Outcome = Result<(), ProcessingFailure>;

/// Historial de una solicitud (tiempos en ms simulados)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: RequestId,
    pub status: RequestStatus,
    pub arrived_at_ms: u64,
    pub admitted_at_ms: Option<u64>,
    pub finished_at_ms: Option<u64>,
    /// Latencia de procesamiento sorteada al admitir
    pub latency_ms: Option<u64>,
}

impl RequestRecord {
    pub fn new(id: RequestId, arrived_at_ms: u64) -> Self {
        Self {
            id,
            status: RequestStatus::Queued,
            arrived_at_ms,
            admitted_at_ms: None,
            finished_at_ms: None,
            latency_ms: None,
        }
    }

    /// Marca la solicitud como admitida
    pub fn mark_admitted(&mut self, now_ms: u64, latency_ms: u64) {
        self.status = RequestStatus::Admitted;
        self.admitted_at_ms = Some(now_ms);
        self.latency_ms = Some(latency_ms);
    }

    /// Marca el resultado final.
    ///
    /// Retorna `false` si la solicitud no estaba admitida: los estados
    /// terminales son absorbentes y una solicitud se completa una sola vez.
    pub fn mark_finished(&mut self, now_ms: u64, outcome: &Outcome) -> bool {
        if self.status != RequestStatus::Admitted {
            return false;
        }

        self.status = match outcome {
            Ok(()) => RequestStatus::Succeeded,
            Err(_) => RequestStatus::Failed,
        };
        self.finished_at_ms = Some(now_ms);
        true
    }

    /// Tiempo esperando en la cola
    pub fn waiting_ms(&self) -> Option<u64> {
        self.admitted_at_ms
            .map(|admitted| admitted.saturating_sub(self.arrived_at_ms))
    }

    /// Tiempo ocupando un slot
    pub fn service_ms(&self) -> Option<u64> {
        match (self.admitted_at_ms, self.finished_at_ms) {
            (Some(admitted), Some(finished)) => Some(finished.saturating_sub(admitted)),
            _ => None,
        }
    }

    /// Tiempo total desde la llegada hasta el resultado
    pub fn turnaround_ms(&self) -> Option<u64> {
        self.finished_at_ms
            .map(|finished| finished.saturating_sub(self.arrived_at_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RequestStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Queued.is_terminal());
        assert!(!RequestStatus::Admitted.is_terminal());
        assert!(RequestStatus::Succeeded.is_terminal());
        assert!(RequestStatus::Failed.is_terminal());
    }

    #[test]
    fn test_record_lifecycle() {
        let mut record = RequestRecord::new(RequestId(3), 6000);
        assert_eq!(record.status, RequestStatus::Queued);
        assert_eq!(record.waiting_ms(), None);

        record.mark_admitted(7500, 2000);
        assert_eq!(record.status, RequestStatus::Admitted);
        assert_eq!(record.waiting_ms(), Some(1500));

        assert!(record.mark_finished(9500, &Ok(())));
        assert_eq!(record.status, RequestStatus::Succeeded);
        assert_eq!(record.service_ms(), Some(2000));
        assert_eq!(record.turnaround_ms(), Some(3500));
    }

    #[test]
    fn test_record_finishes_only_once() {
        let id = RequestId(1);
        let mut record = RequestRecord::new(id, 0);
        record.mark_admitted(0, 1000);

        assert!(record.mark_finished(1000, &Err(ProcessingFailure { id })));
        assert_eq!(record.status, RequestStatus::Failed);

        // Un segundo resultado no cambia el estado terminal
        assert!(!record.mark_finished(2000, &Ok(())));
        assert_eq!(record.status, RequestStatus::Failed);
        assert_eq!(record.finished_at_ms, Some(1000));
    }

    #[test]
    fn test_queued_record_cannot_finish() {
        let mut record = RequestRecord::new(RequestId(1), 0);
        assert!(!record.mark_finished(500, &Ok(())));
        assert_eq!(record.status, RequestStatus::Queued);
    }

    #[test]
    fn test_failure_display() {
        let failure = ProcessingFailure { id: RequestId(7) };
        assert_eq!(failure.to_string(), "Solicitud 7 falló");
    }
}
