//! # Monitor de Inactividad
//! src/sim/idle.rs
//!
//! Revisa periódicamente si el sistema está quieto (cola vacía y ningún
//! slot ocupado). Si lo está, lo reporta y no vuelve a programarse; si no,
//! el simulador lo re-arma para otro intervalo.

/// Resultado de una revisión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleCheck {
    /// Cola vacía y nada en vuelo
    Quiescent,

    /// Hay trabajo pendiente: re-armar
    Busy,
}

#[derive(Debug)]
pub struct IdleMonitor {
    interval_ms: u64,

    /// Tiempos en los que se reportó inactividad
    reports: Vec<u64>,
}

impl IdleMonitor {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            reports: Vec::new(),
        }
    }

    /// Inspecciona el estado actual y registra el reporte si corresponde
    pub fn check(&mut self, now_ms: u64, queue_len: usize, active: usize) -> IdleCheck {
        if queue_len == 0 && active == 0 {
            self.reports.push(now_ms);
            IdleCheck::Quiescent
        } else {
            IdleCheck::Busy
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn reports(&self) -> &[u64] {
        &self.reports
    }
}
