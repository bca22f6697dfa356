//! # Control de Admisión
//! src/sim/admission.rs
//!
//! Cuenta los slots ocupados. Invariante: `0 <= active <= max_concurrent`.

/// Contador de solicitudes en vuelo con techo fijo
#[derive(Debug)]
pub struct AdmissionController {
    max_concurrent: usize,
    active: usize,

    /// Máximo de slots ocupados a la vez
    peak_active: usize,
}

impl AdmissionController {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent,
            active: 0,
            peak_active: 0,
        }
    }

    /// Verifica si hay un slot libre
    pub fn has_capacity(&self) -> bool {
        self.active < self.max_concurrent
    }

    /// Ocupa un slot. Retorna false (sin cambios) si no hay capacidad
    pub fn try_acquire(&mut self) -> bool {
        if !self.has_capacity() {
            return false;
        }

        self.active += 1;
        self.peak_active = self.peak_active.max(self.active);
        true
    }

    /// Libera un slot (nunca baja de cero)
    pub fn release(&mut self) {
        if self.active > 0 {
            self.active -= 1;
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn peak_active(&self) -> usize {
        self.peak_active
    }
}
