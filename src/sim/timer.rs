//! # Temporizador de Eventos
//! src/sim/timer.rs
//!
//! Línea de tiempo del simulador: cada `schedule` registra un único evento
//! diferido que se dispara una sola vez, nunca antes de su retraso.
//!
//! El tiempo es virtual (milisegundos simulados). Un `Pacer` decide si el
//! runner espera en tiempo real hasta cada evento o salta directamente.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::thread;
use std::time::{Duration, Instant};

/// Token opaco de un evento programado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Entrada del heap: se ordena por tiempo y luego por orden de registro
struct ScheduledEvent<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Invertimos para que BinaryHeap nos dé el más temprano;
        // a igual tiempo, FIFO por número de secuencia
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Temporizador de eventos diferidos
pub struct Timer<E> {
    /// Tiempo simulado actual
    now_ms: u64,

    /// Siguiente número de secuencia
    next_seq: u64,

    /// Eventos pendientes
    pending: BinaryHeap<ScheduledEvent<E>>,
}

impl<E> Timer<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Tiempo simulado actual en milisegundos
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Programa `event` para dentro de `delay_ms`
    pub fn schedule(&mut self, delay_ms: u64, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.pending.push(ScheduledEvent {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            event,
        });

        TimerHandle(seq)
    }

    /// Tiempo del próximo evento, si hay alguno
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.peek().map(|entry| entry.due_ms)
    }

    /// Extrae el próximo evento y avanza el reloj hasta su tiempo.
    ///
    /// El evento sale del heap: no puede volver a dispararse.
    pub fn pop(&mut self) -> Option<(TimerHandle, E)> {
        let entry = self.pending.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some((TimerHandle(entry.seq), entry.event))
    }

    /// Avanza el reloj sin disparar eventos (nunca retrocede ni salta eventos)
    pub fn advance_to(&mut self, t_ms: u64) {
        let limit = self.next_due_ms().unwrap_or(t_ms).min(t_ms);
        self.now_ms = self.now_ms.max(limit);
    }

    /// Verifica si el evento del handle sigue pendiente
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|entry| entry.seq == handle.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for Timer<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Estrategia de espera antes de despachar un evento
pub trait Pacer {
    /// Bloquea (o no) hasta que el tiempo `due_ms` de la simulación llegue
    fn wait_until(&mut self, due_ms: u64);
}

/// Tiempo virtual: el reloj salta al siguiente evento sin esperar
#[derive(Debug, Default)]
pub struct VirtualPacer;

impl Pacer for VirtualPacer {
    fn wait_until(&mut self, _due_ms: u64) {}
}

/// Tiempo real: duerme hasta que el reloj de pared alcance el evento
#[derive(Debug)]
pub struct WallClockPacer {
    start: Instant,
}

impl WallClockPacer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClockPacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for WallClockPacer {
    fn wait_until(&mut self, due_ms: u64) {
        let target = Duration::from_millis(due_ms);
        let elapsed = self.start.elapsed();
        if elapsed < target {
            thread::sleep(target - elapsed);
        }
    }
}
