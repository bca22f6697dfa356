//! # Simulador de Concurrencia Acotada
//! src/sim/simulator.rs
//!
//! Contexto explícito que coordina la cola, la admisión, el procesador,
//! las llegadas y el monitor de inactividad sobre una única línea de tiempo.
//!
//! Todo corre en un solo hilo: cada actividad "concurrente" es un evento del
//! `Timer`, y el estado se lee de nuevo en cada despacho.

use crate::config::Config;
use crate::metrics::{MetricsCollector, SimulationReport};
use crate::sim::admission::AdmissionController;
use crate::sim::arrivals::ArrivalGenerator;
use crate::sim::events::{SimEvent, SimEventKind};
use crate::sim::idle::{IdleCheck, IdleMonitor};
use crate::sim::processor::RequestProcessor;
use crate::sim::queue::RequestQueue;
use crate::sim::timer::{Pacer, Timer, TimerHandle, VirtualPacer, WallClockPacer};
use crate::sim::types::{RequestId, RequestRecord, RequestStatus};
use std::collections::BTreeMap;

/// Configuración del simulador
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Slots de concurrencia
    pub max_concurrent: usize,

    /// Intervalo entre llegadas (ms)
    pub arrival_interval_ms: u64,

    /// Total de llegadas
    pub max_arrivals: u64,

    /// Intervalo del monitor de inactividad (ms)
    pub idle_check_interval_ms: u64,

    /// Rango de latencia `[min, max)` en ms
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,

    /// Probabilidad de éxito
    pub success_probability: f64,

    /// Semilla del procesador
    pub seed: Option<u64>,

    /// Esperar en tiempo real entre eventos
    pub realtime: bool,

    /// Suprimir las líneas de progreso
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            arrival_interval_ms: 2000,
            max_arrivals: 10,
            idle_check_interval_ms: 10_000,
            min_latency_ms: 1000,
            max_latency_ms: 6000,
            success_probability: 0.8,
            seed: None,
            realtime: false,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Crea una configuración desde el Config principal
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_concurrent: config.max_concurrent,
            arrival_interval_ms: config.arrival_interval_ms,
            max_arrivals: config.max_arrivals,
            idle_check_interval_ms: config.idle_check_interval_ms,
            min_latency_ms: config.min_latency_ms,
            max_latency_ms: config.max_latency_ms,
            success_probability: config.success_probability,
            seed: config.seed,
            realtime: config.realtime,
            // Con --json solo se imprime el reporte
            quiet: config.quiet || config.json,
        }
    }

    /// Valida la configuración
    ///
    /// Sin slots nunca se admite nada y el monitor de inactividad se re-arma
    /// para siempre; una probabilidad fuera de [0, 1] no se puede sortear.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("Max concurrent must be >= 1".to_string());
        }

        if self.arrival_interval_ms == 0 {
            return Err("Arrival interval must be > 0".to_string());
        }
        if self.idle_check_interval_ms == 0 {
            return Err("Idle check interval must be > 0".to_string());
        }

        if self.min_latency_ms >= self.max_latency_ms {
            return Err(format!(
                "Latency range is empty: [{}, {})",
                self.min_latency_ms, self.max_latency_ms
            ));
        }

        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err("Success probability must be 0.0-1.0".to_string());
        }

        Ok(())
    }
}

/// Trabajo diferido en la línea de tiempo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimTask {
    Arrival,
    Completion(RequestId),
    IdleCheck,
}

/// Simulador de solicitudes con concurrencia acotada
pub struct Simulator {
    config: SimConfig,
    timer: Timer<SimTask>,
    pacer: Box<dyn Pacer>,
    queue: RequestQueue,
    admission: AdmissionController,
    processor: RequestProcessor,
    arrivals: ArrivalGenerator,
    idle_monitor: IdleMonitor,
    metrics: MetricsCollector,

    /// Historial por solicitud
    records: BTreeMap<RequestId, RequestRecord>,

    /// Eventos observables en orden
    events: Vec<SimEvent>,

    /// Próxima revisión de inactividad programada
    idle_timer: Option<TimerHandle>,

    started: bool,
}

impl Simulator {
    /// Crea un simulador; el reloj es virtual salvo que `config.realtime`
    ///
    /// Retorna error si la configuración no pasa `SimConfig::validate`
    pub fn new(config: SimConfig) -> Result<Self, String> {
        let pacer: Box<dyn Pacer> = if config.realtime {
            Box::new(WallClockPacer::new())
        } else {
            Box::new(VirtualPacer)
        };

        Self::with_pacer(config, pacer)
    }

    /// Crea un simulador con una estrategia de espera propia
    pub fn with_pacer(config: SimConfig, pacer: Box<dyn Pacer>) -> Result<Self, String> {
        config.validate()?;

        Ok(Self {
            timer: Timer::new(),
            pacer,
            queue: RequestQueue::new(),
            admission: AdmissionController::new(config.max_concurrent),
            processor: RequestProcessor::new(
                config.min_latency_ms,
                config.max_latency_ms,
                config.success_probability,
                config.seed,
            ),
            arrivals: ArrivalGenerator::new(config.max_arrivals, config.arrival_interval_ms),
            idle_monitor: IdleMonitor::new(config.idle_check_interval_ms),
            metrics: MetricsCollector::new(),
            records: BTreeMap::new(),
            events: Vec::new(),
            idle_timer: None,
            started: false,
            config,
        })
    }

    /// Programa la primera llegada y la primera revisión de inactividad.
    ///
    /// Se llama sola desde `step`; llamarla de nuevo no tiene efecto.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if self.arrivals.has_more() {
            self.timer.schedule(self.arrivals.interval_ms(), SimTask::Arrival);
        }
        self.arm_idle_check();
    }

    /// Despacha el próximo evento. Retorna false si la línea de tiempo terminó
    pub fn step(&mut self) -> bool {
        self.start();

        let Some(due_ms) = self.timer.next_due_ms() else {
            return false;
        };
        self.pacer.wait_until(due_ms);

        let Some((_, task)) = self.timer.pop() else {
            return false;
        };

        match task {
            SimTask::Arrival => self.on_arrival(),
            SimTask::Completion(id) => self.on_completion(id),
            SimTask::IdleCheck => self.on_idle_check(),
        }

        true
    }

    /// Despacha todos los eventos con tiempo `<= t_ms` y deja el reloj en `t_ms`
    pub fn run_until(&mut self, t_ms: u64) {
        self.start();

        while let Some(due_ms) = self.timer.next_due_ms() {
            if due_ms > t_ms {
                break;
            }
            self.step();
        }

        self.timer.advance_to(t_ms);
    }

    /// Corre hasta que no queden eventos y retorna el reporte
    pub fn run(&mut self) -> SimulationReport {
        while self.step() {}
        self.report()
    }

    /// Admite solicitudes de la cabeza de la cola mientras haya slots.
    ///
    /// Sin cola o sin capacidad no hace nada. Retorna cuántas admitió.
    pub fn admit_next(&mut self) -> usize {
        let mut admitted = 0;

        while !self.queue.is_empty() && self.admission.try_acquire() {
            let Some(id) = self.queue.dequeue() else {
                self.admission.release();
                break;
            };

            self.process(id);
            admitted += 1;
        }

        admitted
    }

    /// Sortea la latencia y programa la finalización de `id`
    fn process(&mut self, id: RequestId) {
        let now = self.timer.now_ms();
        let latency_ms = self.processor.draw_latency();

        if let Some(record) = self.records.get_mut(&id) {
            record.mark_admitted(now, latency_ms);
        }

        self.log(SimEventKind::Admitted { id, latency_ms });
        self.timer.schedule(latency_ms, SimTask::Completion(id));
    }

    fn on_arrival(&mut self) {
        let now = self.timer.now_ms();

        if let Some(id) = self.arrivals.next_id() {
            self.records.insert(id, RequestRecord::new(id, now));
            self.metrics.record_arrival();
            self.log(SimEventKind::Arrived(id));

            self.queue.enqueue(id);
            self.admit_next();
        }

        if self.arrivals.has_more() {
            self.timer
                .schedule(self.arrivals.interval_ms(), SimTask::Arrival);
        }
    }

    fn on_completion(&mut self, id: RequestId) {
        let now = self.timer.now_ms();
        let outcome = self.processor.draw_outcome(id);

        let Some(record) = self.records.get_mut(&id) else {
            return;
        };
        // Una solicitud se completa una sola vez
        if !record.mark_finished(now, &outcome) {
            return;
        }
        self.metrics.record_finished(record);

        // El fallo queda contenido aquí: se registra y libera el slot igual
        match outcome {
            Ok(()) => self.log(SimEventKind::Succeeded(id)),
            Err(failure) => self.log(SimEventKind::Failed(failure)),
        }

        self.admission.release();
        self.admit_next();
    }

    fn on_idle_check(&mut self) {
        let now = self.timer.now_ms();

        match self
            .idle_monitor
            .check(now, self.queue.len(), self.admission.active())
        {
            // No se re-arma tras reportar
            IdleCheck::Quiescent => self.log(SimEventKind::IdleReported),
            IdleCheck::Busy => self.arm_idle_check(),
        }
    }

    fn arm_idle_check(&mut self) {
        let handle = self
            .timer
            .schedule(self.idle_monitor.interval_ms(), SimTask::IdleCheck);
        self.idle_timer = Some(handle);
    }

    /// Hay una revisión de inactividad pendiente
    pub fn idle_monitor_armed(&self) -> bool {
        self.idle_timer
            .is_some_and(|handle| self.timer.is_pending(handle))
    }

    fn log(&mut self, kind: SimEventKind) {
        let event = SimEvent {
            at_ms: self.timer.now_ms(),
            kind,
        };

        if !self.config.quiet {
            println!("{}", event);
        }
        self.events.push(event);
    }

    /// Arma el reporte con el estado actual
    pub fn report(&self) -> SimulationReport {
        let snapshot = self.metrics.get_snapshot();

        SimulationReport {
            total_arrivals: snapshot.arrivals,
            succeeded: snapshot.succeeded,
            failed: snapshot.failed,
            elapsed_ms: self.timer.now_ms(),
            max_concurrent: self.admission.max_concurrent(),
            peak_active: self.admission.peak_active(),
            peak_queue_len: self.queue.peak_len(),
            idle_reported_at_ms: self.idle_monitor.reports().first().copied(),
            waiting_ms: snapshot.waiting_ms,
            service_ms: snapshot.service_ms,
            turnaround_ms: snapshot.turnaround_ms,
            requests: self.records.values().cloned().collect(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.timer.now_ms()
    }

    /// Solicitudes en vuelo
    pub fn active_count(&self) -> usize {
        self.admission.active()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn status(&self, id: RequestId) -> Option<RequestStatus> {
        self.records.get(&id).map(|record| record.status)
    }

    pub fn record(&self, id: RequestId) -> Option<&RequestRecord> {
        self.records.get(&id)
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Tiempos en los que se reportó inactividad
    pub fn idle_reports(&self) -> &[u64] {
        self.idle_monitor.reports()
    }

    /// La línea de tiempo ya no tiene eventos pendientes
    pub fn is_finished(&self) -> bool {
        self.started && self.timer.is_empty()
    }
}
