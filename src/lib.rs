//! # Request Simulator
//! src/lib.rs
//!
//! Simulador de un servidor que procesa solicitudes con concurrencia
//! acotada: las solicitudes llegan a intervalos fijos, esperan en una cola
//! FIFO y se admiten mientras haya slots libres. Cada una tarda una latencia
//! aleatoria y termina con éxito o con fallo; en ambos casos libera su slot.
//!
//! ## Arquitectura
//!
//! - `sim`: línea de tiempo, cola, admisión, procesador, llegadas e inactividad
//! - `metrics`: estadísticas de tiempos y reporte final
//! - `config`: argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```
//! use request_simulator::sim::{SimConfig, Simulator};
//!
//! let config = SimConfig { seed: Some(42), quiet: true, ..SimConfig::default() };
//! let mut simulator = Simulator::new(config).expect("configuración válida");
//! let report = simulator.run();
//! assert_eq!(report.succeeded + report.failed, 10);
//! ```

pub mod config;
pub mod metrics;
pub mod sim;
