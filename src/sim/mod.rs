//! # Simulador de Solicitudes
//!
//! Cola FIFO de solicitudes con un máximo fijo de solicitudes en vuelo.
//!
//! ## Componentes
//!
//! - `timer`: línea de tiempo de eventos diferidos
//! - `queue`: cola FIFO de solicitudes pendientes
//! - `admission`: contador de slots ocupados
//! - `processor`: latencia y resultado aleatorios
//! - `arrivals`: generador de ids a intervalos fijos
//! - `idle`: monitor de inactividad
//! - `simulator`: contexto que coordina todo lo anterior

pub mod admission;
pub mod arrivals;
pub mod events;
pub mod idle;
pub mod processor;
pub mod queue;
pub mod simulator;
pub mod timer;
pub mod types;

pub use events::{SimEvent, SimEventKind};
pub use simulator::{SimConfig, Simulator};
pub use types::{Outcome, ProcessingFailure, RequestId, RequestRecord, RequestStatus};
