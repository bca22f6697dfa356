//! # Configuración del Simulador
//! src/config.rs
//!
//! Configuración del simulador con soporte para argumentos CLI y variables
//! de entorno. Los valores por defecto reproducen el escenario de referencia:
//! 5 slots, una llegada cada 2 s hasta 10 solicitudes, revisión de
//! inactividad cada 10 s, latencia en [1 s, 6 s) y 80% de éxito.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./request_simulator --max-concurrent 3 \
//!   --max-arrivals 20 \
//!   --seed 42 \
//!   --json
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! SIM_MAX_CONCURRENT=3 SIM_SEED=42 ./request_simulator
//! ```

use crate::sim::SimConfig;
use clap::Parser;

/// Configuración del simulador de solicitudes
#[derive(Debug, Clone, Parser)]
#[command(name = "request_simulator")]
#[command(about = "Simulador de cola de solicitudes con concurrencia acotada")]
#[command(version = "0.1.0")]
pub struct Config {
    // === Admisión ===

    /// Máximo de solicitudes procesándose a la vez
    #[arg(long = "max-concurrent", default_value = "5", env = "SIM_MAX_CONCURRENT")]
    pub max_concurrent: usize,

    // === Llegadas ===

    /// Intervalo entre llegadas en milisegundos
    #[arg(long = "arrival-interval", default_value = "2000", env = "SIM_ARRIVAL_INTERVAL_MS")]
    pub arrival_interval_ms: u64,

    /// Total de solicitudes a generar
    #[arg(long = "max-arrivals", default_value = "10", env = "SIM_MAX_ARRIVALS")]
    pub max_arrivals: u64,

    // === Inactividad ===

    /// Intervalo de revisión de inactividad en milisegundos
    #[arg(long = "idle-interval", default_value = "10000", env = "SIM_IDLE_INTERVAL_MS")]
    pub idle_check_interval_ms: u64,

    // === Procesamiento ===

    /// Latencia mínima de procesamiento (inclusive) en milisegundos
    #[arg(long = "min-latency", default_value = "1000", env = "SIM_MIN_LATENCY_MS")]
    pub min_latency_ms: u64,

    /// Latencia máxima de procesamiento (exclusiva) en milisegundos
    #[arg(long = "max-latency", default_value = "6000", env = "SIM_MAX_LATENCY_MS")]
    pub max_latency_ms: u64,

    /// Probabilidad de éxito de cada solicitud (0.0 - 1.0)
    #[arg(long = "success-probability", default_value = "0.8", env = "SIM_SUCCESS_PROBABILITY")]
    pub success_probability: f64,

    /// Semilla del generador aleatorio (corridas reproducibles)
    #[arg(long, env = "SIM_SEED")]
    pub seed: Option<u64>,

    // === Ejecución ===

    /// Esperar en tiempo real entre eventos en lugar de saltar el reloj
    #[arg(long, env = "SIM_REALTIME")]
    pub realtime: bool,

    /// No imprimir una línea por evento
    #[arg(short, long, env = "SIM_QUIET")]
    pub quiet: bool,

    /// Imprimir el reporte final como JSON
    #[arg(long, env = "SIM_JSON")]
    pub json: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Valida la configuración
    ///
    /// Aplica las mismas reglas que `SimConfig::validate`, que es la que
    /// exige `Simulator::new`
    pub fn validate(&self) -> Result<(), String> {
        SimConfig::from_config(self).validate()
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║          Bounded Concurrency Request Simulator              ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🚦 Admisión:");
        println!("   Slots:        {}", self.max_concurrent);
        println!();
        println!("📥 Llegadas:");
        println!("   Intervalo:    {} ms", self.arrival_interval_ms);
        println!("   Total:        {}", self.max_arrivals);
        println!();
        println!("⚙️  Procesamiento:");
        println!("   Latencia:     [{}, {}) ms", self.min_latency_ms, self.max_latency_ms);
        println!("   Éxito:        {:.0}%", self.success_probability * 100.0);
        match self.seed {
            Some(seed) => println!("   Semilla:      {}", seed),
            None => println!("   Semilla:      aleatoria"),
        }
        println!();
        println!("💤 Inactividad:");
        println!("   Revisión:     cada {} ms", self.idle_check_interval_ms);
        println!();
        println!(
            "⏱️  Reloj:        {}",
            if self.realtime { "tiempo real" } else { "virtual" }
        );
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
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
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.arrival_interval_ms, 2000);
        assert_eq!(config.max_arrivals, 10);
        assert_eq!(config.idle_check_interval_ms, 10_000);
        assert_eq!(config.min_latency_ms, 1000);
        assert_eq!(config.max_latency_ms, 6000);
        assert!((config.success_probability - 0.8).abs() < f64::EPSILON);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_cli_defaults_match_default() {
        let parsed = Config::try_parse_from(["request_simulator"]).unwrap();
        let default = Config::default();

        assert_eq!(parsed.max_concurrent, default.max_concurrent);
        assert_eq!(parsed.arrival_interval_ms, default.arrival_interval_ms);
        assert_eq!(parsed.max_arrivals, default.max_arrivals);
        assert_eq!(parsed.idle_check_interval_ms, default.idle_check_interval_ms);
        assert_eq!(parsed.min_latency_ms, default.min_latency_ms);
        assert_eq!(parsed.max_latency_ms, default.max_latency_ms);
    }

    #[test]
    fn test_cli_custom_values() {
        let parsed = Config::try_parse_from([
            "request_simulator",
            "--max-concurrent",
            "3",
            "--seed",
            "42",
            "--quiet",
            "--json",
        ])
        .unwrap();

        assert_eq!(parsed.max_concurrent, 3);
        assert_eq!(parsed.seed, Some(42));
        assert!(parsed.quiet);
        assert!(parsed.json);
        assert!(!parsed.realtime);
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_max_concurrent() {
        let mut config = Config::default();
        config.max_concurrent = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Max concurrent"));
    }

    #[test]
    fn test_validate_invalid_intervals() {
        let mut config = Config::default();
        config.arrival_interval_ms = 0;
        assert!(config.validate().unwrap_err().contains("Arrival interval"));

        let mut config = Config::default();
        config.idle_check_interval_ms = 0;
        assert!(config.validate().unwrap_err().contains("Idle check interval"));
    }

    #[test]
    fn test_validate_empty_latency_range() {
        let mut config = Config::default();
        config.min_latency_ms = 6000;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Latency range"));
    }

    #[test]
    fn test_validate_invalid_probability() {
        let mut config = Config::default();
        config.success_probability = 1.5;
        assert!(config.validate().unwrap_err().contains("Success probability"));

        config.success_probability = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_probability_bounds() {
        let mut config = Config::default();
        config.success_probability = 0.0;
        assert!(config.validate().is_ok());

        config.success_probability = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_arrivals_is_valid() {
        let mut config = Config::default();
        config.max_arrivals = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_print_summary() {
        let mut config = Config::default();
        config.seed = Some(7);
        // Should not panic
        config.print_summary();
    }
}
