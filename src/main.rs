//! # Request Simulator - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, corre la simulación e imprime el reporte.

use request_simulator::config::Config;
use request_simulator::sim::{SimConfig, Simulator};

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    if !config.json {
        config.print_summary();
    }

    let mut simulator = match Simulator::new(SimConfig::from_config(&config)) {
        Ok(simulator) => simulator,
        Err(e) => {
            eprintln!("💥 Configuración inválida: {}", e);
            std::process::exit(1);
        }
    };
    let report = simulator.run();

    if config.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("💥 Error serializando el reporte: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        report.print_summary();
    }
}
