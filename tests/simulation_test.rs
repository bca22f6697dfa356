//! Tests de integración del simulador
//! tests/simulation_test.rs
//!
//! Corren simulaciones completas con distintas semillas y verifican las
//! propiedades de la cola y de la admisión.

use request_simulator::metrics::SimulationReport;
use request_simulator::sim::{RequestId, RequestStatus, SimConfig, SimEventKind, Simulator};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Helper: crea el simulador con una configuración válida
fn simulator(config: SimConfig) -> Simulator {
    Simulator::new(config).expect("valid config")
}

/// Helper: configuración por defecto, silenciosa y con semilla
fn seeded(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        quiet: true,
        ..SimConfig::default()
    }
}

#[test]
fn test_active_count_never_exceeds_limit() {
    for seed in 0..20 {
        for max_concurrent in [1, 2, 5] {
            let mut sim = simulator(SimConfig {
                max_concurrent,
                ..seeded(seed)
            });

            while sim.step() {
                assert!(
                    sim.active_count() <= max_concurrent,
                    "seed {}: {} active with limit {}",
                    seed,
                    sim.active_count(),
                    max_concurrent
                );
            }

            assert!(sim.report().peak_active <= max_concurrent);
        }
    }
}

#[test]
fn test_every_request_completes_exactly_once() {
    for seed in 0..20 {
        let mut sim = simulator(seeded(seed));
        let report = sim.run();

        let mut completions: HashMap<RequestId, usize> = HashMap::new();
        for event in sim.events() {
            if event.kind.is_completion() {
                if let Some(id) = event.kind.request_id() {
                    *completions.entry(id).or_insert(0) += 1;
                }
            }
        }

        assert_eq!(completions.len(), 10, "seed {}", seed);
        assert!(completions.values().all(|&count| count == 1));

        assert_eq!(report.succeeded + report.failed, 10);
        assert!(report
            .requests
            .iter()
            .all(|record| record.status.is_terminal()));
    }
}

#[test]
fn test_queue_drains_after_arrivals_stop() {
    for seed in 0..10 {
        let mut sim = simulator(SimConfig {
            max_concurrent: 1,
            ..seeded(seed)
        });
        sim.run();

        assert!(sim.is_finished());
        assert_eq!(sim.queue_len(), 0);
        assert_eq!(sim.active_count(), 0);
        assert_eq!(sim.idle_reports().len(), 1);
    }
}

#[test]
fn test_admission_follows_arrival_order() {
    for seed in 0..10 {
        let mut sim = simulator(SimConfig {
            max_concurrent: 2,
            ..seeded(seed)
        });
        sim.run();

        let admitted: Vec<u64> = sim
            .events()
            .iter()
            .filter_map(|event| match event.kind {
                SimEventKind::Admitted { id, .. } => Some(id.value()),
                _ => None,
            })
            .collect();

        assert_eq!(admitted, (1..=10).collect::<Vec<_>>(), "seed {}", seed);
    }
}

#[test]
fn test_all_arrivals_on_schedule() {
    let mut sim = simulator(seeded(3));
    sim.run();

    let arrival_times: Vec<u64> = sim
        .events()
        .iter()
        .filter(|event| matches!(event.kind, SimEventKind::Arrived(_)))
        .map(|event| event.at_ms)
        .collect();

    let expected: Vec<u64> = (1..=10).map(|n| n * 2000).collect();
    assert_eq!(arrival_times, expected);
}

#[test]
fn test_latencies_within_range() {
    let mut sim = simulator(seeded(8));
    let report = sim.run();

    for record in &report.requests {
        let latency = record.latency_ms.expect("admitted request has a latency");
        assert!((1000..6000).contains(&latency));
        assert_eq!(record.service_ms(), Some(latency));
    }
}

#[test]
fn test_all_failures_still_drain() {
    let mut sim = simulator(SimConfig {
        success_probability: 0.0,
        ..seeded(21)
    });
    let report = sim.run();

    assert_eq!(report.failed, 10);
    assert_eq!(report.succeeded, 0);
    assert_eq!(sim.active_count(), 0);
    assert!(report
        .requests
        .iter()
        .all(|record| record.status == RequestStatus::Failed));
}

#[test]
fn test_same_seed_same_run() {
    let report_a = simulator(seeded(77)).run();
    let report_b = simulator(seeded(77)).run();

    assert_eq!(report_a, report_b);
}

#[test]
fn test_report_json() {
    let report = simulator(seeded(5)).run();
    let json = report.to_json().expect("report serializes");

    assert!(json.contains("\"total_arrivals\": 10"));
    assert!(json.contains("\"turnaround_ms\""));

    let parsed: SimulationReport = serde_json::from_str(&json).expect("report parses");
    assert_eq!(parsed.requests.len(), 10);
    assert_eq!(parsed.succeeded, report.succeeded);
}

#[test]
fn test_realtime_pacing_waits_for_events() {
    // Escala reducida para que el test dure unas decenas de ms
    let start = Instant::now();
    let mut sim = simulator(SimConfig {
        max_concurrent: 2,
        arrival_interval_ms: 5,
        max_arrivals: 4,
        idle_check_interval_ms: 20,
        min_latency_ms: 1,
        max_latency_ms: 10,
        realtime: true,
        ..seeded(9)
    });

    let report = sim.run();

    assert_eq!(report.succeeded + report.failed, 4);
    assert!(start.elapsed() >= Duration::from_millis(report.elapsed_ms));
}
