/*!
 * Simulation Suite
 * Run several algorithms over one configuration, sequentially or in parallel
 */

use super::{simulate, SimulationResult};
use crate::config::SimulationConfig;
use crate::core::errors::Result;
use crate::scheduler::Algorithm;
use std::thread;
use tracing::info;

/// Run each algorithm in order; stops at the first error
pub fn run_many(algorithms: &[Algorithm], config: &SimulationConfig) -> Result<Vec<SimulationResult>> {
    algorithms
        .iter()
        .map(|&algorithm| simulate(algorithm, config))
        .collect()
}

/// Run every supported algorithm
pub fn run_all(config: &SimulationConfig) -> Result<Vec<SimulationResult>> {
    run_many(&Algorithm::ALL, config)
}

/// Run each algorithm on its own scoped thread
///
/// Runs share nothing but the read-only configuration, so results match
/// [`run_many`] exactly and come back in request order. The first error in
/// request order is returned.
pub fn run_many_parallel(
    algorithms: &[Algorithm],
    config: &SimulationConfig,
) -> Result<Vec<SimulationResult>> {
    info!(runs = algorithms.len(), "Starting parallel suite");

    let outcomes: Vec<Result<SimulationResult>> = thread::scope(|scope| {
        let handles: Vec<_> = algorithms
            .iter()
            .map(|&algorithm| {
                thread::Builder::new()
                    .name(format!("sim-{}", algorithm.as_str()))
                    .spawn_scoped(scope, move || simulate(algorithm, config))
            })
            .collect();

        handles
            .into_iter()
            .zip(algorithms)
            .map(|(handle, &algorithm)| match handle {
                Ok(handle) => match handle.join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                },
                // Thread could not be spawned; run on this one instead
                Err(_) => simulate(algorithm, config),
            })
            .collect()
    });

    outcomes.into_iter().collect()
}

/// Run every supported algorithm in parallel
pub fn run_all_parallel(config: &SimulationConfig) -> Result<Vec<SimulationResult>> {
    run_many_parallel(&Algorithm::ALL, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SimulationError;

    #[test]
    fn test_run_all_covers_every_algorithm_in_order() {
        let results = run_all(&SimulationConfig::sample()).unwrap();
        let algorithms: Vec<Algorithm> = results.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = SimulationConfig::sample()
            .with_cores(2)
            .with_context_switch_time(1);

        let sequential = run_all(&config).unwrap();
        let parallel = run_all_parallel(&config).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_error_propagates() {
        let config = SimulationConfig::sample().with_quantum(0);

        assert!(run_many(&[Algorithm::Fcfs], &config).is_ok());
        assert_eq!(
            run_many_parallel(&[Algorithm::Fcfs, Algorithm::RoundRobin], &config),
            Err(SimulationError::InvalidQuantum(0))
        );
    }
}
