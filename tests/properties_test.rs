/*!
 * Property Tests
 * Invariants that must hold for every algorithm on arbitrary workloads
 */

use cpu_sched_sim::{simulate, Algorithm, ProcessSpec, SimulationConfig, SimulationResult, Slot};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn workload() -> impl Strategy<Value = Vec<ProcessSpec>> {
    prop::collection::vec((0u64..20, 1u64..10, 1i64..6), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                ProcessSpec::new(i as u32 + 1, arrival, burst, priority)
            })
            .collect()
    })
}

fn config() -> impl Strategy<Value = SimulationConfig> {
    (workload(), 1usize..4, 0u64..3, 1u64..6).prop_map(|(processes, cores, cs, quantum)| {
        SimulationConfig::new(processes)
            .with_cores(cores)
            .with_context_switch_time(cs)
            .with_quantum(quantum)
    })
}

fn check_invariants(config: &SimulationConfig, result: &SimulationResult) -> Result<(), TestCaseError> {
    let bursts: BTreeMap<u32, u64> = config
        .processes
        .iter()
        .map(|p| (p.id, p.burst_time))
        .collect();

    // Timing identities
    for p in &result.processes {
        let completion = p.completion_time.ok_or_else(|| TestCaseError::fail("unfinished"))?;
        let turnaround = p.turnaround_time.unwrap_or_default();
        let waiting = p.waiting_time.unwrap_or_default();
        prop_assert_eq!(turnaround, completion - p.arrival_time);
        prop_assert_eq!(turnaround, waiting + p.burst_time);
        prop_assert_eq!(p.remaining_time, 0);
    }

    // Executed time per process equals its burst, never before arrival
    let mut executed: BTreeMap<u32, u64> = BTreeMap::new();
    for entry in &result.gantt_chart {
        prop_assert!(entry.start < entry.end);
        prop_assert!(entry.core < config.cores);
        if let Slot::Execution(pid) = entry.slot {
            *executed.entry(pid).or_default() += entry.duration();
            let process = result.process(pid).ok_or_else(|| TestCaseError::fail("unknown pid"))?;
            prop_assert!(entry.start >= process.arrival_time);
        }
    }
    prop_assert_eq!(&executed, &bursts);

    // Intervals on one core never overlap
    for core in 0..config.cores {
        let mut intervals: Vec<(u64, u64)> = result
            .gantt_chart
            .iter()
            .filter(|e| e.core == core)
            .map(|e| (e.start, e.end))
            .collect();
        intervals.sort();
        for pair in intervals.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0, "overlap on core {}: {:?}", core, pair);
        }
    }

    // A process never runs on two cores at once
    for pid in bursts.keys() {
        let mut runs: Vec<(u64, u64)> = result
            .gantt_chart
            .iter()
            .filter(|e| e.slot == Slot::Execution(*pid))
            .map(|e| (e.start, e.end))
            .collect();
        runs.sort();
        for pair in runs.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
    }

    // Capacity and utilization bounds
    prop_assert!(result.busy_time() <= result.makespan * config.cores as u64);
    prop_assert!((0.0..=100.0).contains(&result.cpu_utilization));

    // Switch intervals match the switch count when switches cost time
    let switch_entries = result.context_switch_entries().count() as u64;
    if config.context_switch_time == 0 {
        prop_assert_eq!(switch_entries, 0);
        prop_assert_eq!(result.busy_time(), bursts.values().sum::<u64>());
    } else {
        prop_assert_eq!(switch_entries, result.context_switches);
    }

    Ok(())
}

proptest! {
    #[test]
    fn prop_every_algorithm_keeps_invariants(config in config()) {
        for algorithm in Algorithm::ALL {
            let result = simulate(algorithm, &config)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            check_invariants(&config, &result)?;
        }
    }

    #[test]
    fn prop_runs_are_deterministic(config in config()) {
        for algorithm in Algorithm::ALL {
            let first = simulate(algorithm, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let second = simulate(algorithm, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_large_quantum_round_robin_is_fcfs(processes in workload()) {
        let config = SimulationConfig::new(processes).with_quantum(100);

        let rr = simulate(Algorithm::RoundRobin, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let fcfs = simulate(Algorithm::Fcfs, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(rr.gantt_chart, fcfs.gantt_chart);
        prop_assert_eq!(rr.context_switches, fcfs.context_switches);
    }

    #[test]
    fn prop_srtf_minimizes_turnaround_on_one_core(processes in workload()) {
        let config = SimulationConfig::new(processes);
        let srtf = simulate(Algorithm::Srtf, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;

        for algorithm in Algorithm::ALL {
            let other = simulate(algorithm, &config).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert!(srtf.avg_turnaround_time <= other.avg_turnaround_time + 1e-9);
        }
    }
}
