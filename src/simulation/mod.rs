/*!
 * Simulation Engine
 * Drivers that advance simulated time over a workload under one algorithm
 */

pub mod core_state;
pub mod metrics;
mod non_preemptive;
mod preemptive;
pub mod result;
mod round_robin;
pub mod suite;
pub mod timeline;

pub use core_state::CoreState;
pub use metrics::Metrics;
pub use result::SimulationResult;
pub use suite::{run_all, run_all_parallel, run_many, run_many_parallel};
pub use timeline::{Activity, ExecutionLogEntry, GanttEntry, Slot, Timeline};

use crate::config::SimulationConfig;
use crate::core::errors::{Result, SimulationError};
use crate::core::types::Time;
use crate::process::Process;
use crate::monitoring::RunSpan;
use crate::scheduler::Algorithm;
use tracing::{debug, info};

/// Run `algorithm` over a private copy of the configured workload
pub fn simulate(algorithm: Algorithm, config: &SimulationConfig) -> Result<SimulationResult> {
    config.validate_for(algorithm)?;

    let span = RunSpan::new(algorithm.as_str(), config.cores);
    let outcome = {
        let _entered = span.enter();
        drive(algorithm, config)
    };

    match &outcome {
        Ok(_) => span.record_result(true),
        Err(e) => span.record_error(&e.to_string()),
    }
    outcome
}

fn drive(algorithm: Algorithm, config: &SimulationConfig) -> Result<SimulationResult> {
    let state = RunState::new(algorithm, config);
    if state.processes.is_empty() {
        info!("Empty workload, returning zero result");
        return Ok(SimulationResult::empty(algorithm, config.cores));
    }

    let state = if algorithm == Algorithm::RoundRobin {
        round_robin::run(state, config.quantum)
    } else {
        let selector = algorithm
            .selector()
            .ok_or_else(|| SimulationError::InvalidAlgorithm(algorithm.as_str().to_string()))?;
        if algorithm.is_preemptive() {
            preemptive::run(state, selector, config.step_budget)?
        } else {
            non_preemptive::run(state, selector, algorithm == Algorithm::PriorityAging)
        }
    };

    let result = state.into_result();
    info!(
        avg_waiting_time = result.avg_waiting_time,
        avg_turnaround_time = result.avg_turnaround_time,
        context_switches = result.context_switches,
        cpu_utilization = result.cpu_utilization,
        makespan = result.makespan,
        "Simulation complete"
    );
    Ok(result)
}

/// Mutable bookkeeping of one run, exclusively owned by its driver
#[derive(Debug)]
pub(crate) struct RunState {
    pub algorithm: Algorithm,
    pub processes: Vec<Process>,
    pub cores: Vec<CoreState>,
    pub timeline: Timeline,
    pub context_switches: u64,
    pub context_switch_time: Time,
}

impl RunState {
    fn new(algorithm: Algorithm, config: &SimulationConfig) -> Self {
        Self {
            algorithm,
            processes: config.working_set(),
            cores: CoreState::bank(config.cores),
            timeline: Timeline::new(config.cores, config.record_execution_log),
            context_switches: 0,
            context_switch_time: config.context_switch_time,
        }
    }

    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(Process::is_completed)
    }

    /// Indices of processes that have arrived by `now` and are unfinished
    pub fn available(&self, now: Time) -> Vec<usize> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_completed() && p.has_arrived(now))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Earliest arrival among unfinished processes that arrive after `now`
    pub fn next_arrival_after(&self, now: Time) -> Option<Time> {
        self.processes
            .iter()
            .filter(|p| !p.is_completed() && p.arrival_time > now)
            .map(|p| p.arrival_time)
            .min()
    }

    /// Put process `idx` on `core` at `now`
    ///
    /// Counts and bills a context switch when the occupant changes. Returns
    /// the time the process starts executing.
    pub fn dispatch(&mut self, core: usize, idx: usize, now: Time) -> Time {
        let process = &self.processes[idx];
        let mut start = now;

        if self.cores[core].switches_to(process.id) {
            self.context_switches += 1;
            start = now + self.context_switch_time;
            self.timeline.context_switch(core, process, now, start);
            debug!(
                core,
                from = ?self.cores[core].last_process,
                to = process.id,
                at = now,
                "Context switch"
            );
        }

        self.cores[core].occupy(idx, process);
        start
    }

    fn into_result(self) -> SimulationResult {
        debug_assert!(self.all_completed(), "Driver returned unfinished processes");
        SimulationResult::assemble(
            self.algorithm,
            self.processes,
            self.timeline,
            self.context_switches,
            self.cores.len(),
        )
    }
}
