/*!
 * Simulation Configuration
 * Workload, core count, quantum and safeguards for one or more runs
 */

use crate::core::errors::{Result, SimulationError};
use crate::core::limits::{
    DEFAULT_CONTEXT_SWITCH_TIME, DEFAULT_CORES, DEFAULT_QUANTUM, DEFAULT_STEP_BUDGET,
    MAX_EXECUTION_LOG_TICKS,
};
use crate::core::types::Time;
use crate::process::validation::validate_processes;
use crate::process::{Process, ProcessSpec};
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

fn default_cores() -> usize {
    DEFAULT_CORES
}

fn default_quantum() -> Time {
    DEFAULT_QUANTUM
}

fn default_context_switch_time() -> Time {
    DEFAULT_CONTEXT_SWITCH_TIME
}

fn default_step_budget() -> u64 {
    DEFAULT_STEP_BUDGET
}

fn default_record_execution_log() -> bool {
    true
}

/// Input configuration shared by every algorithm of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Processes in input order
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,

    /// Number of simulated cores (>= 1)
    #[serde(default = "default_cores")]
    pub cores: usize,

    /// Ticks billed whenever a core changes occupant
    #[serde(default = "default_context_switch_time")]
    pub context_switch_time: Time,

    /// Round Robin time quantum (>= 1, checked only for Round Robin)
    #[serde(default = "default_quantum")]
    pub quantum: Time,

    /// Outer-iteration budget of the preemptive tick driver
    #[serde(default = "default_step_budget")]
    pub step_budget: u64,

    /// Expand intervals into the per-tick execution log
    #[serde(default = "default_record_execution_log")]
    pub record_execution_log: bool,
}

impl SimulationConfig {
    /// Create configuration with defaults for everything but the workload
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self {
            processes,
            cores: DEFAULT_CORES,
            context_switch_time: DEFAULT_CONTEXT_SWITCH_TIME,
            quantum: DEFAULT_QUANTUM,
            step_budget: DEFAULT_STEP_BUDGET,
            record_execution_log: true,
        }
    }

    /// Stock four-process workload
    pub fn sample() -> Self {
        Self::new(vec![
            ProcessSpec::new(1, 0, 8, 3),
            ProcessSpec::new(2, 1, 4, 1),
            ProcessSpec::new(3, 2, 9, 4),
            ProcessSpec::new(4, 3, 5, 2),
        ])
    }

    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_context_switch_time(mut self, ticks: Time) -> Self {
        self.context_switch_time = ticks;
        self
    }

    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_step_budget(mut self, budget: u64) -> Self {
        self.step_budget = budget;
        self
    }

    pub fn with_execution_log(mut self, enabled: bool) -> Self {
        self.record_execution_log = enabled;
        self
    }

    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&contents)?;
        debug!(
            path = %path.display(),
            processes = config.processes.len(),
            cores = config.cores,
            "Loaded workload"
        );
        Ok(config)
    }

    /// Validate everything every algorithm depends on
    pub fn validate(&self) -> Result<()> {
        if self.cores == 0 {
            return Err(SimulationError::InvalidCoreCount(self.cores));
        }
        validate_processes(&self.processes)?;

        let horizon = self.horizon().ok_or(SimulationError::HorizonOverflow)?;
        if self.record_execution_log {
            let within = (horizon as u128) * (self.cores as u128) <= MAX_EXECUTION_LOG_TICKS as u128;
            if !within {
                return Err(SimulationError::ExecutionLogTooLarge {
                    horizon,
                    cores: self.cores,
                    limit: MAX_EXECUTION_LOG_TICKS,
                });
            }
        }
        Ok(())
    }

    /// Upper bound on the time any driver can reach
    ///
    /// Last arrival plus every burst plus one switch per execution tick and
    /// per process. `None` when that does not fit in `Time`.
    pub fn horizon(&self) -> Option<Time> {
        let last_arrival = self
            .processes
            .iter()
            .map(|p| p.arrival_time)
            .max()
            .unwrap_or(0);
        let total_burst = self
            .processes
            .iter()
            .try_fold(0 as Time, |acc, p| acc.checked_add(p.burst_time))?;
        let switches = total_burst.checked_add(self.processes.len() as Time)?;
        let overhead = switches.checked_mul(self.context_switch_time)?;

        last_arrival.checked_add(total_burst)?.checked_add(overhead)
    }

    /// Validate for a specific algorithm
    pub fn validate_for(&self, algorithm: Algorithm) -> Result<()> {
        self.validate()?;
        if algorithm == Algorithm::RoundRobin && self.quantum == 0 {
            return Err(SimulationError::InvalidQuantum(self.quantum));
        }
        Ok(())
    }

    /// Fresh working copies of the workload, owned by one run
    pub fn working_set(&self) -> Vec<Process> {
        self.processes
            .iter()
            .enumerate()
            .map(|(seq, spec)| Process::from_spec(spec, seq))
            .collect()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_when_fields_missing() {
        let config = SimulationConfig::from_json_str(
            r#"{"processes":[{"id":1,"name":"P1","arrival_time":0,"burst_time":3,"priority":1}]}"#,
        )
        .unwrap();

        assert_eq!(config.cores, DEFAULT_CORES);
        assert_eq!(config.quantum, DEFAULT_QUANTUM);
        assert_eq!(config.context_switch_time, DEFAULT_CONTEXT_SWITCH_TIME);
        assert_eq!(config.step_budget, DEFAULT_STEP_BUDGET);
        assert!(config.record_execution_log);
    }

    #[test]
    fn test_zero_cores_rejected() {
        let config = SimulationConfig::sample().with_cores(0);
        assert_eq!(config.validate(), Err(SimulationError::InvalidCoreCount(0)));
    }

    #[test]
    fn test_zero_quantum_only_matters_for_round_robin() {
        let config = SimulationConfig::sample().with_quantum(0);
        assert!(config.validate_for(Algorithm::Fcfs).is_ok());
        assert_eq!(
            config.validate_for(Algorithm::RoundRobin),
            Err(SimulationError::InvalidQuantum(0))
        );
    }

    #[test]
    fn test_horizon_of_sample() {
        // 3 + (8 + 4 + 9 + 5) + (26 + 4) * 2
        let config = SimulationConfig::sample().with_context_switch_time(2);
        assert_eq!(config.horizon(), Some(89));
        assert_eq!(SimulationConfig::default().horizon(), Some(0));
    }

    #[test]
    fn test_arrival_near_time_limit_rejected() {
        let config = SimulationConfig::new(vec![ProcessSpec::new(1, Time::MAX - 2, 5, 1)])
            .with_execution_log(false);
        assert_eq!(config.horizon(), None);
        assert_eq!(config.validate(), Err(SimulationError::HorizonOverflow));
    }

    #[test]
    fn test_switch_cost_overflow_rejected() {
        let config = SimulationConfig::sample()
            .with_context_switch_time(Time::MAX / 4)
            .with_execution_log(false);
        assert_eq!(config.validate(), Err(SimulationError::HorizonOverflow));
    }

    #[test]
    fn test_long_horizon_needs_log_disabled() {
        let config = SimulationConfig::new(vec![ProcessSpec::new(1, Time::MAX - 100, 5, 1)])
            .with_cores(2);
        assert_eq!(
            config.validate(),
            Err(SimulationError::ExecutionLogTooLarge {
                horizon: Time::MAX - 95,
                cores: 2,
                limit: MAX_EXECUTION_LOG_TICKS,
            })
        );
        assert!(config.with_execution_log(false).validate().is_ok());
    }

    #[test]
    fn test_working_set_is_independent_copy() {
        let config = SimulationConfig::sample();
        let mut first = config.working_set();
        first[0].remaining_time = 0;

        let second = config.working_set();
        assert_eq!(second[0].remaining_time, 8);
        assert_eq!(second[3].seq, 3);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = SimulationConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }
}
