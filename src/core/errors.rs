/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{ProcessId, Time};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimulationError {
    #[error("Process {process} has a burst time of 0")]
    #[diagnostic(
        code(config::invalid_burst_time),
        help("Every process must demand at least one tick of CPU time.")
    )]
    InvalidBurstTime { process: ProcessId },

    #[error("Process id {0} appears more than once")]
    #[diagnostic(
        code(config::duplicate_process_id),
        help("Process ids identify Gantt entries and must be unique within a workload.")
    )]
    DuplicateProcessId(ProcessId),

    #[error("Invalid core count: {0}")]
    #[diagnostic(
        code(config::invalid_core_count),
        help("At least one core is required.")
    )]
    InvalidCoreCount(usize),

    #[error("Invalid Round Robin quantum: {0}")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("The time quantum must be at least one tick.")
    )]
    InvalidQuantum(Time),

    #[error("Workload does not fit in the time range: last arrival plus worst-case work overflows")]
    #[diagnostic(
        code(config::horizon_overflow),
        help("Lower the arrival times, burst times or context switch cost so the schedule ends before u64::MAX.")
    )]
    HorizonOverflow,

    #[error("Execution log would span {horizon} ticks on {cores} core(s), over the limit of {limit}")]
    #[diagnostic(
        code(config::execution_log_too_large),
        help("Set record_execution_log to false for long-horizon workloads.")
    )]
    ExecutionLogTooLarge {
        horizon: Time,
        cores: usize,
        limit: u64,
    },

    #[error("{algorithm} exhausted its step budget of {budget} at t={time}")]
    #[diagnostic(
        code(simulation::step_budget_exhausted),
        help("The run did not terminate within the budget. Raise step_budget or report the workload.")
    )]
    StepBudgetExhausted {
        algorithm: String,
        budget: u64,
        time: Time,
    },

    #[error("No simulation result for {0}")]
    #[diagnostic(
        code(advisory::missing_result),
        help("Run every algorithm of the suite before requesting a recommendation.")
    )]
    MissingResult(String),

    #[error("Invalid algorithm '{0}'")]
    #[diagnostic(
        code(scheduler::invalid_algorithm),
        help("Valid: fcfs, sjf, srtf, priority, priority_preemptive, priority_aging, round_robin.")
    )]
    InvalidAlgorithm(String),

    #[error("Invalid optimization criterion '{0}'")]
    #[diagnostic(
        code(advisory::invalid_criterion),
        help("Valid: waiting_time, turnaround_time, cpu_utilization, context_switches, balanced.")
    )]
    InvalidCriterion(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(config::load_failed),
        help("Check that the workload file exists and is valid JSON.")
    )]
    Config(String),
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimulationError>;
