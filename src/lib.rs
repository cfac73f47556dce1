/*!
 * CPU Scheduling Simulator Library
 * Deterministic single- and multi-core scheduling simulation with comparison
 */

pub mod advisory;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use advisory::{
    rank, Advisor, AdvisoryInput, AlgorithmSummary, OptimizationCriterion, RankedAlgorithm,
    RankingAdvisor, Recommendation,
};
pub use config::SimulationConfig;
pub use crate::core::errors::{Result, SimulationError};
pub use crate::core::types::{CoreId, Priority, ProcessId, Time};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessSpec};
pub use scheduler::Algorithm;
pub use simulation::{
    run_all, run_all_parallel, run_many, run_many_parallel, simulate, ExecutionLogEntry,
    GanttEntry, SimulationResult, Slot,
};
