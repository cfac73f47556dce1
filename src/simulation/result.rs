/*!
 * Simulation Result
 * Immutable output of one (algorithm, configuration) run
 */

use super::metrics::{self, Metrics};
use super::timeline::{ExecutionLogEntry, GanttEntry, Slot, Timeline};
use crate::core::types::{ProcessId, Time};
use crate::process::Process;
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};

/// Output of one run; owns deep copies of everything it reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationResult {
    pub algorithm: Algorithm,
    pub algorithm_name: String,
    pub processes: Vec<Process>,
    pub gantt_chart: Vec<GanttEntry>,
    pub execution_log: Vec<ExecutionLogEntry>,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub context_switches: u64,
    pub cpu_utilization: f64,
    pub makespan: Time,
    pub cores: usize,
}

impl SimulationResult {
    pub(crate) fn assemble(
        algorithm: Algorithm,
        processes: Vec<Process>,
        timeline: Timeline,
        context_switches: u64,
        cores: usize,
    ) -> Self {
        let (gantt_chart, execution_log) = timeline.finish();
        let Metrics {
            avg_waiting_time,
            avg_turnaround_time,
            cpu_utilization,
            makespan,
            ..
        } = metrics::aggregate(&processes, &gantt_chart, cores);

        Self {
            algorithm,
            algorithm_name: algorithm.display_name().to_string(),
            processes,
            gantt_chart,
            execution_log,
            avg_waiting_time,
            avg_turnaround_time,
            context_switches,
            cpu_utilization,
            makespan,
            cores,
        }
    }

    /// Well-formed result for a workload with no processes
    pub fn empty(algorithm: Algorithm, cores: usize) -> Self {
        Self::assemble(algorithm, Vec::new(), Timeline::new(cores, false), 0, cores)
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Total execution time across all cores
    pub fn busy_time(&self) -> Time {
        self.gantt_chart
            .iter()
            .filter(|e| e.is_execution())
            .map(GanttEntry::duration)
            .sum()
    }

    /// Process ids of execution intervals in chart order
    pub fn execution_sequence(&self) -> Vec<ProcessId> {
        self.gantt_chart
            .iter()
            .filter_map(|e| match e.slot {
                Slot::Execution(pid) => Some(pid),
                _ => None,
            })
            .collect()
    }

    /// Context switch intervals in chart order
    pub fn context_switch_entries(&self) -> impl Iterator<Item = &GanttEntry> {
        self.gantt_chart
            .iter()
            .filter(|e| e.slot == Slot::ContextSwitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_well_formed() {
        let result = SimulationResult::empty(Algorithm::RoundRobin, 2);

        assert_eq!(result.algorithm_name, "Round Robin");
        assert!(result.processes.is_empty());
        assert!(result.gantt_chart.is_empty());
        assert!(result.execution_log.is_empty());
        assert_eq!(result.avg_waiting_time, 0.0);
        assert_eq!(result.avg_turnaround_time, 0.0);
        assert_eq!(result.cpu_utilization, 0.0);
        assert_eq!(result.context_switches, 0);
        assert_eq!(result.cores, 2);
    }

    #[test]
    fn test_result_serializes_to_snake_case() {
        let json = serde_json::to_string(&SimulationResult::empty(Algorithm::Fcfs, 1)).unwrap();
        assert!(json.contains("\"avg_waiting_time\""));
        assert!(json.contains("\"algorithm\":\"fcfs\""));
    }
}
