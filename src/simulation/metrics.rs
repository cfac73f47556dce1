/*!
 * Metrics Aggregator
 * Averages and CPU utilization from finished processes and the Gantt chart
 */

use super::timeline::GanttEntry;
use crate::core::types::Time;
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// Summary metrics of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    /// Busy share of `makespan * cores`, in percent
    pub cpu_utilization: f64,
    /// Latest completion time
    pub makespan: Time,
    /// Sum of execution interval durations across cores
    pub busy_time: Time,
}

impl Metrics {
    pub const EMPTY: Metrics = Metrics {
        avg_waiting_time: 0.0,
        avg_turnaround_time: 0.0,
        cpu_utilization: 0.0,
        makespan: 0,
        busy_time: 0,
    };
}

/// Compute metrics; an empty workload yields all zeros
pub fn aggregate(processes: &[Process], gantt: &[GanttEntry], cores: usize) -> Metrics {
    if processes.is_empty() {
        return Metrics::EMPTY;
    }

    let count = processes.len() as f64;
    // Per-process times fit in Time; their sums may not
    let total_waiting: u128 = processes
        .iter()
        .filter_map(|p| p.waiting_time)
        .map(u128::from)
        .sum();
    let total_turnaround: u128 = processes
        .iter()
        .filter_map(|p| p.turnaround_time)
        .map(u128::from)
        .sum();
    let makespan = processes
        .iter()
        .filter_map(|p| p.completion_time)
        .max()
        .unwrap_or(0);
    let busy_time: Time = gantt
        .iter()
        .filter(|e| e.is_execution())
        .map(GanttEntry::duration)
        .sum();

    let capacity = makespan as f64 * cores as f64;
    let cpu_utilization = if capacity > 0.0 {
        (busy_time as f64 / capacity * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    Metrics {
        avg_waiting_time: total_waiting as f64 / count,
        avg_turnaround_time: total_turnaround as f64 / count,
        cpu_utilization,
        makespan,
        busy_time,
    }
}
