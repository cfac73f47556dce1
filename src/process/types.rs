/*!
 * Process Types
 * Input records and per-run working copies
 */

use crate::core::types::{Priority, ProcessId, Time};
use serde::{Deserialize, Serialize};

/// Process as described by the workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub name: String,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Priority,
    #[serde(default)]
    pub color: String,
}

impl ProcessSpec {
    /// Create a process named `P{id}` with no colour
    pub fn new(id: ProcessId, arrival_time: Time, burst_time: Time, priority: Priority) -> Self {
        Self {
            id,
            name: format!("P{}", id),
            arrival_time,
            burst_time,
            priority,
            color: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Working copy of a process, owned by a single run
///
/// Drivers are the only writers of the derived fields. `priority` is the
/// working priority; aging may lower it while the process waits, and
/// `original_priority` keeps the configured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: Priority,
    pub original_priority: Priority,
    pub color: String,
    pub remaining_time: Time,
    pub completion_time: Option<Time>,
    pub turnaround_time: Option<Time>,
    pub waiting_time: Option<Time>,
    /// Position in the input list, last tie-break of every policy
    #[serde(skip)]
    pub(crate) seq: usize,
}

impl Process {
    pub(crate) fn from_spec(spec: &ProcessSpec, seq: usize) -> Self {
        Self {
            id: spec.id,
            name: spec.name.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            original_priority: spec.priority,
            color: spec.color.clone(),
            remaining_time: spec.burst_time,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            seq,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    #[inline]
    pub fn has_arrived(&self, now: Time) -> bool {
        self.arrival_time <= now
    }

    /// Ticks already executed
    #[inline]
    pub fn executed(&self) -> Time {
        self.burst_time - self.remaining_time
    }

    /// Consume `ticks` of remaining demand
    pub(crate) fn consume(&mut self, ticks: Time) {
        debug_assert!(
            ticks <= self.remaining_time,
            "Process {} would overrun its burst ({} > {})",
            self.id,
            ticks,
            self.remaining_time
        );
        self.remaining_time = self.remaining_time.saturating_sub(ticks);
    }

    /// Finalize timing fields; waiting includes context switch overhead
    pub(crate) fn complete(&mut self, at: Time) {
        debug_assert!(!self.is_completed(), "Process {} completed twice", self.id);
        debug_assert!(
            at >= self.arrival_time + self.burst_time,
            "Process {} completes at {} before it could have run",
            self.id,
            at
        );

        let turnaround = at - self.arrival_time;
        self.remaining_time = 0;
        self.completion_time = Some(at);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }
}

impl From<&ProcessSpec> for Process {
    fn from(spec: &ProcessSpec) -> Self {
        Self::from_spec(spec, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_copy_starts_fresh() {
        let spec = ProcessSpec::new(1, 2, 5, 3).with_color("#fff");
        let process = Process::from(&spec);

        assert_eq!(process.name, "P1");
        assert_eq!(process.remaining_time, 5);
        assert_eq!(process.original_priority, 3);
        assert!(process.completion_time.is_none());
        assert!(process.waiting_time.is_none());
    }

    #[test]
    fn test_complete_derives_times() {
        let mut process = Process::from(&ProcessSpec::new(1, 2, 5, 3));
        process.consume(5);
        process.complete(10);

        assert_eq!(process.turnaround_time, Some(8));
        assert_eq!(process.waiting_time, Some(3));
        assert_eq!(process.remaining_time, 0);
    }

    #[test]
    fn test_spec_color_defaults_when_absent() {
        let spec: ProcessSpec = serde_json::from_str(
            r#"{"id":7,"name":"db","arrival_time":0,"burst_time":3,"priority":2}"#,
        )
        .unwrap();
        assert_eq!(spec.color, "");
        assert_eq!(spec.name, "db");
    }

    #[test]
    fn test_negative_arrival_is_rejected_at_parse() {
        let parsed: Result<ProcessSpec, _> = serde_json::from_str(
            r#"{"id":1,"name":"P1","arrival_time":-1,"burst_time":3,"priority":2}"#,
        );
        assert!(parsed.is_err());
    }
}
