/*!
 * Timeline Recorder
 * Gantt intervals and the per-tick execution log
 */

use crate::core::limits::{CONTEXT_SWITCH_COLOR, CONTEXT_SWITCH_LABEL, IDLE_COLOR, IDLE_LABEL};
use crate::core::types::{CoreId, ProcessId, Time};
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a core did during a Gantt interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "process", rename_all = "snake_case")]
pub enum Slot {
    Execution(ProcessId),
    Idle,
    ContextSwitch,
}

/// One Gantt chart interval `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GanttEntry {
    pub slot: Slot,
    pub core: CoreId,
    pub label: String,
    pub color: String,
    pub start: Time,
    pub end: Time,
}

impl GanttEntry {
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    #[inline]
    pub fn is_execution(&self) -> bool {
        matches!(self.slot, Slot::Execution(_))
    }
}

/// What a core did during one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    Idle,
    ContextSwitch {
        to: ProcessId,
        name: String,
    },
    Running {
        process: ProcessId,
        name: String,
        cycle: Time,
        of: Time,
    },
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::ContextSwitch { name, .. } => write!(f, "Context switch to {}", name),
            Self::Running {
                name, cycle, of, ..
            } => write!(f, "Running {} (cycle {} of {})", name, cycle, of),
        }
    }
}

/// One execution log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutionLogEntry {
    pub time: Time,
    pub core: CoreId,
    pub activity: Activity,
}

impl ExecutionLogEntry {
    pub fn message(&self) -> String {
        self.activity.to_string()
    }
}

/// Append-only recorder for one run
///
/// Contiguous execution or idle intervals for the same (core, slot) are
/// merged. Context switch intervals are never merged with each other.
#[derive(Debug)]
pub struct Timeline {
    entries: Vec<GanttEntry>,
    log: Vec<ExecutionLogEntry>,
    // Index of the most recent entry per core
    tail: Vec<Option<usize>>,
    record_log: bool,
}

impl Timeline {
    pub fn new(cores: usize, record_log: bool) -> Self {
        Self {
            entries: Vec::new(),
            log: Vec::new(),
            tail: vec![None; cores],
            record_log,
        }
    }

    /// Record `process` executing on `core` during `[start, end)`
    ///
    /// Call before consuming the interval from the process's remaining time
    /// so the logged cycle numbers line up.
    pub fn run(&mut self, core: CoreId, process: &Process, start: Time, end: Time) {
        if !self.append(
            GanttEntry {
                slot: Slot::Execution(process.id),
                core,
                label: process.name.clone(),
                color: process.color.clone(),
                start,
                end,
            },
            true,
        ) {
            return;
        }

        if self.record_log {
            let executed = process.executed();
            for (offset, time) in (start..end).enumerate() {
                self.log.push(ExecutionLogEntry {
                    time,
                    core,
                    activity: Activity::Running {
                        process: process.id,
                        name: process.name.clone(),
                        cycle: executed + offset as Time + 1,
                        of: process.burst_time,
                    },
                });
            }
        }
    }

    /// Record `core` idle during `[start, end)`
    pub fn idle(&mut self, core: CoreId, start: Time, end: Time) {
        if !self.append(
            GanttEntry {
                slot: Slot::Idle,
                core,
                label: IDLE_LABEL.to_string(),
                color: IDLE_COLOR.to_string(),
                start,
                end,
            },
            true,
        ) {
            return;
        }

        if self.record_log {
            self.log.extend((start..end).map(|time| ExecutionLogEntry {
                time,
                core,
                activity: Activity::Idle,
            }));
        }
    }

    /// Record a context switch into `to` on `core` during `[start, end)`
    pub fn context_switch(&mut self, core: CoreId, to: &Process, start: Time, end: Time) {
        if !self.append(
            GanttEntry {
                slot: Slot::ContextSwitch,
                core,
                label: CONTEXT_SWITCH_LABEL.to_string(),
                color: CONTEXT_SWITCH_COLOR.to_string(),
                start,
                end,
            },
            false,
        ) {
            return;
        }

        if self.record_log {
            self.log.extend((start..end).map(|time| ExecutionLogEntry {
                time,
                core,
                activity: Activity::ContextSwitch {
                    to: to.id,
                    name: to.name.clone(),
                },
            }));
        }
    }

    // Returns false when the interval is empty and nothing was recorded
    fn append(&mut self, entry: GanttEntry, coalesce: bool) -> bool {
        if entry.end <= entry.start {
            return false;
        }

        let core = entry.core;
        if coalesce {
            if let Some(last) = self.tail[core].and_then(|idx| self.entries.get_mut(idx)) {
                if last.slot == entry.slot && last.end == entry.start {
                    last.end = entry.end;
                    return true;
                }
            }
        }

        self.entries.push(entry);
        self.tail[core] = Some(self.entries.len() - 1);
        true
    }

    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    /// Total execution time across all cores
    pub fn busy_time(&self) -> Time {
        self.entries
            .iter()
            .filter(|e| e.is_execution())
            .map(GanttEntry::duration)
            .sum()
    }

    /// Consume the recorder, returning entries ordered by (start, core)
    pub fn finish(self) -> (Vec<GanttEntry>, Vec<ExecutionLogEntry>) {
        let Self {
            mut entries,
            mut log,
            ..
        } = self;
        entries.sort_by_key(|e| (e.start, e.core));
        log.sort_by_key(|e| (e.time, e.core));
        (entries, log)
    }
}
