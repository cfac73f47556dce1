/*!
 * Core State
 * Per-core simulation cursor and occupancy
 */

use crate::core::types::{CoreId, ProcessId, Time};
use crate::process::Process;

/// Simulation state of one core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreState {
    pub id: CoreId,
    /// Local time cursor; for Round Robin, the time the core becomes free
    pub time: Time,
    /// Last process that occupied this core, used to detect switches
    pub last_process: Option<ProcessId>,
    /// Index of the process currently assigned (preemptive drivers)
    pub current: Option<usize>,
    /// Committed context-switch ticks still to elapse (tick driver)
    pub switch_remaining: Time,
}

impl CoreState {
    pub fn new(id: CoreId) -> Self {
        Self {
            id,
            time: 0,
            last_process: None,
            current: None,
            switch_remaining: 0,
        }
    }

    /// Create `count` cores with ids `0..count`
    pub fn bank(count: usize) -> Vec<Self> {
        (0..count).map(Self::new).collect()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Whether dispatching `pid` here changes the occupant
    ///
    /// The first process a core ever runs is not a switch.
    #[inline]
    pub fn switches_to(&self, pid: ProcessId) -> bool {
        matches!(self.last_process, Some(last) if last != pid)
    }

    /// Record `process` as the occupant
    pub fn occupy(&mut self, idx: usize, process: &Process) {
        self.current = Some(idx);
        self.last_process = Some(process.id);
    }

    /// Free the core; `last_process` is kept for switch detection
    pub fn release(&mut self) -> Option<usize> {
        self.switch_remaining = 0;
        self.current.take()
    }
}

/// Core with the smallest cursor, lowest id on ties
pub(crate) fn earliest(cores: &[CoreState]) -> Option<usize> {
    cores
        .iter()
        .enumerate()
        .min_by_key(|(_, core)| (core.time, core.id))
        .map(|(idx, _)| idx)
}
