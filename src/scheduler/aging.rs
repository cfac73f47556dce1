/*!
 * Priority Aging
 * Recompute working priorities from waiting time, reset after dispatch
 */

use crate::core::limits::{AGING_PRIORITY_FLOOR, AGING_THRESHOLD};
use crate::core::types::{Priority, Time};
use crate::process::Process;
use tracing::trace;

/// Effective priority after waiting `waited` ticks
///
/// Improves by one level per full `AGING_THRESHOLD`, never past
/// `AGING_PRIORITY_FLOOR`. A priority already better than the floor is kept.
pub fn effective_priority(original: Priority, waited: Time) -> Priority {
    let steps = Priority::try_from(waited / AGING_THRESHOLD).unwrap_or(Priority::MAX);
    let floor = original.min(AGING_PRIORITY_FLOOR);
    original.saturating_sub(steps).max(floor)
}

/// Recompute the working priority of every candidate at decision time `now`
pub fn age_candidates(processes: &mut [Process], candidates: &[usize], now: Time) {
    for &idx in candidates {
        let process = &mut processes[idx];
        let waited = now.saturating_sub(process.arrival_time);
        let aged = effective_priority(process.original_priority, waited);

        if aged != process.priority {
            trace!(
                pid = process.id,
                original = process.original_priority,
                from = process.priority,
                to = aged,
                waited,
                "aging adjusted priority"
            );
        }
        process.priority = aged;
    }
}

/// Restore the configured priority of a process that was just dispatched
pub fn reset_after_dispatch(process: &mut Process) {
    process.priority = process.original_priority;
}
