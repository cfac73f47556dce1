/*!
 * Non-Preemptive Driver
 * Block dispatch for FCFS, SJF, Priority and Priority with Aging
 */

use super::core_state::earliest;
use super::RunState;
use crate::scheduler::aging;
use crate::scheduler::Selector;
use tracing::{debug, trace};

/// Run to completion, always advancing the core with the smallest cursor
///
/// The chosen process runs its whole remaining burst as one block, so it is
/// finalized at dispatch time and drops out of every later decision.
pub(super) fn run(mut state: RunState, selector: Selector, with_aging: bool) -> RunState {
    while !state.all_completed() {
        let Some(core) = earliest(&state.cores) else {
            break;
        };
        let now = state.cores[core].time;
        let available = state.available(now);

        if available.is_empty() {
            match state.next_arrival_after(now) {
                Some(next) => {
                    trace!(core, from = now, to = next, "Core idle until next arrival");
                    state.timeline.idle(core, now, next);
                    state.cores[core].time = next;
                }
                None => state.cores[core].time = now + 1,
            }
            continue;
        }

        if with_aging {
            aging::age_candidates(&mut state.processes, &available, now);
        }

        let Some(idx) = selector.pick(&state.processes, available.iter().copied()) else {
            continue;
        };

        if with_aging {
            aging::reset_after_dispatch(&mut state.processes[idx]);
        }

        let start = state.dispatch(core, idx, now);
        let burst = state.processes[idx].remaining_time;
        let end = start + burst;

        state.timeline.run(core, &state.processes[idx], start, end);
        let process = &mut state.processes[idx];
        process.consume(burst);
        process.complete(end);

        debug!(
            core,
            pid = process.id,
            start,
            end,
            candidates = available.len(),
            "Dispatched block"
        );

        let core_state = &mut state.cores[core];
        core_state.release();
        core_state.time = end;
    }

    state
}
