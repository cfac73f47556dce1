/*!
 * Round Robin Driver
 * Event-stepped time slicing over a shared FIFO ready queue
 */

use super::RunState;
use crate::core::types::Time;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Run to completion with time slices of at most `quantum`
///
/// Time jumps between events (an arrival or a core freeing up). At each
/// event, arrivals are enqueued before processes whose slice just ended, and
/// idle cores take from the queue front in core id order.
pub(super) fn run(mut state: RunState, quantum: Time) -> RunState {
    let mut arrivals: Vec<usize> = (0..state.processes.len()).collect();
    arrivals.sort_by_key(|&idx| (state.processes[idx].arrival_time, state.processes[idx].id));

    let mut cursor = 0;
    let mut ready: VecDeque<usize> = VecDeque::with_capacity(arrivals.len());
    let mut now: Time = 0;

    loop {
        while cursor < arrivals.len() && state.processes[arrivals[cursor]].arrival_time <= now {
            trace!(pid = state.processes[arrivals[cursor]].id, at = now, "Arrived");
            ready.push_back(arrivals[cursor]);
            cursor += 1;
        }

        for core in 0..state.cores.len() {
            if state.cores[core].time > now {
                continue;
            }
            if let Some(idx) = state.cores[core].release() {
                if !state.processes[idx].is_completed() {
                    ready.push_back(idx);
                }
            }
        }

        for core in 0..state.cores.len() {
            if !state.cores[core].is_idle() {
                continue;
            }
            let Some(idx) = ready.pop_front() else {
                break;
            };

            let free_since = state.cores[core].time;
            state.timeline.idle(core, free_since, now);

            let start = state.dispatch(core, idx, now);
            let slice = state.processes[idx].remaining_time.min(quantum);
            let end = start + slice;

            state.timeline.run(core, &state.processes[idx], start, end);
            let process = &mut state.processes[idx];
            process.consume(slice);
            if process.remaining_time == 0 {
                process.complete(end);
            }
            debug!(
                core,
                pid = process.id,
                start,
                end,
                remaining = process.remaining_time,
                "Slice dispatched"
            );

            state.cores[core].time = end;
        }

        let next_free = state
            .cores
            .iter()
            .filter(|c| !c.is_idle())
            .map(|c| c.time)
            .min();
        let next_arrival = arrivals
            .get(cursor)
            .map(|&idx| state.processes[idx].arrival_time);

        now = match (next_free, next_arrival) {
            (Some(a), Some(b)) => a.min(b),
            (Some(t), None) | (None, Some(t)) => t,
            (None, None) => break,
        };
    }

    state
}
