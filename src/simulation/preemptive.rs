/*!
 * Preemptive Driver
 * Tick-stepped dispatch for SRTF and preemptive Priority
 */

use super::RunState;
use crate::core::errors::{Result, SimulationError};
use crate::core::types::Time;
use crate::scheduler::Selector;
use tracing::{debug, error, trace};

/// Advance every core one tick per iteration until all processes finish
///
/// Each tick: fill idle cores, then let each busy core check for a strictly
/// better waiting process, then execute one tick everywhere. Decisions are
/// greedy per core in id order. Every iteration consumes one unit of
/// `budget`. Idle time is recorded when the core is next assigned, so a
/// core's trailing idle after its last work never reaches the chart.
pub(super) fn run(mut state: RunState, selector: Selector, budget: u64) -> Result<RunState> {
    let mut now: Time = 0;
    let mut steps: u64 = 0;
    let mut on_core = vec![false; state.processes.len()];
    let mut idle_since: Vec<Option<Time>> = vec![None; state.cores.len()];

    while !state.all_completed() {
        steps += 1;
        if steps > budget {
            error!(budget, time = now, "Step budget exhausted");
            return Err(SimulationError::StepBudgetExhausted {
                algorithm: state.algorithm.display_name().to_string(),
                budget,
                time: now,
            });
        }

        let available = state.available(now);

        // Nothing running and nothing ready: jump to the next arrival
        if available.is_empty() && state.cores.iter().all(|c| c.is_idle()) {
            let Some(next) = state.next_arrival_after(now) else {
                break;
            };
            for since in idle_since.iter_mut() {
                since.get_or_insert(now);
            }
            trace!(from = now, to = next, "All cores idle");
            now = next;
            continue;
        }

        fill_idle_cores(&mut state, selector, &available, &mut on_core, &mut idle_since, now);
        preempt_busy_cores(&mut state, selector, &available, &mut on_core, now);
        execute_tick(&mut state, &mut on_core, &mut idle_since, now);

        now += 1;
    }

    debug!(steps, end = now, "Preemptive run finished");
    Ok(state)
}

fn waiting<'a>(available: &'a [usize], on_core: &'a [bool]) -> impl Iterator<Item = usize> + 'a {
    available.iter().copied().filter(move |&idx| !on_core[idx])
}

fn assign(state: &mut RunState, core: usize, idx: usize, on_core: &mut [bool], now: Time) {
    let start = state.dispatch(core, idx, now);
    state.cores[core].switch_remaining = start - now;
    on_core[idx] = true;
}

fn fill_idle_cores(
    state: &mut RunState,
    selector: Selector,
    available: &[usize],
    on_core: &mut [bool],
    idle_since: &mut [Option<Time>],
    now: Time,
) {
    for core in 0..state.cores.len() {
        if !state.cores[core].is_idle() {
            continue;
        }
        if let Some(idx) = selector.pick(&state.processes, waiting(available, on_core)) {
            if let Some(since) = idle_since[core].take() {
                state.timeline.idle(core, since, now);
            }
            trace!(core, pid = state.processes[idx].id, at = now, "Assigned to idle core");
            assign(state, core, idx, on_core, now);
        }
    }
}

fn preempt_busy_cores(
    state: &mut RunState,
    selector: Selector,
    available: &[usize],
    on_core: &mut [bool],
    now: Time,
) {
    for core in 0..state.cores.len() {
        let Some(incumbent) = state.cores[core].current else {
            continue;
        };
        // A committed switch runs to the end
        if state.cores[core].switch_remaining > 0 {
            continue;
        }

        let Some(challenger) = selector.pick(&state.processes, waiting(available, on_core)) else {
            continue;
        };
        if !selector.preempts(&state.processes[challenger], &state.processes[incumbent]) {
            continue;
        }

        debug!(
            core,
            preempted = state.processes[incumbent].id,
            by = state.processes[challenger].id,
            at = now,
            "Preemption"
        );
        state.cores[core].release();
        on_core[incumbent] = false;
        assign(state, core, challenger, on_core, now);
    }
}

fn execute_tick(
    state: &mut RunState,
    on_core: &mut [bool],
    idle_since: &mut [Option<Time>],
    now: Time,
) {
    for core in 0..state.cores.len() {
        let Some(idx) = state.cores[core].current else {
            idle_since[core].get_or_insert(now);
            continue;
        };

        if state.cores[core].switch_remaining > 0 {
            state.cores[core].switch_remaining -= 1;
            continue;
        }

        state.timeline.run(core, &state.processes[idx], now, now + 1);
        let process = &mut state.processes[idx];
        process.consume(1);

        if process.remaining_time == 0 {
            process.complete(now + 1);
            debug!(core, pid = process.id, at = now + 1, "Process completed");
            state.cores[core].release();
            on_core[idx] = false;
        }
    }
}
