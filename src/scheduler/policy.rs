/*!
 * Policy Selectors
 * Pure orderings that pick the next process and decide preemption
 */

use crate::process::Process;
use std::cmp::Ordering;

/// Ordering of ready processes for one family of policies
///
/// Every ordering is total: ties on the policy's own key fall back to
/// earliest arrival, then to input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Earliest arrival (FCFS)
    ArrivalOrder,
    /// Smallest total burst (SJF)
    ShortestBurst,
    /// Smallest remaining demand (SRTF)
    ShortestRemaining,
    /// Smallest working priority value (Priority variants)
    HighestPriority,
}

impl Selector {
    /// Compare on the policy key only
    #[inline]
    fn compare_key(&self, a: &Process, b: &Process) -> Ordering {
        match self {
            Self::ArrivalOrder => a.arrival_time.cmp(&b.arrival_time),
            Self::ShortestBurst => a.burst_time.cmp(&b.burst_time),
            Self::ShortestRemaining => a.remaining_time.cmp(&b.remaining_time),
            Self::HighestPriority => a.priority.cmp(&b.priority),
        }
    }

    /// Total order; `Less` means `a` runs first
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        self.compare_key(a, b)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
            .then_with(|| a.seq.cmp(&b.seq))
    }

    /// Pick the best process among `candidates` (indices into `processes`)
    pub fn pick<I>(&self, processes: &[Process], candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.compare(&processes[a], &processes[b]))
    }

    /// Whether `challenger` should displace a running `incumbent`
    ///
    /// Only a strictly better key preempts; equal merit keeps the incumbent.
    #[inline]
    pub fn preempts(&self, challenger: &Process, incumbent: &Process) -> bool {
        self.compare_key(challenger, incumbent) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessSpec;

    fn workload(specs: &[(u32, u64, u64, i64)]) -> Vec<Process> {
        specs
            .iter()
            .enumerate()
            .map(|(seq, &(id, arrival, burst, priority))| {
                Process::from_spec(&ProcessSpec::new(id, arrival, burst, priority), seq)
            })
            .collect()
    }

    #[test]
    fn test_fcfs_earliest_arrival_then_input_order() {
        let processes = workload(&[(3, 2, 1, 1), (1, 0, 9, 1), (2, 0, 1, 1)]);
        assert_eq!(Selector::ArrivalOrder.pick(&processes, 0..3), Some(1));
    }

    #[test]
    fn test_sjf_ties_broken_by_arrival() {
        let processes = workload(&[(1, 3, 4, 1), (2, 1, 4, 1), (3, 0, 6, 1)]);
        assert_eq!(Selector::ShortestBurst.pick(&processes, 0..3), Some(1));
    }

    #[test]
    fn test_priority_lower_value_wins() {
        let processes = workload(&[(1, 0, 4, 3), (2, 1, 4, 1), (3, 0, 4, 2)]);
        assert_eq!(Selector::HighestPriority.pick(&processes, 0..3), Some(1));
    }

    #[test]
    fn test_pick_from_empty_candidates() {
        let processes = workload(&[(1, 0, 4, 3)]);
        assert_eq!(Selector::ShortestBurst.pick(&processes, std::iter::empty()), None);
    }

    #[test]
    fn test_equal_remaining_does_not_preempt() {
        let mut processes = workload(&[(1, 0, 8, 1), (2, 1, 4, 1)]);
        processes[0].remaining_time = 4;
        assert!(!Selector::ShortestRemaining.preempts(&processes[1], &processes[0]));

        processes[0].remaining_time = 5;
        assert!(Selector::ShortestRemaining.preempts(&processes[1], &processes[0]));
    }

    #[test]
    fn test_equal_priority_does_not_preempt() {
        let processes = workload(&[(1, 0, 8, 2), (2, 0, 1, 2)]);
        assert!(!Selector::HighestPriority.preempts(&processes[1], &processes[0]));
    }
}
