/*!
 * Scheduler Types
 * Algorithm identifiers and their parsing
 */

use super::policy::Selector;
use crate::core::errors::SimulationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling algorithm under simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// First-come, first-served
    Fcfs,
    /// Shortest job first, non-preemptive
    Sjf,
    /// Shortest remaining time first (preemptive SJF)
    Srtf,
    /// Priority, non-preemptive
    Priority,
    /// Priority, preemptive
    PriorityPreemptive,
    /// Priority with aging, non-preemptive
    PriorityAging,
    /// Round robin with a fixed quantum
    RoundRobin,
}

impl Algorithm {
    /// Every algorithm, in presentation order
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
        Algorithm::RoundRobin,
        Algorithm::PriorityAging,
    ];

    /// Convert to string representation
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Srtf => "srtf",
            Self::Priority => "priority",
            Self::PriorityPreemptive => "priority_preemptive",
            Self::PriorityAging => "priority_aging",
            Self::RoundRobin => "round_robin",
        }
    }

    /// Human-readable name used in results and reports
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come, First-Served",
            Self::Sjf => "Shortest Job First (Non-Preemptive)",
            Self::Srtf => "Shortest Remaining Time First (SJF Preemptive)",
            Self::Priority => "Priority (Non-Preemptive)",
            Self::PriorityPreemptive => "Priority (Preemptive)",
            Self::PriorityAging => "Priority with Aging (Non-Preemptive)",
            Self::RoundRobin => "Round Robin",
        }
    }

    /// Whether a running process can lose its core before finishing
    pub const fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::Srtf | Self::PriorityPreemptive | Self::RoundRobin
        )
    }

    /// Ordering used to pick the next process; Round Robin uses its queue instead
    pub const fn selector(&self) -> Option<Selector> {
        match self {
            Self::Fcfs => Some(Selector::ArrivalOrder),
            Self::Sjf => Some(Selector::ShortestBurst),
            Self::Srtf => Some(Selector::ShortestRemaining),
            Self::Priority | Self::PriorityPreemptive | Self::PriorityAging => {
                Some(Selector::HighestPriority)
            }
            Self::RoundRobin => None,
        }
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fcfs" | "fifo" | "first_come_first_served" => Ok(Self::Fcfs),
            "sjf" | "shortest_job_first" => Ok(Self::Sjf),
            "srtf" | "sjf_preemptive" | "shortest_remaining_time_first" => Ok(Self::Srtf),
            "priority" | "prio" => Ok(Self::Priority),
            "priority_preemptive" | "prio_preemptive" => Ok(Self::PriorityPreemptive),
            "priority_aging" | "aging" => Ok(Self::PriorityAging),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
