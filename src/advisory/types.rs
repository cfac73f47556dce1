/*!
 * Advisory Types
 * Per-algorithm summaries handed to a recommendation engine
 */

use crate::core::errors::{Result, SimulationError};
use crate::scheduler::Algorithm;
use crate::simulation::SimulationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a recommendation should optimize for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationCriterion {
    WaitingTime,
    TurnaroundTime,
    CpuUtilization,
    ContextSwitches,
    /// All of the above with equal weight
    #[default]
    Balanced,
}

impl OptimizationCriterion {
    pub const ALL: [OptimizationCriterion; 5] = [
        Self::WaitingTime,
        Self::TurnaroundTime,
        Self::CpuUtilization,
        Self::ContextSwitches,
        Self::Balanced,
    ];

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingTime => "waiting_time",
            Self::TurnaroundTime => "turnaround_time",
            Self::CpuUtilization => "cpu_utilization",
            Self::ContextSwitches => "context_switches",
            Self::Balanced => "balanced",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::WaitingTime => "waiting time",
            Self::TurnaroundTime => "turnaround time",
            Self::CpuUtilization => "cpu utilization",
            Self::ContextSwitches => "context switches",
            Self::Balanced => "a combination of all",
        }
    }

    /// Whether larger metric values are better
    pub const fn higher_is_better(&self) -> bool {
        matches!(self, Self::CpuUtilization)
    }
}

impl FromStr for OptimizationCriterion {
    type Err = SimulationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace(|c: char| c == '-' || c.is_whitespace(), "_");

        match normalized.as_str() {
            "waiting_time" | "waiting" => Ok(Self::WaitingTime),
            "turnaround_time" | "turnaround" => Ok(Self::TurnaroundTime),
            "cpu_utilization" | "utilization" => Ok(Self::CpuUtilization),
            "context_switches" | "switches" => Ok(Self::ContextSwitches),
            "balanced" | "all" | "a_combination_of_all" => Ok(Self::Balanced),
            _ => Err(SimulationError::InvalidCriterion(s.to_string())),
        }
    }
}

impl fmt::Display for OptimizationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Scalar metrics of one algorithm's run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub context_switches: u64,
    pub cpu_utilization: f64,
}

impl AlgorithmSummary {
    /// Value of the metric `criterion` names; `Balanced` has no single value
    pub fn metric(&self, criterion: OptimizationCriterion) -> Option<f64> {
        match criterion {
            OptimizationCriterion::WaitingTime => Some(self.avg_waiting_time),
            OptimizationCriterion::TurnaroundTime => Some(self.avg_turnaround_time),
            OptimizationCriterion::CpuUtilization => Some(self.cpu_utilization),
            OptimizationCriterion::ContextSwitches => Some(self.context_switches as f64),
            OptimizationCriterion::Balanced => None,
        }
    }
}

impl From<&SimulationResult> for AlgorithmSummary {
    fn from(result: &SimulationResult) -> Self {
        Self {
            algorithm: result.algorithm,
            avg_waiting_time: result.avg_waiting_time,
            avg_turnaround_time: result.avg_turnaround_time,
            context_switches: result.context_switches,
            cpu_utilization: result.cpu_utilization,
        }
    }
}

/// Everything a recommendation engine sees: one summary per algorithm of
/// the suite plus the chosen criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdvisoryInput {
    /// In [`Algorithm::ALL`] order
    pub summaries: Vec<AlgorithmSummary>,
    pub criterion: OptimizationCriterion,
}

impl AdvisoryInput {
    /// Collect summaries for the whole suite
    ///
    /// Fails with `MissingResult` naming the first algorithm of
    /// [`Algorithm::ALL`] that has no result. Extra or duplicate results are
    /// ignored beyond the first per algorithm.
    pub fn from_results(
        results: &[SimulationResult],
        criterion: OptimizationCriterion,
    ) -> Result<Self> {
        let summaries = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                results
                    .iter()
                    .find(|r| r.algorithm == algorithm)
                    .map(AlgorithmSummary::from)
                    .ok_or_else(|| {
                        SimulationError::MissingResult(algorithm.display_name().to_string())
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            summaries,
            criterion,
        })
    }

    pub fn summary(&self, algorithm: Algorithm) -> Option<&AlgorithmSummary> {
        self.summaries.iter().find(|s| s.algorithm == algorithm)
    }
}

/// Suggested algorithm with supporting text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Recommendation {
    pub suggested_algorithm: Algorithm,
    pub reasoning: String,
    pub trade_offs: String,
    pub starvation_mitigation: String,
}

/// Recommendation engine
pub trait Advisor: Send + Sync {
    /// Suggest an algorithm for `input.criterion`
    fn recommend(&self, input: &AdvisoryInput) -> Result<Recommendation>;
}
