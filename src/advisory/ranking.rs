/*!
 * Ranking Advisor
 * Deterministic ordering of algorithm summaries by an optimization criterion
 */

use super::types::{Advisor, AdvisoryInput, AlgorithmSummary, OptimizationCriterion, Recommendation};
use crate::core::errors::{Result, SimulationError};
use crate::core::limits::AGING_THRESHOLD;
use crate::scheduler::Algorithm;
use serde::{Deserialize, Serialize};
use tracing::debug;

const METRICS: [OptimizationCriterion; 4] = [
    OptimizationCriterion::WaitingTime,
    OptimizationCriterion::TurnaroundTime,
    OptimizationCriterion::CpuUtilization,
    OptimizationCriterion::ContextSwitches,
];

/// One row of a ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RankedAlgorithm {
    /// 1-based; equal scores share a place
    pub place: usize,
    pub algorithm: Algorithm,
    /// Metric value, or the sum of per-metric places for `Balanced`
    pub score: f64,
}

/// Order `summaries` best-first for `criterion`
///
/// Lower is better for waiting time, turnaround time and context switches,
/// higher for CPU utilization. `Balanced` scores each algorithm by the sum
/// of its places on the four metrics. Ties keep input order.
pub fn rank(summaries: &[AlgorithmSummary], criterion: OptimizationCriterion) -> Vec<RankedAlgorithm> {
    let (scores, higher_is_better) = match criterion {
        OptimizationCriterion::Balanced => {
            let mut totals = vec![0.0; summaries.len()];
            for metric in METRICS {
                let values: Vec<f64> = summaries.iter().filter_map(|s| s.metric(metric)).collect();
                for (total, place) in totals.iter_mut().zip(places(&values, metric.higher_is_better())) {
                    *total += place as f64;
                }
            }
            (totals, false)
        }
        single => (
            summaries.iter().filter_map(|s| s.metric(single)).collect(),
            single.higher_is_better(),
        ),
    };

    let mut order: Vec<usize> = (0..summaries.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = scores[a].total_cmp(&scores[b]);
        if higher_is_better {
            ord.reverse()
        } else {
            ord
        }
    });

    let place_of = places(&scores, higher_is_better);
    order
        .into_iter()
        .map(|idx| RankedAlgorithm {
            place: place_of[idx],
            algorithm: summaries[idx].algorithm,
            score: scores[idx],
        })
        .collect()
}

// Competition places: 1 + number of strictly better values
fn places(values: &[f64], higher_is_better: bool) -> Vec<usize> {
    values
        .iter()
        .map(|&v| {
            1 + values
                .iter()
                .filter(|&&other| if higher_is_better { other > v } else { other < v })
                .count()
        })
        .collect()
}

/// Whether a process can be passed over indefinitely under `algorithm`
pub const fn can_starve(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::Sjf | Algorithm::Srtf | Algorithm::Priority | Algorithm::PriorityPreemptive
    )
}

fn trade_offs(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Fcfs => {
            "Simple and starvation-free, but short processes queued behind a long one \
             wait for its whole burst (convoy effect)."
        }
        Algorithm::Sjf => {
            "Minimizes average waiting time when burst lengths are known in advance, \
             but long processes can be postponed indefinitely."
        }
        Algorithm::Srtf => {
            "Gives the lowest average waiting time, at the cost of more preemptions \
             and context switches; long processes can starve."
        }
        Algorithm::Priority => {
            "Honours process importance, but low-priority processes wait as long as \
             higher-priority work keeps arriving."
        }
        Algorithm::PriorityPreemptive => {
            "Responds immediately to urgent processes, but adds context switches and \
             can starve low-priority work."
        }
        Algorithm::PriorityAging => {
            "Keeps priority ordering while bounding starvation; long waits gradually \
             blur strict importance."
        }
        Algorithm::RoundRobin => {
            "Fair and responsive for interactive work, but frequent context switches \
             add overhead and turnaround depends on the quantum."
        }
    }
}

fn starvation_mitigation(algorithm: Algorithm) -> String {
    if !can_starve(algorithm) {
        return match algorithm {
            Algorithm::PriorityAging => format!(
                "Aging already improves a waiting process's priority by one level every {} ticks.",
                AGING_THRESHOLD
            ),
            _ => "Starvation is not possible; every process is served in queue order.".to_string(),
        };
    }

    match algorithm {
        Algorithm::Priority | Algorithm::PriorityPreemptive => "Low-priority processes can \
             starve. Priority with Aging addresses this directly by improving a waiting \
             process's priority over time."
            .to_string(),
        _ => "Long processes can starve. Age waiting processes or cap how often a process \
             may be passed over."
            .to_string(),
    }
}

fn format_score(criterion: OptimizationCriterion, score: f64) -> String {
    match criterion {
        OptimizationCriterion::CpuUtilization => format!("{:.2}%", score),
        OptimizationCriterion::ContextSwitches | OptimizationCriterion::Balanced => {
            format!("{}", score as u64)
        }
        _ => format!("{:.2}", score),
    }
}

/// Advisor that recommends the top of [`rank`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingAdvisor;

impl RankingAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl Advisor for RankingAdvisor {
    fn recommend(&self, input: &AdvisoryInput) -> Result<Recommendation> {
        let criterion = input.criterion;
        let ranking = rank(&input.summaries, criterion);
        let best = ranking
            .first()
            .ok_or_else(|| SimulationError::MissingResult("any algorithm".to_string()))?;

        let tied: Vec<&str> = ranking
            .iter()
            .skip(1)
            .filter(|r| r.place == best.place)
            .map(|r| r.algorithm.display_name())
            .collect();

        let mut reasoning = match criterion {
            OptimizationCriterion::Balanced => format!(
                "{} has the best combined place ({}) across waiting time, turnaround time, \
                 CPU utilization and context switches.",
                best.algorithm.display_name(),
                format_score(criterion, best.score)
            ),
            _ => format!(
                "{} ranks first on {} with {}.",
                best.algorithm.display_name(),
                criterion.description(),
                format_score(criterion, best.score)
            ),
        };
        if !tied.is_empty() {
            reasoning.push_str(&format!(" Tied with {}.", tied.join(", ")));
        } else if let Some(runner_up) = ranking.get(1) {
            reasoning.push_str(&format!(
                " Runner-up: {} with {}.",
                runner_up.algorithm.display_name(),
                format_score(criterion, runner_up.score)
            ));
        }

        debug!(
            criterion = criterion.as_str(),
            suggested = best.algorithm.as_str(),
            score = best.score,
            "Recommendation ready"
        );

        Ok(Recommendation {
            suggested_algorithm: best.algorithm,
            reasoning,
            trade_offs: trade_offs(best.algorithm).to_string(),
            starvation_mitigation: starvation_mitigation(best.algorithm),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(algorithm: Algorithm, wait: f64, tat: f64, switches: u64, util: f64) -> AlgorithmSummary {
        AlgorithmSummary {
            algorithm,
            avg_waiting_time: wait,
            avg_turnaround_time: tat,
            context_switches: switches,
            cpu_utilization: util,
        }
    }

    fn fixture() -> Vec<AlgorithmSummary> {
        vec![
            summary(Algorithm::Fcfs, 8.75, 15.25, 3, 100.0),
            summary(Algorithm::Srtf, 6.5, 13.0, 4, 100.0),
            summary(Algorithm::RoundRobin, 12.0, 18.5, 7, 90.0),
        ]
    }

    fn algorithms(ranking: &[RankedAlgorithm]) -> Vec<Algorithm> {
        ranking.iter().map(|r| r.algorithm).collect()
    }

    #[test]
    fn test_lower_waiting_time_ranks_first() {
        let ranking = rank(&fixture(), OptimizationCriterion::WaitingTime);
        assert_eq!(
            algorithms(&ranking),
            vec![Algorithm::Srtf, Algorithm::Fcfs, Algorithm::RoundRobin]
        );
        assert_eq!(ranking[0].score, 6.5);
    }

    #[test]
    fn test_utilization_ranks_descending_with_shared_place() {
        let ranking = rank(&fixture(), OptimizationCriterion::CpuUtilization);
        assert_eq!(
            algorithms(&ranking),
            vec![Algorithm::Fcfs, Algorithm::Srtf, Algorithm::RoundRobin]
        );
        let places: Vec<usize> = ranking.iter().map(|r| r.place).collect();
        assert_eq!(places, vec![1, 1, 3]);
    }

    #[test]
    fn test_balanced_sums_places() {
        let ranking = rank(&fixture(), OptimizationCriterion::Balanced);
        // FCFS: 2 + 2 + 1 + 1 = 6, SRTF: 1 + 1 + 1 + 2 = 5, RR: 3 + 3 + 3 + 3 = 12
        assert_eq!(
            algorithms(&ranking),
            vec![Algorithm::Srtf, Algorithm::Fcfs, Algorithm::RoundRobin]
        );
        let scores: Vec<f64> = ranking.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![5.0, 6.0, 12.0]);
    }

    #[test]
    fn test_advisor_recommends_top_ranked() {
        let input = AdvisoryInput {
            summaries: fixture(),
            criterion: OptimizationCriterion::ContextSwitches,
        };
        let recommendation = RankingAdvisor::new().recommend(&input).unwrap();

        assert_eq!(recommendation.suggested_algorithm, Algorithm::Fcfs);
        assert!(recommendation.reasoning.contains("context switches"));
        assert!(recommendation.starvation_mitigation.contains("not possible"));
    }

    #[test]
    fn test_priority_recommendation_points_to_aging() {
        let input = AdvisoryInput {
            summaries: vec![summary(Algorithm::Priority, 1.0, 2.0, 1, 100.0)],
            criterion: OptimizationCriterion::WaitingTime,
        };
        let recommendation = RankingAdvisor.recommend(&input).unwrap();
        assert!(recommendation.starvation_mitigation.contains("Priority with Aging"));
    }

    #[test]
    fn test_empty_input_is_error() {
        let input = AdvisoryInput {
            summaries: Vec::new(),
            criterion: OptimizationCriterion::Balanced,
        };
        assert!(RankingAdvisor.recommend(&input).is_err());
    }

    #[test]
    fn test_starvation_classification() {
        assert!(can_starve(Algorithm::Srtf));
        assert!(!can_starve(Algorithm::PriorityAging));
        assert!(!can_starve(Algorithm::RoundRobin));
    }

    #[test]
    fn test_mitigation_follows_starvation_classification() {
        for algorithm in Algorithm::ALL {
            let text = starvation_mitigation(algorithm);
            assert_eq!(text.contains("can starve"), can_starve(algorithm), "{algorithm:?}");
        }
        assert!(starvation_mitigation(Algorithm::PriorityAging).contains("10 ticks"));
    }
}
