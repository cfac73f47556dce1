/*!
 * Advisory
 * Summaries, ranking and recommendations over a full suite of results
 */

pub mod ranking;
pub mod types;

pub use ranking::{can_starve, rank, RankedAlgorithm, RankingAdvisor};
pub use types::{Advisor, AdvisoryInput, AlgorithmSummary, OptimizationCriterion, Recommendation};
