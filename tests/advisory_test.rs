/*!
 * Advisory Tests
 * Suite summaries, ranking and recommendations over real runs
 */

use cpu_sched_sim::{
    rank, run_all, run_many, Advisor, AdvisoryInput, Algorithm, OptimizationCriterion,
    RankingAdvisor, SimulationConfig, SimulationError,
};
use pretty_assertions::assert_eq;

#[test]
fn test_advisory_input_from_full_suite() {
    let results = run_all(&SimulationConfig::sample()).unwrap();
    let input = AdvisoryInput::from_results(&results, OptimizationCriterion::WaitingTime).unwrap();

    assert_eq!(input.summaries.len(), Algorithm::ALL.len());
    let fcfs = input.summary(Algorithm::Fcfs).unwrap();
    assert_eq!(fcfs.avg_waiting_time, 8.75);
    assert_eq!(fcfs.avg_turnaround_time, 15.25);
    assert_eq!(fcfs.context_switches, 3);
    assert_eq!(fcfs.cpu_utilization, 100.0);
}

#[test]
fn test_partial_suite_is_reported() {
    let results = run_many(&[Algorithm::Fcfs, Algorithm::RoundRobin], &SimulationConfig::sample())
        .unwrap();

    assert_eq!(
        AdvisoryInput::from_results(&results, OptimizationCriterion::Balanced),
        Err(SimulationError::MissingResult(
            "Shortest Job First (Non-Preemptive)".to_string()
        ))
    );
}

#[test]
fn test_waiting_time_recommendation_on_sample() {
    let results = run_all(&SimulationConfig::sample()).unwrap();
    let input = AdvisoryInput::from_results(&results, OptimizationCriterion::WaitingTime).unwrap();

    let ranking = rank(&input.summaries, input.criterion);
    assert_eq!(ranking[0].algorithm, Algorithm::Srtf);
    assert_eq!(ranking[0].score, 6.5);
    // Priority-Preemptive produces the same schedule on this workload
    assert_eq!(ranking[1].algorithm, Algorithm::PriorityPreemptive);
    assert_eq!(ranking[1].place, 1);

    let recommendation = RankingAdvisor::new().recommend(&input).unwrap();
    assert_eq!(recommendation.suggested_algorithm, Algorithm::Srtf);
    assert!(recommendation.reasoning.contains("Tied with Priority (Preemptive)"));
    assert!(!recommendation.trade_offs.is_empty());
    assert!(recommendation.starvation_mitigation.contains("starve"));
}

#[test]
fn test_round_robin_never_wins_on_switches() {
    let results = run_all(&SimulationConfig::sample()).unwrap();
    let input =
        AdvisoryInput::from_results(&results, OptimizationCriterion::ContextSwitches).unwrap();

    let ranking = rank(&input.summaries, input.criterion);
    assert_eq!(ranking.last().unwrap().algorithm, Algorithm::RoundRobin);
}

#[test]
fn test_recommendation_serializes() {
    let results = run_all(&SimulationConfig::sample()).unwrap();
    let input = AdvisoryInput::from_results(&results, OptimizationCriterion::Balanced).unwrap();
    let recommendation = RankingAdvisor::new().recommend(&input).unwrap();

    let json = serde_json::to_value(&recommendation).unwrap();
    assert!(json.get("suggested_algorithm").is_some());
    assert!(json.get("starvation_mitigation").is_some());
}
