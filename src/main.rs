/*!
 * schedsim - Command Line Entry Point
 *
 * Runs one or all scheduling algorithms over a workload and prints:
 * - Per-algorithm metrics
 * - A ranking for the chosen optimization criterion
 * - A recommendation when the whole suite was run
 */

use clap::Parser;
use cpu_sched_sim::{
    init_tracing, run_many, run_many_parallel, Advisor, AdvisoryInput, Algorithm,
    OptimizationCriterion, RankingAdvisor, SimulationConfig, SimulationError, SimulationResult,
    Slot,
};
use std::path::PathBuf;
use tracing::info;

/// CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "schedsim")]
#[command(about = "Simulate and compare CPU scheduling algorithms", long_about = None)]
struct Args {
    /// JSON workload file; the stock four-process sample when omitted
    #[arg(short, long)]
    workload: Option<PathBuf>,

    /// Algorithm to run (fcfs, sjf, srtf, priority, priority_preemptive,
    /// priority_aging, round_robin) or "all"
    #[arg(short, long, default_value = "all")]
    algorithm: String,

    /// Number of cores (overrides the workload file)
    #[arg(short, long)]
    cores: Option<usize>,

    /// Context switch cost in ticks (overrides the workload file)
    #[arg(short = 's', long = "context-switch")]
    context_switch: Option<u64>,

    /// Round Robin quantum (overrides the workload file)
    #[arg(short, long)]
    quantum: Option<u64>,

    /// Preemptive driver step budget (overrides the workload file)
    #[arg(long)]
    step_budget: Option<u64>,

    /// Optimization criterion for ranking and recommendation
    #[arg(long, default_value = "balanced")]
    criterion: String,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Run algorithms on parallel threads
    #[arg(short, long, default_value_t = false)]
    parallel: bool,

    /// Skip the per-tick execution log
    #[arg(long, default_value_t = false)]
    no_log: bool,
}

impl Args {
    fn config(&self) -> cpu_sched_sim::Result<SimulationConfig> {
        let mut config = match &self.workload {
            Some(path) => SimulationConfig::from_json_file(path)?,
            None => SimulationConfig::sample(),
        };

        if let Some(cores) = self.cores {
            config = config.with_cores(cores);
        }
        if let Some(ticks) = self.context_switch {
            config = config.with_context_switch_time(ticks);
        }
        if let Some(quantum) = self.quantum {
            config = config.with_quantum(quantum);
        }
        if let Some(budget) = self.step_budget {
            config = config.with_step_budget(budget);
        }
        if self.no_log {
            config = config.with_execution_log(false);
        }
        Ok(config)
    }

    fn algorithms(&self) -> cpu_sched_sim::Result<Vec<Algorithm>> {
        if self.algorithm.eq_ignore_ascii_case("all") {
            return Ok(Algorithm::ALL.to_vec());
        }
        self.algorithm
            .split(',')
            .map(|name| name.trim().parse())
            .collect()
    }
}

fn print_summary(results: &[SimulationResult]) {
    println!(
        "{:<48} {:>10} {:>14} {:>9} {:>8} {:>9}",
        "Algorithm", "Avg Wait", "Avg Turnaround", "Switches", "CPU %", "Makespan"
    );
    println!("{}", "─".repeat(103));
    for result in results {
        println!(
            "{:<48} {:>10.2} {:>14.2} {:>9} {:>8.2} {:>9}",
            result.algorithm_name,
            result.avg_waiting_time,
            result.avg_turnaround_time,
            result.context_switches,
            result.cpu_utilization,
            result.makespan
        );
    }
}

fn print_gantt(result: &SimulationResult) {
    println!("\n▶ {} Gantt chart", result.algorithm_name);
    for entry in &result.gantt_chart {
        let label = match entry.slot {
            Slot::Execution(_) => entry.label.as_str(),
            Slot::Idle => "·",
            Slot::ContextSwitch => "⇄",
        };
        println!(
            "  core {:>2}  [{:>4}, {:>4})  {}",
            entry.core, entry.start, entry.end, label
        );
    }

    println!(
        "\n  {:>4} {:>8} {:>10} {:>12} {:>10}",
        "PID", "Arrival", "Completion", "Turnaround", "Waiting"
    );
    for process in &result.processes {
        println!(
            "  {:>4} {:>8} {:>10} {:>12} {:>10}",
            process.name,
            process.arrival_time,
            process.completion_time.unwrap_or_default(),
            process.turnaround_time.unwrap_or_default(),
            process.waiting_time.unwrap_or_default()
        );
    }
}

fn print_advice(
    results: &[SimulationResult],
    criterion: OptimizationCriterion,
) -> cpu_sched_sim::Result<()> {
    let input = AdvisoryInput::from_results(results, criterion)?;

    println!("\n▶ Ranking by {}", criterion);
    for row in cpu_sched_sim::rank(&input.summaries, criterion) {
        println!(
            "  {:>2}. {:<48} {:>10.2}",
            row.place,
            row.algorithm.display_name(),
            row.score
        );
    }

    let recommendation = RankingAdvisor::new().recommend(&input)?;
    println!("\n▶ Recommendation: {}", recommendation.suggested_algorithm);
    println!("  Reasoning:     {}", recommendation.reasoning);
    println!("  Trade-offs:    {}", recommendation.trade_offs);
    println!("  Starvation:    {}", recommendation.starvation_mitigation);
    Ok(())
}

fn main() -> miette::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.config()?;
    let algorithms = args.algorithms()?;
    let criterion: OptimizationCriterion = args.criterion.parse()?;

    info!(
        processes = config.processes.len(),
        cores = config.cores,
        algorithms = algorithms.len(),
        parallel = args.parallel,
        "Starting schedsim"
    );

    let results = if args.parallel {
        run_many_parallel(&algorithms, &config)?
    } else {
        run_many(&algorithms, &config)?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&results).map_err(SimulationError::from)?;
        println!("{}", json);
        return Ok(());
    }

    print_summary(&results);
    if let [single] = results.as_slice() {
        print_gantt(single);
    }
    if Algorithm::ALL.iter().all(|a| algorithms.contains(a)) {
        print_advice(&results, criterion)?;
    }

    Ok(())
}
