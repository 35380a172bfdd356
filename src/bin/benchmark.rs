use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use secret_santa::utils::logging::init_tracing;
use secret_santa::{
    DerangementSampler, DrawError, Exclusions, Permutation, SamplerConfig, SamplingStats,
};
use std::time::Instant;

struct BenchmarkResult {
    participants: usize,
    rounds: usize,
    couples: bool,
    trials: u64,
    failures: u64,
    violations: u64,
    total_time_ms: f64,
    mean_candidates: f64,
    mean_restarts: f64,
    mean_exclusion_rejections: f64,
    mean_collision_rejections: f64,
}

#[derive(Default)]
struct TrialTotals {
    trials: u64,
    failures: u64,
    violations: u64,
    candidates: u64,
    restarts: u64,
    exclusion_rejections: u64,
    collision_rejections: u64,
}

impl TrialTotals {
    fn add_stats(mut self, stats: &SamplingStats) -> Self {
        self.candidates += stats.candidates;
        self.restarts += stats.derangement_restarts;
        self.exclusion_rejections += stats.exclusion_rejections;
        self.collision_rejections += stats.collision_rejections;
        self
    }

    fn merge(mut self, other: TrialTotals) -> Self {
        self.trials += other.trials;
        self.failures += other.failures;
        self.violations += other.violations;
        self.candidates += other.candidates;
        self.restarts += other.restarts;
        self.exclusion_rejections += other.exclusion_rejections;
        self.collision_rejections += other.collision_rejections;
        self
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Throughput and correctness benchmark for the constrained derangement sampler"
)]
struct BenchmarkCli {
    /// Comma-separated list of participant counts (e.g. 4,8,32)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    participants: Option<Vec<usize>>,
    /// Comma-separated list of gift round counts (e.g. 1,2,3)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    rounds: Option<Vec<usize>>,
    /// Independent draws per configuration (default: 10000)
    #[arg(long)]
    trials: Option<u64>,
    /// Pair participants (0,1), (2,3), ... and forbid them from drawing each other
    #[arg(long)]
    couples: bool,
    /// Base seed; trial t uses seed + t
    #[arg(long, default_value_t = 0x5EC2_E75A)]
    seed: u64,
    /// Candidate bound per draw (default: unbounded)
    #[arg(long)]
    max_attempts: Option<u64>,
}

fn main() {
    init_tracing("warn");
    let cli = BenchmarkCli::parse();
    println!("=== Constrained Derangement Sampler Benchmark ===\n");

    let participant_counts = cli.participants.unwrap_or_else(|| vec![4, 8, 16, 64]);
    let round_counts = cli.rounds.unwrap_or_else(|| vec![1, 2, 3]);
    let trials = cli.trials.unwrap_or(10_000);
    let sampler = DerangementSampler::new(SamplerConfig {
        max_attempts: cli.max_attempts,
    });

    let mut all_results = Vec::new();
    for &participants in &participant_counts {
        for &rounds in &round_counts {
            println!(
                "Benchmarking n={} participants, {} rounds, couples: {}",
                participants, rounds, cli.couples
            );
            let allowed_targets = participants.saturating_sub(if cli.couples { 2 } else { 1 });
            if rounds > allowed_targets {
                println!(
                    "  - skipped: each participant has only {allowed_targets} possible giftee(s)\n"
                );
                continue;
            }
            match run_benchmark(&sampler, participants, rounds, cli.couples, trials, cli.seed) {
                Ok(result) => {
                    print_result(&result);
                    all_results.push(result);
                }
                Err(e) => {
                    eprintln!("  ✗ Benchmark failed: {}", e);
                }
            }
            println!();
        }
    }

    println!("\n=== Summary Report ===\n");
    print_summary_table(&all_results);
}

fn couples_exclusions(n: usize) -> Result<Exclusions, DrawError> {
    let groups: Vec<Vec<usize>> = (0..n / 2).map(|k| vec![2 * k, 2 * k + 1]).collect();
    Exclusions::from_groups(n, &groups)
}

fn run_benchmark(
    sampler: &DerangementSampler,
    participants: usize,
    rounds: usize,
    couples: bool,
    trials: u64,
    seed: u64,
) -> Result<BenchmarkResult, Box<dyn std::error::Error>> {
    let exclusions = if couples {
        Some(couples_exclusions(participants)?)
    } else {
        None
    };

    let start = Instant::now();
    let totals = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial));
            let mut totals = TrialTotals {
                trials: 1,
                ..TrialTotals::default()
            };
            match sampler.sample(participants, rounds, exclusions.as_ref(), &mut rng) {
                Ok(sampled) => {
                    if !is_valid_draw(&sampled.permutations, rounds, exclusions.as_ref()) {
                        totals.violations += 1;
                    }
                    totals.add_stats(&sampled.stats)
                }
                Err(_) => {
                    totals.failures += 1;
                    totals
                }
            }
        })
        .reduce(TrialTotals::default, TrialTotals::merge);
    let elapsed = start.elapsed();

    if totals.failures == trials {
        return Err(format!("all {trials} draws failed").into());
    }

    let successes = (totals.trials - totals.failures).max(1) as f64;
    Ok(BenchmarkResult {
        participants,
        rounds,
        couples,
        trials,
        failures: totals.failures,
        violations: totals.violations,
        total_time_ms: elapsed.as_secs_f64() * 1000.0,
        mean_candidates: totals.candidates as f64 / successes,
        mean_restarts: totals.restarts as f64 / successes,
        mean_exclusion_rejections: totals.exclusion_rejections as f64 / successes,
        mean_collision_rejections: totals.collision_rejections as f64 / successes,
    })
}

fn is_valid_draw(rounds: &[Permutation], expected: usize, exclusions: Option<&Exclusions>) -> bool {
    if rounds.len() != expected {
        return false;
    }
    for (i, round) in rounds.iter().enumerate() {
        if !round.is_derangement() {
            return false;
        }
        if let Some(exclusions) = exclusions {
            if !round.verifies_exclusions(exclusions) {
                return false;
            }
        }
        for other in &rounds[i + 1..] {
            if (0..round.len()).any(|k| round.apply(k) == other.apply(k)) {
                return false;
            }
        }
    }
    true
}

fn print_result(result: &BenchmarkResult) {
    println!(
        "  {} trials in {:.2} ms ({:.3} ms/draw)",
        result.trials,
        result.total_time_ms,
        result.total_time_ms / result.trials as f64
    );
    println!(
        "  candidates/draw: {:.2}, shuffle restarts/draw: {:.2}",
        result.mean_candidates, result.mean_restarts
    );
    println!(
        "  rejected/draw: {:.2} by exclusions, {:.2} by collisions",
        result.mean_exclusion_rejections, result.mean_collision_rejections
    );
    if result.failures > 0 {
        println!("  ⚠ {} draw(s) hit the attempt bound", result.failures);
    }
    if result.violations > 0 {
        println!("  ✗ {} draw(s) violated the draw invariants", result.violations);
    } else {
        println!("  ✓ no invariant violations");
    }
}

fn print_summary_table(results: &[BenchmarkResult]) {
    println!(
        "{:>6} {:>6} {:>8} {:>10} {:>12} {:>12} {:>10}",
        "n", "rounds", "couples", "trials", "ms/draw", "cand/draw", "violations"
    );
    for result in results {
        println!(
            "{:>6} {:>6} {:>8} {:>10} {:>12.4} {:>12.2} {:>10}",
            result.participants,
            result.rounds,
            if result.couples { "yes" } else { "no" },
            result.trials,
            result.total_time_ms / result.trials as f64,
            result.mean_candidates,
            result.violations
        );
    }
}
