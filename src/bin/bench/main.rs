// Depth Book Benchmark Runner v0.1.0 - Monte Carlo scenario validation
// Seedable ChaCha8 PRNG, per-tick invariant checks, optional JSONL audit trail
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- SPOOF            # Filter by name, label or category
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed
//   RUST_LOG=depth_engine=debug cargo run --bin bench   # Engine events

mod metrics;
mod monte_carlo;
mod report;
mod scenarios;
mod time_series;

use report::*;
use scenarios::*;
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Fraction of seeded runs that must pass for a scenario to count as passing.
const PASS_THRESHOLD: f64 = 0.933;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30).max(1);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn matches_filter(scenario: &Scenario, filter: &str) -> bool {
    let f = filter.to_lowercase();
    scenario.name.to_lowercase().contains(&f)
        || scenario.label.to_lowercase().contains(&f)
        || scenario.category.to_lowercase().contains(&f)
}

fn write_report(report: &BenchReport) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let dir = std::path::Path::new("benchmark-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("bench-{}.json", report.timestamp));
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => all_scenarios.iter().filter(|s| matches_filter(s, f)).collect(),
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        return ExitCode::FAILURE;
    }

    let ts_dir = cli
        .time_series
        .then(|| std::path::PathBuf::from("benchmark-results/time-series"));

    println!("\n  Depth Book Benchmark Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<34} {:>5} {:>12} {:>9} {:>7} {:>10} {:>7}",
        "Scenario", "Pass%", "Fills", "Overflow%", "Spoofs", "Conserv", "Time");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(scenario, cli.runs, cli.seed, ts_dir.as_deref());

        let pass_pct = report.pass_rate * 100.0;
        let status = if report.pass_rate >= PASS_THRESHOLD { "PASS" } else { "FAIL" };

        println!("  {:<34} {:>4}% {:>7.0}±{:<4.0} {:>8.1}% {:>7.1} {:>10.2e} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            report.fill_count.mean, report.fill_count.half_width(),
            report.overflow_rate.mean * 100.0,
            report.peak_active_spoofs.mean,
            report.max_conservation_error.max,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= PASS_THRESHOLD).count();
    let failed = total - passed;
    let max_conservation_error = mc_reports
        .iter()
        .map(|r| r.max_conservation_error.max)
        .fold(0.0_f64, f64::max);

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s",
        total, passed, failed, suite_elapsed.as_secs_f64());
    println!("  Max fill conservation error: {:.2e}\n", max_conservation_error);

    // ─── Write JSON Report ──────────────────────────────────────────────

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        .to_string();

    let report = BenchReport {
        timestamp,
        version: "0.1.0",
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        base_seed: cli.seed,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
            max_conservation_error,
        },
        scenarios: mc_reports,
    };

    match write_report(&report) {
        Ok(path) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => {
            error!(error = %e, "failed to write benchmark report");
            return ExitCode::FAILURE;
        }
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
