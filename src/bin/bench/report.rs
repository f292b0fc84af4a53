// Benchmark Report Types
// Structured output for offline analysis of depth-book scenario runs

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let half_width = 1.96 * std_dev / (n as f64).sqrt(); // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub seed: u64,
    pub pass: bool,
    pub ticks: u64,
    pub spawn_count: u32,
    pub fill_count: u32,
    pub overflow_count: u32,
    pub overflow_rate: f64,
    pub cumulative_signed_volume: f64,
    pub total_buy_volume: f64,
    pub total_sell_volume: f64,
    pub final_bid_depth: f64,
    pub final_ask_depth: f64,
    pub peak_active_spoofs: u32,
    pub peak_in_flight: u32,
    pub peak_abs_recent_flow: f64,
    pub spoofs_terminated: bool,
    pub invariant_violations: u32,
    pub monotonic_violations: u32,
    pub max_conservation_error: f64,
    pub first_violation: Option<String>,
    pub elapsed_ms: u128,
    pub throughput_per_sec: f64,
}

// ─── Monte Carlo Report (per-scenario aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub fill_count: Stats,
    pub overflow_rate: Stats,
    pub cumulative_signed_volume: Stats,
    pub peak_active_spoofs: Stats,
    pub peak_in_flight: Stats,
    pub max_conservation_error: Stats,
    pub final_bid_depth: Stats,
    pub final_ask_depth: Stats,
    pub elapsed_ms: Stats,
    pub throughput_per_sec: Stats,
    pub individual_runs: Vec<BenchResult>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub base_seed: u64,
    pub summary: Summary,
    pub scenarios: Vec<MonteCarloReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub max_conservation_error: f64,
}
