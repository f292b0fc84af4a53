// Monte Carlo Infrastructure - N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI

use depth_engine::*;
use tracing::{debug, warn};

use crate::metrics::InvariantTracker;
use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Seconds of simulated time allowed for walls to fade once injection stops.
const SPOOF_DRAIN_SECS: f64 = 10.0;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> BenchResult {
    let start = Instant::now();
    let mut sim = DepthSimulation::with_profile(
        scenario.level_count,
        scenario.tick_size,
        scenario.mid_price,
        seed as u32,
        (scenario.profile)(),
    );
    sim.apply_config((scenario.config)());

    let mut tracker = InvariantTracker::new();
    let mut time_series = time_series_dir.map(|_| TimeSeriesRecorder::new());
    let mut peak_in_flight: u32 = 0;
    let mut peak_abs_flow: f64 = 0.0;

    for tick in 0..scenario.ticks {
        if let Some(event) = &scenario.mid_event {
            event(&mut sim, tick);
        }

        let snap = sim.tick_core(scenario.dt);
        tracker.record_tick(&snap, &sim.state().ladder);
        peak_in_flight = peak_in_flight.max(snap.in_flight_count);
        peak_abs_flow = peak_abs_flow.max(snap.recent_flow.abs());

        if let Some(ref mut ts) = time_series {
            ts.record(&snap, &sim.stats_core());
        }
    }

    let stats = sim.stats_core();

    // Drain phase: stop injecting walls and let the live ones fade out
    let spoofs_terminated = if scenario.criteria.require_spoof_termination {
        sim.update_config(|c| c.spoof_intensity = 0.0);
        let step = scenario.dt * sim.config().replay_speed;
        let drain_ticks = (SPOOF_DRAIN_SECS / step.max(1e-6)).ceil() as u64;
        for _ in 0..drain_ticks {
            let snap = sim.tick_core(scenario.dt);
            tracker.record_tick(&snap, &sim.state().ladder);
        }
        let remaining = sim.stats_core().active_spoofs;
        debug!(scenario = scenario.name, seed, drain_ticks, remaining, "spoof drain finished");
        remaining == 0
    } else {
        true
    };

    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            warn!(path = %path.display(), error = %e, "failed to write time series");
        }
    }

    let elapsed = start.elapsed();
    let elapsed_ms = elapsed.as_millis();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    // Evaluate pass/fail
    let criteria = &scenario.criteria;
    let mut pass = tracker.max_conservation_error <= criteria.max_conservation_error;
    if criteria.require_invariants && tracker.invariant_violations > 0 {
        pass = false;
    }
    if criteria.require_monotonic_depth && tracker.monotonic_violations > 0 {
        pass = false;
    }
    if !spoofs_terminated {
        pass = false;
    }
    if let Some(min_fills) = criteria.min_fill_count {
        if stats.fill_count < min_fills {
            pass = false;
        }
    }
    if let Some(min_overflows) = criteria.min_overflow_count {
        if stats.overflow_count < min_overflows {
            pass = false;
        }
    }

    if let Some(violation) = &tracker.first_violation {
        warn!(scenario = scenario.name, seed, %violation, "invariant violated");
    }

    BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        ticks: scenario.ticks,
        spawn_count: stats.spawn_count,
        fill_count: stats.fill_count,
        overflow_count: stats.overflow_count,
        overflow_rate: if stats.fill_count > 0 {
            stats.overflow_count as f64 / stats.fill_count as f64
        } else {
            0.0
        },
        cumulative_signed_volume: stats.cumulative_signed_volume,
        total_buy_volume: stats.total_buy_volume,
        total_sell_volume: stats.total_sell_volume,
        final_bid_depth: stats.total_bid_depth,
        final_ask_depth: stats.total_ask_depth,
        peak_active_spoofs: tracker.peak_active_spoofs,
        peak_in_flight,
        peak_abs_recent_flow: peak_abs_flow,
        spoofs_terminated,
        invariant_violations: tracker.invariant_violations,
        monotonic_violations: tracker.monotonic_violations,
        max_conservation_error: tracker.max_conservation_error,
        first_violation: tracker.first_violation.clone(),
        elapsed_ms,
        throughput_per_sec: scenario.ticks as f64 / elapsed_secs,
    }
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> MonteCarloReport {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, seed, ts_dir.as_deref()));
    }

    aggregate(scenario, results)
}

fn sample<F: Fn(&BenchResult) -> f64>(results: &[BenchResult], metric: F) -> Stats {
    Stats::from_samples(&results.iter().map(metric).collect::<Vec<_>>())
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n > 0 { passed as f64 / n as f64 } else { 0.0 };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        fill_count: sample(&results, |r| r.fill_count as f64),
        overflow_rate: sample(&results, |r| r.overflow_rate),
        cumulative_signed_volume: sample(&results, |r| r.cumulative_signed_volume),
        peak_active_spoofs: sample(&results, |r| r.peak_active_spoofs as f64),
        peak_in_flight: sample(&results, |r| r.peak_in_flight as f64),
        max_conservation_error: sample(&results, |r| r.max_conservation_error),
        final_bid_depth: sample(&results, |r| r.final_bid_depth),
        final_ask_depth: sample(&results, |r| r.final_ask_depth),
        elapsed_ms: sample(&results, |r| r.elapsed_ms as f64),
        throughput_per_sec: sample(&results, |r| r.throughput_per_sec),
        individual_runs: results,
    }
}
