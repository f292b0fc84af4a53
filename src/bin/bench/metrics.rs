// Per-Tick Invariant Trackers - non-negativity, conservation, monotone depth curves
// Fed from every tick of a run; failures are counted, the first is kept for the report

use depth_engine::*;

/// Tracks ladder and snapshot invariants across one run.
pub struct InvariantTracker {
    pub ticks: u64,
    pub invariant_violations: u32,
    pub monotonic_violations: u32,
    pub max_conservation_error: f64,
    pub peak_active_spoofs: u32,
    pub first_violation: Option<String>,
}

impl InvariantTracker {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            invariant_violations: 0,
            monotonic_violations: 0,
            max_conservation_error: 0.0,
            peak_active_spoofs: 0,
            first_violation: None,
        }
    }

    pub fn record_tick(&mut self, snapshot: &Snapshot, ladder: &Ladder) {
        self.ticks += 1;

        if let Err(violation) = ladder.check_invariants() {
            self.invariant_violations += 1;
            if self.first_violation.is_none() {
                self.first_violation = Some(format!("tick {}: {}", snapshot.tick, violation));
            }
        }

        let non_decreasing = |curve: &[f64]| curve.windows(2).all(|w| w[1] >= w[0]);
        if !non_decreasing(&snapshot.cumulative_bid) || !non_decreasing(&snapshot.cumulative_ask) {
            self.monotonic_violations += 1;
        }

        // consumed visible + hidden must equal initial - remaining for every fill
        for fill in &snapshot.fills {
            let error = (fill.consumed_visible + fill.consumed_hidden - fill.filled()).abs();
            self.max_conservation_error = self.max_conservation_error.max(error);
        }

        self.peak_active_spoofs = self.peak_active_spoofs.max(ladder.active_spoofs());
    }
}
