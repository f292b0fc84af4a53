// Per-Tick JSONL Time Series Recorder
// Outputs one JSON line per tick for offline plotting of book and flow

use depth_engine::{SimStats, Snapshot};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub mid_price: f64,
    pub cumulative_signed_volume: f64,
    pub recent_flow: f64,
    pub total_bid_depth: f64,
    pub total_ask_depth: f64,
    /// Depth within the visible window, from the last point of each curve.
    pub visible_bid_depth: f64,
    pub visible_ask_depth: f64,
    pub active_spoofs: u32,
    pub in_flight: u32,
    pub fills: usize,
    pub partial_fills: usize,
    pub fill_count: u32,
    pub overflow_count: u32,
}

impl TickSnapshot {
    pub fn from_tick(snapshot: &Snapshot, stats: &SimStats) -> Self {
        Self {
            tick: snapshot.tick,
            mid_price: snapshot.mid_price,
            cumulative_signed_volume: snapshot.cumulative_signed_volume,
            recent_flow: snapshot.recent_flow,
            total_bid_depth: stats.total_bid_depth,
            total_ask_depth: stats.total_ask_depth,
            visible_bid_depth: snapshot.cumulative_bid.last().copied().unwrap_or(0.0),
            visible_ask_depth: snapshot.cumulative_ask.last().copied().unwrap_or(0.0),
            active_spoofs: stats.active_spoofs,
            in_flight: snapshot.in_flight_count,
            fills: snapshot.fills.len(),
            partial_fills: snapshot.fills.iter().filter(|f| f.is_partial()).count(),
            fill_count: stats.fill_count,
            overflow_count: stats.overflow_count,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, snapshot: &Snapshot, stats: &SimStats) {
        self.snapshots.push(TickSnapshot::from_tick(snapshot, stats));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        file.flush()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
