// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Flow Statistics

use serde::{Deserialize, Serialize};

use crate::types::{ConsumptionResult, Side};

/// Ticks kept in the rolling signed-flow window.
pub const FLOW_WINDOW_TICKS: usize = 60;

/// Signed consumed volume over the simulation's lifetime. Read by the
/// renderer only; no other component consults it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowStatistics {
    cumulative_signed_volume: f64,
    total_buy_volume: f64,
    total_sell_volume: f64,
    fill_count: u32,
    overflow_count: u32,
    flow_window: Vec<f64>,
    pending_tick_flow: f64,
}

impl FlowStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signed quantity to the running total.
    pub fn accumulate(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.cumulative_signed_volume += delta;
        self.pending_tick_flow += delta;
    }

    /// Fold one resolution into the totals.
    pub fn record(&mut self, result: &ConsumptionResult) {
        let filled = result.filled();
        self.accumulate(result.signed_volume());
        match result.side {
            Side::Buy => self.total_buy_volume += filled,
            Side::Sell => self.total_sell_volume += filled,
        }
        if filled > 0.0 {
            self.fill_count = self.fill_count.saturating_add(1);
        }
        if result.is_partial() {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
    }

    /// Close the current tick: push its net flow into the rolling window.
    pub fn close_tick(&mut self) {
        self.flow_window.push(self.pending_tick_flow);
        if self.flow_window.len() > FLOW_WINDOW_TICKS {
            self.flow_window.remove(0);
        }
        self.pending_tick_flow = 0.0;
    }

    /// Zero every counter and the window.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn cumulative_signed_volume(&self) -> f64 {
        self.cumulative_signed_volume
    }

    pub fn total_buy_volume(&self) -> f64 {
        self.total_buy_volume
    }

    pub fn total_sell_volume(&self) -> f64 {
        self.total_sell_volume
    }

    pub fn fill_count(&self) -> u32 {
        self.fill_count
    }

    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Net signed flow over the last [`FLOW_WINDOW_TICKS`] closed ticks.
    pub fn recent_flow(&self) -> f64 {
        self.flow_window.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(side: Side, initial: f64, remaining: f64) -> ConsumptionResult {
        ConsumptionResult {
            aggressor_id: 0,
            side,
            initial_size: initial,
            remaining_size: remaining,
            consumed_visible: initial - remaining,
            consumed_hidden: 0.0,
            start_offset: 0,
            end_offset: 0,
            levels_touched: 1,
        }
    }

    #[test]
    fn test_accumulate_moves_both_ways() {
        let mut flow = FlowStatistics::new();
        flow.accumulate(12.0);
        flow.accumulate(-20.0);
        assert_eq!(flow.cumulative_signed_volume(), -8.0);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut flow = FlowStatistics::new();
        flow.accumulate(f64::NAN);
        flow.accumulate(f64::INFINITY);
        assert_eq!(flow.cumulative_signed_volume(), 0.0);
    }

    #[test]
    fn test_record_splits_by_side() {
        let mut flow = FlowStatistics::new();
        flow.record(&result(Side::Buy, 12.0, 0.0));
        flow.record(&result(Side::Sell, 20.0, 5.0));
        assert_eq!(flow.cumulative_signed_volume(), -3.0);
        assert_eq!(flow.total_buy_volume(), 12.0);
        assert_eq!(flow.total_sell_volume(), 15.0);
        assert_eq!(flow.fill_count(), 2);
        assert_eq!(flow.overflow_count(), 1);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut flow = FlowStatistics::new();
        flow.record(&result(Side::Buy, 4.0, 1.0));
        flow.close_tick();
        flow.reset();
        assert_eq!(flow, FlowStatistics::default());
        assert_eq!(flow.recent_flow(), 0.0);
    }

    #[test]
    fn test_rolling_window_trims_to_max() {
        let mut flow = FlowStatistics::new();
        for i in 0..(FLOW_WINDOW_TICKS + 10) {
            flow.accumulate(i as f64);
            flow.close_tick();
        }
        assert_eq!(flow.flow_window.len(), FLOW_WINDOW_TICKS);
        // Oldest entries (0..10) evicted
        assert_eq!(flow.flow_window[0], 10.0);
        let expected: f64 = (10..(FLOW_WINDOW_TICKS + 10)).map(|i| i as f64).sum();
        assert_eq!(flow.recent_flow(), expected);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut flow = FlowStatistics::new();
        flow.record(&result(Side::Sell, 3.0, 0.0));
        let json = serde_json::to_string(&flow).unwrap();
        let back: FlowStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flow);
    }
}
