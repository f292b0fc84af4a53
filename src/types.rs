// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Side ────────────────────────────────────────────────────────────────────

/// Aggressor side. Buys lift asks, sells hit bids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl Side {
    /// +1 for buys, -1 for sells.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
        }
    }

    /// Ladder index step while walking the book.
    pub fn walk_step(&self) -> isize {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Resting side of the book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookSide {
    Bid = 0,
    Ask = 1,
}

impl BookSide {
    /// The resting side an aggressor of `side` consumes.
    pub fn hit_by(side: Side) -> Self {
        match side {
            Side::Buy => Self::Ask,
            Side::Sell => Self::Bid,
        }
    }

    /// Dominant side of a level at `offset` from mid (mid itself is a bid level).
    pub fn for_offset(offset: i32) -> Self {
        if offset <= 0 {
            Self::Bid
        } else {
            Self::Ask
        }
    }
}

// ─── PriceLevel ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub bid_visible: f64,
    pub ask_visible: f64,
    pub bid_hidden: f64,
    pub ask_hidden: f64,
    /// 1.0 right after consumption, decays toward 0.
    pub activity_heat: f64,
    pub spoof_active: bool,
    /// Remaining life of an active spoof wall; 0 whenever inactive.
    pub spoof_alpha: f64,
}

impl PriceLevel {
    pub fn empty(price: f64) -> Self {
        Self {
            price,
            bid_visible: 0.0,
            ask_visible: 0.0,
            bid_hidden: 0.0,
            ask_hidden: 0.0,
            activity_heat: 0.0,
            spoof_active: false,
            spoof_alpha: 0.0,
        }
    }

    pub fn visible(&self, side: BookSide) -> f64 {
        match side {
            BookSide::Bid => self.bid_visible,
            BookSide::Ask => self.ask_visible,
        }
    }

    pub fn hidden(&self, side: BookSide) -> f64 {
        match side {
            BookSide::Bid => self.bid_hidden,
            BookSide::Ask => self.ask_hidden,
        }
    }

    pub fn visible_mut(&mut self, side: BookSide) -> &mut f64 {
        match side {
            BookSide::Bid => &mut self.bid_visible,
            BookSide::Ask => &mut self.ask_visible,
        }
    }

    pub fn hidden_mut(&mut self, side: BookSide) -> &mut f64 {
        match side {
            BookSide::Bid => &mut self.bid_hidden,
            BookSide::Ask => &mut self.ask_hidden,
        }
    }

    /// Visible plus hidden depth on one side.
    pub fn total(&self, side: BookSide) -> f64 {
        self.visible(side) + self.hidden(side)
    }
}

// ─── Aggressor ───────────────────────────────────────────────────────────────

/// Synthetic incoming order travelling toward the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggressor {
    pub id: u64,
    pub side: Side,
    pub size_remaining: f64,
    pub target_price: f64,
    /// Travel progress in [0, 1]; resolved on reaching 1.
    #[serde(default)]
    pub progress: f64,
}

impl Aggressor {
    pub fn new(id: u64, side: Side, size: f64, target_price: f64) -> Self {
        Self {
            id,
            side,
            size_remaining: if size.is_finite() { size.max(0.0) } else { 0.0 },
            target_price,
            progress: 0.0,
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.progress >= 1.0
    }
}

// ─── ConsumptionResult ───────────────────────────────────────────────────────

/// Outcome of resolving one aggressor against the ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionResult {
    pub aggressor_id: u64,
    pub side: Side,
    pub initial_size: f64,
    pub remaining_size: f64,
    pub consumed_visible: f64,
    pub consumed_hidden: f64,
    /// Offset from mid of the first level visited.
    pub start_offset: i32,
    /// Offset from mid of the last level visited.
    pub end_offset: i32,
    /// Levels where something was consumed.
    pub levels_touched: u32,
}

impl ConsumptionResult {
    pub fn filled(&self) -> f64 {
        self.initial_size - self.remaining_size
    }

    /// The aggressor ran out of book before its size was exhausted.
    pub fn is_partial(&self) -> bool {
        self.remaining_size > 0.0
    }

    /// Contribution to cumulative signed volume.
    pub fn signed_volume(&self) -> f64 {
        self.filled() * self.side.sign()
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub mid_price: f64,
    pub tick_size: f64,
    pub mid_index: usize,
    pub levels: Vec<PriceLevel>,
    /// Raw running visible depth from mid outward.
    pub cumulative_bid: Vec<f64>,
    pub cumulative_ask: Vec<f64>,
    /// Running depth normalized to [0, 1] display widths.
    pub bid_widths: Vec<f64>,
    pub ask_widths: Vec<f64>,
    pub cumulative_signed_volume: f64,
    pub recent_flow: f64,
    pub in_flight_count: u32,
    pub iceberg_sensitivity: f64,
    /// Resolutions that happened during the last tick.
    pub fills: Vec<ConsumptionResult>,
}

// ─── SimStats ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimStats {
    pub tick: u64,
    pub cumulative_signed_volume: f64,
    pub total_buy_volume: f64,
    pub total_sell_volume: f64,
    pub fill_count: u32,
    pub overflow_count: u32,
    pub spawn_count: u32,
    pub active_spoofs: u32,
    pub total_bid_depth: f64,
    pub total_ask_depth: f64,
}
