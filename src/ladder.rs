// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Price Ladder

use serde::{Deserialize, Serialize};

use crate::config::SeedProfile;
use crate::price::PriceGrid;
use crate::rng::RandomSource;
use crate::types::{BookSide, PriceLevel};

/// Ladders never shrink below one bid level, the mid, and one ask level.
pub const MIN_LEVELS: usize = 3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A broken ladder invariant, reported with the offending offset.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("negative or non-finite depth at offset {offset}")]
    InvalidDepth { offset: i32 },
    #[error("spoof alpha {alpha} outside [0, 1] at offset {offset}")]
    AlphaOutOfRange { offset: i32, alpha: f64 },
    #[error("inactive level at offset {offset} still carries spoof alpha {alpha}")]
    StaleSpoofAlpha { offset: i32, alpha: f64 },
    #[error("activity heat {heat} outside [0, 1] at offset {offset}")]
    HeatOutOfRange { offset: i32, heat: f64 },
}

// ---------------------------------------------------------------------------
// Ladder
// ---------------------------------------------------------------------------

/// Fixed-length price ladder indexed by integer offset from a fixed mid index.
///
/// Levels at offset `<= 0` are bid-dominant, levels above mid are
/// ask-dominant. Length and tick spacing never change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    grid: PriceGrid,
    mid_index: usize,
    levels: Vec<PriceLevel>,
}

impl Ladder {
    /// Ladder with every depth field at zero.
    pub fn flat(level_count: usize, tick_size: f64, mid_price: f64) -> Self {
        let level_count = level_count.max(MIN_LEVELS);
        let grid = PriceGrid::new(mid_price, tick_size);
        let mid_index = (level_count - 1) / 2;
        let levels = (0..level_count)
            .map(|i| PriceLevel::empty(grid.price_at(i as i32 - mid_index as i32)))
            .collect();
        Self { grid, mid_index, levels }
    }

    /// Seed a ladder with the bell-shaped profile on each side of mid.
    pub fn initialize<R: RandomSource>(
        level_count: usize,
        tick_size: f64,
        mid_price: f64,
        profile: &SeedProfile,
        rng: &mut R,
    ) -> Self {
        let mut ladder = Self::flat(level_count, tick_size, mid_price);
        let jitter = profile.jitter.clamp(0.0, 1.0);
        let hidden_ratio = profile.hidden_ratio.max(0.0);
        for index in 0..ladder.levels.len() {
            let offset = ladder.offset_of(index);
            let side = BookSide::for_offset(offset);
            let base = profile.base_volume(ladder.distance_from_mid(index) as f64);
            let visible = (base * (1.0 + jitter * rng.signed_unit())).max(0.0);
            let hidden = (base * hidden_ratio * rng.next_f64()).max(0.0);
            let level = &mut ladder.levels[index];
            *level.visible_mut(side) = visible;
            *level.hidden_mut(side) = hidden;
        }
        ladder
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn mid_index(&self) -> usize {
        self.mid_index
    }

    pub fn mid_price(&self) -> f64 {
        self.grid.mid()
    }

    pub fn tick_size(&self) -> f64 {
        self.grid.tick()
    }

    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    pub fn levels_mut(&mut self) -> &mut [PriceLevel] {
        &mut self.levels
    }

    /// Signed offset from mid of the level at `index`.
    pub fn offset_of(&self, index: usize) -> i32 {
        index as i32 - self.mid_index as i32
    }

    /// Levels away from mid of the level at `index`.
    pub fn distance_from_mid(&self, index: usize) -> u32 {
        self.offset_of(index).unsigned_abs()
    }

    /// Ladder index of `offset`, or `None` outside the ladder.
    pub fn index_of(&self, offset: i32) -> Option<usize> {
        let index = self.mid_index as i64 + offset as i64;
        if index < 0 || index >= self.levels.len() as i64 {
            None
        } else {
            Some(index as usize)
        }
    }

    pub fn level(&self, offset: i32) -> Option<&PriceLevel> {
        self.index_of(offset).map(|i| &self.levels[i])
    }

    pub fn level_mut(&mut self, offset: i32) -> Option<&mut PriceLevel> {
        self.index_of(offset).map(move |i| &mut self.levels[i])
    }

    /// Index whose price is closest to `price`, clamped to the ladder.
    pub fn nearest_index(&self, price: f64) -> usize {
        let offset = self.grid.nearest_offset(price) as i64;
        let index = (self.mid_index as i64 + offset).clamp(0, self.levels.len() as i64 - 1);
        index as usize
    }

    /// Visible depth at `offset` on `side`; zero outside the ladder.
    pub fn visible_at(&self, offset: i32, side: BookSide) -> f64 {
        self.level(offset).map_or(0.0, |l| l.visible(side))
    }

    /// Visible plus hidden depth resting on one side across the whole ladder.
    pub fn total_depth(&self, side: BookSide) -> f64 {
        self.levels.iter().map(|l| l.total(side)).sum()
    }

    pub fn active_spoofs(&self) -> u32 {
        self.levels.iter().filter(|l| l.spoof_active).count() as u32
    }

    /// First violated level invariant, if any.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (index, level) in self.levels.iter().enumerate() {
            let offset = self.offset_of(index);
            let depths = [level.bid_visible, level.ask_visible, level.bid_hidden, level.ask_hidden];
            if depths.iter().any(|d| !d.is_finite() || *d < 0.0) {
                return Err(InvariantViolation::InvalidDepth { offset });
            }
            if !(0.0..=1.0).contains(&level.spoof_alpha) {
                return Err(InvariantViolation::AlphaOutOfRange { offset, alpha: level.spoof_alpha });
            }
            if !level.spoof_active && level.spoof_alpha != 0.0 {
                return Err(InvariantViolation::StaleSpoofAlpha { offset, alpha: level.spoof_alpha });
            }
            if !(0.0..=1.0).contains(&level.activity_heat) {
                return Err(InvariantViolation::HeatOutOfRange { offset, heat: level.activity_heat });
            }
        }
        Ok(())
    }
}
