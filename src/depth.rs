// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Cumulative Depth Aggregation

use crate::config::MIN_POSITIVE;
use crate::ladder::Ladder;
use crate::types::BookSide;

/// Offset of the `k`-th level outward from mid on `side` (k = 0 is nearest).
fn outward_offset(side: BookSide, k: usize) -> i32 {
    let k = k.min(i32::MAX as usize - 1) as i32;
    match side {
        BookSide::Bid => -k,
        BookSide::Ask => k + 1,
    }
}

/// Running visible depth from mid outward, one entry per requested level.
/// Levels past the ladder's edge add nothing. Non-decreasing by construction.
pub fn cumulative_depth(ladder: &Ladder, side: BookSide, depth_level_count: usize) -> Vec<f64> {
    let mut running = 0.0;
    (0..depth_level_count)
        .map(|k| {
            running += ladder.visible_at(outward_offset(side, k), side).max(0.0);
            running
        })
        .collect()
}

/// Running depth mapped to display widths in [0, 1].
///
/// Full width corresponds to `max_volume_clamp` on every aggregated level.
pub fn cumulative_widths(
    ladder: &Ladder,
    side: BookSide,
    depth_level_count: usize,
    max_volume_clamp: f64,
) -> Vec<f64> {
    let clamp = if max_volume_clamp.is_nan() {
        MIN_POSITIVE
    } else {
        max_volume_clamp.max(MIN_POSITIVE)
    };
    let scale = 1.0 / (clamp * depth_level_count.max(1) as f64);
    cumulative_depth(ladder, side, depth_level_count)
        .into_iter()
        .map(|running| (running * scale).min(1.0))
        .collect()
}
