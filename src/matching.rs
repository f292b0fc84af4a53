// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Matching Engine
//
// Resolves arriving aggressors against resting depth level by level.
// Visible depth at a level is always exhausted before hidden depth at the
// same level, and no level with remaining depth is ever skipped.

use tracing::debug;

use crate::config::SimConfig;
use crate::flow::FlowStatistics;
use crate::ladder::Ladder;
use crate::types::{Aggressor, BookSide, ConsumptionResult};

/// Consume depth for one aggressor and retire its size.
///
/// The walk starts at the level nearest `target_price` and moves in the
/// aggressor's price direction (up for buys, down for sells) until the size
/// is exhausted or the ladder ends. Running out of ladder is a partial fill,
/// reported through `remaining_size`.
///
/// Levels between mid and the target are never visited: a buy targeting
/// +3 starts at +3 and leaves the asks at +1 and +2 resting. The target
/// price is where the order lands, not a limit.
pub fn resolve(aggressor: &mut Aggressor, ladder: &mut Ladder) -> ConsumptionResult {
    let book_side = BookSide::hit_by(aggressor.side);
    let initial = if aggressor.size_remaining.is_finite() {
        aggressor.size_remaining.max(0.0)
    } else {
        0.0
    };
    let start = ladder.nearest_index(aggressor.target_price);
    let step = aggressor.side.walk_step();

    let mut remaining = initial;
    let mut consumed_visible = 0.0;
    let mut consumed_hidden = 0.0;
    let mut levels_touched = 0u32;
    let mut last = start;
    let mut index = start as isize;

    while remaining > 0.0 && index >= 0 && (index as usize) < ladder.len() {
        let i = index as usize;
        let level = &mut ladder.levels_mut()[i];

        let take_visible = remaining.min(level.visible(book_side).max(0.0));
        *level.visible_mut(book_side) -= take_visible;
        remaining -= take_visible;

        let mut take_hidden = 0.0;
        if remaining > 0.0 && level.hidden(book_side) > 0.0 {
            take_hidden = remaining.min(level.hidden(book_side));
            *level.hidden_mut(book_side) -= take_hidden;
            remaining -= take_hidden;
        }

        if take_visible + take_hidden > 0.0 {
            level.activity_heat = 1.0;
            levels_touched += 1;
        }
        consumed_visible += take_visible;
        consumed_hidden += take_hidden;
        last = i;
        index += step;
    }

    aggressor.size_remaining = remaining;

    ConsumptionResult {
        aggressor_id: aggressor.id,
        side: aggressor.side,
        initial_size: initial,
        remaining_size: remaining,
        consumed_visible,
        consumed_hidden,
        start_offset: ladder.offset_of(start),
        end_offset: ladder.offset_of(last),
        levels_touched,
    }
}

/// Move every in-flight aggressor forward by `dt` and resolve arrivals.
///
/// Arrived aggressors are removed regardless of fill; their results are
/// folded into `flow` and returned in spawn order.
pub fn advance_in_flight(
    in_flight: &mut Vec<Aggressor>,
    ladder: &mut Ladder,
    flow: &mut FlowStatistics,
    dt: f64,
    config: &SimConfig,
) -> Vec<ConsumptionResult> {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut results = Vec::new();

    in_flight.retain_mut(|aggressor| {
        aggressor.progress = (aggressor.progress + config.travel_speed * dt).min(1.0);
        if !aggressor.has_arrived() {
            return true;
        }
        let result = resolve(aggressor, ladder);
        if result.is_partial() {
            debug!(
                id = result.aggressor_id,
                side = ?result.side,
                remaining = result.remaining_size,
                "aggressor broke through the book"
            );
        }
        flow.record(&result);
        results.push(result);
        false
    });

    results
}
