// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Liquidity Evolution
//
// Random-walk perturbation of visible depth, activity heat decay, and the
// per-level spoof wall lifecycle (Inactive -> Active -> Inactive).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimConfig;
use crate::ladder::Ladder;
use crate::rng::RandomSource;
use crate::types::BookSide;

/// Heat decay rate per second (multiplicative, `heat *= e^(-k*dt)`).
pub const HEAT_DECAY_PER_SEC: f64 = 2.5;
/// Linear spoof alpha fade per second.
pub const SPOOF_FADE_PER_SEC: f64 = 0.35;
/// Alpha below which a spoof wall is considered gone.
pub const SPOOF_EPSILON: f64 = 0.01;
/// Spoof bump range as a fraction of `max_volume_clamp`.
pub const SPOOF_BUMP_MIN: f64 = 0.4;
pub const SPOOF_BUMP_MAX: f64 = 1.0;

/// What one evolution pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub spoofs_activated: u32,
    pub spoofs_expired: u32,
}

/// Advance every level by `dt` seconds.
///
/// Draw order per level, in ladder order: one walk draw, then for an
/// eligible inactive level one activation draw and, if it fires, one bump
/// draw. Deterministic sources rely on this order.
pub fn evolve<R: RandomSource>(
    ladder: &mut Ladder,
    dt: f64,
    config: &SimConfig,
    rng: &mut R,
) -> EvolutionReport {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let ceiling = config.depth_ceiling();
    let bump_scale = config.volume_scale();
    let decay_levels = config.walk_decay_levels.max(crate::config::MIN_POSITIVE);
    let heat_retention = (-HEAT_DECAY_PER_SEC * dt).exp();
    let mut report = EvolutionReport::default();

    for index in 0..ladder.len() {
        let offset = ladder.offset_of(index);
        let distance = ladder.distance_from_mid(index);
        let side = BookSide::for_offset(offset);
        let amplitude = config.walk_intensity * dt * (-(distance as f64) / decay_levels).exp();
        let step = rng.signed_unit() * amplitude;

        let level = &mut ladder.levels_mut()[index];
        let visible = level.visible_mut(side);
        *visible = (*visible + step).clamp(0.0, ceiling);

        level.activity_heat = (level.activity_heat * heat_retention).clamp(0.0, 1.0);

        if level.spoof_active {
            level.spoof_alpha -= SPOOF_FADE_PER_SEC * dt;
            if level.spoof_alpha < SPOOF_EPSILON {
                level.spoof_active = false;
                level.spoof_alpha = 0.0;
                report.spoofs_expired += 1;
                debug!(offset, "spoof wall expired");
            }
        } else if distance <= config.spoof_distance && rng.chance(config.spoof_intensity * dt) {
            let bump = rng.range(SPOOF_BUMP_MIN, SPOOF_BUMP_MAX) * bump_scale;
            level.spoof_active = true;
            level.spoof_alpha = 1.0;
            *level.visible_mut(side) += bump;
            report.spoofs_activated += 1;
            debug!(offset, bump, "spoof wall activated");
        }
    }

    report
}
