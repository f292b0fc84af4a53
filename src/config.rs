// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Configuration

//! Host-facing configuration surface.
//!
//! The host may send partial objects; missing fields take their defaults.
//! Out-of-range values are clamped by [`SimConfig::sanitized`], never rejected.

use serde::{Deserialize, Serialize};

/// Smallest positive value accepted for scale-like parameters.
pub const MIN_POSITIVE: f64 = 1e-3;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Multiplier applied to every dt before the phases see it.
    pub replay_speed: f64,
    /// Levels aggregated per side for the cumulative depth curve.
    pub visible_depth_levels: usize,
    /// Display scale for depth; also bounds random-walk depth at 1.25x.
    pub max_volume_clamp: f64,
    /// Renderer-only threshold for drawing hidden depth.
    pub iceberg_sensitivity: f64,
    /// Expected aggressor spawns per second, per side.
    pub spawn_rate: f64,
    /// Expected spoof activations per second, per eligible level.
    pub spoof_intensity: f64,
    /// Random-walk amplitude in volume units per second at mid.
    pub walk_intensity: f64,
    /// Distance in levels over which walk amplitude falls by 1/e.
    pub walk_decay_levels: f64,
    /// Max distance from mid, in levels, eligible for spoof walls.
    pub spoof_distance: u32,
    pub aggressor_size_min: f64,
    pub aggressor_size_max: f64,
    /// Max random offset from mid, in levels, of an aggressor target.
    pub target_offset_levels: u32,
    /// Aggressor travel progress per second.
    pub travel_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            replay_speed: 1.0,
            visible_depth_levels: 12,
            max_volume_clamp: 50.0,
            iceberg_sensitivity: 5.0,
            spawn_rate: 1.2,
            spoof_intensity: 0.05,
            walk_intensity: 6.0,
            walk_decay_levels: 20.0,
            spoof_distance: 8,
            aggressor_size_min: 5.0,
            aggressor_size_max: 40.0,
            target_offset_levels: 3,
            travel_speed: 1.5,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON object from the host.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Copy with every field clamped into its valid range.
    pub fn sanitized(&self) -> Self {
        let size_min = non_negative(self.aggressor_size_min);
        Self {
            replay_speed: at_least(self.replay_speed, MIN_POSITIVE),
            visible_depth_levels: self.visible_depth_levels.max(1),
            max_volume_clamp: at_least(self.max_volume_clamp, MIN_POSITIVE),
            iceberg_sensitivity: non_negative(self.iceberg_sensitivity),
            spawn_rate: non_negative(self.spawn_rate),
            spoof_intensity: non_negative(self.spoof_intensity),
            walk_intensity: non_negative(self.walk_intensity),
            walk_decay_levels: at_least(self.walk_decay_levels, MIN_POSITIVE),
            spoof_distance: self.spoof_distance,
            aggressor_size_min: size_min,
            aggressor_size_max: non_negative(self.aggressor_size_max).max(size_min),
            target_offset_levels: self.target_offset_levels,
            travel_speed: at_least(self.travel_speed, MIN_POSITIVE),
        }
    }

    /// `max_volume_clamp` floored at `MIN_POSITIVE`; scales spoof bumps.
    pub fn volume_scale(&self) -> f64 {
        at_least(self.max_volume_clamp, MIN_POSITIVE)
    }

    /// Ceiling for random-walk depth.
    pub fn depth_ceiling(&self) -> f64 {
        self.volume_scale() * 1.25
    }
}

// ---------------------------------------------------------------------------
// SeedProfile
// ---------------------------------------------------------------------------

/// Shape of the initial liquidity: a smooth peak a few levels off mid on
/// each side with bounded multiplicative jitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedProfile {
    pub peak_volume: f64,
    /// Distance from mid, in levels, of the liquidity peak.
    pub peak_offset: f64,
    /// Standard deviation of the peak, in levels.
    pub width: f64,
    /// Relative jitter in [0, 1].
    pub jitter: f64,
    /// Hidden depth as a fraction of the smooth profile, scaled by a draw.
    pub hidden_ratio: f64,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self {
            peak_volume: 30.0,
            peak_offset: 3.0,
            width: 6.0,
            jitter: 0.35,
            hidden_ratio: 0.4,
        }
    }
}

impl SeedProfile {
    /// Smooth profile value at `distance` levels from mid, before jitter.
    pub fn base_volume(&self, distance: f64) -> f64 {
        let width = at_least(self.width, MIN_POSITIVE);
        let z = (distance - self.peak_offset) / width;
        non_negative(self.peak_volume) * (-0.5 * z * z).exp()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at_least(v: f64, floor: f64) -> f64 {
    if v.is_nan() {
        floor
    } else {
        v.max(floor)
    }
}

fn non_negative(v: f64) -> f64 {
    at_least(v, 0.0)
}
