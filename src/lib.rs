// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - synthetic limit-order-book core

pub mod types;
pub mod price;
pub mod rng;
pub mod config;
pub mod ladder;
pub mod evolution;
pub mod aggressor;
pub mod matching;
pub mod depth;
pub mod flow;
pub mod simulation;

pub use types::*;
pub use config::{ConfigError, SeedProfile, SimConfig};
pub use ladder::{InvariantViolation, Ladder};
pub use flow::FlowStatistics;
pub use rng::{FixedSequence, RandomSource};
pub use simulation::{advance, initialize, snapshot, stats, tick, DepthSimulation, SimulationState};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
impl DepthSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(level_count: u32, tick_size: f64, mid_price: f64, seed: u32) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        DepthSimulation::with_profile(
            level_count as usize,
            tick_size,
            mid_price,
            seed,
            SeedProfile::default(),
        )
    }

    /// Advance by `dt` seconds of wall time and return the new snapshot.
    pub fn tick(&mut self, dt: f64) -> JsValue {
        let snap = self.tick_core(dt);
        to_js(&snap)
    }

    pub fn snapshot(&self) -> JsValue {
        to_js(&self.snapshot_core())
    }

    pub fn get_stats(&self) -> JsValue {
        to_js(&self.stats_core())
    }

    pub fn get_config(&self) -> JsValue {
        to_js(self.config())
    }

    /// Accepts a partial config object; missing fields keep their defaults.
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: SimConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("malformed configuration: {}", e)))?;
        self.apply_config(config);
        Ok(())
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.apply_config(config);
        Ok(())
    }

    pub fn set_replay_speed(&mut self, val: f64) { self.update_config(|c| c.replay_speed = val); }
    pub fn set_spawn_rate(&mut self, val: f64) { self.update_config(|c| c.spawn_rate = val); }
    pub fn set_spoof_intensity(&mut self, val: f64) { self.update_config(|c| c.spoof_intensity = val); }
    pub fn set_max_volume_clamp(&mut self, val: f64) { self.update_config(|c| c.max_volume_clamp = val); }
    pub fn set_iceberg_sensitivity(&mut self, val: f64) { self.update_config(|c| c.iceberg_sensitivity = val); }
    pub fn set_visible_depth_levels(&mut self, val: u32) {
        self.update_config(|c| c.visible_depth_levels = val as usize);
    }

    /// Queue a host-driven aggressor (buy when `is_buy`). Returns its id.
    pub fn inject_aggressor(&mut self, is_buy: bool, size: f64, target_price: f64) -> u64 {
        let side = if is_buy { Side::Buy } else { Side::Sell };
        self.state.submit(side, size, target_price)
    }

    /// Zero the flow statistics without touching the ladder.
    pub fn reset_flow(&mut self) {
        self.state.flow.reset();
    }

    /// Run N ticks without returning results (fast batch mode for benchmarking)
    pub fn run_batch(&mut self, ticks: u32, dt: f64) {
        for _ in 0..ticks {
            self.tick_core(dt);
        }
    }

    /// Reset simulation to initial state
    pub fn reset(&mut self) {
        self.reset_core();
    }
}
