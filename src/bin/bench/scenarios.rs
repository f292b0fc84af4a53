// Scenario Definitions - named book regimes for the Monte Carlo runner
// All scenario logic lives in config builders and mid-run event hooks

use depth_engine::{DepthSimulation, SeedProfile, SimConfig};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub level_count: usize,
    pub tick_size: f64,
    pub mid_price: f64,
    pub ticks: u64,
    pub dt: f64,
    pub config: fn() -> SimConfig,
    pub profile: fn() -> SeedProfile,
    pub criteria: PassCriteria,
    /// Mid-simulation events (e.g., a burst of host-injected aggressors)
    pub mid_event: Option<fn(&mut DepthSimulation, u64)>,
}

pub struct PassCriteria {
    pub max_conservation_error: f64,
    pub require_invariants: bool,
    pub require_monotonic_depth: bool,
    /// Stop spoof injection after the run and require every wall to expire.
    pub require_spoof_termination: bool,
    pub min_fill_count: Option<u32>,
    pub min_overflow_count: Option<u32>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_conservation_error: 1e-9,
            require_invariants: true,
            require_monotonic_depth: true,
            require_spoof_termination: false,
            min_fill_count: None,
            min_overflow_count: None,
        }
    }
}

// ─── Config Builders ────────────────────────────────────────────────────────

fn quiet_config() -> SimConfig {
    SimConfig {
        spawn_rate: 0.2,
        spoof_intensity: 0.01,
        ..SimConfig::default()
    }
}

fn spoof_storm_config() -> SimConfig {
    SimConfig {
        spoof_intensity: 2.0,
        spoof_distance: 12,
        ..SimConfig::default()
    }
}

fn flood_config() -> SimConfig {
    SimConfig {
        spawn_rate: 12.0,
        aggressor_size_min: 20.0,
        aggressor_size_max: 120.0,
        ..SimConfig::default()
    }
}

fn fast_replay_config() -> SimConfig {
    SimConfig {
        replay_speed: 10.0,
        spawn_rate: 3.0,
        spoof_intensity: 0.3,
        ..SimConfig::default()
    }
}

fn thin_book_config() -> SimConfig {
    SimConfig {
        spawn_rate: 4.0,
        max_volume_clamp: 8.0,
        ..SimConfig::default()
    }
}

fn default_profile() -> SeedProfile {
    SeedProfile::default()
}

fn thin_profile() -> SeedProfile {
    SeedProfile {
        peak_volume: 4.0,
        hidden_ratio: 0.1,
        ..SeedProfile::default()
    }
}

// ─── Mid-Run Events ─────────────────────────────────────────────────────────

/// Every 300 ticks, slam the book with one large buy and one large sell.
fn sweep_both_sides(sim: &mut DepthSimulation, tick: u64) {
    if tick > 0 && tick % 300 == 0 {
        let mid = sim.snapshot_core().mid_price;
        sim.inject_aggressor(true, 400.0, mid);
        sim.inject_aggressor(false, 400.0, mid);
    }
}

// ─── Scenario Catalogue ─────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "QUIET_BOOK",
            label: "Quiet book (low flow)",
            category: "baseline",
            level_count: 81,
            tick_size: 0.25,
            mid_price: 100.0,
            ticks: 3_000,
            dt: 1.0 / 60.0,
            config: quiet_config,
            profile: default_profile,
            criteria: PassCriteria::default(),
            mid_event: None,
        },
        Scenario {
            name: "SPOOF_STORM",
            label: "Spoof storm (walls everywhere)",
            category: "spoofing",
            level_count: 81,
            tick_size: 0.25,
            mid_price: 100.0,
            ticks: 3_000,
            dt: 1.0 / 60.0,
            config: spoof_storm_config,
            profile: default_profile,
            criteria: PassCriteria {
                require_spoof_termination: true,
                ..PassCriteria::default()
            },
            mid_event: None,
        },
        Scenario {
            name: "AGGRESSOR_FLOOD",
            label: "Aggressor flood",
            category: "matching",
            level_count: 81,
            tick_size: 0.25,
            mid_price: 100.0,
            ticks: 3_000,
            dt: 1.0 / 60.0,
            config: flood_config,
            profile: default_profile,
            criteria: PassCriteria {
                min_fill_count: Some(100),
                ..PassCriteria::default()
            },
            mid_event: None,
        },
        Scenario {
            name: "FAST_REPLAY",
            label: "Fast replay (10x dt)",
            category: "replay",
            level_count: 61,
            tick_size: 0.5,
            mid_price: 250.0,
            ticks: 2_000,
            dt: 1.0 / 60.0,
            config: fast_replay_config,
            profile: default_profile,
            criteria: PassCriteria {
                require_spoof_termination: true,
                ..PassCriteria::default()
            },
            mid_event: None,
        },
        Scenario {
            name: "THIN_BOOK_SWEEPS",
            label: "Thin book with periodic sweeps",
            category: "matching",
            level_count: 41,
            tick_size: 0.1,
            mid_price: 20.0,
            ticks: 3_000,
            dt: 1.0 / 60.0,
            config: thin_book_config,
            profile: thin_profile,
            criteria: PassCriteria {
                min_overflow_count: Some(1),
                ..PassCriteria::default()
            },
            mid_event: Some(sweep_both_sides),
        },
    ]
}
