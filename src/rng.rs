// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Depth Chart Simulation Suite - Random Sources

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Uniform randomness consumed by liquidity evolution, spawning and seeding.
pub trait RandomSource {
    /// Uniform draw in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform draw in [lo, hi). Returns `lo` when the range is empty.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_f64()
    }

    /// Bernoulli trial with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.next_f64() < p
    }

    /// Uniform draw in [-1, 1).
    fn signed_unit(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Deterministic source cycling through a fixed list of draws.
///
/// Values are clamped into [0, 1). An empty list always yields 0.5.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Same draw forever.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_chacha_draws_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_chacha_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_fixed_sequence_cycles() {
        let mut seq = FixedSequence::new(vec![0.1, 0.2]);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.next_f64(), 0.2);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.draws(), 3);
    }

    #[test]
    fn test_chance_edges() {
        let mut seq = FixedSequence::constant(0.0);
        assert!(!seq.chance(0.0));
        assert!(seq.chance(1e-9));
        let mut seq = FixedSequence::constant(0.999);
        assert!(seq.chance(1.0));
        assert!(!seq.chance(f64::NAN));
    }

    #[test]
    fn test_range_and_signed_unit() {
        let mut seq = FixedSequence::constant(0.5);
        assert_eq!(seq.range(10.0, 20.0), 15.0);
        assert_eq!(seq.range(5.0, 5.0), 5.0);
        assert_eq!(seq.signed_unit(), 0.0);
    }

    #[test]
    fn test_empty_sequence_yields_half() {
        let mut seq = FixedSequence::new(Vec::new());
        assert_eq!(seq.next_f64(), 0.5);
    }
}
