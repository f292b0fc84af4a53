//! Decimal price grid.
//!
//! Mid and tick size are held as `rust_decimal::Decimal` so that level
//! prices are exact multiples of the tick and never drift. The rest of the
//! simulator works in `f64`; conversions live here.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Smallest tick the grid accepts.
const MIN_TICK: Decimal = dec!(0.00000001);

/// Convert f64 to Decimal (lossy but sufficient for simulation).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Fixed-spacing price grid around a mid price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGrid {
    mid: Decimal,
    tick: Decimal,
}

impl PriceGrid {
    /// Non-positive ticks are clamped to the minimal tick.
    pub fn new(mid_price: f64, tick_size: f64) -> Self {
        let tick = to_decimal(tick_size).max(MIN_TICK);
        Self {
            mid: to_decimal(mid_price),
            tick,
        }
    }

    pub fn mid(&self) -> f64 {
        from_decimal(self.mid)
    }

    pub fn tick(&self) -> f64 {
        from_decimal(self.tick)
    }

    /// Price of the level `offset` ticks from mid. Saturates at the
    /// extremes of the decimal range instead of overflowing.
    pub fn price_at(&self, offset: i32) -> f64 {
        let price = self
            .tick
            .checked_mul(Decimal::from(offset))
            .and_then(|delta| self.mid.checked_add(delta))
            .unwrap_or(if offset >= 0 { Decimal::MAX } else { Decimal::MIN });
        from_decimal(price)
    }

    /// Offset of the grid point closest to `price`. Exact midpoints resolve
    /// to the lower offset. Prices beyond the decimal range (including
    /// infinities) saturate toward their side of mid; NaN maps to mid.
    pub fn nearest_offset(&self, price: f64) -> i32 {
        if price.is_nan() {
            return 0;
        }
        let saturated = if price > self.mid() { i32::MAX } else { i32::MIN };
        let steps = Decimal::from_f64(price)
            .and_then(|p| p.checked_sub(self.mid))
            .and_then(|d| d.checked_div(self.tick))
            .and_then(|steps| steps.checked_sub(dec!(0.5)));
        match steps {
            Some(steps) => steps
                .ceil()
                .to_i64()
                .map(|o| o.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
                .unwrap_or(saturated),
            None => saturated,
        }
    }
}
