//! Return metrics over a cash-flow series.
//!
//! | Metric | Unit | Degenerate result |
//! |--------|------|-------------------|
//! | [`npv`] | currency | 0 for an empty series |
//! | [`irr`] | percent | clamped to `[IRR_FLOOR, IRR_CEILING]` |
//! | [`mirr`] | percent | 0 when undefined, otherwise clamped |
//! | [`payback_period`] | years | [`NEVER_PAYS_BACK`] |

mod irr;
mod mirr;
mod npv;
mod payback;

pub use irr::{irr, irr_with, irr_with_guess, IRR_SOLVER_CONFIG};
pub use mirr::{mirr, mirr_with_rates};
pub use npv::{npv, npv_at_default};
pub use payback::payback_period;

/// Discount rate used when none is given (10%).
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Lowest reported IRR/MIRR, in percent.
pub const IRR_FLOOR: f64 = -99.0;

/// Highest reported IRR/MIRR, in percent.
///
/// Values at either bound mean "undefined or extreme", not a literal rate.
pub const IRR_CEILING: f64 = 999.0;

/// Payback reported for a series whose cumulative sum never turns non-negative.
pub const NEVER_PAYS_BACK: f64 = 99.0;

/// Converts a decimal rate to a percentage clamped to the reporting band.
pub(crate) fn clamp_percent(rate: f64) -> f64 {
    (rate * 100.0).clamp(IRR_FLOOR, IRR_CEILING)
}

/// Discount factor `(1 + rate)^year`.
pub(crate) fn growth(rate: f64, year: u32) -> f64 {
    let base = 1.0 + rate;
    match i32::try_from(year) {
        Ok(exponent) => base.powi(exponent),
        Err(_) => base.powf(f64::from(year)),
    }
}
