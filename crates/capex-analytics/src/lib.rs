//! # Capex Analytics
//!
//! Discounted cash-flow analytics for capital projects.
//!
//! - **Returns**: NPV, IRR (Newton-Raphson), MIRR, payback period
//! - **Cash Flows**: Projection of a simple cash-flow series from project inputs
//! - **Metrics**: Bundled metric computation and project refresh
//!
//! All functions are pure. None of them fail on empty or degenerate series:
//! IRR and MIRR are clamped to `[-99, 999]` percent, payback reports
//! [`NEVER_PAYS_BACK`] instead of infinity.
//!
//! ## Usage
//!
//! ```rust
//! use capex_analytics::prelude::*;
//! use capex_core::types::CashFlow;
//!
//! let flows = CashFlow::from_amounts(&[-1000.0, 600.0, 600.0]);
//!
//! let value = npv(&flows, 0.0);
//! assert!((value - 200.0).abs() < 1e-9);
//!
//! let years = payback_period(&flows);
//! assert!((years - 5.0 / 3.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_wrap)]

pub mod cashflows;
pub mod metrics;
pub mod returns;

pub use cashflows::project_cash_flows;
pub use metrics::{compute_metrics, refresh_project, refresh_projects, FinancialMetrics, MetricRates};
pub use returns::{
    irr, irr_with, irr_with_guess, mirr, mirr_with_rates, npv, npv_at_default, payback_period,
    DEFAULT_DISCOUNT_RATE, IRR_CEILING, IRR_FLOOR, NEVER_PAYS_BACK,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::project_cash_flows;
    pub use crate::metrics::{
        compute_metrics, refresh_project, refresh_projects, FinancialMetrics, MetricRates,
    };
    pub use crate::returns::{
        irr, irr_with, irr_with_guess, mirr, mirr_with_rates, npv, npv_at_default,
        payback_period, DEFAULT_DISCOUNT_RATE, IRR_CEILING, IRR_FLOOR, NEVER_PAYS_BACK,
    };
}
