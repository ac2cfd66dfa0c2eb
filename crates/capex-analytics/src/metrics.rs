//! Bundled metric computation and project refresh.
//!
//! A project's `npv`, `irr`, `mirr` and `payback_period` are caches of the
//! functions in [`crate::returns`]. [`refresh_project`] is the one place
//! those caches are rebuilt.

use serde::{Deserialize, Serialize};

use crate::returns::{irr, mirr_with_rates, npv, payback_period, DEFAULT_DISCOUNT_RATE};
use capex_core::types::{CashFlow, Project};

/// Rates used when computing a project's derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricRates {
    /// Discount rate for NPV (decimal).
    pub discount_rate: f64,
    /// Finance rate for MIRR outflows (decimal).
    pub finance_rate: f64,
    /// Reinvestment rate for MIRR inflows (decimal).
    pub reinvest_rate: f64,
}

impl Default for MetricRates {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            finance_rate: DEFAULT_DISCOUNT_RATE,
            reinvest_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl MetricRates {
    /// Sets the discount rate.
    #[must_use]
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Sets the MIRR finance and reinvestment rates.
    #[must_use]
    pub fn with_mirr_rates(mut self, finance_rate: f64, reinvest_rate: f64) -> Self {
        self.finance_rate = finance_rate;
        self.reinvest_rate = reinvest_rate;
        self
    }

    /// Shifts the discount rate by `points` percentage points.
    #[must_use]
    pub fn shifted(mut self, points: f64) -> Self {
        self.discount_rate += points / 100.0;
        self
    }
}

/// Derived metrics of a cash-flow series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Net present value.
    pub npv: f64,
    /// IRR in percent, clamped.
    pub irr: f64,
    /// MIRR in percent, clamped.
    pub mirr: f64,
    /// Payback period in years (99 = never).
    pub payback_period: f64,
}

/// Computes all derived metrics of a cash-flow series.
#[must_use]
pub fn compute_metrics(cash_flows: &[CashFlow], rates: &MetricRates) -> FinancialMetrics {
    FinancialMetrics {
        npv: npv(cash_flows, rates.discount_rate),
        irr: irr(cash_flows),
        mirr: mirr_with_rates(cash_flows, rates.finance_rate, rates.reinvest_rate),
        payback_period: payback_period(cash_flows),
    }
}

/// Returns a copy of `project` whose cached metrics match its cash flows.
#[must_use]
pub fn refresh_project(project: &Project, rates: &MetricRates) -> Project {
    let m = compute_metrics(&project.cash_flows, rates);
    project
        .clone()
        .with_metrics(m.npv, m.irr, m.mirr, m.payback_period)
}

/// Refreshes every project in a slice.
#[must_use]
pub fn refresh_projects(projects: &[Project], rates: &MetricRates) -> Vec<Project> {
    projects.iter().map(|p| refresh_project(p, rates)).collect()
}
