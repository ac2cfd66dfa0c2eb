//! # Capex Core
//!
//! Core types and identifiers for the Capex capital allocation engine.
//!
//! This crate provides the plain data records that every other crate in the
//! workspace consumes:
//!
//! - **Identifiers**: `ProjectId`, `PriorityId`, `ScenarioId`
//! - **Cash flows**: year-indexed amounts owned by a project
//! - **Projects**: financial inputs plus cached NPV/IRR/MIRR/payback
//! - **Priorities**: weighted strategic goals with qualification thresholds
//! - **Scenarios**: named bundles of stress adjustments with a results cache
//!
//! ## Design Philosophy
//!
//! - **Plain data**: Records are serde-friendly values, owned by the caller
//! - **No hidden state**: The engine never mutates these in place
//! - **Explicit freshness**: Replacing cash flows marks derived metrics stale
//!
//! ## Example
//!
//! ```rust
//! use capex_core::prelude::*;
//!
//! let project = Project::builder()
//!     .id("P-100")
//!     .name("Warehouse automation")
//!     .initial_capex(1_000_000.0)
//!     .risk_level(RiskLevel::Medium)
//!     .align_to("efficiency")
//!     .build()
//!     .unwrap();
//!
//! assert!(project.is_aligned_to(&PriorityId::new("efficiency")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod ids;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::ids::{PriorityId, ProjectId, ScenarioId};
    pub use crate::types::{
        CashFlow, MarketConditions, Priority, PriorityAdjustment, Project, ProjectBuilder,
        RiskLevel, Scenario, ScenarioAdjustments, ScenarioResults,
    };
}

pub use error::{CoreError, CoreResult};
pub use ids::{PriorityId, ProjectId, ScenarioId};
