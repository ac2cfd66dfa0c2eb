//! Scenario stress testing.
//!
//! This module provides:
//! - The scenario transform over projects and priorities
//! - Scenario evaluation against a budget, with NPV change versus baseline
//! - Stock stress presets
//!
//! Every function returns new records; the baseline passed in is never
//! modified.

mod impact;
mod scenarios;
mod transform;

pub use impact::*;
pub use scenarios::*;
pub use transform::*;
