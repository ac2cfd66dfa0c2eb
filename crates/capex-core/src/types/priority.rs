//! Strategic priorities projects are scored against.

use serde::{Deserialize, Serialize};

use crate::ids::PriorityId;

/// A weighted strategic priority.
///
/// Across a priority set the weights are expected to sum to 100; the
/// engine tolerates sets that do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priority {
    /// Priority identifier.
    pub id: PriorityId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Relative weight, 0-100.
    pub weight: f64,
    /// Minimum alignment score (0-100) a project needs on this priority.
    #[serde(default)]
    pub min_threshold: f64,
    /// Informational lower budget bound.
    #[serde(default)]
    pub budget_min: f64,
    /// Informational upper budget bound.
    #[serde(default)]
    pub budget_max: f64,
}

impl Priority {
    /// Creates a priority with no description and no budget range.
    #[must_use]
    pub fn new(
        id: impl Into<PriorityId>,
        name: impl Into<String>,
        weight: f64,
        min_threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            weight,
            min_threshold,
            budget_min: 0.0,
            budget_max: 0.0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the informational budget range.
    #[must_use]
    pub fn with_budget_range(mut self, min: f64, max: f64) -> Self {
        self.budget_min = min;
        self.budget_max = max;
        self
    }

    /// Sum of weights across a priority set.
    #[must_use]
    pub fn total_weight(priorities: &[Priority]) -> f64 {
        priorities.iter().map(|p| p.weight).sum()
    }
}
