//! Tunable rules of a life

use serde::Deserialize;

use crate::error::{LifeError, Result};

/// Rule constants, overridable from JSON
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Candidates offered during talent selection
    pub talent_pool: usize,
    /// Talents owned when selection completes
    pub talent_choose: usize,
    /// Upper bound of a single trait allocation
    pub max_allocation: i32,
    pub initial_points: i32,
    pub initial_spirit: i32,
    pub initial_vitality: i32,
    /// Probability of drawing grade 0..=3
    pub grade_weights: [f64; 4],
    /// Deepest branch chain followed before giving up
    pub max_branch_depth: usize,
    /// Rejected proposals tolerated per selection stage
    pub max_retries: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            talent_pool: 10,
            talent_choose: 3,
            max_allocation: 10,
            initial_points: 20,
            initial_spirit: 5,
            initial_vitality: 1,
            grade_weights: [0.889, 0.1, 0.01, 0.001],
            max_branch_depth: 64,
            max_retries: 1000,
        }
    }
}

impl RuleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject rules no life could run under
    pub fn validate(&self) -> Result<()> {
        if self.max_branch_depth == 0 {
            return Err(LifeError::InvalidRules(
                "max_branch_depth must allow at least the root event".to_string(),
            ));
        }
        Ok(())
    }
}
