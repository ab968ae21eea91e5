//! Event record structures

use serde::Deserialize;

use super::Effect;

/// Event record as it appears in a content file
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    /// Must match the map key when present
    pub id: Option<i32>,
    pub event: String,
    #[serde(default)]
    pub grade: i32,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub effect: Option<Effect>,
    #[serde(default)]
    pub branch: Vec<BranchRecord>,
    #[serde(alias = "postEvent")]
    pub post_event: Option<String>,
}

/// Weighted follow-on reference
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRecord {
    #[serde(alias = "eventId")]
    pub event_id: i32,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub condition: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}
