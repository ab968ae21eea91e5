//! Age record structures

use serde::Deserialize;

/// Age record for one year of life
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgeRecord {
    /// Talents granted on reaching this age
    #[serde(default)]
    pub talents: Vec<i32>,
    /// Event pool for this age: [(event_id, weight), ...]
    #[serde(default)]
    pub events: Vec<(i32, f64)>,
}
