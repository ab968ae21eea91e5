//! Talent record structures

use serde::Deserialize;

use super::Effect;

/// Talent record as it appears in a content file
#[derive(Debug, Clone, Deserialize)]
pub struct TalentRecord {
    /// Must match the map key when present
    pub id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub grade: i32,
    /// Bonus (or malus) to the points available for allocation
    #[serde(default, alias = "status")]
    pub points: i32,
    pub condition: Option<String>,
    pub effect: Option<Effect>,
    #[serde(default)]
    pub exclude: Vec<i32>,
}
