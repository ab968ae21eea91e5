//! Attribute deltas carried by talents and events

use serde::Deserialize;

/// Effect on properties, keyed the way content files key it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Effect {
    #[serde(default, rename = "CHR")]
    pub chr: i32,
    #[serde(default, rename = "INT")]
    pub int: i32,
    #[serde(default, rename = "STR")]
    pub str_: i32,
    #[serde(default, rename = "MNY")]
    pub mny: i32,
    #[serde(default, rename = "SPR")]
    pub spr: i32,
    #[serde(default, rename = "LIF")]
    pub lif: i32,
    #[serde(default, rename = "AGE")]
    pub age: i32,
    /// Applied to one of the five traits, picked at random
    #[serde(default, rename = "RDM")]
    pub rdm: i32,
}

impl Effect {
    pub fn is_empty(&self) -> bool {
        *self == Effect::default()
    }
}
