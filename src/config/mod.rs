//! Configuration module for game data structures
//!
//! Record types mirror the content files one to one. They are compiled into
//! validated catalogs by [`crate::catalog`].

mod age;
mod effect;
mod event;
mod rules;
mod talent;

pub use age::*;
pub use effect::*;
pub use event::*;
pub use rules::*;
pub use talent::*;

use crate::error::{LifeError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Every record of a content bundle, keyed by string-encoded id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecords {
    #[serde(default)]
    pub talents: HashMap<String, TalentRecord>,
    #[serde(default)]
    pub events: HashMap<String, EventRecord>,
    #[serde(default)]
    pub ages: HashMap<String, AgeRecord>,
}

impl CatalogRecords {
    /// Parse `{"talents": {..}, "events": {..}, "ages": {..}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a map key into an integer id, checking it against the record's own id
pub(crate) fn parse_id(key: &str, declared: Option<i32>) -> Result<i32> {
    let id: i32 = key
        .trim()
        .parse()
        .map_err(|_| LifeError::InvalidId(key.to_string()))?;
    match declared {
        Some(declared) if declared != id => Err(LifeError::InvalidId(format!(
            "key {} does not match record id {}",
            key, declared
        ))),
        _ => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1001", None).unwrap(), 1001);
        assert_eq!(parse_id(" 7 ", Some(7)).unwrap(), 7);
        assert!(parse_id("abc", None).is_err());
        assert!(parse_id("1", Some(2)).is_err());
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"{
            "talents": {
                "1001": {"name": "Lucky", "description": "luck", "grade": 1, "status": 2,
                         "effect": {"MNY": 1}, "exclude": [1002]}
            },
            "events": {
                "10001": {"event": "Born.", "effect": {"LIF": -1},
                          "branch": [{"eventId": 10002, "weight": 2, "condition": "CHR>5"}]},
                "10002": {"event": "Pretty.", "postEvent": "Done."}
            },
            "ages": {"0": {"events": [[10001, 1.0]], "talents": [1001]}}
        }"#;
        let records = CatalogRecords::from_json(json).unwrap();

        let talent = &records.talents["1001"];
        assert_eq!(talent.points, 2);
        assert_eq!(talent.exclude, vec![1002]);
        assert_eq!(talent.effect.as_ref().unwrap().mny, 1);

        let event = &records.events["10001"];
        assert_eq!(event.branch[0].event_id, 10002);
        assert_eq!(event.branch[0].weight, 2.0);
        assert_eq!(records.events["10002"].post_event.as_deref(), Some("Done."));

        assert_eq!(records.ages["0"].events, vec![(10001, 1.0)]);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let records = CatalogRecords::from_json("{}").unwrap();
        assert!(records.talents.is_empty());
        assert!(records.events.is_empty());
        assert!(records.ages.is_empty());
    }
}
