//! Per-age talent grants and event pools

use std::collections::HashMap;

use ahash::AHashMap;

use crate::catalog::{EventCatalog, TalentCatalog, TalentId, WeightedRef};
use crate::config::{parse_id, AgeRecord};
use crate::error::{LifeError, Result};

/// What a given age brings
#[derive(Debug, Clone, Default)]
pub struct AgeEntry {
    pub talents: Vec<TalentId>,
    pub events: Vec<WeightedRef>,
}

impl AgeEntry {
    fn from_record(record: &AgeRecord) -> Self {
        Self {
            talents: record.talents.clone(),
            events: record
                .events
                .iter()
                .map(|&(id, weight)| WeightedRef::new(id, weight))
                .collect(),
        }
    }
}

/// Static age catalog
#[derive(Debug, Clone, Default)]
pub struct AgeCatalog {
    ages: AHashMap<i32, AgeEntry>,
}

impl AgeCatalog {
    pub fn new(entries: impl IntoIterator<Item = (i32, AgeEntry)>) -> Self {
        Self {
            ages: entries.into_iter().collect(),
        }
    }

    pub fn from_records(records: &HashMap<String, AgeRecord>) -> Result<Self> {
        let entries = records
            .iter()
            .map(|(key, record)| Ok((parse_id(key, None)?, AgeEntry::from_record(record))))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    /// Every granted talent and every pooled event must exist
    pub fn validate(&self, talents: &TalentCatalog, events: &EventCatalog) -> Result<()> {
        for entry in self.ages.values() {
            if let Some(&missing) = entry.talents.iter().find(|&&id| !talents.contains(id)) {
                return Err(LifeError::UnknownTalent(missing));
            }
            for weighted in &entry.events {
                events.validate_ref(weighted)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, age: i32) -> Option<&AgeEntry> {
        self.ages.get(&age)
    }

    pub fn talents_at(&self, age: i32) -> &[TalentId] {
        self.get(age).map(|e| e.talents.as_slice()).unwrap_or_default()
    }

    pub fn events_at(&self, age: i32) -> &[WeightedRef] {
        self.get(age).map(|e| e.events.as_slice()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }
}
