//! Event catalog with weighted branch references

use std::collections::HashMap;

use ahash::AHashMap;
use tracing::debug;

use crate::catalog::EventId;
use crate::condition::{holds, Condition};
use crate::config::{parse_id, BranchRecord, Effect, EventRecord};
use crate::error::{LifeError, Result};
use crate::property::LifeState;

/// Weighted reference to an event, optionally guarded by its own condition
#[derive(Debug, Clone)]
pub struct WeightedRef {
    pub target: EventId,
    pub weight: f64,
    pub condition: Option<Condition>,
}

impl WeightedRef {
    pub fn new(target: EventId, weight: f64) -> Self {
        Self {
            target,
            weight,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    fn from_record(record: &BranchRecord) -> Result<Self> {
        Ok(Self {
            target: record.event_id,
            weight: record.weight,
            condition: Condition::parse_optional(record.condition.as_deref())?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.weight.is_finite() && self.weight >= 0.0 {
            Ok(())
        } else {
            Err(LifeError::InvalidWeight {
                target: self.target,
                weight: self.weight,
            })
        }
    }
}

/// Event definition
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub text: String,
    pub grade: i32,
    pub include: Option<Condition>,
    pub exclude: Option<Condition>,
    pub effect: Effect,
    /// Emitted after `text` when the event has no branches
    pub post_text: Option<String>,
    pub branches: Vec<WeightedRef>,
}

impl Event {
    pub fn new(id: EventId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            grade: 0,
            include: None,
            exclude: None,
            effect: Effect::default(),
            post_text: None,
            branches: Vec::new(),
        }
    }

    pub fn with_include(mut self, condition: Condition) -> Self {
        self.include = Some(condition);
        self
    }

    pub fn with_exclude(mut self, condition: Condition) -> Self {
        self.exclude = Some(condition);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_post_text(mut self, text: impl Into<String>) -> Self {
        self.post_text = Some(text.into());
        self
    }

    pub fn with_branches(mut self, branches: impl IntoIterator<Item = WeightedRef>) -> Self {
        self.branches.extend(branches);
        self
    }

    fn from_record(id: EventId, record: &EventRecord) -> Result<Self> {
        Ok(Self {
            id,
            text: record.event.clone(),
            grade: record.grade,
            include: Condition::parse_optional(record.include.as_deref())?,
            exclude: Condition::parse_optional(record.exclude.as_deref())?,
            effect: record.effect.clone().unwrap_or_default(),
            post_text: record.post_event.clone(),
            branches: record
                .branch
                .iter()
                .map(WeightedRef::from_record)
                .collect::<Result<_>>()?,
        })
    }

    /// Holds iff `include` holds (or is absent) and `exclude` does not
    pub fn check_condition(&self, state: &LifeState) -> bool {
        holds(self.include.as_ref(), state)
            && !self.exclude.as_ref().is_some_and(|c| c.check(state))
    }
}

/// Static event catalog
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: AHashMap<EventId, Event>,
}

impl EventCatalog {
    /// Build the catalog; every branch must point at an event in the same catalog
    pub fn new(events: impl IntoIterator<Item = Event>) -> Result<Self> {
        let mut map = AHashMap::new();
        for event in events {
            let id = event.id;
            if map.insert(id, event).is_some() {
                return Err(LifeError::InvalidId(format!("duplicate event id {}", id)));
            }
        }

        for event in map.values() {
            for branch in &event.branches {
                branch.validate()?;
                if !map.contains_key(&branch.target) {
                    return Err(LifeError::UnresolvedBranch {
                        event: event.id,
                        target: branch.target,
                    });
                }
            }
        }

        debug!(events = map.len(), "event catalog built");
        Ok(Self { events: map })
    }

    pub fn from_records(records: &HashMap<String, EventRecord>) -> Result<Self> {
        let events = records
            .iter()
            .map(|(key, record)| Event::from_record(parse_id(key, record.id)?, record))
            .collect::<Result<Vec<_>>>()?;
        Self::new(events)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.events.contains_key(&id)
    }

    /// Check that a weighted reference from outside the catalog resolves
    pub(crate) fn validate_ref(&self, weighted: &WeightedRef) -> Result<()> {
        weighted.validate()?;
        if self.contains(weighted.target) {
            Ok(())
        } else {
            Err(LifeError::UnknownEvent(weighted.target))
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
