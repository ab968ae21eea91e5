//! Immutable content catalogs
//!
//! Catalogs are compiled once from [`CatalogRecords`] and only ever read
//! afterwards; any number of lives may borrow the same [`Catalog`].

mod age;
mod event;
mod talent;

pub use age::*;
pub use event::*;
pub use talent::*;

use tracing::info;

use crate::config::CatalogRecords;
use crate::error::Result;

pub type TalentId = i32;
pub type EventId = i32;

/// Talents, events and ages of one content bundle
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub talents: TalentCatalog,
    pub events: EventCatalog,
    pub ages: AgeCatalog,
}

impl Catalog {
    /// Assemble already-built catalogs, checking that ages only reference known content
    pub fn new(talents: TalentCatalog, events: EventCatalog, ages: AgeCatalog) -> Result<Self> {
        ages.validate(&talents, &events)?;
        info!(
            talents = talents.len(),
            events = events.len(),
            ages = ages.len(),
            "catalog loaded"
        );
        Ok(Self {
            talents,
            events,
            ages,
        })
    }

    pub fn from_records(records: &CatalogRecords) -> Result<Self> {
        Self::new(
            TalentCatalog::from_records(&records.talents)?,
            EventCatalog::from_records(&records.events)?,
            AgeCatalog::from_records(&records.ages)?,
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_records(&CatalogRecords::from_json(json)?)
    }
}
