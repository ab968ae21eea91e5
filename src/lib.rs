//! Life Sim Core - rule-resolution engine for a life simulator
//!
//! A life is simulated as yearly ticks over a data-defined catalog of talents
//! and events. Events are picked by weighted conditional selection and branch
//! recursively; talents are drawn in grade buckets and trigger once their
//! conditions hold against the life's state.
//!
//! ```
//! use life_sim_core::{random, AutoHandler, Catalog, Life, RuleConfig};
//!
//! # fn main() -> life_sim_core::Result<()> {
//! let catalog = Catalog::from_json(r#"{
//!     "talents": {"1": {"name": "Lucky"}, "2": {"name": "Tall"}, "3": {"name": "Calm"}},
//!     "events": {"10": {"event": "You lived a full life.", "effect": {"LIF": -1}}},
//!     "ages": {"0": {"events": [[10, 1]]}}
//! }"#)?;
//! let rules = RuleConfig::default();
//! let mut handler = AutoHandler::new(random::seeded(1), &rules);
//!
//! let mut life = Life::with_rules(&catalog, rules, random::seeded(2))?;
//! life.choose(&mut handler)?;
//! let years: Vec<_> = life.run()?.collect();
//! assert_eq!(years.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod condition;
pub mod config;
pub mod error;
pub mod event;
pub mod property;
pub mod random;
pub mod simulator;
pub mod talent;

pub use catalog::{Catalog, Event, EventId, Talent, TalentId, WeightedRef};
pub use condition::Condition;
pub use config::RuleConfig;
pub use error::{LifeError, Result, SelectionError};
pub use property::{LifeState, PropertyAllocation};
pub use random::RandomSource;
pub use simulator::{AutoHandler, Life, LifePhase, SelectionHandler, Years};
