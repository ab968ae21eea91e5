//! Event chain execution

use tracing::{debug, warn};

use crate::catalog::{EventCatalog, EventId, WeightedRef};
use crate::event::resolve_weighted;
use crate::property::LifeState;
use crate::random::RandomSource;

/// Runs events and follows their branches against a life's state
#[derive(Debug, Clone, Copy)]
pub struct EventEngine<'c> {
    catalog: &'c EventCatalog,
    max_depth: usize,
}

impl<'c> EventEngine<'c> {
    /// `max_depth` bounds how many events one chain may run
    pub fn new(catalog: &'c EventCatalog, max_depth: usize) -> Self {
        Self { catalog, max_depth }
    }

    pub fn catalog(&self) -> &'c EventCatalog {
        self.catalog
    }

    /// Run one event and the branch chain below it, returning the emitted lines.
    ///
    /// The event is recorded as triggered and its effect applied before its
    /// branches are resolved, so branch conditions see both.
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        event_id: EventId,
        state: &mut LifeState,
        rng: &mut R,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        self.run_chain(event_id, state, rng, 0, &mut lines);
        lines
    }

    /// Resolve one event out of a weighted pool and run it; an empty pool yields nothing
    pub fn run_events<R: RandomSource + ?Sized>(
        &self,
        candidates: &[WeightedRef],
        state: &mut LifeState,
        rng: &mut R,
    ) -> Vec<String> {
        match resolve_weighted(candidates, self.catalog, state, rng) {
            Some(event_id) => self.run(event_id, state, rng),
            None => Vec::new(),
        }
    }

    fn run_chain<R: RandomSource + ?Sized>(
        &self,
        event_id: EventId,
        state: &mut LifeState,
        rng: &mut R,
        depth: usize,
        lines: &mut Vec<String>,
    ) {
        if depth >= self.max_depth {
            warn!(
                event = event_id,
                depth, "event chain reached the depth limit, stopping"
            );
            return;
        }
        let Some(event) = self.catalog.get(event_id) else {
            warn!(event = event_id, "skipping unknown event");
            return;
        };

        debug!(event = event.id, depth, age = state.age, "running event");
        state.evt.insert(event.id);
        state.apply_effect(&event.effect, rng);
        lines.push(event.text.clone());

        if event.branches.is_empty() {
            lines.extend(event.post_text.iter().cloned());
        } else if let Some(next) = resolve_weighted(&event.branches, self.catalog, state, rng) {
            self.run_chain(next, state, rng, depth + 1, lines);
        }
    }
}
