//! Host decision callbacks

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::{Talent, TalentId};
use crate::config::RuleConfig;
use crate::error::SelectionError;
use crate::property::PropertyAllocation;
use crate::random::RandomSource;

/// Decisions a life delegates to its host during selection.
///
/// Rejected answers are reported through [`on_error`](Self::on_error) and the
/// question is asked again.
pub trait SelectionHandler {
    /// A fresh candidate pool is about to be offered
    fn begin_selection(&mut self, _pool: &[&Talent]) {}

    /// Pick one of `candidates` by id
    fn choose_talent(&mut self, candidates: &[&Talent]) -> TalentId;

    /// Split `available` points over CHR, INT, STR and MNY
    fn allocate(&mut self, available: i32) -> PropertyAllocation;

    fn on_error(&mut self, error: &SelectionError) {
        debug!(%error, "selection answer rejected");
    }
}

/// Autoplay: random talents, random valid allocation
#[derive(Debug, Clone)]
pub struct AutoHandler<R> {
    rng: R,
    max_allocation: i32,
    /// Candidates refused for exclusivity in the current selection
    refused: AHashSet<TalentId>,
}

impl<R: RandomSource> AutoHandler<R> {
    pub fn new(rng: R, rules: &RuleConfig) -> Self {
        Self {
            rng,
            max_allocation: rules.max_allocation,
            refused: AHashSet::new(),
        }
    }
}

impl<R: RandomSource> SelectionHandler for AutoHandler<R> {
    fn begin_selection(&mut self, _pool: &[&Talent]) {
        self.refused.clear();
    }

    fn choose_talent(&mut self, candidates: &[&Talent]) -> TalentId {
        let open: Vec<&Talent> = candidates
            .iter()
            .copied()
            .filter(|t| !self.refused.contains(&t.id))
            .collect();
        let pick = open
            .choose(&mut self.rng)
            .or_else(|| candidates.first())
            .map_or(TalentId::default(), |t| t.id);
        debug!(talent = pick, open = open.len(), "autoplay picked talent");
        pick
    }

    fn allocate(&mut self, available: i32) -> PropertyAllocation {
        let max = self.max_allocation.max(0);
        let mut left = available.max(0);
        let mut values = [0i32; 4];

        for (slot, value) in values.iter_mut().enumerate() {
            let slots_after = (3 - slot) as i32;
            let lo = (left - max * slots_after).clamp(0, max);
            let hi = left.min(max).max(lo);
            *value = self.rng.gen_range(lo..=hi);
            left -= *value;
        }
        // Whatever is left could not fit under the cap; validation reports it
        values[3] += left;

        // Talent selection is over for this life
        self.refused.clear();
        PropertyAllocation::new(values[0], values[1], values[2], values[3])
    }

    fn on_error(&mut self, error: &SelectionError) {
        debug!(%error, "autoplay answer rejected");
        if let SelectionError::ExclusiveConflict { candidate, .. } = error {
            self.refused.insert(*candidate);
        }
    }
}
