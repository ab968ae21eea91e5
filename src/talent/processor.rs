//! Talent generation, ownership and triggering

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::catalog::{Talent, TalentCatalog, TalentId, GRADE_COUNT};
use crate::error::{LifeError, Result, SelectionError};
use crate::property::LifeState;
use crate::random::RandomSource;
use crate::talent::check_exclusion;

/// Talent engine over a shared catalog; all per-life data lives in [`LifeState`]
#[derive(Debug, Clone)]
pub struct TalentEngine<'c> {
    catalog: &'c TalentCatalog,
    grades: WeightedIndex<f64>,
}

impl<'c> TalentEngine<'c> {
    pub fn new(catalog: &'c TalentCatalog, grade_weights: &[f64; GRADE_COUNT]) -> Result<Self> {
        let grades = WeightedIndex::new(grade_weights.iter().copied()).map_err(|err| {
            LifeError::InvalidRules(format!("grade weights {:?}: {}", grade_weights, err))
        })?;
        Ok(Self { catalog, grades })
    }

    pub fn catalog(&self) -> &'c TalentCatalog {
        self.catalog
    }

    /// Draw `count` distinct talents, highest grade first.
    ///
    /// Grades are drawn independently; when a grade's bucket is too small the
    /// shortfall rolls over to the next lower grade before sampling.
    pub fn generate<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&'c Talent> {
        let mut counts = [0usize; GRADE_COUNT];
        for _ in 0..count {
            counts[self.grades.sample(rng)] += 1;
        }

        let mut result = Vec::with_capacity(count);
        for grade in (0..GRADE_COUNT).rev() {
            let bucket = self.catalog.bucket(grade);
            let mut wanted = counts[grade];
            if wanted > bucket.len() {
                let deficit = wanted - bucket.len();
                if grade > 0 {
                    counts[grade - 1] += deficit;
                } else {
                    debug!(deficit, "not enough talents to fill the pool");
                }
                wanted = bucket.len();
            }
            result.extend(bucket.choose_multiple(rng, wanted));
        }

        trace!(?counts, generated = result.len(), "talents generated");
        result
    }

    /// Append to the owned list; duplicates are a no-op
    pub fn add(&self, state: &mut LifeState, talent: &Talent) -> bool {
        state.add_talent(talent.id)
    }

    /// Add unless it conflicts with an owned talent; owned talents are untouched on failure
    pub fn try_add(
        &self,
        state: &mut LifeState,
        talent: &Talent,
    ) -> std::result::Result<bool, SelectionError> {
        if let Some(owned) = self.check_exclusion(talent, &state.talents) {
            return Err(SelectionError::ExclusiveConflict {
                candidate: talent.id,
                owned,
            });
        }
        Ok(self.add(state, talent))
    }

    /// First owned talent that cannot coexist with `candidate`
    pub fn check_exclusion(&self, candidate: &Talent, owned: &[TalentId]) -> Option<TalentId> {
        check_exclusion(candidate, owned, self.catalog)
    }

    /// Trigger every owned talent whose effect rule fires now.
    ///
    /// A talent whose rule yields nothing stays untriggered and is retried next tick.
    pub fn update_triggered<R: RandomSource + ?Sized>(
        &self,
        state: &mut LifeState,
        rng: &mut R,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let owned = state.talents.clone();

        for id in owned {
            if state.tlt.contains(&id) {
                continue;
            }
            let Some(talent) = self.catalog.get(id) else {
                continue;
            };
            if let Some(line) = talent.effect_line(state) {
                state.tlt.insert(id);
                state.apply_effect(&talent.effect, rng);
                trace!(talent = id, age = state.age, "talent triggered");
                lines.push(line);
            }
        }

        lines
    }

    /// Add the owned talents' points to the unallocated total; returns the bonus
    pub fn apply_stat_total(&self, state: &mut LifeState) -> i32 {
        let bonus: i32 = state
            .talents
            .iter()
            .filter_map(|&id| self.catalog.get(id))
            .map(|t| t.points)
            .sum();
        state.total += bonus;
        bonus
    }
}
