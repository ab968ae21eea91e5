//! Weighted conditional event selection

use smallvec::SmallVec;
use tracing::trace;

use crate::catalog::{EventCatalog, EventId, WeightedRef};
use crate::condition::holds;
use crate::property::LifeState;
use crate::random::RandomSource;

/// A candidate is eligible when its own guard and its target event's condition both hold
#[inline]
fn is_eligible(candidate: &WeightedRef, events: &EventCatalog, state: &LifeState) -> bool {
    holds(candidate.condition.as_ref(), state)
        && events
            .get(candidate.target)
            .is_some_and(|event| event.check_condition(state))
}

/// Pick one target among `candidates` with probability proportional to weight.
///
/// Only eligible candidates take part, walked in list order. When none is
/// eligible the first candidate of the original list is returned whether or
/// not it is eligible. `None` only for an empty list.
pub fn resolve_weighted<R: RandomSource + ?Sized>(
    candidates: &[WeightedRef],
    events: &EventCatalog,
    state: &LifeState,
    rng: &mut R,
) -> Option<EventId> {
    let fallback = candidates.first()?.target;

    let eligible: SmallVec<[&WeightedRef; 8]> = candidates
        .iter()
        .filter(|c| is_eligible(c, events, state))
        .collect();
    let total: f64 = eligible.iter().map(|c| c.weight).sum();

    let mut remaining = rng.unit() * total;
    for candidate in &eligible {
        remaining -= candidate.weight;
        if remaining <= 0.0 {
            trace!(
                target = candidate.target,
                eligible = eligible.len(),
                "weighted candidate picked"
            );
            return Some(candidate.target);
        }
    }

    trace!(target = fallback, "no eligible candidate, using first");
    Some(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Event;
    use crate::random::seeded;

    fn catalog() -> EventCatalog {
        EventCatalog::new([
            Event::new(1, "one"),
            Event::new(2, "two").with_include("CHR>5".parse().unwrap()),
            Event::new(3, "three").with_exclude("EVT?[1]".parse().unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_candidates() {
        let events = catalog();
        let state = LifeState::default();
        assert_eq!(resolve_weighted(&[], &events, &state, &mut seeded(0)), None);
    }

    #[test]
    fn test_single_eligible() {
        let events = catalog();
        let state = LifeState::default();
        let candidates = [WeightedRef::new(2, 100.0), WeightedRef::new(1, 0.5)];
        for seed in 0..50 {
            assert_eq!(
                resolve_weighted(&candidates, &events, &state, &mut seeded(seed)),
                Some(1)
            );
        }
    }

    #[test]
    fn test_fallback_to_first_original() {
        let events = catalog();
        let mut state = LifeState::default();
        state.evt.insert(1);
        // Neither 2 (CHR too low) nor 3 (excluded by EVT) is eligible
        let candidates = [WeightedRef::new(2, 1.0), WeightedRef::new(3, 1.0)];
        assert_eq!(
            resolve_weighted(&candidates, &events, &state, &mut seeded(9)),
            Some(2)
        );
    }

    #[test]
    fn test_zero_weights_pick_first_eligible() {
        let events = catalog();
        let state = LifeState::default();
        let candidates = [
            WeightedRef::new(2, 0.0),
            WeightedRef::new(3, 0.0),
            WeightedRef::new(1, 0.0),
        ];
        for seed in 0..20 {
            assert_eq!(
                resolve_weighted(&candidates, &events, &state, &mut seeded(seed)),
                Some(3)
            );
        }
    }

    #[test]
    fn test_ref_guard() {
        let events = catalog();
        let state = LifeState::default();
        let candidates = [
            WeightedRef::new(1, 1.0).with_condition("AGE>10".parse().unwrap()),
            WeightedRef::new(3, 1.0),
        ];
        for seed in 0..20 {
            assert_eq!(
                resolve_weighted(&candidates, &events, &state, &mut seeded(seed)),
                Some(3)
            );
        }
    }

    #[test]
    fn test_weighted_distribution() {
        let events = catalog();
        let state = LifeState::default();
        let candidates = [WeightedRef::new(1, 1.0), WeightedRef::new(3, 3.0)];
        let mut rng = seeded(42);
        let mut ones = 0;

        for _ in 0..4000 {
            if resolve_weighted(&candidates, &events, &state, &mut rng) == Some(1) {
                ones += 1;
            }
        }

        // Expect about a quarter
        assert!((800..1200).contains(&ones), "picked event 1 {} times", ones);
    }
}
