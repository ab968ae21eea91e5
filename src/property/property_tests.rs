//! Property tests for property module
//!
//! Property 1: Allocation validation law
//! Property 2: Owned talents never repeat
//! Property 3: Effects add up

use proptest::prelude::*;

use crate::config::Effect;
use crate::property::{LifeState, PropertyAllocation, Trait};
use crate::random::seeded;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate allocation proposals, including out-of-range values
fn allocation_strategy() -> impl Strategy<Value = PropertyAllocation> {
    (-3..=13i32, -3..=13i32, -3..=13i32, -3..=13i32)
        .prop_map(|(chr, int, str_, mny)| PropertyAllocation::new(chr, int, str_, mny))
}

/// Generate trait-only effects
fn effect_strategy() -> impl Strategy<Value = Effect> {
    (-5..=5i32, -5..=5i32, -5..=5i32, -5..=5i32, -5..=5i32).prop_map(
        |(chr, int, str_, mny, spr)| Effect {
            chr,
            int,
            str_,
            mny,
            spr,
            ..Default::default()
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property 1: a proposal validates iff all values are in [0, 10] and sum to the total
    #[test]
    fn prop_allocation_law(
        allocation in allocation_strategy(),
        total in -5..=45i32
    ) {
        let values = allocation.values();
        let expected = values.iter().all(|v| (0..=10).contains(v))
            && values.iter().sum::<i32>() == total.max(0);
        prop_assert_eq!(allocation.validate(total, 10).is_ok(), expected);
    }

    /// Property 2: adding any sequence of ids keeps the owned list free of duplicates
    #[test]
    fn prop_owned_talents_unique(
        ids in prop::collection::vec(1..=20i32, 0..=40)
    ) {
        let mut state = LifeState::default();
        for id in &ids {
            state.add_talent(*id);
        }

        let mut seen = std::collections::HashSet::new();
        for id in &state.talents {
            prop_assert!(seen.insert(*id), "talent {} owned twice", id);
        }
        for id in &ids {
            prop_assert!(state.owns(*id));
        }
    }

    /// Property 3: applying effects in sequence equals applying their sum
    #[test]
    fn prop_effects_accumulate(
        effects in prop::collection::vec(effect_strategy(), 1..=10)
    ) {
        let mut rng = seeded(0);
        let mut state = LifeState::default();
        for effect in &effects {
            state.apply_effect(effect, &mut rng);
        }

        let chr: i32 = effects.iter().map(|e| e.chr).sum();
        let spr: i32 = effects.iter().map(|e| e.spr).sum();
        prop_assert_eq!(state.trait_value(Trait::Chr), chr);
        prop_assert_eq!(state.trait_value(Trait::Spr), 5 + spr);
        prop_assert_eq!(state.lif, 1);
    }
}
