//! Per-life mutable state

use ahash::AHashSet;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::catalog::{EventId, TalentId};
use crate::config::{Effect, RuleConfig};
use crate::property::Trait;
use crate::random::RandomSource;

/// Property state for one simulated life
#[derive(Debug, Clone)]
pub struct LifeState {
    pub chr: i32,  // 颜值 (Charm)
    pub int: i32,  // 智力 (Intelligence)
    pub str_: i32, // 体质 (Strength)
    pub mny: i32,  // 家境 (Wealth)
    pub spr: i32,  // 快乐 (Spirit)

    pub age: i32,
    /// Vitality; the life is over once it drops below 1
    pub lif: i32,
    /// Points still to be allocated
    pub total: i32,
    /// Generation counter
    pub tms: i32,

    /// Triggered talents
    pub tlt: AHashSet<TalentId>,
    /// Triggered events
    pub evt: AHashSet<EventId>,
    /// Owned talents in acquisition order, never duplicated
    pub talents: SmallVec<[TalentId; 4]>,
    /// Talent carried over from the previous life
    pub inherited: Option<TalentId>,
}

impl Default for LifeState {
    fn default() -> Self {
        Self::new(&RuleConfig::default())
    }
}

impl LifeState {
    pub fn new(rules: &RuleConfig) -> Self {
        Self {
            chr: 0,
            int: 0,
            str_: 0,
            mny: 0,
            spr: rules.initial_spirit,
            age: -1,
            lif: rules.initial_vitality,
            total: rules.initial_points,
            tms: 1,
            tlt: AHashSet::new(),
            evt: AHashSet::with_capacity(128),
            talents: SmallVec::new(),
            inherited: None,
        }
    }

    /// Fresh state for the next life, keeping only the generation count and inheritance
    pub fn next_generation(&self, inherited: Option<TalentId>, rules: &RuleConfig) -> Self {
        Self {
            tms: self.tms + 1,
            inherited,
            ..Self::new(rules)
        }
    }

    #[inline]
    pub fn trait_value(&self, t: Trait) -> i32 {
        match t {
            Trait::Chr => self.chr,
            Trait::Int => self.int,
            Trait::Str => self.str_,
            Trait::Mny => self.mny,
            Trait::Spr => self.spr,
        }
    }

    #[inline]
    pub fn trait_mut(&mut self, t: Trait) -> &mut i32 {
        match t {
            Trait::Chr => &mut self.chr,
            Trait::Int => &mut self.int,
            Trait::Str => &mut self.str_,
            Trait::Mny => &mut self.mny,
            Trait::Spr => &mut self.spr,
        }
    }

    /// Apply an effect; `RDM` lands on a trait drawn from `rng`
    pub fn apply_effect<R: RandomSource + ?Sized>(&mut self, effect: &Effect, rng: &mut R) {
        self.chr += effect.chr;
        self.int += effect.int;
        self.str_ += effect.str_;
        self.mny += effect.mny;
        self.spr += effect.spr;
        self.lif += effect.lif;
        self.age += effect.age;
        if effect.rdm != 0 {
            if let Some(&t) = Trait::ALL.choose(rng) {
                *self.trait_mut(t) += effect.rdm;
            }
        }
    }

    #[inline]
    pub fn owns(&self, id: TalentId) -> bool {
        self.talents.contains(&id)
    }

    /// Append an owned talent; returns false if it was already owned
    pub fn add_talent(&mut self, id: TalentId) -> bool {
        if self.owns(id) {
            return false;
        }
        self.talents.push(id);
        true
    }

    /// Check if the life has ended (LIF < 1)
    #[inline]
    pub fn is_end(&self) -> bool {
        self.lif < 1
    }

    /// Line opening every year of output
    pub fn prefix(&self) -> String {
        format!(
            "【{}岁/颜{}智{}体{}钱{}乐{}】",
            self.age, self.chr, self.int, self.str_, self.mny, self.spr
        )
    }
}
