//! Grade-bucketed talent catalog

use std::collections::HashMap;

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::catalog::TalentId;
use crate::condition::{holds, Condition};
use crate::config::{parse_id, Effect, TalentRecord};
use crate::error::{LifeError, Result};
use crate::property::LifeState;

/// Number of rarity tiers; grade 0 is the most common
pub const GRADE_COUNT: usize = 4;

/// Talent definition
#[derive(Debug, Clone)]
pub struct Talent {
    pub id: TalentId,
    pub name: String,
    pub description: String,
    pub grade: usize,
    /// Contribution to the points available for allocation
    pub points: i32,
    /// Applied once, when the talent triggers
    pub effect: Effect,
    pub exclude: SmallVec<[TalentId; 2]>,
    /// Trigger condition; absent means "on the first tick"
    pub condition: Option<Condition>,
}

impl Talent {
    pub fn new(id: TalentId, name: impl Into<String>, grade: usize) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            grade,
            points: 0,
            effect: Effect::default(),
            exclude: SmallVec::new(),
            condition: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_exclude(mut self, ids: impl IntoIterator<Item = TalentId>) -> Self {
        self.exclude.extend(ids);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    fn from_record(id: TalentId, record: &TalentRecord) -> Result<Self> {
        if !(0..GRADE_COUNT as i32).contains(&record.grade) {
            return Err(LifeError::InvalidGrade {
                id,
                grade: record.grade,
            });
        }
        Ok(Self {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            grade: record.grade as usize,
            points: record.points,
            effect: record.effect.clone().unwrap_or_default(),
            exclude: record.exclude.iter().copied().collect(),
            condition: Condition::parse_optional(record.condition.as_deref())?,
        })
    }

    /// Mutual exclusion holds if either side lists the other
    pub fn is_exclusive_with(&self, other: &Talent) -> bool {
        self.exclude.contains(&other.id) || other.exclude.contains(&self.id)
    }

    /// Effect rule: the line this talent emits when it triggers against `state`
    pub fn effect_line(&self, state: &LifeState) -> Option<String> {
        if !holds(self.condition.as_ref(), state) {
            return None;
        }
        Some(if self.description.is_empty() {
            format!("天赋【{}】发动", self.name)
        } else {
            format!("天赋【{}】发动：{}", self.name, self.description)
        })
    }
}

/// Static talent catalog, bucketed by grade
#[derive(Debug, Clone, Default)]
pub struct TalentCatalog {
    /// Each bucket sorted by id, so sampling is reproducible under a seed
    buckets: [Vec<Talent>; GRADE_COUNT],
    index: AHashMap<TalentId, (usize, usize)>,
}

impl TalentCatalog {
    pub fn new(talents: impl IntoIterator<Item = Talent>) -> Result<Self> {
        let mut buckets: [Vec<Talent>; GRADE_COUNT] = Default::default();
        for talent in talents {
            if talent.grade >= GRADE_COUNT {
                return Err(LifeError::InvalidGrade {
                    id: talent.id,
                    grade: talent.grade as i32,
                });
            }
            buckets[talent.grade].push(talent);
        }

        let mut index = AHashMap::new();
        for (grade, bucket) in buckets.iter_mut().enumerate() {
            bucket.sort_by_key(|t| t.id);
            for (pos, talent) in bucket.iter().enumerate() {
                if index.insert(talent.id, (grade, pos)).is_some() {
                    return Err(LifeError::InvalidId(format!(
                        "duplicate talent id {}",
                        talent.id
                    )));
                }
            }
        }

        debug!(
            talents = index.len(),
            grade0 = buckets[0].len(),
            grade1 = buckets[1].len(),
            grade2 = buckets[2].len(),
            grade3 = buckets[3].len(),
            "talent catalog built"
        );
        Ok(Self { buckets, index })
    }

    pub fn from_records(records: &HashMap<String, TalentRecord>) -> Result<Self> {
        let talents = records
            .iter()
            .map(|(key, record)| Talent::from_record(parse_id(key, record.id)?, record))
            .collect::<Result<Vec<_>>>()?;
        Self::new(talents)
    }

    pub fn get(&self, id: TalentId) -> Option<&Talent> {
        let &(grade, pos) = self.index.get(&id)?;
        self.buckets[grade].get(pos)
    }

    pub fn contains(&self, id: TalentId) -> bool {
        self.index.contains_key(&id)
    }

    /// All talents of one grade, ordered by id
    pub fn bucket(&self, grade: usize) -> &[Talent] {
        self.buckets.get(grade).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
