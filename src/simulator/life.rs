//! One simulated life: selection, yearly ticks, restart

use std::iter::FusedIterator;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Talent};
use crate::config::RuleConfig;
use crate::error::{LifeError, Result, SelectionError};
use crate::event::EventEngine;
use crate::property::LifeState;
use crate::random::RandomSource;
use crate::simulator::SelectionHandler;
use crate::talent::TalentEngine;

/// Where a life stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifePhase {
    /// Fresh state, waiting for [`Life::choose`]
    Created,
    /// Selection started but did not complete
    Selecting,
    /// Ready for, or in the middle of, the yearly ticks
    Running,
    Dead,
}

/// A single life over a shared catalog
pub struct Life<'c, R> {
    catalog: &'c Catalog,
    rules: RuleConfig,
    talents: TalentEngine<'c>,
    events: EventEngine<'c>,
    state: LifeState,
    phase: LifePhase,
    rng: R,
}

impl<'c, R: RandomSource> Life<'c, R> {
    pub fn new(catalog: &'c Catalog, rng: R) -> Result<Self> {
        Self::with_rules(catalog, RuleConfig::default(), rng)
    }

    pub fn with_rules(catalog: &'c Catalog, rules: RuleConfig, rng: R) -> Result<Self> {
        rules.validate()?;
        let talents = TalentEngine::new(&catalog.talents, &rules.grade_weights)?;
        let events = EventEngine::new(&catalog.events, rules.max_branch_depth);
        let state = LifeState::new(&rules);
        Ok(Self {
            catalog,
            rules,
            talents,
            events,
            state,
            phase: LifePhase::Created,
            rng,
        })
    }

    pub fn state(&self) -> &LifeState {
        &self.state
    }

    /// Direct access for hosts that script a life
    pub fn state_mut(&mut self) -> &mut LifeState {
        &mut self.state
    }

    pub fn phase(&self) -> LifePhase {
        self.phase
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Owned talents in acquisition order
    pub fn talents(&self) -> Vec<&'c Talent> {
        self.state
            .talents
            .iter()
            .filter_map(|&id| self.catalog.talents.get(id))
            .collect()
    }

    /// Run talent selection and point allocation through `handler`.
    ///
    /// Rejected answers go to [`SelectionHandler::on_error`] and are asked
    /// again, up to `max_retries` times per stage.
    pub fn choose<H: SelectionHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        self.expect_phase(LifePhase::Created, "choose")?;
        self.phase = LifePhase::Selecting;

        self.select_talents(handler)?;
        let bonus = self.talents.apply_stat_total(&mut self.state);
        debug!(bonus, total = self.state.total, "talent points applied");
        self.allocate_points(handler)?;

        self.phase = LifePhase::Running;
        info!(
            tms = self.state.tms,
            talents = ?self.state.talents,
            "life ready"
        );
        Ok(())
    }

    fn select_talents<H: SelectionHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let mut pool_size = self.rules.talent_pool;
        if let Some(id) = self.state.inherited {
            pool_size = pool_size.saturating_sub(1);
            match self.catalog.talents.get(id) {
                Some(talent) => {
                    self.talents.add(&mut self.state, talent);
                }
                None => warn!(talent = id, "inherited talent missing from catalog"),
            }
        }

        let mut pool = self.talents.generate(pool_size, &mut self.rng);
        pool.retain(|t| !self.state.owns(t.id));
        handler.begin_selection(&pool);

        let mut rejected = 0;
        while self.state.talents.len() < self.rules.talent_choose {
            if pool.is_empty() {
                warn!(
                    owned = self.state.talents.len(),
                    wanted = self.rules.talent_choose,
                    "talent pool exhausted"
                );
                break;
            }

            let picked = handler.choose_talent(&pool);
            let outcome = match pool.iter().position(|t| t.id == picked) {
                Some(pos) => self
                    .talents
                    .try_add(&mut self.state, pool[pos])
                    .map(|_| pos),
                None => Err(SelectionError::UnknownCandidate(picked)),
            };

            match outcome {
                Ok(pos) => {
                    pool.remove(pos);
                    debug!(talent = picked, "talent chosen");
                }
                Err(error) => reject(
                    handler,
                    &error,
                    "talent selection",
                    &mut rejected,
                    self.rules.max_retries,
                )?,
            }
        }
        Ok(())
    }

    fn allocate_points<H: SelectionHandler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let mut rejected = 0;
        loop {
            let allocation = handler.allocate(self.state.total);
            match allocation.validate(self.state.total, self.rules.max_allocation) {
                Ok(()) => {
                    self.state.apply_allocation(&allocation);
                    debug!(?allocation, "points allocated");
                    return Ok(());
                }
                Err(error) => reject(
                    handler,
                    &error,
                    "point allocation",
                    &mut rejected,
                    self.rules.max_retries,
                )?,
            }
        }
    }

    /// Lazily yield one year of text per step until the life ends
    pub fn run(&mut self) -> Result<Years<'_, 'c, R>> {
        match self.phase {
            LifePhase::Running | LifePhase::Dead => Ok(Years { life: self }),
            phase => Err(LifeError::Phase {
                action: "run",
                phase,
            }),
        }
    }

    /// Advance one year. `Ok(None)` once the life is over.
    ///
    /// The year starts with the status prefix, taken before any of the year's
    /// effects apply, followed by event lines and then talent lines.
    ///
    /// Talents are checked before the year's events run, so a talent gated on
    /// an event fires the year after that event.
    pub fn tick(&mut self) -> Result<Option<Vec<String>>> {
        match self.phase {
            LifePhase::Running => {}
            LifePhase::Dead => return Ok(None),
            phase => {
                return Err(LifeError::Phase {
                    action: "tick",
                    phase,
                })
            }
        }
        if self.state.is_end() {
            self.die();
            return Ok(None);
        }

        self.state.age += 1;
        let age = self.state.age;
        for &id in self.catalog.ages.talents_at(age) {
            if let Some(talent) = self.catalog.talents.get(id) {
                self.talents.add(&mut self.state, talent);
            }
        }

        let mut lines = vec![self.state.prefix()];
        let talent_lines = self.talents.update_triggered(&mut self.state, &mut self.rng);
        let pool = self.catalog.ages.events_at(age);
        let event_lines = self.events.run_events(pool, &mut self.state, &mut self.rng);
        lines.extend(event_lines);
        lines.extend(talent_lines);

        if self.state.is_end() {
            self.die();
        }
        Ok(Some(lines))
    }

    /// Start the next generation, optionally carrying one owned talent by position
    pub fn restart(&mut self, inherit: Option<usize>) -> Result<()> {
        let inherited = inherit
            .map(|index| {
                self.state
                    .talents
                    .get(index)
                    .copied()
                    .ok_or(LifeError::InheritOutOfRange {
                        index,
                        owned: self.state.talents.len(),
                    })
            })
            .transpose()?;

        self.state = self.state.next_generation(inherited, &self.rules);
        self.phase = LifePhase::Created;
        info!(tms = self.state.tms, ?inherited, "life restarted");
        Ok(())
    }

    fn die(&mut self) {
        self.phase = LifePhase::Dead;
        info!(age = self.state.age, tms = self.state.tms, "life ended");
    }

    fn expect_phase(&self, expected: LifePhase, action: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(LifeError::Phase {
                action,
                phase: self.phase,
            })
        }
    }
}

/// Report a rejected answer; fail once more than `max_retries` have piled up
fn reject<H: SelectionHandler + ?Sized>(
    handler: &mut H,
    error: &SelectionError,
    stage: &'static str,
    attempts: &mut usize,
    max_retries: usize,
) -> Result<()> {
    debug!(%error, stage, "selection rejected");
    handler.on_error(error);
    *attempts += 1;
    if *attempts > max_retries {
        warn!(stage, attempts = *attempts, "giving up on selection");
        return Err(LifeError::RetriesExhausted {
            stage,
            attempts: *attempts,
        });
    }
    Ok(())
}

/// Years of a running life; ends with the life and never resumes
pub struct Years<'l, 'c, R> {
    life: &'l mut Life<'c, R>,
}

impl<'l, 'c, R: RandomSource> Iterator for Years<'l, 'c, R> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.life.tick().ok().flatten()
    }
}

impl<'l, 'c, R: RandomSource> FusedIterator for Years<'l, 'c, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AgeCatalog, AgeEntry, Event, EventCatalog, TalentCatalog, WeightedRef};
    use crate::config::Effect;
    use crate::property::PropertyAllocation;
    use crate::random::seeded;
    use rand::rngs::StdRng;

    /// Handler answering from fixed scripts
    #[derive(Default)]
    struct Scripted {
        picks: Vec<i32>,
        allocations: Vec<PropertyAllocation>,
        errors: Vec<SelectionError>,
        offered: Vec<Vec<i32>>,
    }

    impl SelectionHandler for Scripted {
        fn choose_talent(&mut self, candidates: &[&Talent]) -> i32 {
            let mut ids: Vec<_> = candidates.iter().map(|t| t.id).collect();
            ids.sort_unstable();
            self.offered.push(ids);
            self.picks.remove(0)
        }

        fn allocate(&mut self, _available: i32) -> PropertyAllocation {
            self.allocations.remove(0)
        }

        fn on_error(&mut self, error: &SelectionError) {
            self.errors.push(error.clone());
        }
    }

    /// Four grade-0 talents; 1 and 2 are exclusive, 4 brings points
    fn catalog() -> Catalog {
        let talents = TalentCatalog::new([
            Talent::new(1, "A", 0).with_exclude([2]),
            Talent::new(2, "B", 0),
            Talent::new(3, "C", 0),
            Talent::new(4, "D", 0).with_points(2),
        ])
        .unwrap();
        let events = EventCatalog::new([
            Event::new(10, "born"),
            Event::new(11, "died").with_effect(Effect {
                lif: -1,
                ..Default::default()
            }),
        ])
        .unwrap();
        let ages = AgeCatalog::new([
            (
                0,
                AgeEntry {
                    talents: Vec::new(),
                    events: vec![WeightedRef::new(10, 1.0)],
                },
            ),
            (
                1,
                AgeEntry {
                    talents: Vec::new(),
                    events: vec![WeightedRef::new(11, 1.0)],
                },
            ),
        ]);
        Catalog::new(talents, events, ages).unwrap()
    }

    /// A pool of at least four always offers the whole catalog
    fn life(catalog: &Catalog, talent_pool: usize) -> Life<'_, StdRng> {
        let rules = RuleConfig {
            talent_pool,
            ..Default::default()
        };
        Life::with_rules(catalog, rules, seeded(0)).unwrap()
    }

    #[test]
    fn test_choose_retries_rejected_picks() {
        let catalog = catalog();
        let mut life = life(&catalog, 4);
        let mut handler = Scripted {
            picks: vec![1, 99, 2, 3, 4],
            allocations: vec![
                PropertyAllocation::new(10, 10, 2, 1),
                PropertyAllocation::new(10, 10, 1, 1),
            ],
            ..Default::default()
        };

        life.choose(&mut handler).unwrap();

        assert_eq!(life.state().talents.as_slice(), &[1, 3, 4]);
        assert_eq!(
            handler.errors,
            vec![
                SelectionError::UnknownCandidate(99),
                SelectionError::ExclusiveConflict {
                    candidate: 2,
                    owned: 1
                },
                SelectionError::InvalidAllocation {
                    expected: 22,
                    values: [10, 10, 2, 1]
                },
            ]
        );
        // Chosen talents leave the pool, rejected ones stay
        assert_eq!(handler.offered[0].len(), 4);
        assert_eq!(handler.offered[3], vec![2, 3, 4]);
        assert_eq!(handler.offered[4], vec![2, 4]);

        let state = life.state();
        assert_eq!((state.chr, state.int, state.str_, state.mny, state.spr), (10, 10, 1, 1, 5));
        assert_eq!(life.phase(), LifePhase::Running);
    }

    #[test]
    fn test_phase_misuse() {
        let catalog = catalog();
        let mut life = life(&catalog, 4);

        assert!(matches!(
            life.run(),
            Err(LifeError::Phase {
                action: "run",
                phase: LifePhase::Created
            })
        ));
        assert!(matches!(life.tick(), Err(LifeError::Phase { .. })));
    }

    #[test]
    fn test_retries_exhausted() {
        let catalog = catalog();
        let mut life = Life::with_rules(
            &catalog,
            RuleConfig {
                talent_pool: 4,
                max_retries: 2,
                ..Default::default()
            },
            seeded(0),
        )
        .unwrap();
        let mut handler = Scripted {
            picks: vec![7, 7, 7],
            ..Default::default()
        };

        assert!(matches!(
            life.choose(&mut handler),
            Err(LifeError::RetriesExhausted {
                stage: "talent selection",
                attempts: 3
            })
        ));
        assert_eq!(life.phase(), LifePhase::Selecting);
        assert!(matches!(life.choose(&mut handler), Err(LifeError::Phase { .. })));
    }

    #[test]
    fn test_years_until_death() {
        let catalog = catalog();
        let mut life = life(&catalog, 4);
        let mut handler = Scripted {
            picks: vec![3, 4, 1],
            allocations: vec![PropertyAllocation::new(10, 10, 1, 1)],
            ..Default::default()
        };
        life.choose(&mut handler).unwrap();

        let years: Vec<_> = life.run().unwrap().collect();
        assert_eq!(years.len(), 2);
        // Unconditional talents fire on the first tick, after the year's events
        assert_eq!(
            years[0],
            vec![
                "【0岁/颜10智10体1钱1乐5】",
                "born",
                "天赋【C】发动",
                "天赋【D】发动",
                "天赋【A】发动"
            ]
        );
        assert_eq!(years[1], vec!["【1岁/颜10智10体1钱1乐5】", "died"]);

        assert_eq!(life.phase(), LifePhase::Dead);
        assert_eq!(life.tick().unwrap(), None);
        assert_eq!(life.run().unwrap().next(), None);
    }

    #[test]
    fn test_zero_branch_depth_rejected() {
        let catalog = catalog();
        let rules = RuleConfig {
            max_branch_depth: 0,
            ..Default::default()
        };
        assert!(matches!(
            Life::with_rules(&catalog, rules, seeded(0)),
            Err(LifeError::InvalidRules(_))
        ));
    }

    #[test]
    fn test_event_gated_talent_fires_next_year() {
        let talents = TalentCatalog::new([
            Talent::new(1, "A", 0),
            Talent::new(2, "B", 0),
            Talent::new(3, "Omen-born", 0).with_condition("EVT?[10]".parse().unwrap()),
        ])
        .unwrap();
        let events = EventCatalog::new([
            Event::new(10, "omen"),
            Event::new(11, "died").with_effect(Effect {
                lif: -1,
                ..Default::default()
            }),
        ])
        .unwrap();
        let ages = AgeCatalog::new([
            (
                0,
                AgeEntry {
                    talents: Vec::new(),
                    events: vec![WeightedRef::new(10, 1.0)],
                },
            ),
            (
                1,
                AgeEntry {
                    talents: Vec::new(),
                    events: vec![WeightedRef::new(11, 1.0)],
                },
            ),
        ]);
        let catalog = Catalog::new(talents, events, ages).unwrap();
        let mut life = life(&catalog, 4);
        let mut handler = Scripted {
            picks: vec![1, 2, 3],
            allocations: vec![PropertyAllocation::new(10, 10, 0, 0)],
            ..Default::default()
        };
        life.choose(&mut handler).unwrap();

        let years: Vec<_> = life.run().unwrap().collect();
        assert_eq!(years.len(), 2);
        assert!(years[0].contains(&"omen".to_string()));
        assert!(!years[0].contains(&"天赋【Omen-born】发动".to_string()));
        assert_eq!(years[1].last().unwrap(), "天赋【Omen-born】发动");
    }

    #[test]
    fn test_restart_with_inheritance() {
        let catalog = catalog();
        let mut life = life(&catalog, 5);
        let mut handler = Scripted {
            picks: vec![3, 4, 1],
            allocations: vec![PropertyAllocation::new(10, 10, 1, 1)],
            ..Default::default()
        };
        life.choose(&mut handler).unwrap();
        life.run().unwrap().for_each(drop);

        assert!(matches!(
            life.restart(Some(3)),
            Err(LifeError::InheritOutOfRange { index: 3, owned: 3 })
        ));
        life.restart(Some(1)).unwrap();

        let state = life.state();
        assert_eq!(life.phase(), LifePhase::Created);
        assert_eq!(state.tms, 2);
        assert_eq!(state.age, -1);
        assert_eq!(state.inherited, Some(4));
        assert!(state.talents.is_empty());
        assert!(state.evt.is_empty() && state.tlt.is_empty());

        // The inherited talent is owned up front and left out of the pool
        let mut handler = Scripted {
            picks: vec![1, 3],
            allocations: vec![PropertyAllocation::new(10, 10, 2, 0)],
            ..Default::default()
        };
        life.choose(&mut handler).unwrap();
        assert_eq!(life.state().talents.as_slice(), &[4, 1, 3]);
        assert_eq!(handler.offered[0], vec![1, 2, 3]);
    }
}
