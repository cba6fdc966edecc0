//! Randomized patrol assignment.
//!
//! Scouts are drawn at random (with replacement) from a shrinking pool and
//! offered to patrols round-robin. A draw that violates any constraint of the
//! current patrol is skipped. Each attempt carries a stall budget of twice the
//! starting pool size that is spent on every iteration where the pool did not
//! shrink; when it runs out the attempt is abandoned and a fresh one starts
//! from scratch. After [`MAX_ATTEMPTS`] abandoned attempts the run reports
//! [`Outcome::Exhausted`] instead of patrols.

use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::AssignmentSettings;
use crate::error::Result;
use crate::models::{Patrol, Scout};
use crate::tables::{lookup_key, NameTables};

/// Global cap on placement attempts per run
pub const MAX_ATTEMPTS: usize = 20;

/// Stall budget per scout in the starting pool
const STALL_BUDGET_PER_SCOUT: usize = 2;

/// Step counters, summed over every attempt of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptStats {
    /// Iterations of the placement loop (each one draws a scout)
    pub steps: usize,
    /// Iterations that started without the pool having shrunk
    pub stalled_steps: usize,
}

impl AttemptStats {
    fn absorb(&mut self, other: AttemptStats) {
        self.steps += other.steps;
        self.stalled_steps += other.stalled_steps;
    }
}

/// A successful assignment.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Exactly `patrol_count` patrols, some possibly empty
    pub patrols: Vec<Patrol>,
    /// Troop leaders, drawn from the full roster
    pub leaders: Patrol,
    /// Attempts used, including the successful one
    pub attempts: usize,
    pub stats: AttemptStats,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Placed(Placement),
    /// Every attempt stalled out. Not an error: the constraints are too
    /// tight for this roster and the caller should loosen them or retry.
    Exhausted { attempts: usize, stats: AttemptStats },
}

impl Outcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Outcome::Placed(_))
    }

    pub fn attempts(&self) -> usize {
        match self {
            Outcome::Placed(placement) => placement.attempts,
            Outcome::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Why a draw was skipped for the current patrol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Related,
    AgeGap,
    RankBalance,
    Incompatible,
    SecondPatrolLeader,
}

enum Verdict {
    Accept,
    Reject(Rejection),
    /// Troop leaders leave the pool without joining a patrol
    Withdraw,
}

/// State of one placement attempt. Nothing here survives past the attempt.
struct Attempt {
    pool: Vec<Rc<Scout>>,
    patrols: Vec<Patrol>,
    next_patrol: usize,
    stall_budget: usize,
    last_pool_len: usize,
    stats: AttemptStats,
}

impl Attempt {
    fn new(roster: &[Rc<Scout>], patrol_count: usize) -> Self {
        let pool = roster.to_vec();
        let len = pool.len();
        Self {
            pool,
            patrols: vec![Patrol::new(); patrol_count],
            next_patrol: 0,
            stall_budget: STALL_BUDGET_PER_SCOUT * len,
            last_pool_len: len,
            stats: AttemptStats::default(),
        }
    }

    /// Spend stall budget when the pool has not shrunk since the previous
    /// iteration. Progress freezes the budget; it is never refilled.
    /// Returns false once the budget is gone.
    fn tick(&mut self) -> bool {
        self.stats.steps += 1;
        if self.pool.len() == self.last_pool_len {
            self.stats.stalled_steps += 1;
            self.stall_budget = self.stall_budget.saturating_sub(1);
        }
        self.last_pool_len = self.pool.len();
        self.stall_budget > 0
    }
}

/// Assigns a roster to patrols under the configured constraints.
pub struct PatrolBuilder<'a> {
    settings: &'a AssignmentSettings,
    tables: &'a NameTables,
}

impl<'a> PatrolBuilder<'a> {
    pub fn new(settings: &'a AssignmentSettings, tables: &'a NameTables) -> Self {
        Self { settings, tables }
    }

    /// Run up to [`MAX_ATTEMPTS`] attempts over `roster`.
    ///
    /// `roster` is expected to be deduplicated with inactive scouts already
    /// removed (see [`crate::roster::Roster`]). Fails only on invalid
    /// settings; infeasible constraints come back as `Outcome::Exhausted`.
    pub fn build<R: Rng + ?Sized>(&self, roster: &[Scout], rng: &mut R) -> Result<Outcome> {
        self.settings.validate()?;

        let everyone: Vec<Rc<Scout>> = roster.iter().cloned().map(Rc::new).collect();
        let leaders = Patrol::leaders_patrol(&everyone, self.tables);
        let mut stats = AttemptStats::default();

        for attempt in 1..=MAX_ATTEMPTS {
            let (patrols, attempt_stats) = self.attempt(&everyone, rng);
            stats.absorb(attempt_stats);

            match patrols {
                Some(patrols) => {
                    info!(
                        attempt,
                        patrols = patrols.len(),
                        scouts = everyone.len(),
                        steps = stats.steps,
                        "Patrols assigned"
                    );
                    return Ok(Outcome::Placed(Placement {
                        patrols,
                        leaders,
                        attempts: attempt,
                        stats,
                    }));
                }
                None => {
                    debug!(
                        attempt,
                        steps = attempt_stats.steps,
                        stalled = attempt_stats.stalled_steps,
                        "Attempt stalled, starting over"
                    );
                }
            }
        }

        warn!(
            attempts = MAX_ATTEMPTS,
            scouts = everyone.len(),
            patrol_count = self.settings.patrol_count,
            "Could not assign patrols with the current configuration"
        );
        Ok(Outcome::Exhausted {
            attempts: MAX_ATTEMPTS,
            stats,
        })
    }

    /// One attempt from empty patrols to either a drained pool or a stall.
    fn attempt<R: Rng + ?Sized>(
        &self,
        everyone: &[Rc<Scout>],
        rng: &mut R,
    ) -> (Option<Vec<Patrol>>, AttemptStats) {
        let mut state = Attempt::new(everyone, self.settings.patrol_count);

        while !state.pool.is_empty() {
            if !state.tick() {
                return (None, state.stats);
            }

            let index = rng.gen_range(0..state.pool.len());
            let drawn = Rc::clone(&state.pool[index]);

            match self.evaluate(&state.patrols[state.next_patrol], &drawn) {
                Verdict::Reject(reason) => {
                    debug!(
                        scout = %drawn,
                        patrol = state.next_patrol + 1,
                        ?reason,
                        "Draw rejected"
                    );
                }
                Verdict::Withdraw => {
                    state.pool.swap_remove(index);
                    debug!(scout = %drawn, "Troop leader withdrawn from pool");
                }
                Verdict::Accept => {
                    state.pool.swap_remove(index);
                    state.patrols[state.next_patrol].add(drawn);
                    state.next_patrol = (state.next_patrol + 1) % state.patrols.len();
                }
            }
        }

        (Some(state.patrols), state.stats)
    }

    /// Checks run in a fixed order and stop at the first failure.
    fn evaluate(&self, patrol: &Patrol, scout: &Scout) -> Verdict {
        if !self.settings.relation_allowed && patrol.has_related(scout) {
            return Verdict::Reject(Rejection::Related);
        }

        if !patrol.has_compatible_age(scout, self.settings.max_age_difference) {
            return Verdict::Reject(Rejection::AgeGap);
        }

        if let Some(projected) = patrol.projected_average_rank(&[scout]) {
            if (projected - self.settings.target_rank).abs() > self.settings.rank_threshold {
                return Verdict::Reject(Rejection::RankBalance);
            }
        }

        if patrol
            .aggregate_incompatible_names(self.tables)
            .contains(&lookup_key(scout))
        {
            return Verdict::Reject(Rejection::Incompatible);
        }

        if self.tables.is_troop_leader(scout) {
            return Verdict::Withdraw;
        }

        if self.tables.is_patrol_leader(scout) && patrol.has_patrol_leader(self.tables) {
            return Verdict::Reject(Rejection::SecondPatrolLeader);
        }

        Verdict::Accept
    }
}
