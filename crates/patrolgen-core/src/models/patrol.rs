use std::collections::BTreeSet;
use std::rc::Rc;

use super::scout::Scout;
use crate::tables::{lookup_key, NameTables};

/// A patrol under construction.
///
/// Members are shared handles into the roster; a scout is never copied into
/// a patrol. Membership has set semantics and keeps insertion order. None of
/// the predicates below look beyond the patrol's own members.
#[derive(Debug, Clone, Default)]
pub struct Patrol {
    members: Vec<Rc<Scout>>,
}

impl Patrol {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the synthetic leaders patrol from the full, unfiltered roster
    pub fn leaders_patrol(all: &[Rc<Scout>], tables: &NameTables) -> Self {
        let mut patrol = Self::new();
        for scout in all.iter().filter(|s| tables.is_troop_leader(s)) {
            patrol.add(Rc::clone(scout));
        }
        patrol
    }

    /// Insert a member. No constraint checks happen here.
    pub fn add(&mut self, scout: Rc<Scout>) {
        if !self.contains(&scout) {
            self.members.push(scout);
        }
    }

    pub fn contains(&self, scout: &Scout) -> bool {
        self.members.iter().any(|m| **m == *scout)
    }

    pub fn members(&self) -> impl Iterator<Item = &Scout> {
        self.members.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Checks if the patrol already has a scout with the same last name
    pub fn has_related(&self, scout: &Scout) -> bool {
        self.members().any(|m| m.is_related(scout))
    }

    /// True when the patrol is empty or some member is within `max_delta`
    /// years of the candidate.
    pub fn has_compatible_age(&self, scout: &Scout, max_delta: u32) -> bool {
        self.is_empty() || self.members().any(|m| m.age().abs_diff(scout.age()) <= max_delta)
    }

    /// Average rank if `candidates` joined. `None` while the patrol is empty,
    /// since there is nothing to project from.
    pub fn projected_average_rank(&self, candidates: &[&Scout]) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let mut sum: f64 = self.members().map(|s| s.rank().weight()).sum();
        let mut count = self.len();
        for candidate in candidates.iter().filter(|c| !self.contains(c)) {
            sum += candidate.rank().weight();
            count += 1;
        }
        Some(sum / count as f64)
    }

    pub fn average_rank(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self.members().map(|s| s.rank().weight()).sum();
        Some(sum / self.len() as f64)
    }

    pub fn incompatible_names_for(&self, scout: &Scout, tables: &NameTables) -> BTreeSet<String> {
        tables.incompatible_with(scout)
    }

    /// Every name that may not join this patrol right now
    pub fn aggregate_incompatible_names(&self, tables: &NameTables) -> BTreeSet<String> {
        self.members()
            .flat_map(|m| self.incompatible_names_for(m, tables))
            .collect()
    }

    pub fn has_patrol_leader(&self, tables: &NameTables) -> bool {
        self.members().any(|m| tables.is_patrol_leader(m))
    }

    /// The member holding the patrol leader role, if any
    pub fn patrol_leader(&self, tables: &NameTables) -> Option<&Scout> {
        self.members().find(|m| tables.is_patrol_leader(m))
    }

    /// Member names in insertion order
    pub fn member_names(&self) -> Vec<String> {
        self.members().map(lookup_key).collect()
    }
}
