//! Name-keyed lookup tables supplied by the troop's configuration.
//!
//! Every table is keyed by a scout's display name exactly as written
//! (case and spacing sensitive). All lookups go through [`lookup_key`], so
//! switching to a stable identifier only touches that function.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::Scout;

/// The join key used for all table lookups.
pub fn lookup_key(scout: &Scout) -> String {
    scout.name()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameTables {
    /// Names that must not share a patrol. A pair only needs to be declared
    /// once; lookups treat it as symmetric.
    #[serde(default)]
    pub incompatible: BTreeMap<String, BTreeSet<String>>,
    /// Scouts on the roster who should not be placed at all.
    #[serde(default)]
    pub inactive: BTreeSet<String>,
    /// Troop-level leaders: kept out of numbered patrols entirely.
    #[serde(default)]
    pub troop_leaders: BTreeSet<String>,
    /// Patrol leaders: at most one per patrol.
    #[serde(default)]
    pub patrol_leaders: BTreeSet<String>,
}

impl NameTables {
    /// Names that may not share a patrol with `scout`, looked up both as a
    /// key and as a member of any value set.
    pub fn incompatible_with(&self, scout: &Scout) -> BTreeSet<String> {
        let key = lookup_key(scout);
        let mut names = BTreeSet::new();
        for (main, others) in &self.incompatible {
            if *main == key {
                names.extend(others.iter().cloned());
            }
            if others.contains(&key) {
                names.insert(main.clone());
            }
        }
        names
    }

    pub fn is_inactive(&self, scout: &Scout) -> bool {
        self.inactive.contains(&lookup_key(scout))
    }

    pub fn is_troop_leader(&self, scout: &Scout) -> bool {
        self.troop_leaders.contains(&lookup_key(scout))
    }

    pub fn is_patrol_leader(&self, scout: &Scout) -> bool {
        self.patrol_leaders.contains(&lookup_key(scout))
    }

    /// Add a mutually exclusive pair
    pub fn add_incompatible(&mut self, a: &str, b: &str) {
        self.incompatible
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rank;

    fn scout(first: &str, last: &str) -> Scout {
        Scout::new(first, None, last, 12, Rank::Scout)
    }

    #[test]
    fn test_incompatible_lookup_is_bidirectional() {
        let mut tables = NameTables::default();
        tables.add_incompatible("Alex Abadeer", "Ben Youakim");
        tables.add_incompatible("Alex Abadeer", "Carl Kozman");

        let alex = scout("Alex", "Abadeer");
        let ben = scout("Ben", "Youakim");
        let carl = scout("Carl", "Kozman");
        let dan = scout("Dan", "Morgan");

        let for_alex = tables.incompatible_with(&alex);
        assert!(for_alex.contains("Ben Youakim"));
        assert!(for_alex.contains("Carl Kozman"));

        let for_ben = tables.incompatible_with(&ben);
        assert_eq!(for_ben.len(), 1);
        assert!(for_ben.contains("Alex Abadeer"));

        assert!(tables.incompatible_with(&carl).contains("Alex Abadeer"));
        assert!(tables.incompatible_with(&dan).is_empty());
    }

    #[test]
    fn test_lookups_are_case_sensitive_on_display_name() {
        let mut tables = NameTables::default();
        tables.troop_leaders.insert("John Wasily".to_string());
        tables.patrol_leaders.insert("Chris S Kozman".to_string());
        tables.inactive.insert("Paul Hanna".to_string());

        assert!(tables.is_troop_leader(&scout("JOHN", "WASILY")));
        assert!(!tables.is_troop_leader(&scout("Jon", "Wasily")));
        assert!(tables.is_patrol_leader(&Scout::new("chris", Some("s"), "kozman", 13, Rank::Star)));
        assert!(!tables.is_patrol_leader(&scout("Chris", "Kozman")));
        assert!(tables.is_inactive(&scout("paul", "hanna")));
    }

    #[test]
    fn test_tables_deserialize_with_missing_sections() {
        let json = r#"{"troop_leaders": ["John Wasily"]}"#;
        let tables: NameTables = serde_json::from_str(json).expect("valid tables JSON");
        assert!(tables.incompatible.is_empty());
        assert!(tables.inactive.is_empty());
        assert_eq!(tables.troop_leaders.len(), 1);
    }
}
