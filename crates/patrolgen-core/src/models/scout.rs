use std::fmt;

use super::rank::Rank;
use crate::utils::title_case;

/// A youth member of the troop.
///
/// Name parts are title-cased on construction and never change afterwards.
/// Two scouts are equal only when every identity field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scout {
    first_name: String,
    middle_initial: Option<char>,
    last_name: String,
    age: u32,
    rank: Rank,
}

impl Scout {
    pub fn new(
        first_name: &str,
        middle_initial: Option<&str>,
        last_name: &str,
        age: u32,
        rank: Rank,
    ) -> Self {
        let middle_initial = middle_initial
            .and_then(|m| m.trim().chars().next())
            .and_then(|c| c.to_uppercase().next());

        Self {
            first_name: title_case(first_name.trim()),
            middle_initial,
            last_name: title_case(last_name.trim()),
            age,
            rank,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_initial(&self) -> Option<char> {
        self.middle_initial
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Full display name: "First Last" or "First M Last".
    ///
    /// This is also the key used for every name-table lookup.
    pub fn name(&self) -> String {
        match self.middle_initial {
            Some(m) => format!("{} {} {}", self.first_name, m, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Scouts sharing a last name are treated as siblings
    pub fn is_related(&self, other: &Scout) -> bool {
        self.last_name == other.last_name
    }
}

impl fmt::Display for Scout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ({})", self.name(), self.age, self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scout_name_is_title_cased() {
        let scout = Scout::new("JACOB", Some("j"), "abdou", 13, Rank::Star);
        assert_eq!(scout.first_name(), "Jacob");
        assert_eq!(scout.middle_initial(), Some('J'));
        assert_eq!(scout.last_name(), "Abdou");
        assert_eq!(scout.name(), "Jacob J Abdou");
    }

    #[test]
    fn test_scout_name_without_middle_initial() {
        let scout = Scout::new("John", None, "Wasily", 12, Rank::Scout);
        assert_eq!(scout.name(), "John Wasily");

        let blank = Scout::new("John", Some("  "), "Wasily", 12, Rank::Scout);
        assert_eq!(blank.middle_initial(), None);
        assert_eq!(blank, scout);
    }

    #[test]
    fn test_scout_display() {
        let scout = Scout::new("Pierre", None, "Gerges", 14, Rank::SecondClass);
        assert_eq!(scout.to_string(), "Pierre Gerges (14) (Second Class)");
    }

    #[test]
    fn test_scout_identity_covers_all_fields() {
        let a = Scout::new("Mark", None, "Morgan", 12, Rank::Scout);
        let same = Scout::new("MARK", None, "MORGAN", 12, Rank::Scout);
        let older = Scout::new("Mark", None, "Morgan", 13, Rank::Scout);
        let ranked = Scout::new("Mark", None, "Morgan", 12, Rank::Tenderfoot);

        assert_eq!(a, same);
        assert_ne!(a, older);
        assert_ne!(a, ranked);

        let set: HashSet<Scout> = [a, same, older, ranked].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_is_related() {
        let a = Scout::new("Mark", None, "Mattar", 12, Rank::Scout);
        let b = Scout::new("Peter", None, "mattar", 14, Rank::Star);
        let c = Scout::new("Paul", None, "Hanna", 12, Rank::Scout);
        assert!(a.is_related(&b));
        assert!(!a.is_related(&c));
    }
}
