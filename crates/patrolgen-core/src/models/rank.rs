use std::fmt;

use serde::{Deserialize, Serialize};

/// Scout rank tier.
///
/// Each tier has an identity (the variant) and a numeric weight used when
/// averaging a patrol's rank. Ranks are not `Ord`; only the mean of their
/// weights is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Unranked = 0,
    Scout = 1,
    Tenderfoot = 2,
    SecondClass = 3,
    FirstClass = 4,
    Star = 5,
    Life = 6,
}

impl Rank {
    /// Every tier, lowest first.
    pub const ALL: [Rank; 7] = [
        Rank::Unranked,
        Rank::Scout,
        Rank::Tenderfoot,
        Rank::SecondClass,
        Rank::FirstClass,
        Rank::Star,
        Rank::Life,
    ];

    /// Parse a free-text rank label.
    ///
    /// Matching is case-insensitive and accepts both the short roster tokens
    /// ("SECOND") and display names ("Second Class"). Empty or unknown labels
    /// fall back to `Unranked`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match normalized.as_str() {
            "scout" => Rank::Scout,
            "tenderfoot" => Rank::Tenderfoot,
            "second" | "second class" => Rank::SecondClass,
            "first" | "first class" => Rank::FirstClass,
            "star" | "star scout" => Rank::Star,
            "life" | "life scout" => Rank::Life,
            _ => Rank::Unranked,
        }
    }

    /// Numeric weight used for averaging (0 = Unranked, 6 = Life).
    pub fn weight(&self) -> f64 {
        f64::from(*self as u8)
    }

    /// Get the display name for this rank.
    pub fn display_name(&self) -> &'static str {
        match self {
            Rank::Unranked => "Unranked",
            Rank::Scout => "Scout",
            Rank::Tenderfoot => "Tenderfoot",
            Rank::SecondClass => "Second Class",
            Rank::FirstClass => "First Class",
            Rank::Star => "Star",
            Rank::Life => "Life",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
