use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatrolError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maximum length for roster excerpts quoted in error messages
const MAX_EXCERPT_LENGTH: usize = 80;

impl PatrolError {
    /// Truncate a roster excerpt to avoid dumping whole documents into errors
    fn truncate_excerpt(excerpt: &str) -> String {
        if excerpt.chars().count() <= MAX_EXCERPT_LENGTH {
            excerpt.to_string()
        } else {
            let head: String = excerpt.chars().take(MAX_EXCERPT_LENGTH).collect();
            format!("{}... (truncated)", head)
        }
    }

    pub fn roster_entry(index: usize, excerpt: &str, reason: &str) -> Self {
        PatrolError::Roster(format!(
            "entry {}: {} ({})",
            index,
            reason,
            Self::truncate_excerpt(excerpt)
        ))
    }
}

pub type Result<T> = std::result::Result<T, PatrolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_entry_truncates_long_excerpts() {
        let long = "x".repeat(200);
        let err = PatrolError::roster_entry(7, &long, "empty last name");
        let msg = err.to_string();
        assert!(msg.starts_with("Roster error: entry 7: empty last name"));
        assert!(msg.ends_with("... (truncated))"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = PatrolError::InvalidConfig("patrol count must be at least 1".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: patrol count must be at least 1");
    }
}
