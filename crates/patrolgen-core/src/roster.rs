//! Roster loading.
//!
//! Three sources are supported:
//!
//! - the unit roster PDF, whose extracted text is parsed like a text export
//! - the text export of the unit roster, where members are listed in
//!   sections headed `YOUTH MEMBERS: <RANK> ...`
//! - a JSON array of scout records
//!
//! Either way the result is deduplicated (first occurrence wins) and
//! scouts listed as inactive are dropped.

use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PatrolError, Result};
use crate::models::{Rank, Scout};
use crate::tables::NameTables;

/// Marks the start of a youth rank section
const YOUTH_HEADER: &str = "YOUTH MEMBERS:";

/// Marks the start of the adult section; youth parsing ends there
const ADULT_HEADER: &str = "ADULT MEMBERS";

/// Eagle scouts age out of patrols, so parsing stops at their section
const EAGLE_LABEL: &str = "EAGLE";

/// Ligatures as they come out of PDF text extraction
const LIGATURES: &[(&str, &str)] = &[("\x00", "fi"), ("\u{FB01}", "fi"), ("\u{FB02}", "fl")];

/// `<row#> <First> [<M>] <Last> [<Suffix>] <age>`
fn row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"\b\d\d?\s(?P<first>[a-zA-Z]+)\s((?P<middle>[A-Z])\s)?(?P<last>[a-zA-Z]+)\s([a-zA-Z]+\s)?(?P<age>\d\d\b)",
        )
        .expect("roster row pattern is valid")
    })
}

/// A scout as written in a JSON roster
#[derive(Debug, Clone, Deserialize)]
struct ScoutRecord {
    first_name: String,
    #[serde(default)]
    middle_initial: Option<String>,
    last_name: String,
    age: u32,
    #[serde(default)]
    rank: String,
}

/// Number of scouts in one rank tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankCount {
    pub rank: Rank,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    scouts: Vec<Scout>,
    source: Option<PathBuf>,
}

/// Accumulates scouts while skipping duplicates and inactive names
struct Collector<'a> {
    tables: &'a NameTables,
    seen: HashSet<Scout>,
    scouts: Vec<Scout>,
    inactive: usize,
    duplicates: usize,
}

impl<'a> Collector<'a> {
    fn new(tables: &'a NameTables) -> Self {
        Self {
            tables,
            seen: HashSet::new(),
            scouts: Vec::new(),
            inactive: 0,
            duplicates: 0,
        }
    }

    fn push(&mut self, scout: Scout) {
        if self.tables.is_inactive(&scout) {
            self.inactive += 1;
        } else if self.seen.insert(scout.clone()) {
            self.scouts.push(scout);
        } else {
            self.duplicates += 1;
        }
    }

    fn finish(self, source: Option<PathBuf>) -> Roster {
        debug!(
            scouts = self.scouts.len(),
            inactive = self.inactive,
            duplicates = self.duplicates,
            "Roster collected"
        );
        Roster {
            scouts: self.scouts,
            source,
        }
    }
}

/// What a `YOUTH MEMBERS:` header announces
enum Section {
    Rank(Rank),
    Eagle,
}

fn parse_youth_header(line: &str) -> Option<Section> {
    let (_, rest) = line.split_once(YOUTH_HEADER)?;
    let label = rest.split_whitespace().next().unwrap_or("");
    if label.eq_ignore_ascii_case(EAGLE_LABEL) {
        Some(Section::Eagle)
    } else {
        Some(Section::Rank(Rank::from_label(label)))
    }
}

fn replace_ligatures(line: &str) -> String {
    LIGATURES
        .iter()
        .fold(line.to_string(), |acc, (search, replace)| acc.replace(search, replace))
}

impl Roster {
    /// Load a roster file, choosing the format by extension (`.pdf`,
    /// `.json`, anything else is read as a text export)
    pub fn load(path: &Path, tables: &NameTables) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let mut roster = match extension.as_str() {
            "pdf" => Self::from_pdf(&std::fs::read(path)?, tables)?,
            "json" => Self::from_json(&std::fs::read_to_string(path)?, tables)?,
            _ => Self::from_text(&std::fs::read_to_string(path)?, tables)?,
        };
        roster.source = Some(path.to_path_buf());
        Ok(roster)
    }

    /// Extract the text of a roster PDF and parse it as a text export
    pub fn from_pdf(bytes: &[u8], tables: &NameTables) -> Result<Self> {
        // pdf-extract panics on some malformed font tables
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }))
        .map_err(|_| PatrolError::Roster("PDF text extraction failed".to_string()))?
        .map_err(|e| PatrolError::Roster(format!("Could not read roster PDF: {}", e)))?;

        debug!(chars = extracted.len(), "Extracted roster PDF text");
        Self::from_text(&extracted, tables)
    }

    /// Parse the text export of a unit roster.
    ///
    /// The rank named in a section header applies to the rows that follow
    /// it; rows before the first header are `Unranked`.
    pub fn from_text(text: &str, tables: &NameTables) -> Result<Self> {
        let mut collector = Collector::new(tables);
        let mut section = String::new();
        let mut rank = Rank::Unranked;
        let mut matched = 0;

        for raw in text.lines() {
            let line = replace_ligatures(raw);

            if let Some(header) = parse_youth_header(&line) {
                matched += Self::parse_section(&section, rank, &mut collector);
                section.clear();
                match header {
                    Section::Rank(next) => rank = next,
                    Section::Eagle => break,
                }
                continue;
            }

            if line.contains(ADULT_HEADER) {
                matched += Self::parse_section(&section, rank, &mut collector);
                section.clear();
                break;
            }

            section.push_str(&line);
            section.push('\n');
        }
        matched += Self::parse_section(&section, rank, &mut collector);

        if matched == 0 {
            return Err(PatrolError::Roster(
                "no scout rows found in roster text".to_string(),
            ));
        }
        Ok(collector.finish(None))
    }

    /// Returns the number of rows matched in `section`
    fn parse_section(section: &str, rank: Rank, collector: &mut Collector<'_>) -> usize {
        let mut matched = 0;
        for caps in row_pattern().captures_iter(section) {
            let age = match caps["age"].parse::<u32>() {
                Ok(age) => age,
                Err(_) => continue,
            };
            let middle = caps.name("middle").map(|m| m.as_str());
            collector.push(Scout::new(&caps["first"], middle, &caps["last"], age, rank));
            matched += 1;
        }
        if matched > 0 {
            debug!(rank = %rank, rows = matched, "Parsed roster section");
        }
        matched
    }

    /// Parse a JSON array of `{first_name, middle_initial?, last_name, age, rank}`
    pub fn from_json(json: &str, tables: &NameTables) -> Result<Self> {
        let records: Vec<ScoutRecord> = serde_json::from_str(json)?;
        let mut collector = Collector::new(tables);

        for (index, record) in records.iter().enumerate() {
            if record.first_name.trim().is_empty() {
                return Err(PatrolError::roster_entry(index, &record.last_name, "empty first name"));
            }
            if record.last_name.trim().is_empty() {
                return Err(PatrolError::roster_entry(index, &record.first_name, "empty last name"));
            }
            collector.push(Scout::new(
                &record.first_name,
                record.middle_initial.as_deref(),
                &record.last_name,
                record.age,
                Rank::from_label(&record.rank),
            ));
        }

        Ok(collector.finish(None))
    }

    /// Build a roster from already-constructed scouts
    pub fn from_scouts<I>(scouts: I, tables: &NameTables) -> Self
    where
        I: IntoIterator<Item = Scout>,
    {
        let mut collector = Collector::new(tables);
        for scout in scouts {
            collector.push(scout);
        }
        collector.finish(None)
    }

    pub fn scouts(&self) -> &[Scout] {
        &self.scouts
    }

    pub fn len(&self) -> usize {
        self.scouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scouts.is_empty()
    }

    /// Scouts grouped by rank tier, lowest tier first. Empty tiers are omitted.
    pub fn by_rank(&self) -> Vec<(Rank, Vec<&Scout>)> {
        Rank::ALL
            .iter()
            .map(|&rank| (rank, self.scouts.iter().filter(|s| s.rank() == rank).collect::<Vec<_>>()))
            .filter(|(_, scouts)| !scouts.is_empty())
            .collect()
    }

    pub fn rank_counts(&self) -> Vec<RankCount> {
        self.by_rank()
            .into_iter()
            .map(|(rank, scouts)| RankCount {
                rank,
                count: scouts.len(),
            })
            .collect()
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => write!(f, "Roster({}) ({} scouts)", path.display(), self.scouts.len()),
            None => write!(f, "Roster ({} scouts)", self.scouts.len()),
        }
    }
}
