//! Text and JSON rendering of finished patrols.

use std::path::Path;

use serde::Serialize;

use crate::engine::Placement;
use crate::error::Result;
use crate::models::{Patrol, Scout};
use crate::tables::NameTables;
use crate::utils::{cmp_ignore_case, format_average};

/// Rule printed under each patrol header
const HEADER_RULE: &str = "------------";

/// Suffix marking the patrol leader in a member list
const LEADER_SUFFIX: &str = " (Patrol Leader)";

/// Serializable view of one patrol
#[derive(Debug, Clone, Serialize)]
pub struct PatrolSummary {
    /// 1-based patrol number, `None` for the leaders patrol
    pub index: Option<usize>,
    pub title: String,
    pub count: usize,
    pub average_rank: Option<f64>,
    pub patrol_leader: Option<String>,
    pub members: Vec<String>,
}

fn patrol_title(index: Option<usize>) -> String {
    match index {
        Some(n) => format!("Patrol #{}", n),
        None => "Leaders Patrol".to_string(),
    }
}

/// Members in display order: the patrol leader first, then everyone else by
/// last name and first name.
fn ordered_members<'p>(patrol: &'p Patrol, tables: &NameTables) -> (Option<&'p Scout>, Vec<&'p Scout>) {
    let leader = patrol.patrol_leader(tables);
    let mut rest: Vec<&Scout> = patrol
        .members()
        .filter(|m| Some(*m) != leader)
        .collect();
    rest.sort_by(|a, b| {
        cmp_ignore_case(a.last_name(), b.last_name())
            .then_with(|| cmp_ignore_case(a.first_name(), b.first_name()))
            .then_with(|| a.age().cmp(&b.age()))
    });
    (leader, rest)
}

/// Render one patrol. `index` is 1-based; `None` renders the leaders patrol.
pub fn format_patrol(index: Option<usize>, patrol: &Patrol, tables: &NameTables) -> String {
    let mut output = format!(
        "{} ({} Scouts) ({} Avg. Rank)\n{}\n",
        patrol_title(index),
        patrol.len(),
        format_average(patrol.average_rank()),
        HEADER_RULE
    );

    let (leader, rest) = ordered_members(patrol, tables);
    if let Some(leader) = leader {
        output.push_str(&format!("{}{}\n", leader, LEADER_SUFFIX));
    }
    for scout in rest {
        output.push_str(&format!("{}\n", scout));
    }
    output
}

/// Full report: leaders patrol first, then patrols 1..N, blank-line separated
pub fn render_report(placement: &Placement, tables: &NameTables) -> String {
    let mut sections = Vec::with_capacity(placement.patrols.len() + 1);
    sections.push(format_patrol(None, &placement.leaders, tables));
    for (i, patrol) in placement.patrols.iter().enumerate() {
        sections.push(format_patrol(Some(i + 1), patrol, tables));
    }
    sections.join("\n")
}

/// Write the report, replacing any existing file
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, report)?;
    Ok(())
}

pub fn summarize_patrol(index: Option<usize>, patrol: &Patrol, tables: &NameTables) -> PatrolSummary {
    let (leader, rest) = ordered_members(patrol, tables);
    PatrolSummary {
        index,
        title: patrol_title(index),
        count: patrol.len(),
        average_rank: patrol.average_rank(),
        patrol_leader: leader.map(Scout::name),
        members: leader
            .into_iter()
            .chain(rest)
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Same ordering as [`render_report`]
pub fn summarize(placement: &Placement, tables: &NameTables) -> Vec<PatrolSummary> {
    std::iter::once(summarize_patrol(None, &placement.leaders, tables))
        .chain(
            placement
                .patrols
                .iter()
                .enumerate()
                .map(|(i, patrol)| summarize_patrol(Some(i + 1), patrol, tables)),
        )
        .collect()
}
