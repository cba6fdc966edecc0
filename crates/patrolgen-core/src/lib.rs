//! patrolgen core library.
//!
//! Splits a troop roster into a fixed number of patrols:
//!
//! - [`roster`]: loads scouts from a roster export or JSON
//! - [`models`]: `Rank`, `Scout` and the `Patrol` compatibility predicates
//! - [`tables`]: name-keyed incompatibility, inactive and leader tables
//! - [`engine`]: randomized placement with stall detection and retry
//! - [`report`]: text and JSON rendering of the result
//! - [`config`]: persisted settings and tables

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod tables;
pub mod utils;

pub use config::{AssignmentSettings, Config};
pub use engine::{AttemptStats, Outcome, PatrolBuilder, Placement, MAX_ATTEMPTS};
pub use error::PatrolError;
pub use models::{Patrol, Rank, Scout};
pub use roster::{RankCount, Roster};
pub use tables::NameTables;
