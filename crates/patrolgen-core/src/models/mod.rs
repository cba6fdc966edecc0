//! Data models for patrol assignment.
//!
//! - `Rank`: the scout rank scale and its averaging weight
//! - `Scout`: an immutable roster entry
//! - `Patrol`: a group of scouts plus its compatibility predicates

pub mod patrol;
pub mod rank;
pub mod scout;

pub use patrol::Patrol;
pub use rank::Rank;
pub use scout::Scout;
