//! Planner integration for planfix
//!
//! The host planner enumerates candidate indices per relation; planfix only
//! prunes that list. Nothing here chooses an index or reasons about cost.
//!
//! # Filtering rules
//!
//! - Only plain base tables are filtered (not inheritance parents)
//! - A directive with no indices leaves the table unrestricted
//! - Several directives for one table intersect, in store order
//! - A table without directives keeps all of its candidates
//! - Filtering never fails

mod filter;
mod hook;

pub use filter::{filter_candidates, CandidateFilter, FilterOutcome, IndexCandidate};
pub use hook::{BoxedHook, HookSlot, RelationInfo, RelationInfoHook, WhitelistHook};
