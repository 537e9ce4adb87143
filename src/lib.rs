//! planfix - session-scoped index whitelists for the query planner
//!
//! A session carries a `planfix.forced_index` value naming tables and the
//! indexes the planner may use for them. The value is parsed against a
//! catalog into directives, and a relation-info hook narrows each planned
//! table's candidate index list to the whitelisted ones.

pub mod catalog;
pub mod cli;
pub mod directive;
pub mod observability;
pub mod planner;
pub mod session;
