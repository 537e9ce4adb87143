//! Directive subsystem for planfix
//!
//! A directive whitelists the indices the planner may consider for one
//! table. Directives come from the `planfix.forced_index` setting:
//!
//! ```text
//! orders,idx_orders_gin;customers,idx_cust_a,idx_cust_b
//! ```
//!
//! # Update semantics
//!
//! - A configuration string is parsed completely before anything changes
//! - Any error rejects the whole update; the previous set stays active
//! - A successful parse replaces the active set as a whole

mod errors;
mod parser;
mod store;
mod types;

pub use errors::{DirectiveError, DirectiveErrorCode, DirectiveResult, Severity};
pub use parser::{parse, DirectiveParser, CLAUSE_SEPARATOR, TOKEN_SEPARATOR};
pub use store::DirectiveStore;
pub use types::{Directive, DirectiveSet};
