//! Candidate filter
//!
//! Prunes a table's candidate index list according to the active directives.
//! Every directive matching the table narrows the survivors further; a
//! directive without indices leaves the list alone. Filtering never fails.

use std::fmt;

use serde::Serialize;

use crate::catalog::ObjectId;
use crate::directive::{DirectiveSet, DirectiveStore};

/// Anything the host planner keeps per candidate index
pub trait IndexCandidate {
    fn index_id(&self) -> ObjectId;
}

impl IndexCandidate for ObjectId {
    fn index_id(&self) -> ObjectId {
        *self
    }
}

/// What one filter pass did to one table's candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub table: ObjectId,
    /// Directives naming the table
    pub matched: usize,
    /// Matching directives with a non-empty whitelist
    pub applied: usize,
    pub before: usize,
    pub after: usize,
}

impl FilterOutcome {
    /// Number of candidates dropped
    pub fn removed(&self) -> usize {
        self.before - self.after
    }

    /// True when no directive restricted the table
    pub fn is_noop(&self) -> bool {
        self.applied == 0
    }
}

impl fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== INDEX WHITELIST ===")?;
        writeln!(f, "Table: {}", self.table)?;
        if self.is_noop() {
            writeln!(f, "Status: UNRESTRICTED")?;
        } else {
            writeln!(f, "Status: RESTRICTED")?;
            writeln!(f, "Directives: {} applied", self.applied)?;
        }
        writeln!(f, "Candidates: {} -> {}", self.before, self.after)
    }
}

/// Filters candidate lists against one directive set
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter<'a> {
    directives: &'a DirectiveSet,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(directives: &'a DirectiveSet) -> Self {
        Self { directives }
    }

    /// Removes from `candidates` every index not permitted for `table`.
    ///
    /// Survivors keep their relative order.
    pub fn filter<C: IndexCandidate>(&self, table: ObjectId, candidates: &mut Vec<C>) {
        self.filter_report(table, candidates);
    }

    /// Same as [`Self::filter`], reporting what happened
    pub fn filter_report<C: IndexCandidate>(
        &self,
        table: ObjectId,
        candidates: &mut Vec<C>,
    ) -> FilterOutcome {
        let before = candidates.len();
        let mut matched = 0;
        let mut applied = 0;

        for directive in self.directives.for_table(table) {
            matched += 1;
            if directive.is_noop() {
                continue;
            }
            applied += 1;
            candidates.retain(|c| directive.indices().contains(&c.index_id()));
        }

        FilterOutcome {
            table,
            matched,
            applied,
            before,
            after: candidates.len(),
        }
    }
}

/// Filters `candidates` against the store's current directives
pub fn filter_candidates<C: IndexCandidate>(
    store: &DirectiveStore,
    table: ObjectId,
    candidates: &mut Vec<C>,
) -> FilterOutcome {
    let snapshot = store.snapshot();
    CandidateFilter::new(&snapshot).filter_report(table, candidates)
}
