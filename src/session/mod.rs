//! Session-scoped configuration surface
//!
//! A [`Session`] owns the `planfix.forced_index` setting: the raw string last
//! accepted, the directive store built from it, and the session's counters.
//! Setting a new value parses it completely first; a rejected value leaves
//! both the raw string and the active directives as they were.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::IdentifierResolver;
use crate::directive::{
    Directive, DirectiveParser, DirectiveResult, DirectiveSet, DirectiveStore,
};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::planner::{IndexCandidate, RelationInfo, RelationInfoHook, WhitelistHook};

/// Name of the setting holding the index whitelists
pub const FORCED_INDEX_SETTING: &str = "planfix.forced_index";

/// One planning session
pub struct Session<R> {
    id: Uuid,
    resolver: R,
    store: DirectiveStore,
    /// Last accepted raw value, returned verbatim by show
    forced_index: String,
    metrics: MetricsRegistry,
}

impl<R: IdentifierResolver> Session<R> {
    /// Creates a session with no active directives
    pub fn new(resolver: R) -> Self {
        let id = Uuid::new_v4();
        log_event_with_fields(Event::SessionStart, &[("session", &id.to_string())]);
        Self {
            id,
            resolver,
            store: DirectiveStore::new(),
            forced_index: String::new(),
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Parses `raw` without touching the session
    pub fn check_forced_index(&self, raw: &str) -> DirectiveResult<Vec<Directive>> {
        DirectiveParser::new(&self.resolver).parse(raw)
    }

    /// Sets `planfix.forced_index`.
    ///
    /// On error nothing changes and the error is returned to the caller.
    pub fn set_forced_index(&mut self, raw: &str) -> DirectiveResult<()> {
        let session = self.id.to_string();
        let directives = match self.check_forced_index(raw) {
            Ok(directives) => directives,
            Err(e) => {
                self.metrics.increment_updates_rejected();
                log_event_with_fields(
                    Event::DirectivesRejected,
                    &[
                        ("session", &session),
                        ("code", e.code().code()),
                        ("clause", &e.clause().to_string()),
                        ("token", e.token()),
                    ],
                );
                return Err(e);
            }
        };

        let count = directives.len();
        self.store.replace(directives);
        self.forced_index = raw.to_string();
        self.metrics.increment_updates_applied();

        let event = if count == 0 {
            Event::DirectivesCleared
        } else {
            Event::DirectivesReplaced
        };
        log_event_with_fields(
            event,
            &[
                ("session", &session),
                ("directives", &count.to_string()),
                ("generation", &self.store.generation().to_string()),
            ],
        );
        Ok(())
    }

    /// Restores the default (empty) value
    pub fn reset_forced_index(&mut self) {
        self.store.clear();
        self.forced_index.clear();
        log_event_with_fields(
            Event::DirectivesCleared,
            &[
                ("session", &self.id.to_string()),
                ("generation", &self.store.generation().to_string()),
            ],
        );
    }

    /// Last accepted raw value, verbatim
    pub fn show_forced_index(&self) -> &str {
        &self.forced_index
    }

    /// Current directives
    pub fn directives(&self) -> Arc<DirectiveSet> {
        self.store.snapshot()
    }

    pub fn store(&self) -> &DirectiveStore {
        &self.store
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Hook bound to this session's directives and counters
    pub fn planning_hook<C: IndexCandidate>(&self) -> WhitelistHook<'_, C> {
        WhitelistHook::new(&self.store).with_metrics(&self.metrics)
    }

    /// Runs this session's hook on one relation
    pub fn plan_relation<C: IndexCandidate>(&self, relation: &mut RelationInfo<C>) {
        self.planning_hook::<C>().on_relation(relation);
    }
}

impl<R> Drop for Session<R> {
    fn drop(&mut self) {
        log_event_with_fields(Event::SessionEnd, &[("session", &self.id.to_string())]);
    }
}
