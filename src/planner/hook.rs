//! Planning hook adapter
//!
//! The host planner calls a relation-info hook once per relation it plans.
//! [`WhitelistHook`] filters the candidate indices of plain base tables and
//! then always hands the relation to the hook that was installed before it.

use crate::catalog::{ObjectId, RelationKind};
use crate::directive::DirectiveStore;
use crate::observability::{Event, Logger, MetricsRegistry};

use super::filter::{filter_candidates, IndexCandidate};

/// Relation as presented to the hook by the host planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationInfo<C = ObjectId> {
    pub relation_id: ObjectId,
    /// Set when the relation stands for an inheritance parent
    pub inh_parent: bool,
    pub kind: RelationKind,
    /// Candidate indices, owned by the host
    pub indexes: Vec<C>,
}

impl<C> RelationInfo<C> {
    /// Plain table that is not an inheritance parent
    pub fn table(relation_id: ObjectId, indexes: Vec<C>) -> Self {
        Self {
            relation_id,
            inh_parent: false,
            kind: RelationKind::Table,
            indexes,
        }
    }

    /// Only plain base tables are subject to directives
    pub fn is_plain_table(&self) -> bool {
        self.kind == RelationKind::Table && !self.inh_parent
    }
}

/// Host extension point invoked per relation
pub trait RelationInfoHook<C = ObjectId> {
    fn on_relation(&self, relation: &mut RelationInfo<C>);
}

impl<C, F> RelationInfoHook<C> for F
where
    F: Fn(&mut RelationInfo<C>),
{
    fn on_relation(&self, relation: &mut RelationInfo<C>) {
        self(relation)
    }
}

/// Boxed hook, as kept by a [`HookSlot`]
pub type BoxedHook<'a, C = ObjectId> = Box<dyn RelationInfoHook<C> + 'a>;

/// Hook that applies the active index whitelists
pub struct WhitelistHook<'a, C = ObjectId> {
    store: &'a DirectiveStore,
    metrics: Option<&'a MetricsRegistry>,
    previous: Option<BoxedHook<'a, C>>,
}

impl<'a, C> WhitelistHook<'a, C> {
    pub fn new(store: &'a DirectiveStore) -> Self {
        Self {
            store,
            metrics: None,
            previous: None,
        }
    }

    /// Counts filtered relations and removed candidates in `metrics`
    pub fn with_metrics(mut self, metrics: &'a MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Chains to the hook that was installed before this one
    pub fn chain(mut self, previous: Option<BoxedHook<'a, C>>) -> Self {
        self.previous = previous;
        self
    }
}

impl<'a, C: IndexCandidate> RelationInfoHook<C> for WhitelistHook<'a, C> {
    fn on_relation(&self, relation: &mut RelationInfo<C>) {
        if relation.is_plain_table() && !self.store.is_empty() {
            let outcome = filter_candidates(self.store, relation.relation_id, &mut relation.indexes);
            if !outcome.is_noop() {
                if let Some(metrics) = self.metrics {
                    metrics.increment_relations_filtered();
                    metrics.add_candidates_removed(outcome.removed() as u64);
                }
                Logger::trace(
                    Event::RelationFiltered.as_str(),
                    &[
                        ("relation", &outcome.table.to_string()),
                        ("before", &outcome.before.to_string()),
                        ("after", &outcome.after.to_string()),
                    ],
                );
            }
        }

        if let Some(ref previous) = self.previous {
            previous.on_relation(relation);
        }
    }
}

/// The host's single hook pointer
pub struct HookSlot<'a, C = ObjectId> {
    current: Option<BoxedHook<'a, C>>,
}

impl<'a, C> Default for HookSlot<'a, C> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<'a, C> HookSlot<'a, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a hook built from the previously installed one, if any
    pub fn install<F>(&mut self, build: F)
    where
        F: FnOnce(Option<BoxedHook<'a, C>>) -> BoxedHook<'a, C>,
    {
        let previous = self.current.take();
        self.current = Some(build(previous));
    }

    pub fn is_installed(&self) -> bool {
        self.current.is_some()
    }

    /// Runs the installed hook chain on `relation`
    pub fn call(&self, relation: &mut RelationInfo<C>) {
        if let Some(ref hook) = self.current {
            hook.on_relation(relation);
        }
    }
}
