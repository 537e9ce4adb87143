//! Directive data model
//!
//! A directive maps one table to the set of indices the planner may still
//! consider for it. Directives are immutable; a directive set is only ever
//! replaced as a whole.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::ObjectId;

/// One whitelist rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    table: ObjectId,
    indices: BTreeSet<ObjectId>,
}

impl Directive {
    /// Creates a directive; duplicate indices collapse
    pub fn new(table: ObjectId, indices: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            table,
            indices: indices.into_iter().collect(),
        }
    }

    /// Table this directive applies to
    pub fn table(&self) -> ObjectId {
        self.table
    }

    /// Permitted indices
    pub fn indices(&self) -> &BTreeSet<ObjectId> {
        &self.indices
    }

    /// An empty whitelist leaves the table's candidates alone
    pub fn is_noop(&self) -> bool {
        self.indices.is_empty()
    }

    /// Checks whether `index` survives this directive
    pub fn permits(&self, index: ObjectId) -> bool {
        self.is_noop() || self.indices.contains(&index)
    }
}

/// Ordered collection of directives, in clause order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
}

impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    /// Directives targeting `table`, in store order
    pub fn for_table(&self, table: ObjectId) -> impl Iterator<Item = &Directive> + '_ {
        self.directives.iter().filter(move |d| d.table == table)
    }
}

impl From<Vec<Directive>> for DirectiveSet {
    fn from(directives: Vec<Directive>) -> Self {
        Self { directives }
    }
}

impl FromIterator<Directive> for DirectiveSet {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            directives: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DirectiveSet {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> ObjectId {
        ObjectId::new(raw)
    }

    #[test]
    fn test_duplicate_indices_collapse() {
        let d = Directive::new(id(1), [id(5), id(5), id(6)]);
        assert_eq!(d.indices().len(), 2);
    }

    #[test]
    fn test_empty_directive_permits_everything() {
        let d = Directive::new(id(1), std::iter::empty());
        assert!(d.is_noop());
        assert!(d.permits(id(99)));
    }

    #[test]
    fn test_permits_only_members() {
        let d = Directive::new(id(1), [id(5)]);
        assert!(d.permits(id(5)));
        assert!(!d.permits(id(6)));
    }

    #[test]
    fn test_for_table_keeps_order() {
        let set: DirectiveSet = vec![
            Directive::new(id(1), [id(10)]),
            Directive::new(id(2), [id(20)]),
            Directive::new(id(1), [id(11)]),
        ]
        .into();
        let matched: Vec<_> = set.for_table(id(1)).collect();
        assert_eq!(matched.len(), 2);
        assert!(matched[0].indices().contains(&id(10)));
        assert!(matched[1].indices().contains(&id(11)));
    }

    #[test]
    fn test_serializes_as_list() {
        let set: DirectiveSet = vec![Directive::new(id(1), [id(3), id(2)])].into();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!([{ "table": 1, "indices": [2, 3] }]));
    }
}
