//! Identifier resolution contract consumed by the directive parser
//!
//! Resolution happens once, when a configuration update is parsed. The
//! resolved identifiers are cached in the directives and never looked up again
//! during planning.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::names::QualifiedName;

/// Stable identifier of a catalog object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Wrap a raw identifier
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage kind of a relation as recorded in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Plain base table
    Table,
    /// Index on a table
    Index,
    /// Ordinary view
    View,
    /// Materialized view
    MaterializedView,
    /// Sequence
    Sequence,
    /// Foreign table
    ForeignTable,
    /// Partitioned table (no storage of its own)
    PartitionedTable,
    /// Partitioned index
    PartitionedIndex,
    /// Composite type
    CompositeType,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Table => "table",
            RelationKind::Index => "index",
            RelationKind::View => "view",
            RelationKind::MaterializedView => "materialized_view",
            RelationKind::Sequence => "sequence",
            RelationKind::ForeignTable => "foreign_table",
            RelationKind::PartitionedTable => "partitioned_table",
            RelationKind::PartitionedIndex => "partitioned_index",
            RelationKind::CompositeType => "composite_type",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a resolved object, as far as directives are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A plain table, eligible as a directive's target
    Table,
    /// An index, together with the table it is defined on
    Index { table: ObjectId },
    /// Anything else; never valid inside a directive
    Other(RelationKind),
}

impl ObjectKind {
    /// Returns the catalog relation kind behind this object kind
    pub fn relation_kind(&self) -> RelationKind {
        match self {
            ObjectKind::Table => RelationKind::Table,
            ObjectKind::Index { .. } => RelationKind::Index,
            ObjectKind::Other(kind) => *kind,
        }
    }
}

/// Result of a successful name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedObject {
    /// Stable identifier
    pub id: ObjectId,
    /// Object kind
    pub kind: ObjectKind,
}

impl ResolvedObject {
    pub fn table(id: ObjectId) -> Self {
        Self {
            id,
            kind: ObjectKind::Table,
        }
    }

    pub fn index(id: ObjectId, table: ObjectId) -> Self {
        Self {
            id,
            kind: ObjectKind::Index { table },
        }
    }

    pub fn other(id: ObjectId, kind: RelationKind) -> Self {
        Self {
            id,
            kind: ObjectKind::Other(kind),
        }
    }
}

/// Name lookup service (read-only)
///
/// `None` means the name does not denote any visible object.
pub trait IdentifierResolver {
    fn resolve(&self, name: &QualifiedName) -> Option<ResolvedObject>;
}

impl<R: IdentifierResolver + ?Sized> IdentifierResolver for &R {
    fn resolve(&self, name: &QualifiedName) -> Option<ResolvedObject> {
        (**self).resolve(name)
    }
}
