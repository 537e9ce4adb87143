//! Catalog subsystem for planfix
//!
//! Resolves textual relation names to stable object identifiers and kinds.
//! The directive parser only talks to the [`IdentifierResolver`] trait; the
//! [`MemoryCatalog`] implementation backs the CLI and the tests.
//!
//! # Name syntax
//!
//! - `name`, `schema.name` or `database.schema.name`
//! - Unquoted parts fold to lower case
//! - Double-quoted parts keep their case and may contain `.`

mod errors;
mod memory;
mod names;
mod resolver;

pub use errors::{CatalogError, CatalogResult};
pub use memory::{CatalogFile, CatalogObject, MemoryCatalog};
pub use names::{NameSyntaxError, QualifiedName};
pub use resolver::{IdentifierResolver, ObjectId, ObjectKind, RelationKind, ResolvedObject};
