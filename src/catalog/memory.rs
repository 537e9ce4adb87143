//! In-memory catalog loaded from a JSON description
//!
//! The catalog file lists every relation visible to the session:
//!
//! ```json
//! {
//!   "database": "shop",
//!   "search_path": ["public"],
//!   "objects": [
//!     { "oid": 16384, "schema": "public", "name": "orders", "kind": "table" },
//!     { "oid": 16390, "schema": "public", "name": "idx_orders_gin", "kind": "index", "table": "orders" }
//!   ]
//! }
//! ```
//!
//! Names are stored exactly as written; lookups compare against the already
//! case-folded [`QualifiedName`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use super::names::QualifiedName;
use super::resolver::{IdentifierResolver, ObjectId, ObjectKind, RelationKind, ResolvedObject};

fn default_database() -> String {
    "postgres".to_string()
}

fn default_search_path() -> Vec<String> {
    vec!["public".to_string()]
}

fn default_schema() -> String {
    "public".to_string()
}

/// On-disk catalog description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_database")]
    pub database: String,

    /// Schemas searched, in order, for unqualified names
    #[serde(default = "default_search_path")]
    pub search_path: Vec<String>,

    #[serde(default)]
    pub objects: Vec<CatalogObject>,
}

/// One relation in a [`CatalogFile`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogObject {
    pub oid: u32,

    #[serde(default = "default_schema")]
    pub schema: String,

    pub name: String,

    pub kind: RelationKind,

    /// Owning table of an index, in the index's schema
    #[serde(default)]
    pub table: Option<String>,
}

/// Catalog held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    database: String,
    search_path: Vec<String>,
    by_name: HashMap<(String, String), ResolvedObject>,
    names: HashMap<ObjectId, QualifiedName>,
}

impl MemoryCatalog {
    /// Creates an empty catalog searching only `public`
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            search_path: default_search_path(),
            by_name: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Replaces the schema search path used for unqualified names
    pub fn with_search_path(mut self, schemas: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.search_path = schemas.into_iter().map(Into::into).collect();
        self
    }

    /// Loads a catalog file from disk
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Builds a catalog from its JSON description
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Builds a catalog from a parsed description.
    ///
    /// Indexes are registered after every other relation, so the order of
    /// `objects` does not matter.
    pub fn from_file(file: CatalogFile) -> CatalogResult<Self> {
        let mut catalog = Self::new(file.database).with_search_path(file.search_path);

        let (indexes, relations): (Vec<_>, Vec<_>) = file
            .objects
            .into_iter()
            .partition(|o| o.kind == RelationKind::Index);

        for object in relations {
            catalog.add_relation(&object.schema, &object.name, object.oid, object.kind)?;
        }

        for object in indexes {
            let table_name = object
                .table
                .ok_or_else(|| CatalogError::MissingIndexTable(object.name.clone()))?;
            let table = catalog
                .lookup(&object.schema, &table_name)
                .filter(|r| r.kind == ObjectKind::Table)
                .map(|r| r.id)
                .ok_or_else(|| CatalogError::UnknownIndexTable {
                    index: object.name.clone(),
                    table: table_name,
                })?;
            catalog.add_index(&object.schema, &object.name, object.oid, table)?;
        }

        Ok(catalog)
    }

    /// Registers a plain table
    pub fn add_table(&mut self, schema: &str, name: &str, oid: u32) -> CatalogResult<ObjectId> {
        self.add_relation(schema, name, oid, RelationKind::Table)
    }

    /// Registers an index defined on `table`
    pub fn add_index(
        &mut self,
        schema: &str,
        name: &str,
        oid: u32,
        table: ObjectId,
    ) -> CatalogResult<ObjectId> {
        let owner_is_table = self
            .by_name
            .values()
            .any(|r| r.id == table && r.kind == ObjectKind::Table);
        if !owner_is_table {
            return Err(CatalogError::UnknownIndexTable {
                index: name.to_string(),
                table: table.to_string(),
            });
        }
        let id = ObjectId::new(oid);
        self.insert(schema, name, ResolvedObject::index(id, table))?;
        Ok(id)
    }

    /// Registers a relation of any non-index kind
    pub fn add_relation(
        &mut self,
        schema: &str,
        name: &str,
        oid: u32,
        kind: RelationKind,
    ) -> CatalogResult<ObjectId> {
        let id = ObjectId::new(oid);
        let resolved = match kind {
            RelationKind::Table => ResolvedObject::table(id),
            other => ResolvedObject::other(id, other),
        };
        self.insert(schema, name, resolved)?;
        Ok(id)
    }

    fn insert(&mut self, schema: &str, name: &str, object: ResolvedObject) -> CatalogResult<()> {
        if schema.is_empty() {
            return Err(CatalogError::EmptyIdentifier("schema"));
        }
        if name.is_empty() {
            return Err(CatalogError::EmptyIdentifier("name"));
        }
        if self.names.contains_key(&object.id) {
            return Err(CatalogError::DuplicateId(object.id));
        }
        let key = (schema.to_string(), name.to_string());
        if self.by_name.contains_key(&key) {
            return Err(CatalogError::DuplicateName {
                schema: key.0,
                name: key.1,
            });
        }
        self.names
            .insert(object.id, QualifiedName::qualified(schema, name));
        self.by_name.insert(key, object);
        Ok(())
    }

    fn lookup(&self, schema: &str, name: &str) -> Option<&ResolvedObject> {
        self.by_name.get(&(schema.to_string(), name.to_string()))
    }

    /// Database name used to validate three-part names
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn search_path(&self) -> &[String] {
        &self.search_path
    }

    /// Schema-qualified name of an object, for display
    pub fn name_of(&self, id: ObjectId) -> Option<&QualifiedName> {
        self.names.get(&id)
    }

    /// Number of registered relations
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl IdentifierResolver for MemoryCatalog {
    fn resolve(&self, name: &QualifiedName) -> Option<ResolvedObject> {
        if let Some(ref database) = name.database {
            if *database != self.database {
                return None;
            }
        }
        match name.schema {
            Some(ref schema) => self.lookup(schema, &name.name).cloned(),
            None => self
                .search_path
                .iter()
                .find_map(|schema| self.lookup(schema, &name.name))
                .cloned(),
        }
    }
}
