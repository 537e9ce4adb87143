//! Catalog loading errors

use std::io;

use thiserror::Error;

use super::resolver::ObjectId;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building a [`super::MemoryCatalog`]
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate object id: {0}")]
    DuplicateId(ObjectId),

    #[error("Duplicate relation name: {schema}.{name}")]
    DuplicateName { schema: String, name: String },

    #[error("Index {index} references unknown table {table}")]
    UnknownIndexTable { index: String, table: String },

    #[error("Index {0} does not name its table")]
    MissingIndexTable(String),

    #[error("Empty {0} in catalog entry")]
    EmptyIdentifier(&'static str),
}

impl CatalogError {
    /// Stable error code, in the same family as the other planfix codes
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Io { .. } => "PLANFIX_CATALOG_IO",
            CatalogError::Json(_) => "PLANFIX_CATALOG_MALFORMED",
            CatalogError::DuplicateId(_)
            | CatalogError::DuplicateName { .. }
            | CatalogError::UnknownIndexTable { .. }
            | CatalogError::MissingIndexTable(_)
            | CatalogError::EmptyIdentifier(_) => "PLANFIX_CATALOG_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            CatalogError::DuplicateId(ObjectId::new(7)).code(),
            "PLANFIX_CATALOG_INVALID"
        );
        assert_eq!(
            CatalogError::MissingIndexTable("idx".into()).code(),
            "PLANFIX_CATALOG_INVALID"
        );
    }

    #[test]
    fn test_display() {
        let err = CatalogError::UnknownIndexTable {
            index: "idx_a".into(),
            table: "ghost".into(),
        };
        let display = err.to_string();
        assert!(display.contains("idx_a"));
        assert!(display.contains("ghost"));
    }
}
