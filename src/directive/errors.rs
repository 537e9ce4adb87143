//! Directive error types
//!
//! Error codes:
//! - PLANFIX_UNRESOLVED_NAME (REJECT)
//! - PLANFIX_EXPECTED_TABLE (REJECT)
//! - PLANFIX_MULTIPLE_TABLES (REJECT)
//! - PLANFIX_INDEX_BEFORE_TABLE (REJECT)
//! - PLANFIX_UNSUPPORTED_OBJECT_KIND (REJECT)
//! - PLANFIX_INVALID_NAME_SYNTAX (REJECT)
//! - PLANFIX_INDEX_NOT_ON_TABLE (REJECT)
//!
//! Every error rejects the whole configuration update. Filtering never fails.

use std::fmt;

use crate::catalog::{NameSyntaxError, RelationKind};

/// Severity levels for directive errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Configuration update rejected, previous directives stay active
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Directive error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveErrorCode {
    /// Token does not resolve to any known object
    UnresolvedName,
    /// First token of a clause is not a table
    ExpectedTable,
    /// A second table appears in one clause
    MultipleTablesInClause,
    /// An index appears before the clause's table
    IndexBeforeTable,
    /// Token resolves to something that is neither table nor index
    UnsupportedObjectKind,
    /// Token is not a valid relation name
    InvalidNameSyntax,
    /// Index is defined on a different table than the clause's
    IndexNotOnTable,
}

impl DirectiveErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DirectiveErrorCode::UnresolvedName => "PLANFIX_UNRESOLVED_NAME",
            DirectiveErrorCode::ExpectedTable => "PLANFIX_EXPECTED_TABLE",
            DirectiveErrorCode::MultipleTablesInClause => "PLANFIX_MULTIPLE_TABLES",
            DirectiveErrorCode::IndexBeforeTable => "PLANFIX_INDEX_BEFORE_TABLE",
            DirectiveErrorCode::UnsupportedObjectKind => "PLANFIX_UNSUPPORTED_OBJECT_KIND",
            DirectiveErrorCode::InvalidNameSyntax => "PLANFIX_INVALID_NAME_SYNTAX",
            DirectiveErrorCode::IndexNotOnTable => "PLANFIX_INDEX_NOT_ON_TABLE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for DirectiveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Directive error with the clause and token that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveError {
    code: DirectiveErrorCode,
    message: String,
    /// 1-based clause number among the non-empty clauses
    clause: usize,
    token: String,
}

impl DirectiveError {
    fn new(
        code: DirectiveErrorCode,
        clause: usize,
        token: impl Into<String>,
        message: String,
    ) -> Self {
        Self {
            code,
            message,
            clause,
            token: token.into(),
        }
    }

    /// Create an unresolved name error
    pub fn unresolved_name(clause: usize, token: &str) -> Self {
        Self::new(
            DirectiveErrorCode::UnresolvedName,
            clause,
            token,
            format!("Relation '{}' does not exist", token),
        )
    }

    /// Create an expected table error
    pub fn expected_table(clause: usize, token: &str, found: RelationKind) -> Self {
        Self::new(
            DirectiveErrorCode::ExpectedTable,
            clause,
            token,
            format!("'{}' is a {}, expected a table", token, found),
        )
    }

    /// Create a multiple tables error
    pub fn multiple_tables(clause: usize, token: &str) -> Self {
        Self::new(
            DirectiveErrorCode::MultipleTablesInClause,
            clause,
            token,
            format!("Only one table may be named per clause, found '{}'", token),
        )
    }

    /// Create an index before table error
    pub fn index_before_table(clause: usize, token: &str) -> Self {
        Self::new(
            DirectiveErrorCode::IndexBeforeTable,
            clause,
            token,
            format!("Index '{}' appears before the clause's table", token),
        )
    }

    /// Create an unsupported object kind error
    pub fn unsupported_kind(clause: usize, token: &str, found: RelationKind) -> Self {
        Self::new(
            DirectiveErrorCode::UnsupportedObjectKind,
            clause,
            token,
            format!("'{}' is a {}, expected an index", token, found),
        )
    }

    /// Create an invalid name syntax error
    pub fn invalid_name(clause: usize, token: &str, reason: &NameSyntaxError) -> Self {
        Self::new(
            DirectiveErrorCode::InvalidNameSyntax,
            clause,
            token,
            format!("Invalid name '{}': {}", token, reason),
        )
    }

    /// Create an index not on table error
    pub fn index_not_on_table(clause: usize, token: &str, table: &str) -> Self {
        Self::new(
            DirectiveErrorCode::IndexNotOnTable,
            clause,
            token,
            format!("Index '{}' is not defined on table '{}'", token, table),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> DirectiveErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the 1-based clause number
    pub fn clause(&self) -> usize {
        self.clause
    }

    /// Returns the offending token, as written
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (clause {})",
            self.code.severity(),
            self.code.code(),
            self.message,
            self.clause
        )
    }
}

impl std::error::Error for DirectiveError {}

/// Result type for directive operations
pub type DirectiveResult<T> = Result<T, DirectiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DirectiveErrorCode::UnresolvedName.code(),
            "PLANFIX_UNRESOLVED_NAME"
        );
        assert_eq!(
            DirectiveErrorCode::ExpectedTable.code(),
            "PLANFIX_EXPECTED_TABLE"
        );
        assert_eq!(
            DirectiveErrorCode::MultipleTablesInClause.code(),
            "PLANFIX_MULTIPLE_TABLES"
        );
        assert_eq!(
            DirectiveErrorCode::IndexBeforeTable.code(),
            "PLANFIX_INDEX_BEFORE_TABLE"
        );
        assert_eq!(
            DirectiveErrorCode::UnsupportedObjectKind.code(),
            "PLANFIX_UNSUPPORTED_OBJECT_KIND"
        );
    }

    #[test]
    fn test_all_errors_reject() {
        let err = DirectiveError::multiple_tables(2, "customers");
        assert_eq!(err.severity(), Severity::Reject);
        assert_eq!(err.clause(), 2);
        assert_eq!(err.token(), "customers");
    }

    #[test]
    fn test_error_display() {
        let err = DirectiveError::expected_table(1, "order_totals", RelationKind::View);
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("PLANFIX_EXPECTED_TABLE"));
        assert!(display.contains("order_totals"));
        assert!(display.contains("view"));
        assert!(display.contains("clause 1"));
    }
}
