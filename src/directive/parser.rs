//! Configuration string parser
//!
//! Grammar: `clause (';' clause)*`, `clause = token (',' token)*`. The first
//! token of a clause names the table, the remaining tokens name indices on it.
//! Empty clauses and empty tokens are dropped.
//!
//! Parsing is a pure pass over the input: names are resolved through the
//! [`IdentifierResolver`] and nothing is installed until the whole string has
//! been accepted. The first error aborts the parse.

use crate::catalog::{IdentifierResolver, ObjectId, ObjectKind, QualifiedName, ResolvedObject};

use super::errors::{DirectiveError, DirectiveResult};
use super::types::Directive;

/// Separates clauses, one per table
pub const CLAUSE_SEPARATOR: char = ';';

/// Separates the table and index names inside a clause
pub const TOKEN_SEPARATOR: char = ',';

/// Splits the configuration string into `(table, indices)` token groups
fn clauses(raw: &str) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
    raw.split(CLAUSE_SEPARATOR).filter_map(|clause| {
        let mut tokens = clause
            .split(TOKEN_SEPARATOR)
            .map(str::trim)
            .filter(|token| !token.is_empty());
        let table = tokens.next()?;
        Some((table, tokens.collect()))
    })
}

/// Parses configuration strings into directives
pub struct DirectiveParser<'r, R: IdentifierResolver + ?Sized> {
    resolver: &'r R,
}

impl<'r, R: IdentifierResolver + ?Sized> DirectiveParser<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    /// Parses `raw` into one directive per clause, in clause order.
    ///
    /// The empty string yields no directives.
    pub fn parse(&self, raw: &str) -> DirectiveResult<Vec<Directive>> {
        clauses(raw)
            .enumerate()
            .map(|(i, (table, indices))| self.parse_clause(i + 1, table, &indices))
            .collect()
    }

    fn parse_clause(&self, clause: usize, first: &str, rest: &[&str]) -> DirectiveResult<Directive> {
        let table = self.resolve_table(clause, first)?;

        let mut indices = Vec::with_capacity(rest.len());
        for token in rest {
            let object = self.resolve(clause, token)?;
            match object.kind {
                ObjectKind::Index { table: owner } if owner == table => indices.push(object.id),
                ObjectKind::Index { .. } => {
                    return Err(DirectiveError::index_not_on_table(clause, token, first))
                }
                ObjectKind::Table => return Err(DirectiveError::multiple_tables(clause, token)),
                ObjectKind::Other(kind) => {
                    return Err(DirectiveError::unsupported_kind(clause, token, kind))
                }
            }
        }

        Ok(Directive::new(table, indices))
    }

    fn resolve_table(&self, clause: usize, token: &str) -> DirectiveResult<ObjectId> {
        let object = self.resolve(clause, token)?;
        match object.kind {
            ObjectKind::Table => Ok(object.id),
            ObjectKind::Index { .. } => Err(DirectiveError::index_before_table(clause, token)),
            ObjectKind::Other(kind) => Err(DirectiveError::expected_table(clause, token, kind)),
        }
    }

    fn resolve(&self, clause: usize, token: &str) -> DirectiveResult<ResolvedObject> {
        let name = QualifiedName::parse(token)
            .map_err(|e| DirectiveError::invalid_name(clause, token, &e))?;
        self.resolver
            .resolve(&name)
            .ok_or_else(|| DirectiveError::unresolved_name(clause, token))
    }
}

/// Parses `raw` with `resolver`
pub fn parse<R: IdentifierResolver + ?Sized>(
    raw: &str,
    resolver: &R,
) -> DirectiveResult<Vec<Directive>> {
    DirectiveParser::new(resolver).parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemoryCatalog, RelationKind};
    use crate::directive::DirectiveErrorCode;

    fn catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new("shop");
        let orders = catalog.add_table("public", "orders", 100).unwrap();
        catalog
            .add_index("public", "idx_orders_gin", 101, orders)
            .unwrap();
        catalog
            .add_index("public", "idx_orders_btree", 102, orders)
            .unwrap();
        let customers = catalog.add_table("public", "customers", 200).unwrap();
        catalog
            .add_index("public", "idx_cust_a", 201, customers)
            .unwrap();
        catalog
            .add_index("public", "idx_cust_b", 202, customers)
            .unwrap();
        catalog
            .add_relation("public", "order_totals", 300, RelationKind::View)
            .unwrap();
        catalog
    }

    fn id(raw: u32) -> ObjectId {
        ObjectId::new(raw)
    }

    #[test]
    fn test_single_clause() {
        let directives = parse("orders,idx_orders_gin", &catalog()).unwrap();
        assert_eq!(directives, vec![Directive::new(id(100), [id(101)])]);
    }

    #[test]
    fn test_two_clauses_in_order() {
        let directives = parse(
            "orders,idx_orders_gin;customers,idx_cust_a,idx_cust_b",
            &catalog(),
        )
        .unwrap();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].table(), id(100));
        assert_eq!(directives[1].table(), id(200));
        assert_eq!(directives[1].indices().len(), 2);
    }

    #[test]
    fn test_empty_string_yields_nothing() {
        assert!(parse("", &catalog()).unwrap().is_empty());
        assert!(parse(";;", &catalog()).unwrap().is_empty());
        assert!(parse(" , ;", &catalog()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_clauses_and_tokens_dropped() {
        let directives = parse(";orders,,idx_orders_gin,;;", &catalog()).unwrap();
        assert_eq!(directives, vec![Directive::new(id(100), [id(101)])]);
    }

    #[test]
    fn test_table_only_clause() {
        let directives = parse("orders", &catalog()).unwrap();
        assert!(directives[0].is_noop());
    }

    #[test]
    fn test_duplicate_indices_deduplicated() {
        let directives = parse("orders,idx_orders_gin,IDX_ORDERS_GIN", &catalog()).unwrap();
        assert_eq!(directives[0].indices().len(), 1);
    }

    #[test]
    fn test_unresolved_table() {
        let err = parse("nonexistent_table,idx1", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::UnresolvedName);
        assert_eq!(err.token(), "nonexistent_table");
    }

    #[test]
    fn test_unresolved_index() {
        let err = parse("orders,idx_missing", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::UnresolvedName);
        assert_eq!(err.token(), "idx_missing");
    }

    #[test]
    fn test_index_before_table() {
        let err = parse("idx_orders_gin,orders", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::IndexBeforeTable);
    }

    #[test]
    fn test_view_as_table_rejected() {
        let err = parse("order_totals", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::ExpectedTable);
    }

    #[test]
    fn test_two_tables_in_clause() {
        let err = parse("orders,idx_orders_gin,customers", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::MultipleTablesInClause);
        assert_eq!(err.token(), "customers");
    }

    #[test]
    fn test_view_as_index_rejected() {
        let err = parse("orders,order_totals", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::UnsupportedObjectKind);
    }

    #[test]
    fn test_foreign_index_rejected() {
        let err = parse("orders,idx_cust_a", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::IndexNotOnTable);
    }

    #[test]
    fn test_bad_name_syntax() {
        let err = parse("orders,\"idx_orders_gin", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::InvalidNameSyntax);
    }

    #[test]
    fn test_error_in_later_clause_reports_clause_number() {
        let err = parse("orders,idx_orders_gin;;customers,idx_orders_gin", &catalog()).unwrap_err();
        assert_eq!(err.code(), DirectiveErrorCode::IndexNotOnTable);
        assert_eq!(err.clause(), 2);
    }

    #[test]
    fn test_whitespace_and_qualification() {
        let directives = parse(" public.orders , \"idx_orders_gin\" ", &catalog()).unwrap();
        assert_eq!(directives, vec![Directive::new(id(100), [id(101)])]);
    }
}
