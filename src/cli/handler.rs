//! Session request handling
//!
//! Each stdin line is one request, tagged by `op`:
//!
//! ```json
//! {"op": "set", "value": "orders,idx_orders_gin"}
//! {"op": "show"}
//! {"op": "reset"}
//! {"op": "check", "value": "orders"}
//! {"op": "plan", "table": "orders", "candidates": ["idx_orders_gin", "idx_orders_btree"]}
//! {"op": "metrics"}
//! ```
//!
//! A failed request produces an error response; the session keeps running.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog::{
    IdentifierResolver, MemoryCatalog, ObjectId, ObjectKind, QualifiedName, ResolvedObject,
};
use crate::directive::Directive;
use crate::session::{Session, FORCED_INDEX_SETTING};
use crate::planner::RelationInfo;

use super::errors::{CliError, CliResult};
use super::io::{error_response, ok_response};

/// One session request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionRequest {
    Set {
        value: String,
    },
    Show,
    Reset,
    Check {
        value: String,
    },
    Plan {
        table: String,
        #[serde(default)]
        candidates: Vec<String>,
        #[serde(default)]
        inh_parent: bool,
    },
    Metrics,
}

/// Handles one raw request line, always producing a response
pub fn handle_line(session: &mut Session<MemoryCatalog>, line: &str) -> Value {
    let result = serde_json::from_str::<SessionRequest>(line)
        .map_err(|e| CliError::bad_request(format!("Invalid request: {}", e)))
        .and_then(|request| handle(session, request));

    match result {
        Ok(data) => ok_response(data),
        Err(e) => error_response(e.code_str(), e.message()),
    }
}

/// Handles one parsed request
pub fn handle(session: &mut Session<MemoryCatalog>, request: SessionRequest) -> CliResult<Value> {
    match request {
        SessionRequest::Set { value } => {
            session.set_forced_index(&value)?;
            Ok(setting_json(session))
        }
        SessionRequest::Show => Ok(json!({
            "setting": FORCED_INDEX_SETTING,
            "value": session.show_forced_index(),
        })),
        SessionRequest::Reset => {
            session.reset_forced_index();
            Ok(setting_json(session))
        }
        SessionRequest::Check { value } => {
            let directives = session.check_forced_index(&value)?;
            Ok(json!({
                "value": value,
                "directives": describe_directives(session.resolver(), &directives),
            }))
        }
        SessionRequest::Plan {
            table,
            candidates,
            inh_parent,
        } => plan(session, &table, &candidates, inh_parent),
        SessionRequest::Metrics => Ok(serde_json::to_value(session.metrics().snapshot())?),
    }
}

/// Runs the session's planning hook over one relation and describes the result
pub fn plan(
    session: &Session<MemoryCatalog>,
    table: &str,
    candidates: &[String],
    inh_parent: bool,
) -> CliResult<Value> {
    let catalog = session.resolver();
    let mut relation = build_relation(catalog, table, candidates, inh_parent)?;
    let before = names(catalog, &relation.indexes);

    session.plan_relation(&mut relation);

    let after = names(catalog, &relation.indexes);
    Ok(json!({
        "relation": display_name(catalog, relation.relation_id),
        "kind": relation.kind.as_str(),
        "filtered": relation.is_plain_table(),
        "removed": before.len() - after.len(),
        "before": before,
        "after": after,
    }))
}

fn setting_json(session: &Session<MemoryCatalog>) -> Value {
    let directives: Vec<Directive> = session.directives().iter().cloned().collect();
    json!({
        "setting": FORCED_INDEX_SETTING,
        "value": session.show_forced_index(),
        "directives": describe_directives(session.resolver(), &directives),
    })
}

/// Directives with names in place of identifiers
pub fn describe_directives(catalog: &MemoryCatalog, directives: &[Directive]) -> Value {
    directives
        .iter()
        .map(|d| {
            let indices: Vec<ObjectId> = d.indices().iter().copied().collect();
            json!({
                "table": display_name(catalog, d.table()),
                "indices": names(catalog, &indices),
            })
        })
        .collect()
}

/// Resolves the relation and candidate names of a plan request
pub fn build_relation(
    catalog: &MemoryCatalog,
    table: &str,
    candidates: &[String],
    inh_parent: bool,
) -> CliResult<RelationInfo> {
    let relation = resolve(catalog, table)?;
    let indexes = candidates
        .iter()
        .map(|candidate| match resolve(catalog, candidate)? {
            ResolvedObject {
                id,
                kind: ObjectKind::Index { .. },
            } => Ok(id),
            _ => Err(CliError::bad_request(format!(
                "Candidate '{}' is not an index",
                candidate
            ))),
        })
        .collect::<CliResult<Vec<_>>>()?;

    Ok(RelationInfo {
        relation_id: relation.id,
        inh_parent,
        kind: relation.kind.relation_kind(),
        indexes,
    })
}

fn resolve(catalog: &MemoryCatalog, name: &str) -> CliResult<ResolvedObject> {
    let qualified = QualifiedName::parse(name)
        .map_err(|e| CliError::bad_request(format!("Invalid name '{}': {}", name, e)))?;
    catalog
        .resolve(&qualified)
        .ok_or_else(|| CliError::bad_request(format!("Relation '{}' does not exist", name)))
}

fn display_name(catalog: &MemoryCatalog, id: ObjectId) -> String {
    catalog
        .name_of(id)
        .map(ToString::to_string)
        .unwrap_or_else(|| id.to_string())
}

fn names(catalog: &MemoryCatalog, ids: &[ObjectId]) -> Vec<String> {
    ids.iter().map(|id| display_name(catalog, *id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelationKind;

    fn session() -> Session<MemoryCatalog> {
        let mut catalog = MemoryCatalog::new("shop");
        let orders = catalog.add_table("public", "orders", 100).unwrap();
        catalog.add_index("public", "idx_orders_gin", 101, orders).unwrap();
        catalog.add_index("public", "idx_orders_btree", 102, orders).unwrap();
        catalog
            .add_relation("public", "order_totals", 300, RelationKind::View)
            .unwrap();
        Session::new(catalog)
    }

    #[test]
    fn test_set_then_plan() {
        let mut session = session();
        let set = handle_line(&mut session, r#"{"op":"set","value":"orders,idx_orders_gin"}"#);
        assert_eq!(set["status"], "ok");
        assert_eq!(set["data"]["directives"][0]["table"], "public.orders");
        assert_eq!(set["data"]["directives"][0]["indices"][0], "public.idx_orders_gin");

        let plan = handle_line(
            &mut session,
            r#"{"op":"plan","table":"orders","candidates":["idx_orders_gin","idx_orders_btree"]}"#,
        );
        assert_eq!(plan["data"]["after"], json!(["public.idx_orders_gin"]));
        assert_eq!(plan["data"]["removed"], 1);
    }

    #[test]
    fn test_rejected_set_reports_directive_code() {
        let mut session = session();
        let response = handle_line(&mut session, r#"{"op":"set","value":"idx_orders_gin,orders"}"#);
        assert_eq!(response["status"], "error");
        assert_eq!(response["code"], "PLANFIX_INDEX_BEFORE_TABLE");

        let show = handle_line(&mut session, r#"{"op":"show"}"#);
        assert_eq!(show["data"]["value"], "");
    }

    #[test]
    fn test_plan_inheritance_parent_untouched() {
        let mut session = session();
        handle_line(&mut session, r#"{"op":"set","value":"orders,idx_orders_gin"}"#);
        let plan = handle_line(
            &mut session,
            r#"{"op":"plan","table":"orders","candidates":["idx_orders_btree"],"inh_parent":true}"#,
        );
        assert_eq!(plan["data"]["filtered"], false);
        assert_eq!(plan["data"]["removed"], 0);
    }

    #[test]
    fn test_plan_rejects_non_index_candidate() {
        let mut session = session();
        let response = handle_line(
            &mut session,
            r#"{"op":"plan","table":"orders","candidates":["order_totals"]}"#,
        );
        assert_eq!(response["code"], "PLANFIX_CLI_BAD_REQUEST");
    }

    #[test]
    fn test_unknown_op_is_bad_request() {
        let mut session = session();
        let response = handle_line(&mut session, r#"{"op":"explode"}"#);
        assert_eq!(response["code"], "PLANFIX_CLI_BAD_REQUEST");
        let response = handle_line(&mut session, "not json");
        assert_eq!(response["code"], "PLANFIX_CLI_BAD_REQUEST");
    }

    #[test]
    fn test_check_reset_and_metrics() {
        let mut session = session();
        let check = handle_line(&mut session, r#"{"op":"check","value":"orders"}"#);
        assert_eq!(check["data"]["directives"][0]["indices"], json!([]));

        handle_line(&mut session, r#"{"op":"set","value":"orders,idx_orders_gin"}"#);
        let reset = handle_line(&mut session, r#"{"op":"reset"}"#);
        assert_eq!(reset["data"]["value"], "");
        assert_eq!(reset["data"]["directives"], json!([]));

        let metrics = handle_line(&mut session, r#"{"op":"metrics"}"#);
        assert_eq!(metrics["data"]["updates_applied"], 1);
    }
}
