use crate::extract::{extract_description, ExtractConfig};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::summary::{self, SummaryKind};
use serde_json::json;

fn parse_kind(req: &Request) -> Result<SummaryKind, serde_json::Value> {
    match req.params.get("kind").and_then(|v| v.as_str()) {
        None => Ok(SummaryKind::Difficulty),
        Some(raw) => SummaryKind::parse(raw)
            .ok_or_else(|| err(&req.id, "bad_params", format!("unknown kind: {}", raw), None)),
    }
}

fn handle_domains_summaries(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(loaded) = state.anchor.as_ref() else {
        return err(&req.id, "no_dataset", "load an anchor file first", None);
    };
    let kind = match parse_kind(req) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let summaries = summary::domain_summaries(&loaded.table, kind, &ExtractConfig::default());
    ok(
        &req.id,
        json!({ "kind": kind.as_str(), "summaries": summaries }),
    )
}

// Drill-down for one domain: every populated status cell with its extraction.
fn handle_domains_detail(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(loaded) = state.anchor.as_ref() else {
        return err(&req.id, "no_dataset", "load an anchor file first", None);
    };
    let Some(key) = req.params.get("domain").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.domain", None);
    };
    let Some(domain) = summary::domain_by_key(key) else {
        return err(
            &req.id,
            "not_found",
            format!("unknown domain key: {}", key),
            None,
        );
    };

    let table = &loaded.table;
    let Some(col) = table.column_index(domain.header) else {
        return err(
            &req.id,
            "not_found",
            "domain column not present in this file",
            Some(json!({ "header": domain.header })),
        );
    };

    let cfg = ExtractConfig::default();
    let rows: Vec<serde_json::Value> = table
        .rows
        .iter()
        .filter_map(|row| {
            let cell = row.cells.get(col)?.as_ref()?;
            Some(json!({
                "student": row.student,
                "status": cell,
                "description": extract_description(cell, &cfg),
            }))
        })
        .collect();

    ok(
        &req.id,
        json!({ "key": domain.key, "label": domain.header, "rows": rows }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "domains.summaries" => Some(handle_domains_summaries(state, req)),
        "domains.detail" => Some(handle_domains_detail(state, req)),
        _ => None,
    }
}
