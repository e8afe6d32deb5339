use crate::anchor;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::summary;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "datasetLoaded": state.anchor.is_some(),
            "sourcePath": state
                .anchor
                .as_ref()
                .map(|a| a.source_path.to_string_lossy().to_string()),
        }),
    )
}

fn handle_anchor_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match anchor::load_anchor(&path) {
        Ok(loaded) => {
            let table = &loaded.table;
            let students = summary::distinct_students(table);
            let domains_present: Vec<&str> = summary::DOMAINS
                .iter()
                .filter(|d| table.column_index(d.header).is_some())
                .map(|d| d.key)
                .collect();
            let resp = json!({
                "datasetId": loaded.dataset_id,
                "sourcePath": loaded.source_path.to_string_lossy(),
                "fingerprint": loaded.fingerprint,
                "loadedAt": loaded.loaded_at,
                "studentCount": students.len(),
                "recordCount": table.record_count(),
                "domainsPresent": domains_present,
                "hasStrengthsColumn": table.column_index(summary::STRENGTHS_COLUMN).is_some(),
            });
            // A failed load above leaves the previous dataset in place.
            state.anchor = Some(loaded);
            ok(&req.id, resp)
        }
        Err(e) => err(&req.id, &e.code, e.message, e.details),
    }
}

fn handle_anchor_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.anchor = None;
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "anchor.load" => Some(handle_anchor_load(state, req)),
        "anchor.clear" => Some(handle_anchor_clear(state, req)),
        _ => None,
    }
}
