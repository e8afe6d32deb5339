use crate::extract::ExtractConfig;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::summary::{self, DomainSummary, SummaryKind};
use serde_json::json;

fn chart_series(summaries: &[DomainSummary]) -> Vec<serde_json::Value> {
    summaries
        .iter()
        .map(|s| json!({ "key": s.key, "label": s.label, "count": s.student_count }))
        .collect()
}

/// Everything the class-snapshot tab renders: the two headline metrics, the
/// distinct student list in file order, and one bar-chart series per summary
/// kind. Zero-match domains carry no bar.
fn handle_snapshot_class(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(loaded) = state.anchor.as_ref() else {
        return err(&req.id, "no_dataset", "load an anchor file first", None);
    };

    let table = &loaded.table;
    let cfg = ExtractConfig::default();
    let students = summary::distinct_students(table);
    let difficulty = summary::domain_summaries(table, SummaryKind::Difficulty, &cfg);
    let strength = summary::domain_summaries(table, SummaryKind::Strength, &cfg);

    ok(
        &req.id,
        json!({
            "studentCount": students.len(),
            "recordCount": table.record_count(),
            "students": students,
            "difficultyChart": chart_series(&difficulty),
            "strengthChart": chart_series(&strength),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "snapshot.class" => Some(handle_snapshot_class(state, req)),
        _ => None,
    }
}
