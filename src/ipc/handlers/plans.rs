use crate::extract::ExtractConfig;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::summary;
use serde_json::json;

// The planning tabs are scaffolds: tier/recommendation content is not
// generated yet, and the payloads say so explicitly so the frontend can
// render an "in progress" notice instead of empty widgets.

fn handle_plan_tiered(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "implemented": false,
            "tiers": [
                { "key": "universal", "label": "אוניברסלי", "responses": [] },
                { "key": "group", "label": "קבוצתי", "responses": [] },
                { "key": "intensive", "label": "אינטנסיבי", "responses": [] },
            ],
        }),
    )
}

fn handle_plan_recommendations(req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "implemented": false,
            "caption": "כיוונים פדגוגיים כלליים למענה כיתתי או קבוצתי, ללא ציון שמות תוכניות או ספקים.",
        }),
    )
}

// The individual tab already shows the student's real anchor rows; only the
// plan sections themselves are pending.
fn handle_plan_individual(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(loaded) = state.anchor.as_ref() else {
        return err(&req.id, "no_dataset", "load an anchor file first", None);
    };
    let Some(student) = req.params.get("student").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.student", None);
    };

    let table = &loaded.table;
    if !table.rows.iter().any(|r| r.student == student) {
        return err(
            &req.id,
            "not_found",
            "student not found in the loaded file",
            Some(json!({ "student": student })),
        );
    }

    let cfg = ExtractConfig::default();
    let rows = summary::student_domain_rows(table, student, &cfg);
    let difficulties: Vec<_> = rows.iter().filter(|r| r.is_difficulty).cloned().collect();
    let strengths: Vec<_> = rows.iter().filter(|r| r.is_strength).cloned().collect();

    ok(
        &req.id,
        json!({
            "student": student,
            "domains": rows,
            "difficulties": difficulties,
            "strengths": strengths,
            "strengthsNote": summary::student_strengths(table, student),
            "planSections": { "implemented": false },
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "plan.tiered" => Some(handle_plan_tiered(req)),
        "plan.individual" => Some(handle_plan_individual(state, req)),
        "plan.recommendations" => Some(handle_plan_recommendations(req)),
        _ => None,
    }
}
