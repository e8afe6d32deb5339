use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::summary;
use serde_json::json;

// Sorted names feed the student picker on the individual-plan tab.
fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(loaded) = state.anchor.as_ref() else {
        return err(&req.id, "no_dataset", "load an anchor file first", None);
    };

    let mut students = summary::distinct_students(&loaded.table);
    students.sort();
    ok(
        &req.id,
        json!({ "count": students.len(), "students": students }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        _ => None,
    }
}
