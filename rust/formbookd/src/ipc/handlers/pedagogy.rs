use crate::ipc::helpers::{get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::pedagogy;
use serde_json::{json, Value};

fn pedagogy_lookup(params: &Value) -> Result<Value, HandlerErr> {
    let level = get_required_str(params, "level")?;
    let term = get_required_str(params, "term")?;
    let data = pedagogy::lookup(level, term);
    Ok(json!({
        "level": level,
        "term": term,
        "field": pedagogy::field_label(term),
        "kafaa": data.kafaa,
        "criteria": data.criteria,
    }))
}

fn handle_pedagogy_options(_state: &mut AppState, req: &Request) -> Value {
    let terms: Vec<Value> = pedagogy::terms()
        .iter()
        .map(|t| json!({ "term": t, "field": pedagogy::field_label(t) }))
        .collect();
    respond(
        &req.id,
        Ok(json!({
            "levels": pedagogy::levels(),
            "terms": terms,
        })),
    )
}

fn handle_pedagogy_lookup(_state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, pedagogy_lookup(&req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "pedagogy.options" => Some(handle_pedagogy_options(state, req)),
        "pedagogy.lookup" => Some(handle_pedagogy_lookup(state, req)),
        _ => None,
    }
}
