use crate::catalog::DocumentKind;
use crate::ipc::helpers::{dispatch, get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Session};
use serde_json::{json, Value};

pub fn catalog_json(session: &Session) -> Value {
    let order: Vec<&str> = session
        .catalog
        .print_order()
        .into_iter()
        .map(DocumentKind::as_str)
        .collect();
    json!({
        "entries": session.catalog.entries(),
        "printOrder": order,
    })
}

fn kind_param(params: &Value) -> Result<DocumentKind, HandlerErr> {
    let raw = get_required_str(params, "id")?;
    DocumentKind::parse(raw).ok_or_else(|| HandlerErr {
        code: "bad_params",
        message: format!("unknown document: {}", raw),
        details: Some(json!({
            "known": DocumentKind::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>(),
        })),
    })
}

fn documents_toggle(state: &mut AppState, params: &Value, visible: bool) -> Result<Value, HandlerErr> {
    let kind = kind_param(params)?;
    let action = if visible {
        Action::ToggleDocumentVisible(kind)
    } else {
        Action::ToggleDocument(kind)
    };
    dispatch(state, action)?;
    let mut result = catalog_json(&state.session);
    result["toggled"] = json!(state.session.catalog.entry(kind));
    Ok(result)
}

fn handle_documents_list(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, Ok(catalog_json(&state.session)))
}

fn handle_documents_toggle(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, documents_toggle(state, &req.params, false))
}

fn handle_documents_toggle_visible(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, documents_toggle(state, &req.params, true))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "documents.list" => Some(handle_documents_list(state, req)),
        "documents.toggle" => Some(handle_documents_toggle(state, req)),
        "documents.toggleVisible" => Some(handle_documents_toggle_visible(state, req)),
        _ => None,
    }
}
