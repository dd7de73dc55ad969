use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

use super::{documents, layout, roster, workflow};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "sessionId": state.session_id,
            "step": state.session.step().as_str(),
        }),
    )
}

fn handle_session_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = &state.session;
    ok(
        &req.id,
        json!({
            "sessionId": state.session_id,
            "roster": roster::roster_json(session),
            "config": session.config.view(),
            "documents": documents::catalog_json(session),
            "layout": layout::layout_json(session),
            "workflow": workflow::workflow_json(session),
            "signature": session.signature.as_ref().map(|img| img.meta()),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.state" => Some(handle_session_state(state, req)),
        _ => None,
    }
}
