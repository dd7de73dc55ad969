use crate::ipc::helpers::{dispatch, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Session};
use crate::workflow::Step;
use serde_json::{json, Value};

pub fn workflow_json(session: &Session) -> Value {
    let step = session.step();
    json!({
        "step": step.as_str(),
        "number": step.number(),
        "label": step.label(),
        "resetPending": session.workflow.reset_pending(),
        "canAdvance": step != Step::Preview && !session.roster.is_empty(),
        "canRetreat": step != Step::Data,
    })
}

fn workflow_move(state: &mut AppState, action: Action) -> Result<Value, HandlerErr> {
    dispatch(state, action)?;
    tracing::info!(step = state.session.step().as_str(), "workflow step changed");
    Ok(workflow_json(&state.session))
}

fn handle_workflow_get(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, Ok(workflow_json(&state.session)))
}

fn handle_workflow_next(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, workflow_move(state, Action::Next))
}

fn handle_workflow_back(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, workflow_move(state, Action::Back))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "workflow.get" => Some(handle_workflow_get(state, req)),
        "workflow.next" => Some(handle_workflow_next(state, req)),
        "workflow.back" => Some(handle_workflow_back(state, req)),
        _ => None,
    }
}
