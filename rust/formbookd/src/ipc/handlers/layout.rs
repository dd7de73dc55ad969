use crate::ipc::helpers::{dispatch, get_optional_i32, get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::layout::{MarginField, MARGIN_STEP_MM, OFFSET_STEP_PX};
use crate::session::{Action, Session};
use serde_json::{json, Value};

pub fn layout_json(session: &Session) -> Value {
    json!({
        "margins": session.margins,
        "marginStepMm": MARGIN_STEP_MM,
        "offsetStepPx": OFFSET_STEP_PX,
    })
}

fn layout_nudge(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let raw = get_required_str(params, "field")?;
    let field = MarginField::parse(raw)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown margin field: {}", raw)))?;
    let steps = get_optional_i32(params, "steps")?.unwrap_or(1);
    dispatch(state, Action::NudgeMargin(field, steps))?;
    Ok(layout_json(&state.session))
}

fn handle_layout_get(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, Ok(layout_json(&state.session)))
}

fn handle_layout_nudge(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, layout_nudge(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "layout.get" => Some(handle_layout_get(state, req)),
        "layout.nudge" => Some(handle_layout_nudge(state, req)),
        _ => None,
    }
}
