use crate::config::ConfigPatch;
use crate::ipc::helpers::{dispatch, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::Action;
use serde_json::{json, Value};

fn config_update(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let patch: ConfigPatch = serde_json::from_value(params.clone())
        .map_err(|e| HandlerErr::bad_params(format!("invalid config patch: {}", e)))?;
    dispatch(state, Action::UpdateConfig(patch))?;
    Ok(json!(state.session.config.view()))
}

fn handle_config_get(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, Ok(json!(state.session.config.view())))
}

fn handle_config_update(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, config_update(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "config.get" => Some(handle_config_get(state, req)),
        "config.update" => Some(handle_config_update(state, req)),
        _ => None,
    }
}
