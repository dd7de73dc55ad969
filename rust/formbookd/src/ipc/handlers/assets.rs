use crate::assets::SignatureImage;
use crate::ipc::helpers::{dispatch, get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::Action;
use serde_json::{json, Value};
use std::path::Path;

fn assets_set_signature(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let path = Path::new(get_required_str(params, "path")?);
    let image = SignatureImage::load(path).map_err(|e| {
        tracing::warn!(error = %e, "signature load failed");
        HandlerErr::new("io_failed", format!("{:#}", e))
    })?;
    dispatch(state, Action::SetSignature(image))?;
    Ok(json!({ "signature": state.session.signature.as_ref().map(|img| img.meta()) }))
}

fn handle_assets_set_signature(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, assets_set_signature(state, &req.params))
}

fn handle_assets_clear_signature(state: &mut AppState, req: &Request) -> Value {
    respond(
        &req.id,
        dispatch(state, Action::ClearSignature).map(|_| json!({ "signature": null })),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "assets.setSignature" => Some(handle_assets_set_signature(state, req)),
        "assets.clearSignature" => Some(handle_assets_clear_signature(state, req)),
        _ => None,
    }
}
