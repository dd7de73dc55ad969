use crate::bundle;
use crate::ipc::helpers::{get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::render::html::{print_document, RenderMode};
use crate::render::{render_pages, Page};
use crate::workflow::Step;
use serde_json::{json, Value};
use std::path::Path;

fn preview_pages(state: &AppState) -> Result<Vec<Page>, HandlerErr> {
    state.session.workflow.require(Step::Preview)?;
    Ok(render_pages(&state.session))
}

fn print_pages(state: &AppState) -> Result<Value, HandlerErr> {
    let pages = preview_pages(state)?;
    Ok(json!({
        "pages": pages,
        "count": pages.len(),
    }))
}

fn print_doc(state: &AppState, params: &Value) -> Result<Value, HandlerErr> {
    let mode = match params.get("mode").and_then(|v| v.as_str()) {
        None => RenderMode::Preview,
        Some(raw) => RenderMode::parse(raw)
            .ok_or_else(|| HandlerErr::bad_params(format!("unknown mode: {}", raw)))?,
    };
    let pages = preview_pages(state)?;
    let html = print_document(&pages, state.session.signature.as_ref(), mode).into_string();
    Ok(json!({
        "html": html,
        "pageCount": pages.len(),
    }))
}

fn print_export_bundle(state: &AppState, params: &Value) -> Result<Value, HandlerErr> {
    let out_path = Path::new(get_required_str(params, "outPath")?);
    let pages = preview_pages(state)?;
    let summary = bundle::export_print_bundle(&state.session, &pages, out_path).map_err(|e| {
        tracing::warn!(error = %e, "bundle export failed");
        HandlerErr::new("io_failed", format!("{:#}", e))
    })?;
    Ok(json!({
        "outPath": out_path.to_string_lossy(),
        "bundleFormat": summary.bundle_format,
        "entryCount": summary.entry_count,
        "pageCount": summary.page_count,
    }))
}

fn handle_print_pages(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, print_pages(state))
}

fn handle_print_document(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, print_doc(state, &req.params))
}

fn handle_print_export_bundle(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, print_export_bundle(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "print.pages" => Some(handle_print_pages(state, req)),
        "print.document" => Some(handle_print_document(state, req)),
        "print.exportBundle" => Some(handle_print_export_bundle(state, req)),
        _ => None,
    }
}
