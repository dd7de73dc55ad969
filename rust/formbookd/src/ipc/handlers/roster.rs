use crate::ipc::helpers::{
    dispatch, get_required_bool, get_required_str, get_required_u32, respond, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Outcome, Session};
use crate::sheet::{self, SourceKind};
use serde_json::{json, Value};
use std::path::Path;

pub fn roster_json(session: &Session) -> Value {
    let roster = &session.roster;
    json!({
        "students": roster.students(),
        "count": roster.len(),
        "exemptedCount": roster.exempted_count(),
    })
}

/// Spreadsheet cells arrive as arbitrary JSON scalars.
fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn table_from_params(params: &Value) -> Result<Vec<Vec<String>>, HandlerErr> {
    let rows = params
        .get("rows")
        .and_then(|v| v.as_array())
        .ok_or_else(|| HandlerErr::bad_params("missing rows"))?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Array(cells) => Ok(cells.iter().map(cell_text).collect()),
            Value::Null => Ok(Vec::new()),
            _ => Err(HandlerErr::bad_params(format!("rows[{}] must be an array", i))),
        })
        .collect()
}

fn imported(state: &mut AppState, action: Action) -> Result<Value, HandlerErr> {
    let Outcome::Imported(count) = dispatch(state, action)? else {
        return Err(HandlerErr::new("internal", "unexpected import outcome"));
    };
    let mut result = roster_json(&state.session);
    result["imported"] = json!(count);
    Ok(result)
}

fn roster_import_text(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let text = get_required_str(params, "text")?.to_string();
    imported(state, Action::ImportText(text))
}

fn roster_import_table(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let rows = table_from_params(params)?;
    imported(state, Action::ImportTable(rows))
}

fn roster_import_file(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let path = Path::new(get_required_str(params, "path")?);
    // Check the step before touching the file.
    state.session.workflow.require(crate::workflow::Step::Data)?;
    let action = match SourceKind::from_path(path)? {
        SourceKind::Xlsx => Action::ImportTable(sheet::read_xlsx_file(path)?),
        SourceKind::Csv => Action::ImportTable(sheet::read_csv_file(path)?),
        SourceKind::Text => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                tracing::warn!(path = %path.to_string_lossy(), error = %e, "roster read failed");
                HandlerErr::new("io_failed", format!("failed to read {}: {}", path.to_string_lossy(), e))
            })?;
            Action::ImportText(text)
        }
    };
    imported(state, action)
}

fn roster_toggle_exempt(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let id = get_required_u32(params, "id")?;
    let Outcome::Toggled(flag) = dispatch(state, Action::ToggleExempt(id))? else {
        return Err(HandlerErr::new("internal", "unexpected toggle outcome"));
    };
    Ok(json!({
        "id": id,
        "changed": flag.is_some(),
        "isExempted": flag,
    }))
}

fn roster_apply_exemptions(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let text = get_required_str(params, "text")?.to_string();
    let Outcome::Exempted(n) = dispatch(state, Action::ApplyExemptionList(text))? else {
        return Err(HandlerErr::new("internal", "unexpected exemption outcome"));
    };
    let mut result = roster_json(&state.session);
    result["matched"] = json!(n);
    Ok(result)
}

fn roster_request_reset(state: &mut AppState) -> Result<Value, HandlerErr> {
    let Outcome::ResetPrompt(prompt) = dispatch(state, Action::RequestReset)? else {
        return Err(HandlerErr::new("internal", "unexpected reset outcome"));
    };
    Ok(json!({ "prompt": prompt }))
}

fn roster_confirm_reset(state: &mut AppState, params: &Value) -> Result<Value, HandlerErr> {
    let accept = get_required_bool(params, "accept")?;
    let Outcome::ResetResolved { cleared } = dispatch(state, Action::ConfirmReset(accept))? else {
        return Err(HandlerErr::new("internal", "unexpected reset outcome"));
    };
    let mut result = roster_json(&state.session);
    result["cleared"] = json!(cleared);
    Ok(result)
}

fn handle_roster_list(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, Ok(roster_json(&state.session)))
}

fn handle_roster_import_text(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_import_text(state, &req.params))
}

fn handle_roster_import_table(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_import_table(state, &req.params))
}

fn handle_roster_import_file(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_import_file(state, &req.params))
}

fn handle_roster_toggle_exempt(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_toggle_exempt(state, &req.params))
}

fn handle_roster_apply_exemptions(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_apply_exemptions(state, &req.params))
}

fn handle_roster_request_reset(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_request_reset(state))
}

fn handle_roster_confirm_reset(state: &mut AppState, req: &Request) -> Value {
    respond(&req.id, roster_confirm_reset(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "roster.list" => Some(handle_roster_list(state, req)),
        "roster.importText" => Some(handle_roster_import_text(state, req)),
        "roster.importTable" => Some(handle_roster_import_table(state, req)),
        "roster.importFile" => Some(handle_roster_import_file(state, req)),
        "roster.toggleExempt" => Some(handle_roster_toggle_exempt(state, req)),
        "roster.applyExemptions" => Some(handle_roster_apply_exemptions(state, req)),
        "roster.requestReset" => Some(handle_roster_request_reset(state, req)),
        "roster.confirmReset" => Some(handle_roster_confirm_reset(state, req)),
        _ => None,
    }
}
