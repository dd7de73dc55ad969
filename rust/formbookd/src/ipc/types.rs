use serde::Deserialize;
use uuid::Uuid;

use crate::session::Session;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Process-wide state. One sidecar process serves one session.
pub struct AppState {
    pub session_id: String,
    pub session: Session,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            session: Session::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
