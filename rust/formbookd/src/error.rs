use thiserror::Error;

use crate::workflow::Step;

/// Rejections raised while applying an action to the session.
///
/// A rejected action never mutates the session; the IPC layer reports it with
/// the stable code from [`SessionError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("import at least one student first")]
    EmptyRoster,

    #[error("cannot move {direction} from the {step} step")]
    WorkflowBlocked {
        step: Step,
        direction: &'static str,
    },

    #[error("only available in the {expected} step (currently {actual})")]
    WrongStep { expected: Step, actual: Step },

    #[error("no reset is waiting for confirmation")]
    NoPendingReset,
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::EmptyRoster => "empty_roster",
            SessionError::WorkflowBlocked { .. } => "workflow_blocked",
            SessionError::WrongStep { .. } => "wrong_step",
            SessionError::NoPendingReset => "no_pending_reset",
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            SessionError::EmptyRoster | SessionError::NoPendingReset => None,
            SessionError::WorkflowBlocked { step, direction } => Some(serde_json::json!({
                "step": step.as_str(),
                "direction": direction,
            })),
            SessionError::WrongStep { expected, actual } => Some(serde_json::json!({
                "expected": expected.as_str(),
                "actual": actual.as_str(),
            })),
        }
    }
}
