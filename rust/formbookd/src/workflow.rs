use serde::Serialize;
use std::fmt;

use crate::error::SessionError;

pub const RESET_PROMPT: &str = "هل أنت متأكد من مسح جميع البيانات الحالية؟";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    #[default]
    Data,
    Customize,
    Preview,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Data => "data",
            Step::Customize => "customize",
            Step::Preview => "preview",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Step::Data => 1,
            Step::Customize => 2,
            Step::Preview => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Data => "إدارة البيانات",
            Step::Customize => "تخصيص الوثائق",
            Step::Preview => "معاينة الطباعة",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Data => Some(Step::Customize),
            Step::Customize => Some(Step::Preview),
            Step::Preview => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Data => None,
            Step::Customize => Some(Step::Data),
            Step::Preview => Some(Step::Customize),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear wizard with a two-phase roster reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    step: Step,
    reset_pending: bool,
}

impl Workflow {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    pub fn require(&self, expected: Step) -> Result<(), SessionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SessionError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    pub fn advance(&mut self, roster_len: usize) -> Result<Step, SessionError> {
        let Some(next) = self.step.next() else {
            return Err(SessionError::WorkflowBlocked {
                step: self.step,
                direction: "forward",
            });
        };
        if roster_len == 0 {
            return Err(SessionError::EmptyRoster);
        }
        self.step = next;
        self.reset_pending = false;
        Ok(next)
    }

    pub fn retreat(&mut self) -> Result<Step, SessionError> {
        let Some(prev) = self.step.prev() else {
            return Err(SessionError::WorkflowBlocked {
                step: self.step,
                direction: "back",
            });
        };
        self.step = prev;
        self.reset_pending = false;
        Ok(prev)
    }

    pub fn request_reset(&mut self, roster_len: usize) -> Result<&'static str, SessionError> {
        self.require(Step::Data)?;
        if roster_len == 0 {
            return Err(SessionError::EmptyRoster);
        }
        self.reset_pending = true;
        Ok(RESET_PROMPT)
    }

    /// Drops an unanswered prompt, e.g. when the roster it refers to is replaced.
    pub fn cancel_reset(&mut self) {
        self.reset_pending = false;
    }

    /// Consumes the pending prompt. `true` means the caller must clear the
    /// roster; a cancelled prompt mutates nothing.
    pub fn resolve_reset(&mut self, accept: bool) -> Result<bool, SessionError> {
        if !self.reset_pending {
            return Err(SessionError::NoPendingReset);
        }
        self.reset_pending = false;
        Ok(accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roster_blocks_forward_navigation() {
        let mut wf = Workflow::default();
        assert_eq!(wf.advance(0), Err(SessionError::EmptyRoster));
        assert_eq!(wf.step(), Step::Data);
        assert_eq!(wf.advance(0), Err(SessionError::EmptyRoster));
        assert_eq!(wf.step(), Step::Data);
    }

    #[test]
    fn walks_forward_then_back_one_step_at_a_time() {
        let mut wf = Workflow::default();
        assert_eq!(wf.advance(3), Ok(Step::Customize));
        assert_eq!(wf.advance(3), Ok(Step::Preview));
        assert!(matches!(
            wf.advance(3),
            Err(SessionError::WorkflowBlocked { step: Step::Preview, .. })
        ));
        assert_eq!(wf.step(), Step::Preview);

        assert_eq!(wf.retreat(), Ok(Step::Customize));
        assert_eq!(wf.retreat(), Ok(Step::Data));
        assert!(matches!(
            wf.retreat(),
            Err(SessionError::WorkflowBlocked { step: Step::Data, .. })
        ));
    }

    #[test]
    fn reset_needs_data_step_and_confirmation() {
        let mut wf = Workflow::default();
        assert_eq!(wf.resolve_reset(true), Err(SessionError::NoPendingReset));
        assert_eq!(wf.request_reset(0), Err(SessionError::EmptyRoster));

        assert_eq!(wf.request_reset(2), Ok(RESET_PROMPT));
        assert!(wf.reset_pending());
        assert_eq!(wf.resolve_reset(false), Ok(false));
        assert!(!wf.reset_pending());
        assert_eq!(wf.resolve_reset(true), Err(SessionError::NoPendingReset));

        wf.advance(2).expect("advance");
        assert_eq!(
            wf.request_reset(2),
            Err(SessionError::WrongStep {
                expected: Step::Data,
                actual: Step::Customize
            })
        );
    }

    #[test]
    fn leaving_data_cancels_pending_reset() {
        let mut wf = Workflow::default();
        wf.request_reset(1).expect("request");
        wf.advance(1).expect("advance");
        wf.retreat().expect("back");
        assert_eq!(wf.resolve_reset(true), Err(SessionError::NoPendingReset));
    }
}
