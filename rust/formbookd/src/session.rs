use crate::assets::SignatureImage;
use crate::catalog::{DocumentCatalog, DocumentKind};
use crate::config::{ConfigPatch, SchoolConfig};
use crate::error::SessionError;
use crate::layout::{MarginField, MarginSettings};
use crate::roster::{self, Roster, Student};
use crate::workflow::{Step, Workflow};

/// Every state change the front-end can request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ImportTable(Vec<Vec<String>>),
    ImportText(String),
    ToggleExempt(u32),
    ApplyExemptionList(String),
    RequestReset,
    ConfirmReset(bool),
    UpdateConfig(ConfigPatch),
    ToggleDocument(DocumentKind),
    ToggleDocumentVisible(DocumentKind),
    NudgeMargin(MarginField, i32),
    Next,
    Back,
    SetSignature(SignatureImage),
    ClearSignature,
}

/// What an accepted action produced, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Imported(usize),
    Toggled(Option<bool>),
    Exempted(usize),
    ResetPrompt(&'static str),
    ResetResolved { cleared: bool },
    DocumentFlag(bool),
    StepChanged(Step),
}

/// The whole in-memory state of one session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub roster: Roster,
    pub config: SchoolConfig,
    pub catalog: DocumentCatalog,
    pub margins: MarginSettings,
    pub workflow: Workflow,
    pub signature: Option<SignatureImage>,
}

impl Session {
    /// Applies `action`. On `Err` nothing has changed.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, SessionError> {
        match action {
            Action::ImportTable(rows) => self.import(roster::import_from_table(&rows)),
            Action::ImportText(text) => self.import(roster::import_from_text(&text)),
            Action::ToggleExempt(id) => Ok(Outcome::Toggled(self.roster.toggle_exempt(id))),
            Action::ApplyExemptionList(text) => {
                Ok(Outcome::Exempted(self.roster.apply_exemption_list(&text)))
            }
            Action::RequestReset => self
                .workflow
                .request_reset(self.roster.len())
                .map(Outcome::ResetPrompt),
            Action::ConfirmReset(accept) => {
                let cleared = self.workflow.resolve_reset(accept)?;
                if cleared {
                    self.roster.clear();
                    tracing::info!("roster cleared");
                }
                Ok(Outcome::ResetResolved { cleared })
            }
            Action::UpdateConfig(patch) => {
                self.config.apply(patch);
                Ok(Outcome::Done)
            }
            Action::ToggleDocument(kind) => {
                Ok(Outcome::DocumentFlag(self.catalog.toggle_selected(kind)))
            }
            Action::ToggleDocumentVisible(kind) => {
                Ok(Outcome::DocumentFlag(self.catalog.toggle_visible(kind)))
            }
            Action::NudgeMargin(field, steps) => {
                self.margins.nudge(field, steps);
                Ok(Outcome::Done)
            }
            Action::Next => self
                .workflow
                .advance(self.roster.len())
                .map(Outcome::StepChanged),
            Action::Back => self.workflow.retreat().map(Outcome::StepChanged),
            Action::SetSignature(image) => {
                self.signature = Some(image);
                Ok(Outcome::Done)
            }
            Action::ClearSignature => {
                self.signature = None;
                Ok(Outcome::Done)
            }
        }
    }

    fn import(&mut self, students: Vec<Student>) -> Result<Outcome, SessionError> {
        self.workflow.require(Step::Data)?;
        let count = students.len();
        self.roster.replace(students);
        self.workflow.cancel_reset();
        tracing::info!(count, "roster imported");
        Ok(Outcome::Imported(count))
    }

    pub fn step(&self) -> Step {
        self.workflow.step()
    }
}
