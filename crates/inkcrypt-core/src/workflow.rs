//! Workflow controller
//!
//! Owns the page-session [`UiState`] and sequences each action:
//! precondition, busy on, remote call, busy off, present.
//!
//! The remote segment is split out as [`PreparedOperation`] so a frame-driven
//! shell can run it on an executor and hand the outcome back through
//! [`WorkflowController::complete`]. [`WorkflowController::run`] does all of it
//! inline.

use crate::busy::BusyIndicator;
use crate::client::{invalid_uuid_outcome, OperationClient};
use crate::domain::{Document, OperationKind, OperationOutcome, Slot};
use crate::ports::{DownloadPort, SigningServicePort};
use crate::presenter::ResultPresenter;
use crate::selection::FileSelection;
use crate::tabs::{Tab, TabNavigator};

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub tabs: TabNavigator,
    pub selection: FileSelection,
    pub busy: BusyIndicator,
    pub presenter: ResultPresenter,
    pub revoke_input: String,
}

/// Input captured at dispatch time for one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedOperation {
    Sign(Document),
    Verify(Document),
    Revoke(String),
}

impl PreparedOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            PreparedOperation::Sign(_) => OperationKind::Sign,
            PreparedOperation::Verify(_) => OperationKind::Verify,
            PreparedOperation::Revoke(_) => OperationKind::Revoke,
        }
    }

    pub async fn execute<S, D>(self, client: &OperationClient<S, D>) -> OperationOutcome
    where
        S: SigningServicePort,
        D: DownloadPort,
    {
        match self {
            PreparedOperation::Sign(document) => client.sign(&document).await,
            PreparedOperation::Verify(document) => client.verify(&document).await,
            PreparedOperation::Revoke(uuid) => client.revoke(&uuid).await,
        }
    }
}

#[derive(Debug, Default)]
pub struct WorkflowController {
    state: UiState,
}

impl WorkflowController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.state.tabs.active()
    }

    /// Switch panels. Always clears the displayed outcome, even when `tab` is
    /// already active.
    pub fn activate_tab(&mut self, tab: Tab) {
        self.state.tabs.activate(tab);
        self.state.presenter.clear();
    }

    /// File chosen through the picker. Returns whether it was accepted.
    pub fn pick_file(&mut self, slot: Slot, document: Document) -> bool {
        self.state.selection.select(slot, document).is_ok()
    }

    /// Files dropped on a slot's target. Returns whether one was accepted.
    pub fn drop_files(&mut self, slot: Slot, files: impl IntoIterator<Item = Document>) -> bool {
        self.state.selection.drop_files(slot, files).is_ok()
    }

    pub fn drag_over(&mut self, slot: Slot) {
        self.state.selection.drag_over(slot);
    }

    pub fn drag_leave(&mut self, slot: Slot) {
        self.state.selection.drag_leave(slot);
    }

    pub fn revoke_input(&self) -> &str {
        &self.state.revoke_input
    }

    pub fn revoke_input_mut(&mut self) -> &mut String {
        &mut self.state.revoke_input
    }

    pub fn set_revoke_input(&mut self, value: impl Into<String>) {
        self.state.revoke_input = value.into();
    }

    /// Whether the action control for `kind` is enabled. Revoke is always
    /// pressable; an empty identifier produces a local validation outcome.
    pub fn can_dispatch(&self, kind: OperationKind) -> bool {
        match kind.slot() {
            Some(slot) => self.state.selection.is_ready(slot),
            None => true,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy.is_visible()
    }

    pub fn presenter(&self) -> &ResultPresenter {
        &self.state.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut ResultPresenter {
        &mut self.state.presenter
    }

    /// Check the precondition and, if it holds, clear the previous outcome,
    /// show the busy indicator and return the request to execute.
    ///
    /// Sign/verify without a document return `None` with no other effect.
    /// Revoke with a blank identifier presents the validation outcome and
    /// returns `None`.
    pub fn begin(&mut self, kind: OperationKind) -> Option<PreparedOperation> {
        let operation = match kind {
            OperationKind::Sign => {
                PreparedOperation::Sign(self.state.selection.document(Slot::Sign)?.clone())
            }
            OperationKind::Verify => {
                PreparedOperation::Verify(self.state.selection.document(Slot::Verify)?.clone())
            }
            OperationKind::Revoke => {
                let uuid = self.state.revoke_input.trim();
                if uuid.is_empty() {
                    tracing::debug!("revoke requested with empty identifier");
                    self.state.presenter.clear();
                    self.state.presenter.show(invalid_uuid_outcome());
                    return None;
                }
                PreparedOperation::Revoke(uuid.to_owned())
            }
        };

        tracing::info!(operation = %kind, "operation started");
        self.state.presenter.clear();
        self.state.busy.show();
        Some(operation)
    }

    /// Finish an operation started with [`Self::begin`].
    pub fn complete(&mut self, kind: OperationKind, outcome: OperationOutcome) {
        self.state.busy.hide();
        if kind == OperationKind::Revoke && outcome.success {
            self.state.revoke_input.clear();
        }
        self.state.presenter.show(outcome);
    }

    /// Run one action end to end. Returns the displayed outcome, or `None`
    /// when the action did not proceed.
    pub async fn run<S, D>(
        &mut self,
        kind: OperationKind,
        client: &OperationClient<S, D>,
    ) -> Option<&OperationOutcome>
    where
        S: SigningServicePort,
        D: DownloadPort,
    {
        match self.begin(kind) {
            Some(operation) => {
                let outcome = operation.execute(client).await;
                self.complete(kind, outcome);
            }
            None if kind != OperationKind::Revoke => return None,
            None => {}
        }
        self.state.presenter.current()
    }
}
