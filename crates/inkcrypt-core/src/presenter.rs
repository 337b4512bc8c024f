//! Result panel state
//!
//! Holds at most one outcome and derives everything the shell paints from it.

use crate::domain::{Confidence, OperationOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

/// Render-ready projection of the displayed outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedResult {
    pub channel: Channel,
    pub title: String,
    pub message: String,
    pub details: Vec<DetailLine>,
    /// Failed because the document's signature was revoked.
    pub revoked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPresenter {
    current: Option<OperationOutcome>,
    scroll_pending: bool,
}

impl ResultPresenter {
    /// Replace whatever is displayed and ask the shell to bring it into view.
    pub fn show(&mut self, outcome: OperationOutcome) {
        tracing::debug!(success = outcome.success, title = %outcome.title, "presenting outcome");
        self.current = Some(outcome);
        self.scroll_pending = true;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.scroll_pending = false;
    }

    pub fn current(&self) -> Option<&OperationOutcome> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Returns true once per `show`.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    pub fn view(&self) -> Option<PresentedResult> {
        self.current.as_ref().map(present)
    }
}

pub fn present(outcome: &OperationOutcome) -> PresentedResult {
    PresentedResult {
        channel: if outcome.success {
            Channel::Success
        } else {
            Channel::Failure
        },
        title: outcome.title.clone(),
        message: outcome.message.clone(),
        details: outcome
            .details
            .iter()
            .map(|(key, value)| DetailLine {
                label: detail_label(key),
                value: value.clone(),
            })
            .collect(),
        revoked: !outcome.success
            && outcome.detail("confidence") == Some(Confidence::Revoked.as_str()),
    }
}

/// `signed_at` -> `SIGNED AT`
pub fn detail_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_spaced_and_uppercased() {
        assert_eq!(detail_label("uuid"), "UUID");
        assert_eq!(detail_label("signed_at"), "SIGNED AT");
    }

    #[test]
    fn details_keep_insertion_order() {
        let outcome = OperationOutcome::success("t", "m")
            .with_detail("uuid", "abc")
            .with_detail("signed_at", "2024-01-01")
            .with_detail("signer", "Alice");
        let view = present(&outcome);
        let labels: Vec<&str> = view.details.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["UUID", "SIGNED AT", "SIGNER"]);
        assert_eq!(view.channel, Channel::Success);
    }

    #[test]
    fn revoked_flag_follows_confidence_not_title() {
        let verified_revoked = OperationOutcome::failure("Document Revoked", "revoked")
            .with_detail("confidence", "REVOKED");
        assert!(present(&verified_revoked).revoked);

        let revoke_succeeded =
            OperationOutcome::success("Document Revoked", "done").with_detail("uuid", "abc");
        assert!(!present(&revoke_succeeded).revoked);

        let tampered = OperationOutcome::failure("Verification Failed", "bad")
            .with_detail("confidence", "TAMPERED");
        assert!(!present(&tampered).revoked);
    }

    #[test]
    fn show_replaces_and_clear_hides() {
        let mut presenter = ResultPresenter::default();
        presenter.show(OperationOutcome::success("first", ""));
        presenter.show(OperationOutcome::failure("second", ""));
        assert_eq!(presenter.current().map(|o| o.title.as_str()), Some("second"));
        assert_eq!(
            presenter.view().map(|v| v.channel),
            Some(Channel::Failure)
        );

        assert!(presenter.take_scroll_request());
        assert!(!presenter.take_scroll_request());

        presenter.clear();
        assert!(!presenter.is_visible());
        assert!(presenter.view().is_none());
    }
}
