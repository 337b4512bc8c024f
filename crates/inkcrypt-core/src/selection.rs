//! Per-slot file selection
//!
//! Each slot holds at most one accepted PDF. Anything else is rejected and the
//! previous selection stays in place.

use thiserror::Error;

use crate::domain::{Document, Slot};

const EMPTY_PROMPT: &str = "Click to select or drag a PDF here";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{filename}' is {media_type:?}, expected application/pdf")]
    NotPdf {
        filename: String,
        media_type: String,
    },
    #[error("no file in drop")]
    EmptyDrop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSlot {
    document: Option<Document>,
    drag_hover: bool,
}

impl OperationSlot {
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.document.is_some()
    }

    pub fn drag_hover(&self) -> bool {
        self.drag_hover
    }

    /// Display text for the upload target.
    pub fn display_text(&self) -> String {
        match &self.document {
            Some(doc) => format!("Selected: {}", doc.filename),
            None => EMPTY_PROMPT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    sign: OperationSlot,
    verify: OperationSlot,
}

impl FileSelection {
    pub fn slot(&self, slot: Slot) -> &OperationSlot {
        match slot {
            Slot::Sign => &self.sign,
            Slot::Verify => &self.verify,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut OperationSlot {
        match slot {
            Slot::Sign => &mut self.sign,
            Slot::Verify => &mut self.verify,
        }
    }

    /// Accept `document` into `slot` if it is a PDF.
    pub fn select(&mut self, slot: Slot, document: Document) -> Result<&Document, SelectionError> {
        if !document.is_pdf() {
            tracing::debug!(
                ?slot,
                filename = %document.filename,
                media_type = %document.media_type,
                "ignoring non-pdf selection"
            );
            return Err(SelectionError::NotPdf {
                filename: document.filename,
                media_type: document.media_type,
            });
        }
        tracing::info!(?slot, filename = %document.filename, "document selected");
        Ok(&*self.slot_mut(slot).document.insert(document))
    }

    /// Handle a drop. Only the first file is considered.
    pub fn drop_files(
        &mut self,
        slot: Slot,
        files: impl IntoIterator<Item = Document>,
    ) -> Result<&Document, SelectionError> {
        self.slot_mut(slot).drag_hover = false;
        let first = files.into_iter().next().ok_or(SelectionError::EmptyDrop)?;
        self.select(slot, first)
    }

    pub fn drag_over(&mut self, slot: Slot) {
        self.slot_mut(slot).drag_hover = true;
    }

    pub fn drag_leave(&mut self, slot: Slot) {
        self.slot_mut(slot).drag_hover = false;
    }

    pub fn is_ready(&self, slot: Slot) -> bool {
        self.slot(slot).is_ready()
    }

    pub fn document(&self, slot: Slot) -> Option<&Document> {
        self.slot(slot).document()
    }
}
