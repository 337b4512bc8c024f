//! Document-operation workflow engine for the InkCrypt client.
//!
//! No I/O happens here; the HTTP transport and file saving are reached
//! through [`SigningServicePort`] and [`DownloadPort`].

pub mod busy;
pub mod client;
pub mod domain;
pub mod ports;
pub mod presenter;
pub mod selection;
pub mod tabs;
pub mod workflow;

pub use busy::BusyIndicator;
pub use client::{verify_outcome, OperationClient, OperationError};
pub use domain::{
    Confidence, Document, OperationKind, OperationOutcome, ServiceHealth, Slot, VerifyResult,
    PDF_MEDIA_TYPE, UUID_HEADER,
};
pub use ports::{DownloadPort, PortError, ServiceResponse, SigningServicePort};
pub use presenter::{Channel, DetailLine, PresentedResult, ResultPresenter};
pub use selection::{FileSelection, OperationSlot, SelectionError};
pub use tabs::{Tab, TabNavigator};
pub use workflow::{PreparedOperation, UiState, WorkflowController};
