//! Remote operations and outcome normalization
//!
//! Every call resolves to an [`OperationOutcome`]. Transport failures, service
//! rejections and undecodable bodies are folded into failure outcomes here and
//! never escape to the workflow.

use thiserror::Error;

use crate::domain::{
    Confidence, Document, OperationKind, OperationOutcome, RevokeAccepted, RevokeRejected,
    ServiceBanner, ServiceHealth, VerifyResult, UUID_HEADER,
};
use crate::ports::{DownloadPort, PortError, ServiceResponse, SigningServicePort};

pub const SIGN_SUCCESS_TITLE: &str = "PDF Signed Successfully";
pub const SIGN_SUCCESS_MESSAGE: &str =
    "Your PDF has been digitally signed and is ready for download.";
pub const SIGN_FAILURE_TITLE: &str = "Signing Failed";
pub const SIGN_FAILURE_MESSAGE: &str = "Signing failed";

pub const VERIFY_SUCCESS_TITLE: &str = "Document Verified";
pub const VERIFY_REVOKED_TITLE: &str = "Document Revoked";
pub const VERIFY_FAILURE_TITLE: &str = "Verification Failed";
pub const VERIFY_ERROR_TITLE: &str = "Verification Error";

pub const REVOKE_SUCCESS_TITLE: &str = "Document Revoked";
pub const REVOKE_FAILURE_TITLE: &str = "Revocation Failed";
pub const REVOKE_FAILURE_MESSAGE: &str = "Revocation failed";
pub const REVOKE_INVALID_TITLE: &str = "Invalid UUID";
pub const REVOKE_INVALID_MESSAGE: &str = "Please enter a valid document UUID";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Transport(String),
    #[error("service rejected request ({status}): {reason}")]
    ServiceRejection { status: u16, reason: String },
    #[error("service rejected request ({status})")]
    ServiceRejectionOpaque { status: u16 },
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Download(String),
}

impl From<PortError> for OperationError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Transport(d) => OperationError::Transport(d),
            PortError::Validation(d) => OperationError::Validation(d),
            PortError::Io(d) => OperationError::Download(d),
        }
    }
}

impl OperationError {
    /// Fold into the failure outcome for `kind`.
    pub fn into_outcome(self, kind: OperationKind) -> OperationOutcome {
        match kind {
            OperationKind::Sign => {
                let message = match self {
                    OperationError::ServiceRejection { .. }
                    | OperationError::ServiceRejectionOpaque { .. } => {
                        SIGN_FAILURE_MESSAGE.to_owned()
                    }
                    other => other.to_string(),
                };
                OperationOutcome::failure(SIGN_FAILURE_TITLE, message)
            }
            OperationKind::Verify => OperationOutcome::failure(VERIFY_ERROR_TITLE, self.to_string()),
            OperationKind::Revoke => {
                let message = match self {
                    OperationError::ServiceRejection { reason, .. } => reason,
                    OperationError::ServiceRejectionOpaque { .. } => {
                        REVOKE_FAILURE_MESSAGE.to_owned()
                    }
                    other => other.to_string(),
                };
                OperationOutcome::failure(REVOKE_FAILURE_TITLE, message)
            }
        }
    }
}

/// Local outcome for an empty revoke identifier; no request is made.
pub fn invalid_uuid_outcome() -> OperationOutcome {
    OperationOutcome::failure(REVOKE_INVALID_TITLE, REVOKE_INVALID_MESSAGE)
}

/// Map a decoded verify body to its outcome. `success` is exactly `valid`.
pub fn verify_outcome(result: VerifyResult) -> OperationOutcome {
    let message = result.message();
    let confidence = result.confidence.map(String::from);
    if result.valid {
        return OperationOutcome::success(VERIFY_SUCCESS_TITLE, message)
            .with_optional_detail("uuid", result.uuid)
            .with_optional_detail("signed_at", result.signed_at)
            .with_optional_detail("signer", result.signer)
            .with_optional_detail("confidence", confidence);
    }

    let title = if confidence.as_deref() == Some(Confidence::Revoked.as_str()) {
        VERIFY_REVOKED_TITLE
    } else {
        VERIFY_FAILURE_TITLE
    };
    OperationOutcome::failure(title, message).with_optional_detail("confidence", confidence)
}

fn decode<T: serde::de::DeserializeOwned>(response: &ServiceResponse) -> Result<T, OperationError> {
    serde_json::from_slice(&response.body).map_err(|e| OperationError::Decode(e.to_string()))
}

pub struct OperationClient<S, D> {
    service: S,
    downloads: D,
}

impl<S, D> OperationClient<S, D>
where
    S: SigningServicePort,
    D: DownloadPort,
{
    pub fn new(service: S, downloads: D) -> Self {
        Self { service, downloads }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    pub async fn sign(&self, document: &Document) -> OperationOutcome {
        let outcome = self
            .try_sign(document)
            .await
            .unwrap_or_else(|e| e.into_outcome(OperationKind::Sign));
        log_outcome(OperationKind::Sign, &outcome);
        outcome
    }

    async fn try_sign(&self, document: &Document) -> Result<OperationOutcome, OperationError> {
        let response = self.service.sign(document).await?;
        if !response.is_success() {
            return Err(OperationError::ServiceRejectionOpaque {
                status: response.status,
            });
        }

        let uuid = response.header(UUID_HEADER).map(str::to_owned);
        if uuid.is_none() {
            tracing::warn!(header = UUID_HEADER, "sign response carried no identifier");
        }

        let filename = document.signed_filename();
        self.downloads.save(&filename, response.body)?;
        tracing::info!(filename = %filename, "signed document saved");

        Ok(OperationOutcome::success(SIGN_SUCCESS_TITLE, SIGN_SUCCESS_MESSAGE)
            .with_optional_detail("uuid", uuid))
    }

    pub async fn verify(&self, document: &Document) -> OperationOutcome {
        let outcome = match self.try_verify(document).await {
            Ok(result) => verify_outcome(result),
            Err(e) => e.into_outcome(OperationKind::Verify),
        };
        log_outcome(OperationKind::Verify, &outcome);
        outcome
    }

    async fn try_verify(&self, document: &Document) -> Result<VerifyResult, OperationError> {
        // The body is JSON whatever the status.
        let response = self.service.verify(document).await?;
        decode(&response)
    }

    /// `uuid` must already be trimmed and non-empty; see
    /// [`crate::WorkflowController::begin`].
    pub async fn revoke(&self, uuid: &str) -> OperationOutcome {
        let outcome = self
            .try_revoke(uuid)
            .await
            .unwrap_or_else(|e| e.into_outcome(OperationKind::Revoke));
        log_outcome(OperationKind::Revoke, &outcome);
        outcome
    }

    async fn try_revoke(&self, uuid: &str) -> Result<OperationOutcome, OperationError> {
        let response = self.service.revoke(uuid).await?;
        if response.is_success() {
            let accepted: RevokeAccepted = decode(&response)?;
            return Ok(OperationOutcome::success(REVOKE_SUCCESS_TITLE, accepted.message)
                .with_detail("uuid", uuid));
        }

        let reason = serde_json::from_slice::<RevokeRejected>(&response.body)
            .ok()
            .and_then(|rejected| rejected.reason());
        Err(match reason {
            Some(reason) => OperationError::ServiceRejection {
                status: response.status,
                reason,
            },
            None => OperationError::ServiceRejectionOpaque {
                status: response.status,
            },
        })
    }

    pub async fn health(&self) -> ServiceHealth {
        let result = match self.service.health().await {
            Ok(response) if response.is_success() => decode::<ServiceBanner>(&response)
                .map(|banner| ServiceHealth::Online(banner.message))
                .unwrap_or_else(|e| ServiceHealth::Offline(e.to_string())),
            Ok(response) => ServiceHealth::Offline(format!("status {}", response.status)),
            Err(e) => ServiceHealth::Offline(e.description().to_owned()),
        };
        tracing::info!(online = result.is_online(), "service health checked");
        result
    }
}

fn log_outcome(kind: OperationKind, outcome: &OperationOutcome) {
    if outcome.success {
        tracing::info!(operation = %kind, title = %outcome.title, "operation succeeded");
    } else {
        tracing::warn!(
            operation = %kind,
            title = %outcome.title,
            message = %outcome.message,
            "operation failed"
        );
    }
}
