use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Header carrying the identifier of a freshly signed document.
pub const UUID_HEADER: &str = "X-InkCrypt-UUID";

const SIGNED_PREFIX: &str = "signed_";
const FALLBACK_FILENAME: &str = "document.pdf";

/// A user-selected file. Bytes are shared, never mutated; reselecting a slot
/// replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub media_type: String,
    bytes: Arc<[u8]>,
}

impl Document {
    pub fn new(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a document from an upload whose declared type may be missing.
    ///
    /// Browsers report a MIME type for picked and dropped files; native file
    /// dialogs and drops do not, so a `.pdf` extension stands in for it.
    pub fn from_upload(
        filename: impl Into<String>,
        declared_type: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let filename = filename.into();
        let media_type = infer_media_type(&filename, declared_type);
        Self::new(filename, media_type, bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    /// Name used for the local copy of the signed document. Any directory
    /// part of the uploaded name is dropped before prefixing.
    pub fn signed_filename(&self) -> String {
        let base = self
            .filename
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .unwrap_or(FALLBACK_FILENAME);
        format!("{SIGNED_PREFIX}{base}")
    }
}

pub fn infer_media_type(filename: &str, declared_type: Option<&str>) -> String {
    match declared_type.map(str::trim).filter(|t| !t.is_empty()) {
        Some(declared) => declared.to_owned(),
        None if filename.to_ascii_lowercase().ends_with(".pdf") => PDF_MEDIA_TYPE.to_owned(),
        None => String::new(),
    }
}

/// Operation slots that hold a document. Revoke has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Sign,
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Sign,
    Verify,
    Revoke,
}

impl OperationKind {
    pub fn slot(self) -> Option<Slot> {
        match self {
            OperationKind::Sign => Some(Slot::Sign),
            OperationKind::Verify => Some(Slot::Verify),
            OperationKind::Revoke => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Sign => "sign",
            OperationKind::Verify => "verify",
            OperationKind::Revoke => "revoke",
        };
        f.write_str(name)
    }
}

/// The single normalized result every operation resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub title: String,
    pub message: String,
    /// Ordered key/value details; empty when the outcome carries none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<(String, String)>,
}

impl OperationOutcome {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            title: title.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            title: title.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Adds the detail only when a value is present.
    pub fn with_optional_detail(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_detail(key, value),
            None => self,
        }
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Verification confidence reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    Valid,
    Revoked,
    Invalid,
    Tampered,
    Error,
    Other(String),
}

impl Confidence {
    pub fn as_str(&self) -> &str {
        match self {
            Confidence::Valid => "VALID",
            Confidence::Revoked => "REVOKED",
            Confidence::Invalid => "INVALID",
            Confidence::Tampered => "TAMPERED",
            Confidence::Error => "ERROR",
            Confidence::Other(raw) => raw,
        }
    }
}

impl From<String> for Confidence {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "VALID" => Confidence::Valid,
            "REVOKED" => Confidence::Revoked,
            "INVALID" => Confidence::Invalid,
            "TAMPERED" => Confidence::Tampered,
            "ERROR" => Confidence::Error,
            _ => Confidence::Other(raw),
        }
    }
}

impl From<Confidence> for String {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of `/verify`, returned for both valid and invalid documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Absent on framework error bodies such as `{"detail": ...}`.
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub signed_at: Option<String>,
    #[serde(default)]
    pub signer: Option<String>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl VerifyResult {
    /// `reason`, or the framework `detail` when the service sent no reason.
    pub fn message(&self) -> String {
        if !self.reason.is_empty() {
            return self.reason.clone();
        }
        self.detail
            .as_ref()
            .and_then(detail_text)
            .unwrap_or_default()
    }
}

/// JSON body of a successful `/revoke`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RevokeAccepted {
    #[serde(default)]
    pub message: String,
}

/// JSON body of a rejected `/revoke`. `detail` is usually a string but the
/// service may send structured validation errors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevokeRejected {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl RevokeRejected {
    pub fn reason(&self) -> Option<String> {
        self.detail.as_ref().and_then(detail_text)
    }
}

/// Text of an error `detail`: strings as-is, structured values as JSON.
fn detail_text(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// JSON body of the service root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Online(String),
    Offline(String),
}

impl ServiceHealth {
    pub fn is_online(&self) -> bool {
        matches!(self, ServiceHealth::Online(_))
    }
}
