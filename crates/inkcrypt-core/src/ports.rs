use thiserror::Error;

use crate::domain::Document;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("io error: {0}")]
    Io(String),
}

impl PortError {
    /// The underlying description without the category prefix.
    pub fn description(&self) -> &str {
        match self {
            PortError::Transport(d) | PortError::Validation(d) | PortError::Io(d) => d,
        }
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-level access to the signing service.
///
/// Implementations return `Ok` for every response the server produced,
/// including non-2xx ones; `Err` is reserved for requests that never completed.
#[allow(async_fn_in_trait)]
pub trait SigningServicePort {
    async fn sign(&self, document: &Document) -> Result<ServiceResponse, PortError>;
    async fn verify(&self, document: &Document) -> Result<ServiceResponse, PortError>;
    async fn revoke(&self, uuid: &str) -> Result<ServiceResponse, PortError>;
    async fn health(&self) -> Result<ServiceResponse, PortError>;
}

/// Local save of a produced file. Takes the payload by value; nothing is
/// retained after the call.
pub trait DownloadPort {
    fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), PortError>;
}
