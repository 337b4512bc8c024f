#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use inkcrypt_core::{
    Document, DownloadPort, OperationClient, PortError, ServiceResponse, SigningServicePort,
    PDF_MEDIA_TYPE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Sign(String),
    Verify(String),
    Revoke(String),
    Health,
}

/// Scripted service: replies are consumed in order, one per call.
#[derive(Debug, Default)]
pub struct FakeService {
    replies: Mutex<VecDeque<Result<ServiceResponse, PortError>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeService {
    pub fn reply(self, reply: Result<ServiceResponse, PortError>) -> Self {
        self.replies.lock().expect("replies lock").push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next(&self, call: Call) -> Result<ServiceResponse, PortError> {
        self.calls.lock().expect("calls lock").push(call);
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Transport("no scripted reply".to_owned())))
    }
}

impl SigningServicePort for FakeService {
    async fn sign(&self, document: &Document) -> Result<ServiceResponse, PortError> {
        self.next(Call::Sign(document.filename.clone()))
    }

    async fn verify(&self, document: &Document) -> Result<ServiceResponse, PortError> {
        self.next(Call::Verify(document.filename.clone()))
    }

    async fn revoke(&self, uuid: &str) -> Result<ServiceResponse, PortError> {
        self.next(Call::Revoke(uuid.to_owned()))
    }

    async fn health(&self) -> Result<ServiceResponse, PortError> {
        self.next(Call::Health)
    }
}

#[derive(Debug, Default)]
pub struct RecordingDownload {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    fail_with: Option<String>,
}

impl RecordingDownload {
    pub fn failing(reason: &str) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_owned()),
        }
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().expect("saved lock").clone()
    }
}

impl DownloadPort for RecordingDownload {
    fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<(), PortError> {
        if let Some(reason) = &self.fail_with {
            return Err(PortError::Io(reason.clone()));
        }
        self.saved
            .lock()
            .expect("saved lock")
            .push((filename.to_owned(), bytes));
        Ok(())
    }
}

pub type TestClient = OperationClient<FakeService, RecordingDownload>;

pub fn client(service: FakeService) -> TestClient {
    OperationClient::new(service, RecordingDownload::default())
}

pub fn pdf(name: &str) -> Document {
    Document::new(name, PDF_MEDIA_TYPE, b"%PDF-1.7\n".to_vec())
}

pub fn json(status: u16, body: serde_json::Value) -> Result<ServiceResponse, PortError> {
    Ok(ServiceResponse::new(status, body.to_string()))
}
