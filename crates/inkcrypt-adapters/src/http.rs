//! reqwest-backed signing service client
//!
//! Works on native targets (inside a tokio runtime) and on wasm32 (browser
//! fetch). Every server response, whatever its status, is returned as a
//! [`ServiceResponse`]; only requests that never completed become errors.

use reqwest::multipart::{Form, Part};

use inkcrypt_core::{Document, PortError, ServiceResponse, SigningServicePort};

use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct HttpSigningService {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpSigningService {
    pub fn new(config: ClientConfig) -> Result<Self, PortError> {
        let builder = reqwest::Client::builder();
        // Each native operation runs on its own short-lived runtime, so pooled
        // connections would outlive the runtime that opened them.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.pool_max_idle_per_host(0);
        let client = builder.build().map_err(transport)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_document(
        &self,
        path: &str,
        document: &Document,
    ) -> Result<ServiceResponse, PortError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, filename = %document.filename, "uploading document");
        let form = Form::new().part("file", document_part(document)?);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read_response(response).await
    }
}

impl SigningServicePort for HttpSigningService {
    async fn sign(&self, document: &Document) -> Result<ServiceResponse, PortError> {
        self.post_document("sign", document).await
    }

    async fn verify(&self, document: &Document) -> Result<ServiceResponse, PortError> {
        self.post_document("verify", document).await
    }

    async fn revoke(&self, uuid: &str) -> Result<ServiceResponse, PortError> {
        let url = self.config.endpoint("revoke");
        tracing::debug!(%url, "revoking document");
        let form = Form::new().text("uuid", uuid.to_owned());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read_response(response).await
    }

    async fn health(&self) -> Result<ServiceResponse, PortError> {
        let url = self.config.endpoint("/");
        let response = self.client.get(&url).send().await.map_err(transport)?;
        read_response(response).await
    }
}

fn document_part(document: &Document) -> Result<Part, PortError> {
    Part::bytes(document.bytes().to_vec())
        .file_name(document.filename.clone())
        .mime_str(&document.media_type)
        .map_err(|e| PortError::Validation(format!("media type '{}': {e}", document.media_type)))
}

async fn read_response(response: reqwest::Response) -> Result<ServiceResponse, PortError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_owned(), v.to_owned()))
        })
        .collect();
    let body = response.bytes().await.map_err(transport)?.to_vec();
    tracing::debug!(status, bytes = body.len(), "service responded");
    Ok(ServiceResponse {
        status,
        headers,
        body,
    })
}

fn transport(err: reqwest::Error) -> PortError {
    PortError::Transport(err.to_string())
}
