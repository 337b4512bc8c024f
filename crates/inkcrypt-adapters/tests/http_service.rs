use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use inkcrypt_adapters::{ClientConfig, DirectoryDownload, HttpSigningService};
use inkcrypt_core::{
    Document, OperationClient, OperationKind, PortError, ServiceHealth, SigningServicePort, Slot,
    WorkflowController, PDF_MEDIA_TYPE, UUID_HEADER,
};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    content_type: String,
    body: Vec<u8>,
}

fn spawn_mock_server(requests: usize, calls: Arc<Mutex<Vec<Recorded>>>) -> String {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    thread::spawn(move || {
        for _ in 0..requests {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = Vec::new();
            let _ = req.as_reader().read_to_end(&mut body);
            let content_type = req
                .headers()
                .iter()
                .find(|h| h.field.equiv("Content-Type"))
                .map(|h| h.value.as_str().to_owned())
                .unwrap_or_default();
            let method = req.method().clone();
            let path = req.url().to_owned();
            let text = String::from_utf8_lossy(&body).into_owned();
            if let Ok(mut g) = calls.lock() {
                g.push(Recorded {
                    method: method.to_string(),
                    path: path.clone(),
                    content_type,
                    body,
                });
            }

            let response = match (method, path.as_str()) {
                (Method::Post, "/sign") => Response::from_data(b"%PDF-signed".to_vec())
                    .with_header(
                        Header::from_bytes(UUID_HEADER.as_bytes(), &b"abc-123"[..])
                            .expect("uuid header"),
                    )
                    .with_status_code(StatusCode(200)),
                (Method::Post, "/verify") => Response::from_data(
                    json!({
                        "valid": false,
                        "reason": "Document has been revoked",
                        "confidence": "REVOKED"
                    })
                    .to_string()
                    .into_bytes(),
                )
                .with_status_code(StatusCode(200)),
                (Method::Post, "/revoke") if text.contains("missing-uuid") => Response::from_data(
                    json!({"detail": "Document not found"}).to_string().into_bytes(),
                )
                .with_status_code(StatusCode(404)),
                (Method::Post, "/revoke") => Response::from_data(
                    json!({"success": true, "message": "Document revoked"})
                        .to_string()
                        .into_bytes(),
                )
                .with_status_code(StatusCode(200)),
                (Method::Get, "/") => Response::from_data(
                    json!({"message": "InkCrypt API is running"})
                        .to_string()
                        .into_bytes(),
                )
                .with_status_code(StatusCode(200)),
                _ => Response::from_data(b"{}".to_vec()).with_status_code(StatusCode(404)),
            };
            let _ = req.respond(response);
        }
    });

    addr
}

fn service(base_url: &str) -> HttpSigningService {
    let cfg = ClientConfig::default()
        .with_base_url(base_url)
        .expect("mock base url");
    HttpSigningService::new(cfg).expect("http client")
}

fn contract() -> Document {
    Document::new("contract.pdf", PDF_MEDIA_TYPE, b"%PDF-1.7 original".to_vec())
}

fn scratch_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("inkcrypt-http-{tag}-{}", std::process::id()))
}

#[tokio::test]
async fn sign_uploads_multipart_file_field() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_mock_server(1, Arc::clone(&calls));

    let response = service(&base).sign(&contract()).await.expect("sign");
    assert_eq!(response.status, 200);
    assert_eq!(response.header(UUID_HEADER), Some("abc-123"));
    assert_eq!(response.body, b"%PDF-signed");

    let recorded = calls.lock().expect("calls").clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/sign");
    assert!(recorded[0].content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&recorded[0].body);
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="contract.pdf""#));
    assert!(body.contains("application/pdf"));
    assert!(body.contains("%PDF-1.7 original"));
}

#[tokio::test]
async fn revoke_sends_uuid_form_field() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_mock_server(1, Arc::clone(&calls));

    let response = service(&base).revoke("abc-123").await.expect("revoke");
    assert_eq!(response.status, 200);

    let recorded = calls.lock().expect("calls").clone();
    let body = String::from_utf8_lossy(&recorded[0].body);
    assert!(body.contains(r#"name="uuid""#));
    assert!(body.contains("abc-123"));
}

#[tokio::test]
async fn non_success_status_is_still_a_response() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_mock_server(1, calls);

    let response = service(&base)
        .revoke("missing-uuid")
        .await
        .expect("404 is a response");
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let err = service(&format!("http://127.0.0.1:{port}"))
        .verify(&contract())
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, PortError::Transport(_)));
}

#[tokio::test]
async fn workflow_end_to_end_over_http() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let base = spawn_mock_server(5, Arc::clone(&calls));
    let dir = scratch_dir("e2e");
    let client = OperationClient::new(service(&base), DirectoryDownload::new(&dir));
    let mut workflow = WorkflowController::new();

    assert_eq!(
        client.health().await,
        ServiceHealth::Online("InkCrypt API is running".to_owned())
    );

    workflow.pick_file(Slot::Sign, contract());
    let signed = workflow
        .run(OperationKind::Sign, &client)
        .await
        .cloned()
        .expect("sign outcome");
    assert!(signed.success);
    assert_eq!(signed.detail("uuid"), Some("abc-123"));
    assert_eq!(
        std::fs::read(dir.join("signed_contract.pdf")).expect("signed file"),
        b"%PDF-signed"
    );

    workflow.pick_file(Slot::Verify, contract());
    let verified = workflow
        .run(OperationKind::Verify, &client)
        .await
        .cloned()
        .expect("verify outcome");
    assert!(!verified.success);
    assert_eq!(verified.detail("confidence"), Some("REVOKED"));

    workflow.set_revoke_input("missing-uuid");
    let rejected = workflow
        .run(OperationKind::Revoke, &client)
        .await
        .cloned()
        .expect("revoke outcome");
    assert!(!rejected.success);
    assert_eq!(rejected.message, "Document not found");
    assert_eq!(workflow.revoke_input(), "missing-uuid");

    workflow.set_revoke_input("abc-123");
    let revoked = workflow
        .run(OperationKind::Revoke, &client)
        .await
        .cloned()
        .expect("revoke outcome");
    assert!(revoked.success);
    assert_eq!(revoked.message, "Document revoked");
    assert!(workflow.revoke_input().is_empty());

    assert_eq!(calls.lock().expect("calls").len(), 5);
    let _ = std::fs::remove_dir_all(&dir);
}
