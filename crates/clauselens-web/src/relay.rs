//! Upload relay — stores an incoming multipart upload in a transient file,
//! forwards it to the external analysis service, and hands back the service
//! response verbatim. One outbound call per inbound call; no retries, no
//! partial results.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use clauselens_common::Result as CommonResult;
use clauselens_config::AnalysisConfig;

/// Inbound multipart field the browser must use.
pub const UPLOAD_FIELD: &str = "contract";
/// Outbound multipart field the analysis service expects.
const FORWARD_FIELD: &str = "file";

// ── Error taxonomy ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RelayError {
    /// Bad or missing upload field; the caller's fault.
    #[error("{0}")]
    ClientUpload(String),

    /// The analysis service responded with a failure status.
    #[error("{message}")]
    ExternalService { status: u16, message: String },

    /// Transport failure or unexpected local fault.
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::ClientUpload(_) => StatusCode::BAD_REQUEST,
            RelayError::ExternalService { status, .. } => StatusCode::from_u16(*status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

// ── Transient file ────────────────────────────────────────────────────────────

/// Scoped on-disk copy of an upload. The file is removed when the guard
/// drops, so both the success and failure paths clean up.
pub struct TransientUpload {
    path: PathBuf,
}

impl TransientUpload {
    /// Write `bytes` under a collision-resistant name inside `dir`,
    /// creating the directory on demand.
    pub async fn store(dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        // Strip any path components a client might smuggle in
        let base = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        let path = dir.join(format!("{}-{}", Uuid::new_v4(), base));
        tokio::fs::write(&path, bytes).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("failed to remove transient upload {}: {}", self.path.display(), e);
        }
    }
}

// ── Analysis service client ───────────────────────────────────────────────────

/// HTTP client for the external analysis service.
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl AnalysisClient {
    pub fn new(cfg: &AnalysisConfig) -> CommonResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { base_url: cfg.base_url.clone(), client })
    }

    /// POST a stored upload to the service's `/analyze` endpoint and return
    /// the raw response body on success.
    pub async fn analyze(&self, stored: &TransientUpload, filename: &str) -> Result<Vec<u8>, RelayError> {
        let file_bytes = tokio::fs::read(stored.path()).await.map_err(|e| {
            RelayError::Internal(format!("failed to read stored upload: {e}"))
        })?;

        let part = reqwest::multipart::Part::bytes(file_bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part(FORWARD_FIELD, part);

        let resp = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("analysis service unreachable: {e}");
                RelayError::Internal(
                    "Internal server error during analysis forwarding.".to_string(),
                )
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            warn!("failed to read analysis response: {e}");
            RelayError::Internal("Internal server error during analysis forwarding.".to_string())
        })?;

        if !status.is_success() {
            // Surface the service's own error message when it sent one
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
                .unwrap_or_else(|| {
                    format!("Analysis service responded with an error (status {})", status.as_u16())
                });
            return Err(RelayError::ExternalService { status: status.as_u16(), message });
        }

        Ok(body.to_vec())
    }
}

// ── Relay operation ───────────────────────────────────────────────────────────

/// Full relay: pull the `contract` field out of the multipart body, store it
/// transiently, forward it, and return (original filename, raw response body).
/// The transient file is deleted before this returns, on every path.
pub async fn relay_upload(
    client: &AnalysisClient,
    upload_dir: &Path,
    multipart: &mut Multipart,
) -> Result<(String, Vec<u8>), RelayError> {
    let (filename, bytes) = read_upload_field(multipart).await?;

    let stored = TransientUpload::store(upload_dir, &filename, &bytes)
        .await
        .map_err(|e| RelayError::Internal(format!("failed to store upload: {e}")))?;

    info!("relaying upload '{}' ({} bytes)", filename, bytes.len());
    let body = client.analyze(&stored, &filename).await?;
    Ok((filename, body))
}

/// Locate the single expected file field, tolerating (and draining) any
/// unrelated fields around it.
async fn read_upload_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), RelayError> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            RelayError::ClientUpload(format!(
                "Upload error: {e}. Expected field '{UPLOAD_FIELD}'."
            ))
        })?;

        let Some(field) = field else {
            return Err(RelayError::ClientUpload(format!(
                "No file uploaded. Expected field '{UPLOAD_FIELD}'."
            )));
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            RelayError::ClientUpload(format!(
                "Upload error: {e}. Expected field '{UPLOAD_FIELD}'."
            ))
        })?;
        return Ok((filename, bytes.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("clauselens-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_transient_upload_removed_on_drop() {
        let dir = scratch_dir();
        let stored = TransientUpload::store(&dir, "lease.pdf", b"content")
            .await
            .unwrap();
        let path = stored.path().to_path_buf();
        assert!(path.exists());
        drop(stored);
        assert!(!path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_transient_names_never_collide() {
        let dir = scratch_dir();
        let a = TransientUpload::store(&dir, "same.pdf", b"a").await.unwrap();
        let b = TransientUpload::store(&dir, "same.pdf", b"b").await.unwrap();
        assert_ne!(a.path(), b.path());

        let names: HashSet<_> = [a.path(), b.path()]
            .iter()
            .map(|p| p.to_path_buf())
            .collect();
        assert_eq!(names.len(), 2);
        assert_eq!(std::fs::read(a.path()).unwrap(), b"a");
        assert_eq!(std::fs::read(b.path()).unwrap(), b"b");

        drop(a);
        drop(b);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_transient_name_strips_path_components() {
        let dir = scratch_dir();
        let stored = TransientUpload::store(&dir, "../../etc/passwd", b"x")
            .await
            .unwrap();
        assert_eq!(stored.path().parent().unwrap(), dir);
        assert!(stored
            .path()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("-passwd"));
        drop(stored);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            RelayError::ClientUpload("no file".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::ExternalService { status: 422, message: "bad doc".into() }.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RelayError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        // Unmappable external status collapses to 500
        assert_eq!(
            RelayError::ExternalService { status: 99, message: "?".into() }.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_names_expected_field() {
        let err = RelayError::ClientUpload(format!(
            "No file uploaded. Expected field '{UPLOAD_FIELD}'."
        ));
        assert!(err.to_string().contains("contract"));
    }
}
