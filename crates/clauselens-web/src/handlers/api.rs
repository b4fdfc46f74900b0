//! `POST /api/analyze` — relay contract, per the upload relay design: the
//! external service's successful response body is returned verbatim, and
//! every failure maps to a structured JSON error.

use axum::{
    extract::{
        multipart::MultipartRejection,
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::relay::{relay_upload, RelayError, UPLOAD_FIELD};
use crate::state::SharedState;

pub async fn analyze(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, RelayError> {
    let mut multipart = multipart.map_err(|e| {
        RelayError::ClientUpload(format!("Upload error: {e}. Expected field '{UPLOAD_FIELD}'."))
    })?;
    let upload_dir = std::path::Path::new(&state.config.uploads.dir);
    let (_, body) = relay_upload(&state.analysis, upload_dir, &mut multipart).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
