//! Upload form and the browser-facing upload path: relay the file, normalize
//! the response, store the contract, and move the UI to the analysis view.
//! Failures re-render the form with an inline error instead of crashing.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::Value;
use tracing::{info, warn};

use clauselens_analysis::normalize;

use crate::handlers::dashboard::NAV_HTML;
use crate::handlers::escape_html;
use crate::relay::{relay_upload, UPLOAD_FIELD};
use crate::state::SharedState;

pub async fn upload_page(State(state): State<SharedState>) -> Html<String> {
    state.view.write().await.go_upload();
    Html(render_upload(None))
}

pub async fn upload_submit(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            let msg = format!("Upload error: {e}. Expected field '{UPLOAD_FIELD}'.");
            return Html(render_upload(Some(&msg))).into_response();
        }
    };
    let upload_dir = std::path::Path::new(&state.config.uploads.dir);

    let (filename, body) =
        match relay_upload(&state.analysis, upload_dir, &mut multipart).await {
            Ok(out) => out,
            Err(e) => {
                warn!("upload relay failed: {e}");
                return Html(render_upload(Some(&e.to_string()))).into_response();
            }
        };

    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!("analysis service returned non-JSON body: {e}");
            return Html(render_upload(Some("Analysis service returned an unreadable response.")))
                .into_response();
        }
    };

    match normalize(raw) {
        Ok(contract) => {
            info!(
                "analyzed '{}': {} clauses, {} high risk",
                filename, contract.total_clauses, contract.high_risk_clauses
            );
            state.add_contract(contract).await;
            Redirect::to("/analysis").into_response()
        }
        Err(e) => {
            // Analysis incomplete: no contract, no view transition
            warn!("analysis of '{}' incomplete: {e}", filename);
            Html(render_upload(Some(&e.to_string()))).into_response()
        }
    }
}

fn render_upload(error: Option<&str>) -> String {
    let banner = match error {
        Some(msg) => format!(
            r#"<div class="alert alert-danger">Error: {}</div>"#,
            escape_html(msg)
        ),
        None => String::new(),
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Upload — ClauseLens</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{}
<main class="main-content">
    <div class="page-header">
        <div>
            <h1 class="page-title">Upload Contract for Analysis</h1>
            <p class="text-muted">Select a PDF or text file to begin the analysis.</p>
        </div>
    </div>

    {}

    <div class="card">
        <div class="card-body">
            <form method="POST" action="/upload/run" enctype="multipart/form-data">
                <div class="upload-zone">
                    <label for="file-upload">
                        <span>Choose a contract file</span>
                        <input id="file-upload" type="file" name="{}" accept=".pdf,.txt" required>
                    </label>
                </div>
                <button type="submit" class="btn btn-primary mt-3">Analyze</button>
            </form>
        </div>
    </div>
</main>
</body>
</html>"#, NAV_HTML, banner, UPLOAD_FIELD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_form_posts_expected_field() {
        let page = render_upload(None);
        assert!(page.contains(r#"name="contract""#));
        assert!(page.contains(r#"action="/upload/run""#));
        assert!(!page.contains("alert-danger"));
    }

    #[test]
    fn test_error_banner_is_escaped() {
        let page = render_upload(Some("<script>alert(1)</script>"));
        assert!(page.contains("alert-danger"));
        assert!(!page.contains("<script>alert(1)</script>"));
    }
}
