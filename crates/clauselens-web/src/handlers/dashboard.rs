//! Dashboard handler — lists contracts analyzed during this session.

use axum::{extract::State, response::Html};

use clauselens_analysis::Contract;

use crate::handlers::{escape_html, risk_badge_class};
use crate::state::SharedState;

/// Navigation HTML template shared across all pages
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    state.view.write().await.go_dashboard();
    let contracts = state.contracts.read().await.clone();
    Html(render_dashboard(&contracts))
}

fn render_dashboard(contracts: &[Contract]) -> String {
    let rows: String = if contracts.is_empty() {
        r#"<tr><td colspan="6" class="text-center text-muted">No contracts analyzed yet. Upload a contract to get started.</td></tr>"#.to_string()
    } else {
        contracts.iter().map(|c| {
            format!(r#"
            <tr>
                <td><a href="/analysis/{}">{}</a></td>
                <td><span class="badge badge-outline">{}</span></td>
                <td>{}</td>
                <td><span class="badge {}">{}</span></td>
                <td>{}</td>
                <td>{}</td>
            </tr>"#,
                c.id,
                escape_html(&c.name),
                c.file_type,
                c.upload_date.format("%Y-%m-%d %H:%M"),
                risk_badge_class(c.overall_risk),
                c.overall_risk,
                c.total_clauses,
                c.high_risk_clauses,
            )
        }).collect()
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Dashboard — ClauseLens</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{}
<main class="main-content">
    <div class="page-header">
        <div>
            <h1 class="page-title">Dashboard</h1>
            <p class="text-muted">Contracts analyzed this session</p>
        </div>
        <a href="/upload" class="btn btn-primary">Upload Contract</a>
    </div>

    <div class="card">
        <div class="card-body p-0">
            <table class="table">
                <thead>
                    <tr>
                        <th>Contract</th><th>Type</th><th>Uploaded</th>
                        <th>Overall Risk</th><th>Clauses</th><th>High Risk</th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>
    </div>
</main>
</body>
</html>"#, NAV_HTML, rows)
}
