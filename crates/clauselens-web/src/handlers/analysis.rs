//! Analysis detail view — clause-level risk breakdown for the selected
//! contract, with an explicit empty state when nothing is selected.

use axum::{
    extract::{Path, State},
    response::Html,
};

use clauselens_analysis::{Clause, Contract};

use crate::handlers::dashboard::NAV_HTML;
use crate::handlers::{escape_html, risk_badge_class};
use crate::state::SharedState;

/// `GET /analysis` — show whatever contract is currently selected.
pub async fn analysis_page(State(state): State<SharedState>) -> Html<String> {
    let selected = {
        let mut view = state.view.write().await;
        view.go_analysis();
        view.selected().map(str::to_owned)
    };

    let contract = match selected {
        Some(id) => state.find_contract(&id).await,
        None => None,
    };

    Html(match contract {
        Some(c) => render_analysis(&c),
        None => render_empty_state(),
    })
}

/// `GET /analysis/{id}` — select a listed contract, then show it.
pub async fn analysis_select(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Html<String> {
    state.view.write().await.open_contract(id.clone());

    Html(match state.find_contract(&id).await {
        Some(c) => render_analysis(&c),
        None => render_empty_state(),
    })
}

fn render_empty_state() -> String {
    page(
        "Analysis",
        r#"<div class="card">
        <div class="card-body text-center text-muted">
            No contract data available for analysis. Please upload a contract first.
            <div class="mt-3"><a href="/upload" class="btn btn-primary">Upload Contract</a></div>
        </div>
    </div>"#
            .to_string(),
    )
}

fn render_analysis(contract: &Contract) -> String {
    let clause_cards: String = contract.clauses.iter().map(render_clause).collect();

    let body = format!(r#"
    <div class="page-header">
        <div>
            <h1 class="page-title">{}</h1>
            <p class="text-muted">Uploaded {} · {} ·
                Overall risk: <span class="badge {}">{}</span></p>
        </div>
    </div>

    <p class="summary">{}</p>

    <div class="stats-grid">
        <div class="stat-card">
            <div class="stat-value">{}</div><div class="stat-label">Total Clauses</div>
        </div>
        <div class="stat-card border-danger">
            <div class="stat-value">{}</div><div class="stat-label">High Risk Clauses</div>
        </div>
    </div>

    {}"#,
        escape_html(&contract.name),
        contract.upload_date.format("%Y-%m-%d"),
        contract.file_type,
        risk_badge_class(contract.overall_risk),
        contract.overall_risk,
        escape_html(&contract.summary),
        contract.total_clauses,
        contract.high_risk_clauses,
        clause_cards,
    );

    page(&escape_html(&contract.name), body)
}

fn render_clause(clause: &Clause) -> String {
    format!(r#"
    <div class="card mt-3">
        <div class="card-header">
            <span class="badge {}">{} risk</span>
            <span class="text-muted">{}</span>
            <span class="confidence">Confidence: {}%</span>
        </div>
        <div class="card-body">
            <p class="explanation">{}</p>
            <blockquote class="original-text">{}</blockquote>
            <p class="text-muted small">{}</p>
        </div>
    </div>"#,
        risk_badge_class(clause.risk_level),
        clause.risk_level,
        escape_html(&clause.risk_type),
        clause.confidence,
        escape_html(&clause.explanation),
        escape_html(&clause.original_text),
        escape_html(&clause.simplified_text),
    )
}

fn page(title: &str, body: String) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — ClauseLens</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
{}
<main class="main-content">
{}
</main>
</body>
</html>"#, title, NAV_HTML, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clauselens_analysis::{FileType, RiskLevel};

    fn sample_contract() -> Contract {
        Contract {
            id: "contract-test".to_string(),
            name: "Lease & Sublease.pdf".to_string(),
            upload_date: Utc::now(),
            file_type: FileType::Pdf,
            clauses: vec![Clause {
                id: "clause-0-test".to_string(),
                original_text: "Tenant shall pay liquidated damages.".to_string(),
                simplified_text: "No summary provided (risk analysis only).".to_string(),
                risk_level: RiskLevel::High,
                risk_type: "penalty".to_string(),
                confidence: 78,
                explanation: "Could result in significant financial penalties.".to_string(),
            }],
            overall_risk: RiskLevel::High,
            summary: "Analyzed contract with 1 clauses. Overall risk detected: high. Note: Summarization is disabled.".to_string(),
            total_clauses: 1,
            high_risk_clauses: 1,
        }
    }

    #[test]
    fn test_analysis_page_shows_clause_details() {
        let html = render_analysis(&sample_contract());
        assert!(html.contains("Lease &amp; Sublease.pdf"));
        assert!(html.contains("badge-danger"));
        assert!(html.contains("penalty"));
        assert!(html.contains("Confidence: 78%"));
        assert!(html.contains("liquidated damages"));
    }

    #[test]
    fn test_empty_state_notice() {
        let html = render_empty_state();
        assert!(html.contains("No contract data available for analysis"));
    }
}
