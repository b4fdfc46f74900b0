//! HTTP handlers for all web routes.

pub mod analysis;
pub mod api;
pub mod dashboard;
pub mod upload;

use clauselens_analysis::RiskLevel;

/// Minimal HTML escaping for values that originate in uploaded documents.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn risk_badge_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "badge-success",
        RiskLevel::Medium => "badge-warning",
        RiskLevel::High => "badge-danger",
    }
}
