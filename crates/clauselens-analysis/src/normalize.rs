//! Response normalization — maps the external analysis service's loosely
//! shaped JSON into the strict [`Contract`] model with derived risk levels.
//!
//! Pure transformation: no I/O, deterministic except for id generation and
//! the upload-date fallback. Missing or mistyped optional fields never fail
//! normalization; only a falsy top-level `success` flag does.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Clause, Contract, FileType, RiskLevel};

/// Tags that classify a clause as high risk on their own.
const HIGH_RISK_TAGS: [&str; 3] = ["auto_renewal", "penalty", "liability"];
/// Tags that classify a clause as medium risk on their own.
const MEDIUM_RISK_TAGS: [&str; 1] = ["termination"];

const NO_RISK_DETECTED: &str = "No Risk Detected";
const NO_EXPLANATION: &str = "No detailed explanation provided.";
const NO_SUMMARY: &str = "No summary provided (risk analysis only).";
const UNKNOWN_CONTRACT: &str = "Unknown Contract";
const MISSING_TEXT: &str = "N/A";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service responded, but without `success: true`; no Contract is
    /// produced and the caller surfaces this as a non-fatal failed analysis.
    #[error("analysis failed: {0}")]
    Incomplete(String),
}

// ── Raw payload ───────────────────────────────────────────────────────────────
//
// Lenient intermediate representation: every field optional, list-valued
// fields tolerate non-list values, similarity tolerates non-numbers. Typed
// values never leave this module.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAnalysis {
    success: bool,
    filename: Option<String>,
    #[serde(rename = "uploadDate")]
    upload_date: Option<String>,
    #[serde(rename = "overallRisk")]
    overall_risk: Option<String>,
    #[serde(deserialize_with = "lenient_clauses")]
    clauses: Vec<RawClause>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawClause {
    original: Option<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    risks: Vec<String>,
    #[serde(deserialize_with = "lenient_explanation")]
    explanation: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    similarity: Option<f64>,
}

/// Accept a list of strings; treat anything else as empty.
fn lenient_string_list<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|i| i.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    })
}

/// Accept a string, or a list of strings joined with single spaces.
fn lenient_explanation<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    })
}

fn lenient_number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(v.as_f64())
}

/// Accept a list of clause objects; non-objects become empty clauses, a
/// non-list becomes no clauses.
fn lenient_clauses<'de, D>(d: D) -> Result<Vec<RawClause>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => items
            .into_iter()
            .map(|i| serde_json::from_value(i).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

// ── Normalizer ────────────────────────────────────────────────────────────────

/// Map a raw external response into a [`Contract`].
///
/// Refuses only when the top-level `success` flag is false or absent; every
/// other field is defaulted per the display model's rules.
pub fn normalize(raw: Value) -> Result<Contract, AnalysisError> {
    let raw: RawAnalysis = serde_json::from_value(raw)
        .map_err(|e| AnalysisError::Incomplete(format!("unreadable response: {e}")))?;

    if !raw.success {
        return Err(AnalysisError::Incomplete(
            "analysis response did not report success".to_string(),
        ));
    }

    let clauses: Vec<Clause> = raw
        .clauses
        .iter()
        .enumerate()
        .map(|(index, rc)| normalize_clause(index, rc))
        .collect();

    let name = raw
        .filename
        .clone()
        .unwrap_or_else(|| UNKNOWN_CONTRACT.to_string());
    let overall_risk = RiskLevel::from_external(raw.overall_risk.as_deref());
    let high_risk_clauses = clauses
        .iter()
        .filter(|c| c.risk_level == RiskLevel::High)
        .count();

    Ok(Contract {
        id: format!("contract-{}", Uuid::new_v4()),
        file_type: FileType::from_filename(&name),
        upload_date: parse_upload_date(raw.upload_date.as_deref()),
        summary: format!(
            "Analyzed contract with {} clauses. Overall risk detected: {}. Note: Summarization is disabled.",
            clauses.len(),
            overall_risk
        ),
        total_clauses: clauses.len(),
        high_risk_clauses,
        name,
        overall_risk,
        clauses,
    })
}

fn normalize_clause(index: usize, raw: &RawClause) -> Clause {
    Clause {
        id: format!("clause-{}-{}", index, Uuid::new_v4()),
        original_text: raw
            .original
            .clone()
            .unwrap_or_else(|| MISSING_TEXT.to_string()),
        simplified_text: NO_SUMMARY.to_string(),
        risk_level: classify_risk(&raw.risks),
        risk_type: if raw.risks.is_empty() {
            NO_RISK_DETECTED.to_string()
        } else {
            raw.risks.join(", ")
        },
        confidence: confidence_percent(raw.similarity),
        explanation: raw
            .explanation
            .clone()
            .unwrap_or_else(|| NO_EXPLANATION.to_string()),
    }
}

/// Per-clause risk classification.
///
/// Empty tag list is low. Any high-set tag wins; else any medium-set tag is
/// medium; tags that match neither set still count as medium. When more than
/// one distinct tag is present and the level is not already high, the clause
/// is promoted to high: diversity of detected risk is itself treated as risk.
fn classify_risk(tags: &[String]) -> RiskLevel {
    if tags.is_empty() {
        return RiskLevel::Low;
    }

    let mut level = if tags.iter().any(|t| HIGH_RISK_TAGS.contains(&t.as_str())) {
        RiskLevel::High
    } else if tags.iter().any(|t| MEDIUM_RISK_TAGS.contains(&t.as_str())) {
        RiskLevel::Medium
    } else {
        // Unrecognized tags still signal detected risk.
        RiskLevel::Medium
    };

    let distinct: HashSet<&str> = tags.iter().map(String::as_str).collect();
    if distinct.len() > 1 && level != RiskLevel::High {
        level = RiskLevel::High;
    }

    level
}

/// Similarity in [0, 1] to an integer percentage, rounding half up.
fn confidence_percent(similarity: Option<f64>) -> u8 {
    match similarity {
        Some(s) if s.is_finite() => (s * 100.0).round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

/// The service emits ISO 8601, with or without an offset. Anything
/// unparseable defaults to the normalization time.
fn parse_upload_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    Utc::now()
}
