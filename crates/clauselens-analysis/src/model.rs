//! Strictly-typed contract model produced by the normalizer.
//! Both entities are built once per analysis and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk level derived for a clause, or reported for the whole contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Parse the external service's verbatim string; anything unrecognized
    /// or absent collapses to Low.
    pub fn from_external(raw: Option<&str>) -> Self {
        match raw {
            Some("high") => RiskLevel::High,
            Some("medium") => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived from the filename extension: PDF iff it ends with ".pdf"
/// (case-insensitive), TXT otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Pdf,
    Txt,
}

impl FileType {
    pub fn from_filename(name: &str) -> Self {
        if name.to_lowercase().ends_with(".pdf") {
            FileType::Pdf
        } else {
            FileType::Txt
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Txt => "TXT",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted contract segment with its derived risk metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    /// Unique within the parent contract.
    pub id: String,
    pub original_text: String,
    /// Fixed placeholder; summarization is disabled in the current design.
    pub simplified_text: String,
    pub risk_level: RiskLevel,
    /// Comma-joined raw risk tags, e.g. "auto_renewal, penalty".
    pub risk_type: String,
    /// Percentage in [0, 100], rounded from the service's similarity score.
    pub confidence: u8,
    pub explanation: String,
}

/// Aggregate view of one analyzed contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub upload_date: DateTime<Utc>,
    pub file_type: FileType,
    pub clauses: Vec<Clause>,
    /// Reported verbatim by the external service; not recomputed from
    /// per-clause levels.
    pub overall_risk: RiskLevel,
    pub summary: String,
    pub total_clauses: usize,
    pub high_risk_clauses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_filename() {
        assert_eq!(FileType::from_filename("lease.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_filename("LEASE.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_filename("notes.txt"), FileType::Txt);
        assert_eq!(FileType::from_filename("Unknown Contract"), FileType::Txt);
    }

    #[test]
    fn test_risk_level_from_external() {
        assert_eq!(RiskLevel::from_external(Some("high")), RiskLevel::High);
        assert_eq!(RiskLevel::from_external(Some("medium")), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_external(Some("low")), RiskLevel::Low);
        assert_eq!(RiskLevel::from_external(Some("severe")), RiskLevel::Low);
        assert_eq!(RiskLevel::from_external(None), RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_serde_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }
}
