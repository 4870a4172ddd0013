//! Comparison table output consumed by the UI layer.

use serde::{Deserialize, Serialize};

use super::extraction::CoverageType;

/// Priority attached to gaps and conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort key: high first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCategory {
    Basic,
    Coverage,
    Exclusion,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    CoverageLimit,
    Deductible,
    Premium,
    Date,
    Text,
    Count,
}

impl FieldType {
    /// Whether best/worst can be computed for this field.
    pub fn is_comparable(self) -> bool {
        !matches!(self, FieldType::Date | FieldType::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Found,
    NotFound,
}

/// Value behind a cell, compared by value rather than display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Display text shown for a missing value.
pub const NOT_FOUND_DISPLAY: &str = "—";

/// One extraction's value for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellValue {
    pub display_value: String,
    /// `None` exactly when `status` is `NotFound`
    pub raw_value: Option<RawValue>,
    pub status: CellStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_pages: Option<Vec<u32>>,
}

impl CellValue {
    pub fn not_found() -> Self {
        Self {
            display_value: NOT_FOUND_DISPLAY.to_string(),
            raw_value: None,
            status: CellStatus::NotFound,
            source_pages: None,
        }
    }

    pub fn number(display_value: String, value: f64) -> Self {
        Self {
            display_value,
            raw_value: Some(RawValue::Number(value)),
            status: CellStatus::Found,
            source_pages: None,
        }
    }

    pub fn text(display_value: String, value: String) -> Self {
        Self {
            display_value,
            raw_value: Some(RawValue::Text(value)),
            status: CellStatus::Found,
            source_pages: None,
        }
    }

    /// Attach source pages, ignoring an empty list.
    pub fn with_pages(mut self, pages: &[u32]) -> Self {
        if self.is_found() && !pages.is_empty() {
            self.source_pages = Some(pages.to_vec());
        }
        self
    }

    pub fn is_found(&self) -> bool {
        self.status == CellStatus::Found
    }

    /// Numeric raw value, if this cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self.raw_value {
            Some(RawValue::Number(value)) => Some(value),
            _ => None,
        }
    }
}

/// One attribute compared across every extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub id: String,
    pub field: String,
    pub category: RowCategory,
    pub field_type: FieldType,
    /// One cell per extraction, in input order
    pub values: Vec<CellValue>,
    pub has_difference: bool,
    pub best_index: Option<usize>,
    pub worst_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<CoverageType>,
    #[serde(default)]
    pub is_sub_row: bool,
    #[serde(default)]
    pub is_gap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_severity: Option<Severity>,
    #[serde(default)]
    pub is_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_severity: Option<Severity>,
}

/// Coverage present in some quotes but missing from others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapWarning {
    pub field: String,
    pub coverage_type: CoverageType,
    /// Extraction indices lacking the coverage
    pub documents_missing: Vec<usize>,
    /// Extraction indices carrying the coverage
    pub documents_present: Vec<usize>,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    LimitVariance,
    DeductibleVariance,
    ExclusionMismatch,
}

/// A term that several quotes carry with materially different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictWarning {
    pub field: String,
    pub conflict_type: ConflictType,
    pub description: String,
    pub affected_documents: Vec<usize>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_type: Option<CoverageType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Critical,
    Recommended,
    Optional,
}

impl From<Severity> for Importance {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::High => Importance::Critical,
            Severity::Medium => Importance::Recommended,
            Severity::Low => Importance::Optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingCoverage {
    pub coverage_type: CoverageType,
    pub importance: Importance,
    pub reason: String,
    pub present_in: Vec<usize>,
    pub missing_in: Vec<usize>,
}

/// A limit below the recommended minimum for its coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitConcern {
    pub coverage_type: CoverageType,
    pub document_index: usize,
    pub current_limit: f64,
    pub recommended_minimum: f64,
    pub description: String,
}

/// A critical endorsement missing from one or more quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndorsementGap {
    pub endorsement: String,
    pub form_number: String,
    pub priority: Severity,
    pub reason: String,
    pub present_in: Vec<usize>,
    pub missing_in: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub missing_coverages: Vec<MissingCoverage>,
    pub limit_concerns: Vec<LimitConcern>,
    pub endorsement_gaps: Vec<EndorsementGap>,
    /// 0 (no concerns) to 100
    pub overall_risk_score: u8,
}

/// Document metadata used for header fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSummary {
    pub id: String,
    pub filename: Option<String>,
}

/// Full comparison result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTableData {
    pub headers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub document_count: usize,
    pub gaps: Vec<GapWarning>,
    pub conflicts: Vec<ConflictWarning>,
    pub gap_analysis: GapAnalysis,
}
