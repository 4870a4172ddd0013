//! Comparison table assembly.
//!
//! Row builders live in submodules; [`ComparisonEngine`] stitches their rows
//! together and annotates them with gap and conflict flags.

mod basic;
mod cells;
mod coverage;
mod summary;

pub use basic::{build_basic_rows, build_metadata_rows};
pub use cells::{calculate_best_worst, detect_difference, BestWorst};
pub use coverage::{build_coverage_rows, collect_all_coverage_types};
pub use summary::build_summary_rows;

use tracing::{debug, info};

use crate::conflicts::detect_conflicts_with;
use crate::format::non_blank;
use crate::gap_analysis::analyze_with_gaps;
use crate::gaps::detect_gaps;
use crate::policy::ComparisonPolicy;
use crate::types::{
    ComparisonRow, ComparisonTableData, ConflictWarning, DocumentSummary, GapWarning,
    QuoteExtraction,
};

/// Builds comparison tables under a fixed conflict policy.
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    policy: ComparisonPolicy,
}

impl ComparisonEngine {
    pub fn new(policy: ComparisonPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ComparisonPolicy {
        &self.policy
    }

    /// Build the full comparison for the given quotes.
    ///
    /// `documents` supplies filenames for header fallbacks and is matched to
    /// extractions by position.
    pub fn build(
        &self,
        extractions: &[QuoteExtraction],
        documents: Option<&[DocumentSummary]>,
    ) -> ComparisonTableData {
        if extractions.is_empty() {
            debug!("No extractions to compare");
            return ComparisonTableData::default();
        }

        let headers = build_headers(extractions, documents);

        let mut rows = build_basic_rows(extractions);
        rows.extend(build_metadata_rows(extractions));
        rows.extend(build_coverage_rows(extractions));
        rows.extend(build_summary_rows(extractions));

        let gaps = detect_gaps(extractions);
        let conflicts = detect_conflicts_with(extractions, &self.policy);
        let gap_analysis = analyze_with_gaps(extractions, &gaps);

        annotate_rows(&mut rows, &gaps, &conflicts);

        info!(
            documents = extractions.len(),
            rows = rows.len(),
            gaps = gaps.len(),
            conflicts = conflicts.len(),
            risk_score = gap_analysis.overall_risk_score,
            "Built comparison table"
        );

        ComparisonTableData {
            headers,
            rows,
            document_count: extractions.len(),
            gaps,
            conflicts,
            gap_analysis,
        }
    }
}

/// Build a comparison table with the default conflict thresholds.
pub fn build_comparison_rows(
    extractions: &[QuoteExtraction],
    documents: Option<&[DocumentSummary]>,
) -> ComparisonTableData {
    ComparisonEngine::default().build(extractions, documents)
}

fn build_headers(
    extractions: &[QuoteExtraction],
    documents: Option<&[DocumentSummary]>,
) -> Vec<String> {
    extractions
        .iter()
        .enumerate()
        .map(|(i, extraction)| {
            let filename = documents
                .and_then(|docs| docs.get(i))
                .and_then(|doc| non_blank(doc.filename.as_deref()));

            non_blank(extraction.carrier_name.as_deref())
                .or(filename)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Quote {}", i + 1))
        })
        .collect()
}

/// Flag coverage rows with their gap and the most severe conflict.
///
/// Gap flags go on both the limit row and its deductible sub-row; conflict
/// flags only on top-level rows.
fn annotate_rows(rows: &mut [ComparisonRow], gaps: &[GapWarning], conflicts: &[ConflictWarning]) {
    for row in rows.iter_mut() {
        let Some(coverage_type) = row.coverage_type else {
            continue;
        };

        if let Some(gap) = gaps.iter().find(|gap| gap.coverage_type == coverage_type) {
            row.is_gap = true;
            row.gap_severity = Some(gap.severity);
        }

        if row.is_sub_row {
            continue;
        }

        let worst = conflicts
            .iter()
            .filter(|conflict| conflict.coverage_type == Some(coverage_type))
            .min_by_key(|conflict| conflict.severity.rank());

        if let Some(conflict) = worst {
            row.is_conflict = true;
            row.conflict_severity = Some(conflict.severity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_fallback_chain() {
        let extractions = vec![
            QuoteExtraction {
                carrier_name: Some("Acme Mutual".to_string()),
                ..Default::default()
            },
            QuoteExtraction::default(),
            QuoteExtraction {
                carrier_name: Some("  ".to_string()),
                ..Default::default()
            },
        ];
        let documents = vec![
            DocumentSummary {
                id: "a".to_string(),
                filename: Some("acme.pdf".to_string()),
            },
            DocumentSummary {
                id: "b".to_string(),
                filename: Some("beta-quote.pdf".to_string()),
            },
        ];

        let headers = build_headers(&extractions, Some(&documents));
        assert_eq!(headers, vec!["Acme Mutual", "beta-quote.pdf", "Quote 3"]);
    }

    #[test]
    fn test_headers_without_documents() {
        let headers = build_headers(&[QuoteExtraction::default(), QuoteExtraction::default()], None);
        assert_eq!(headers, vec!["Quote 1", "Quote 2"]);
    }
}
