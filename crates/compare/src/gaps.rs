//! Coverage carried by some quotes but missing from others.

use tracing::debug;

use crate::constants::coverage_severity;
use crate::diff::collect_all_coverage_types;
use crate::types::{GapWarning, QuoteExtraction};

/// Find coverage types present in some but not all extractions.
///
/// Needs at least two extractions. Warnings are sorted high severity first,
/// keeping canonical coverage order within a severity.
pub fn detect_gaps(extractions: &[QuoteExtraction]) -> Vec<GapWarning> {
    if extractions.len() < 2 {
        return Vec::new();
    }

    let mut gaps = Vec::new();

    for coverage_type in collect_all_coverage_types(extractions) {
        let (present, missing): (Vec<usize>, Vec<usize>) =
            (0..extractions.len()).partition(|&i| extractions[i].has_coverage(coverage_type));

        if missing.is_empty() {
            continue;
        }

        gaps.push(GapWarning {
            field: coverage_type.label().to_string(),
            coverage_type,
            documents_missing: missing,
            documents_present: present,
            severity: coverage_severity(coverage_type),
        });
    }

    gaps.sort_by_key(|gap| gap.severity.rank());
    debug!(count = gaps.len(), "Detected coverage gaps");

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoverageItem, CoverageType, Severity};

    fn quote(types: &[CoverageType]) -> QuoteExtraction {
        QuoteExtraction {
            coverages: types
                .iter()
                .map(|&coverage_type| CoverageItem {
                    coverage_type,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_needs_two_extractions() {
        assert!(detect_gaps(&[]).is_empty());
        assert!(detect_gaps(&[quote(&[CoverageType::GeneralLiability])]).is_empty());
    }

    #[test]
    fn test_general_liability_gap_is_high() {
        let gaps = detect_gaps(&[quote(&[CoverageType::GeneralLiability]), quote(&[])]);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].field, "General Liability");
        assert_eq!(gaps[0].severity, Severity::High);
        assert_eq!(gaps[0].documents_present, vec![0]);
        assert_eq!(gaps[0].documents_missing, vec![1]);
    }

    #[test]
    fn test_no_gap_when_all_present() {
        let gaps = detect_gaps(&[
            quote(&[CoverageType::Property]),
            quote(&[CoverageType::Property]),
        ]);
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_sorted_by_severity() {
        let gaps = detect_gaps(&[
            quote(&[CoverageType::Crime, CoverageType::Cyber, CoverageType::WorkersComp]),
            quote(&[]),
        ]);

        let severities: Vec<Severity> = gaps.iter().map(|g| g.severity).collect();
        assert_eq!(severities, vec![Severity::High, Severity::Medium, Severity::Low]);
        assert_eq!(gaps[0].coverage_type, CoverageType::WorkersComp);
    }
}
