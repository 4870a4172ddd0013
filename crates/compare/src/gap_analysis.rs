//! Risk-scored gap analysis: missing coverages, thin limits and absent
//! critical endorsements.

use tracing::debug;

use crate::constants::{
    endorsement_gap_points, missing_coverage_points, recommended_minimum_limit, CriticalEndorsement,
    CRITICAL_ENDORSEMENTS, LIMIT_CONCERN_POINTS, MAX_RISK_SCORE,
};
use crate::format::format_currency;
use crate::gaps::detect_gaps;
use crate::types::{
    CoverageType, Endorsement, EndorsementGap, GapAnalysis, GapWarning, Importance, LimitConcern,
    MissingCoverage, QuoteExtraction,
};

/// Analyze a set of quotes for coverage risk.
pub fn analyze_gaps(extractions: &[QuoteExtraction]) -> GapAnalysis {
    let gaps = detect_gaps(extractions);
    analyze_with_gaps(extractions, &gaps)
}

/// Same as [`analyze_gaps`], reusing gap warnings already computed.
pub(crate) fn analyze_with_gaps(extractions: &[QuoteExtraction], gaps: &[GapWarning]) -> GapAnalysis {
    if extractions.is_empty() {
        return GapAnalysis::default();
    }

    let missing_coverages: Vec<MissingCoverage> = gaps.iter().map(missing_coverage).collect();
    let limit_concerns = limit_concerns(extractions);
    let endorsement_gaps = endorsement_gaps(extractions);

    let points: u32 = gaps
        .iter()
        .map(|gap| missing_coverage_points(gap.severity))
        .chain(limit_concerns.iter().map(|_| LIMIT_CONCERN_POINTS))
        .chain(endorsement_gaps.iter().map(|gap| endorsement_gap_points(gap.priority)))
        .sum();
    let overall_risk_score = points.min(MAX_RISK_SCORE) as u8;

    debug!(
        missing = missing_coverages.len(),
        limits = limit_concerns.len(),
        endorsements = endorsement_gaps.len(),
        score = overall_risk_score,
        "Gap analysis complete"
    );

    GapAnalysis {
        missing_coverages,
        limit_concerns,
        endorsement_gaps,
        overall_risk_score,
    }
}

fn missing_coverage(gap: &GapWarning) -> MissingCoverage {
    let total = gap.documents_missing.len() + gap.documents_present.len();
    MissingCoverage {
        coverage_type: gap.coverage_type,
        importance: Importance::from(gap.severity),
        reason: format!(
            "{} is missing from {} of {} quotes",
            gap.field,
            gap.documents_missing.len(),
            total
        ),
        present_in: gap.documents_present.clone(),
        missing_in: gap.documents_missing.clone(),
    }
}

fn limit_concerns(extractions: &[QuoteExtraction]) -> Vec<LimitConcern> {
    let mut concerns = Vec::new();

    for (document_index, extraction) in extractions.iter().enumerate() {
        for coverage_type in CoverageType::CANONICAL_ORDER {
            let Some(minimum) = recommended_minimum_limit(coverage_type) else {
                continue;
            };
            let Some(limit) = extraction.coverage(coverage_type).and_then(|item| item.limit) else {
                continue;
            };

            if limit < minimum {
                concerns.push(LimitConcern {
                    coverage_type,
                    document_index,
                    current_limit: limit,
                    recommended_minimum: minimum,
                    description: format!(
                        "{} limit of {} is below the recommended {}",
                        coverage_type.label(),
                        format_currency(limit),
                        format_currency(minimum)
                    ),
                });
            }
        }
    }

    concerns
}

fn endorsement_gaps(extractions: &[QuoteExtraction]) -> Vec<EndorsementGap> {
    let with_gl: Vec<usize> = (0..extractions.len())
        .filter(|&i| extractions[i].has_coverage(CoverageType::GeneralLiability))
        .collect();

    if with_gl.is_empty() {
        return Vec::new();
    }

    let mut gaps = Vec::new();

    for critical in &CRITICAL_ENDORSEMENTS {
        let (present_in, missing_in): (Vec<usize>, Vec<usize>) = with_gl
            .iter()
            .partition(|&&i| extractions[i].endorsements.iter().any(|e| matches_endorsement(e, critical)));

        if missing_in.is_empty() {
            continue;
        }

        gaps.push(EndorsementGap {
            endorsement: critical.name.to_string(),
            form_number: critical.form_number.to_string(),
            priority: critical.priority,
            reason: format!(
                "{} ({}) is missing from {} of {} quotes with general liability",
                critical.name,
                critical.form_number,
                missing_in.len(),
                with_gl.len()
            ),
            present_in,
            missing_in,
        });
    }

    gaps
}

/// Uppercase alphanumerics only, so `cg 20-10` and `CG 20 10` compare equal.
fn normalize_form_number(form_number: &str) -> String {
    form_number
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn matches_endorsement(endorsement: &Endorsement, critical: &CriticalEndorsement) -> bool {
    let form = normalize_form_number(&endorsement.form_number);
    // Edition dates follow the base form number, e.g. CG 20 10 04 13
    if !form.is_empty() && form.starts_with(&normalize_form_number(critical.form_number)) {
        return true;
    }

    let name = endorsement.name.to_lowercase();
    critical.keywords.iter().any(|keyword| name.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoverageItem, Severity};

    fn gl_quote(limit: f64, endorsements: Vec<Endorsement>) -> QuoteExtraction {
        QuoteExtraction {
            coverages: vec![CoverageItem {
                coverage_type: CoverageType::GeneralLiability,
                limit: Some(limit),
                ..Default::default()
            }],
            endorsements,
            ..Default::default()
        }
    }

    fn endorsement(form_number: &str, name: &str) -> Endorsement {
        Endorsement {
            form_number: form_number.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn all_critical() -> Vec<Endorsement> {
        vec![
            endorsement("CG 20 10 04 13", "Additional Insured - Owners, Lessees or Contractors"),
            endorsement("", "Waiver of Transfer of Rights of Recovery"),
            endorsement("cg-20-01", "Primary Noncontributory"),
            endorsement("CG2037", "Additional Insured - Completed Operations"),
        ]
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let analysis = analyze_gaps(&[]);
        assert_eq!(analysis, GapAnalysis::default());
        assert_eq!(analysis.overall_risk_score, 0);
    }

    #[test]
    fn test_clean_quote_has_no_findings() {
        let analysis = analyze_gaps(&[gl_quote(1_000_000.0, all_critical())]);
        assert!(analysis.missing_coverages.is_empty());
        assert!(analysis.limit_concerns.is_empty());
        assert!(analysis.endorsement_gaps.is_empty());
        assert_eq!(analysis.overall_risk_score, 0);
    }

    #[test]
    fn test_limit_concern() {
        let analysis = analyze_gaps(&[gl_quote(500_000.0, all_critical())]);

        assert_eq!(analysis.limit_concerns.len(), 1);
        let concern = &analysis.limit_concerns[0];
        assert_eq!(concern.document_index, 0);
        assert_eq!(concern.recommended_minimum, 1_000_000.0);
        assert_eq!(
            concern.description,
            "General Liability limit of $500,000 is below the recommended $1,000,000"
        );
        assert_eq!(analysis.overall_risk_score, 10);
    }

    #[test]
    fn test_endorsement_gaps_and_score() {
        let analysis = analyze_gaps(&[
            gl_quote(2_000_000.0, all_critical()),
            gl_quote(2_000_000.0, vec![]),
        ]);

        assert_eq!(analysis.endorsement_gaps.len(), 4);
        let first = &analysis.endorsement_gaps[0];
        assert_eq!(first.endorsement, "Additional Insured");
        assert_eq!(first.priority, Severity::High);
        assert_eq!(first.present_in, vec![0]);
        assert_eq!(first.missing_in, vec![1]);

        // 8 + 8 + 5 + 5
        assert_eq!(analysis.overall_risk_score, 26);
    }

    #[test]
    fn test_endorsements_ignored_without_general_liability() {
        let quote = QuoteExtraction {
            coverages: vec![CoverageItem {
                coverage_type: CoverageType::Property,
                limit: Some(250_000.0),
                ..Default::default()
            }],
            ..Default::default()
        };

        let analysis = analyze_gaps(&[quote]);
        assert!(analysis.endorsement_gaps.is_empty());
        assert!(analysis.limit_concerns.is_empty());
    }

    #[test]
    fn test_missing_coverage_importance() {
        let analysis = analyze_gaps(&[
            gl_quote(1_000_000.0, all_critical()),
            QuoteExtraction::default(),
        ]);

        assert_eq!(analysis.missing_coverages.len(), 1);
        assert_eq!(analysis.missing_coverages[0].importance, Importance::Critical);
        assert_eq!(analysis.missing_coverages[0].missing_in, vec![1]);
        assert_eq!(analysis.overall_risk_score, 20);
    }

    #[test]
    fn test_score_is_capped() {
        let types = [
            CoverageType::GeneralLiability,
            CoverageType::Property,
            CoverageType::WorkersComp,
            CoverageType::AutoLiability,
            CoverageType::Umbrella,
            CoverageType::Professional,
            CoverageType::Cyber,
        ];
        let full = QuoteExtraction {
            coverages: types
                .iter()
                .map(|&coverage_type| CoverageItem {
                    coverage_type,
                    limit: Some(100_000.0),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };

        let analysis = analyze_gaps(&[full, QuoteExtraction::default()]);
        assert_eq!(analysis.overall_risk_score, 100);
    }

    #[test]
    fn test_form_number_normalization() {
        assert_eq!(normalize_form_number("cg 20-10"), "CG2010");
        assert!(matches_endorsement(
            &endorsement("CG 24 04 05 09", ""),
            &CRITICAL_ENDORSEMENTS[1]
        ));
        assert!(!matches_endorsement(
            &endorsement("CG 20 26", "Designated Person"),
            &CRITICAL_ENDORSEMENTS[0]
        ));
    }
}
