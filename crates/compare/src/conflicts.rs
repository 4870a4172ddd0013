//! Materially different limits, deductibles and exclusions across quotes.

use tracing::debug;

use crate::constants::{coverage_severity, deductible_conflict_severity, exclusion_severity};
use crate::diff::collect_all_coverage_types;
use crate::format::{format_currency, format_percent};
use crate::policy::ComparisonPolicy;
use crate::types::{
    ConflictType, ConflictWarning, CoverageItem, CoverageType, ExclusionCategory, QuoteExtraction,
};

/// Detect conflicts using the default thresholds.
pub fn detect_conflicts(extractions: &[QuoteExtraction]) -> Vec<ConflictWarning> {
    detect_conflicts_with(extractions, &ComparisonPolicy::default())
}

/// Detect limit, deductible and exclusion conflicts.
///
/// Needs at least two extractions. Only positive amounts take part in the
/// limit and deductible checks. Results are sorted high severity first.
pub fn detect_conflicts_with(
    extractions: &[QuoteExtraction],
    policy: &ComparisonPolicy,
) -> Vec<ConflictWarning> {
    if extractions.len() < 2 {
        return Vec::new();
    }

    let mut conflicts = Vec::new();

    for coverage_type in collect_all_coverage_types(extractions) {
        let items: Vec<(usize, &CoverageItem)> = extractions
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.coverage(coverage_type).map(|item| (i, item)))
            .collect();

        if items.len() < 2 {
            continue;
        }

        let limits = positive_amounts(&items, |item| item.limit);
        if let Some((min, max)) = spread(&limits) {
            if policy.is_limit_conflict(min, max) {
                conflicts.push(limit_conflict(coverage_type, &limits, min, max));
            }
        }

        let deductibles = positive_amounts(&items, |item| item.deductible);
        if let Some((min, max)) = spread(&deductibles) {
            if policy.is_deductible_conflict(min, max) {
                conflicts.push(deductible_conflict(coverage_type, &deductibles, min, max));
            }
        }
    }

    for category in ExclusionCategory::ALL {
        let (with, without): (Vec<usize>, Vec<usize>) =
            (0..extractions.len()).partition(|&i| extractions[i].has_exclusion(category));

        if with.is_empty() || without.is_empty() {
            continue;
        }

        conflicts.push(ConflictWarning {
            field: format!("{} Exclusion", category.label()),
            conflict_type: ConflictType::ExclusionMismatch,
            description: format!(
                "{} exclusion appears in {} of {} quotes",
                category.label(),
                with.len(),
                extractions.len()
            ),
            affected_documents: with,
            severity: exclusion_severity(category),
            coverage_type: None,
        });
    }

    conflicts.sort_by_key(|conflict| conflict.severity.rank());
    debug!(count = conflicts.len(), "Detected term conflicts");

    conflicts
}

fn positive_amounts(
    items: &[(usize, &CoverageItem)],
    amount: impl Fn(&CoverageItem) -> Option<f64>,
) -> Vec<(usize, f64)> {
    items
        .iter()
        .filter_map(|&(i, item)| amount(item).filter(|v| *v > 0.0).map(|v| (i, v)))
        .collect()
}

/// Lowest and highest amount, when at least two are present.
fn spread(amounts: &[(usize, f64)]) -> Option<(f64, f64)> {
    if amounts.len() < 2 {
        return None;
    }
    let min = amounts.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
    let max = amounts.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

fn limit_conflict(
    coverage_type: CoverageType,
    limits: &[(usize, f64)],
    min: f64,
    max: f64,
) -> ConflictWarning {
    ConflictWarning {
        field: format!("{} - Limit", coverage_type.label()),
        conflict_type: ConflictType::LimitVariance,
        description: format!(
            "{} limits vary by {} ({} vs {})",
            coverage_type.label(),
            format_percent(max - min, max),
            format_currency(min),
            format_currency(max)
        ),
        affected_documents: limits.iter().map(|&(i, _)| i).collect(),
        severity: coverage_severity(coverage_type),
        coverage_type: Some(coverage_type),
    }
}

fn deductible_conflict(
    coverage_type: CoverageType,
    deductibles: &[(usize, f64)],
    min: f64,
    max: f64,
) -> ConflictWarning {
    ConflictWarning {
        field: format!("{} - Deductible", coverage_type.label()),
        conflict_type: ConflictType::DeductibleVariance,
        description: format!(
            "{} deductibles range from {} to {}",
            coverage_type.label(),
            format_currency(min),
            format_currency(max)
        ),
        affected_documents: deductibles.iter().map(|&(i, _)| i).collect(),
        severity: deductible_conflict_severity(coverage_type),
        coverage_type: Some(coverage_type),
    }
}
