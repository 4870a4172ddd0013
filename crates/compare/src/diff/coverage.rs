//! Per-coverage limit rows with deductible sub-rows.

use std::collections::HashSet;

use super::cells::{build_row, Ranking};
use crate::format::format_currency;
use crate::types::{
    CellValue, ComparisonRow, CoverageItem, CoverageType, FieldType, QuoteExtraction, RowCategory,
};

/// Coverage types present in any extraction, in canonical order.
pub fn collect_all_coverage_types(extractions: &[QuoteExtraction]) -> Vec<CoverageType> {
    let present: HashSet<CoverageType> = extractions
        .iter()
        .flat_map(|e| e.coverages.iter().map(|item| item.coverage_type))
        .collect();

    CoverageType::CANONICAL_ORDER
        .into_iter()
        .filter(|ty| present.contains(ty))
        .collect()
}

fn limit_cell(item: Option<&CoverageItem>) -> CellValue {
    let Some(item) = item else {
        return CellValue::not_found();
    };
    let Some(limit) = item.limit else {
        return CellValue::not_found();
    };

    let display = match item.limit_type {
        Some(limit_type) => format!("{} {}", format_currency(limit), limit_type.label()),
        None => format_currency(limit),
    };
    CellValue::number(display, limit).with_pages(&item.source_pages)
}

fn deductible_cell(item: Option<&CoverageItem>) -> CellValue {
    match item.and_then(|item| item.deductible.map(|amount| (item, amount))) {
        Some((item, amount)) => {
            CellValue::number(format_currency(amount), amount).with_pages(&item.source_pages)
        }
        None => CellValue::not_found(),
    }
}

/// A limit row and a deductible sub-row for each coverage type.
pub fn build_coverage_rows(extractions: &[QuoteExtraction]) -> Vec<ComparisonRow> {
    let coverage_types = collect_all_coverage_types(extractions);
    let mut rows = Vec::with_capacity(coverage_types.len() * 2);

    for coverage_type in coverage_types {
        let items: Vec<Option<&CoverageItem>> =
            extractions.iter().map(|e| e.coverage(coverage_type)).collect();

        let mut limit_row = build_row(
            format!("coverage-{}-limit", coverage_type.key()),
            format!("{} - Limit", coverage_type.label()),
            RowCategory::Coverage,
            FieldType::CoverageLimit,
            items.iter().map(|item| limit_cell(*item)).collect(),
            Ranking::HigherIsBetter,
        );
        limit_row.coverage_type = Some(coverage_type);

        let mut deductible_row = build_row(
            format!("coverage-{}-deductible", coverage_type.key()),
            format!("{} - Deductible", coverage_type.label()),
            RowCategory::Coverage,
            FieldType::Deductible,
            items.iter().map(|item| deductible_cell(*item)).collect(),
            Ranking::LowerIsBetter,
        );
        deductible_row.coverage_type = Some(coverage_type);
        deductible_row.is_sub_row = true;

        rows.push(limit_row);
        rows.push(deductible_row);
    }

    rows
}
