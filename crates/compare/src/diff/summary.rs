//! Count rows summarizing each quote.

use super::cells::{build_row, Ranking};
use crate::types::{CellValue, ComparisonRow, FieldType, QuoteExtraction, RowCategory};

fn count_cells(extractions: &[QuoteExtraction], count: impl Fn(&QuoteExtraction) -> usize) -> Vec<CellValue> {
    extractions
        .iter()
        .map(|e| {
            let n = count(e);
            CellValue::number(n.to_string(), n as f64)
        })
        .collect()
}

pub fn build_summary_rows(extractions: &[QuoteExtraction]) -> Vec<ComparisonRow> {
    vec![
        build_row(
            "coverage-count".to_string(),
            "Coverage Count".to_string(),
            RowCategory::Summary,
            FieldType::Count,
            count_cells(extractions, |e| e.coverages.len()),
            Ranking::HigherIsBetter,
        ),
        build_row(
            "exclusion-count".to_string(),
            "Exclusion Count".to_string(),
            RowCategory::Exclusion,
            FieldType::Count,
            count_cells(extractions, |e| e.exclusions.len()),
            Ranking::FewerIsBetter,
        ),
        build_row(
            "endorsement-count".to_string(),
            "Endorsement Count".to_string(),
            RowCategory::Summary,
            FieldType::Count,
            count_cells(extractions, |e| e.endorsements.len()),
            Ranking::HigherIsBetter,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CoverageItem, ExclusionItem};

    #[test]
    fn test_summary_rows() {
        let a = QuoteExtraction {
            coverages: vec![CoverageItem::default(); 3],
            exclusions: vec![ExclusionItem::default(); 1],
            ..Default::default()
        };
        let b = QuoteExtraction {
            coverages: vec![CoverageItem::default(); 2],
            exclusions: vec![ExclusionItem::default(); 4],
            ..Default::default()
        };

        let rows = build_summary_rows(&[a, b]);
        assert_eq!(rows.len(), 3);

        let coverage = &rows[0];
        assert_eq!(coverage.category, RowCategory::Summary);
        assert_eq!(coverage.best_index, Some(0));

        let exclusions = &rows[1];
        assert_eq!(exclusions.category, RowCategory::Exclusion);
        assert_eq!(exclusions.values[1].display_value, "4");
        assert_eq!(exclusions.best_index, Some(0));
        assert_eq!(exclusions.worst_index, Some(1));

        let endorsements = &rows[2];
        assert!(!endorsements.has_difference);
        assert_eq!(endorsements.best_index, None);
    }
}
