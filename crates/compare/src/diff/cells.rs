//! Best/worst selection and difference detection shared by all row builders.

use crate::types::{CellValue, ComparisonRow, FieldType, RowCategory};

/// Indices of the most and least favorable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestWorst {
    pub best_index: Option<usize>,
    pub worst_index: Option<usize>,
}

impl BestWorst {
    /// Swap best and worst, for fields where fewer is better.
    pub fn inverted(self) -> Self {
        Self {
            best_index: self.worst_index,
            worst_index: self.best_index,
        }
    }
}

/// Pick best and worst positions among the non-null values.
///
/// Needs at least two values that are not all equal. On ties the first
/// position wins.
pub fn calculate_best_worst(values: &[Option<f64>], higher_is_better: bool) -> BestWorst {
    let present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| (i, v)))
        .collect();

    let Some(&(first_index, first_value)) = present.first() else {
        return BestWorst::default();
    };

    if present.len() < 2 || present.iter().all(|&(_, v)| v == first_value) {
        return BestWorst::default();
    }

    let mut highest = (first_index, first_value);
    let mut lowest = (first_index, first_value);
    for &(i, v) in &present[1..] {
        if v > highest.1 {
            highest = (i, v);
        }
        if v < lowest.1 {
            lowest = (i, v);
        }
    }

    if higher_is_better {
        BestWorst {
            best_index: Some(highest.0),
            worst_index: Some(lowest.0),
        }
    } else {
        BestWorst {
            best_index: Some(lowest.0),
            worst_index: Some(highest.0),
        }
    }
}

/// True when at least two cells were found and their raw values differ.
pub fn detect_difference(values: &[CellValue]) -> bool {
    let mut found = values
        .iter()
        .filter(|cell| cell.is_found())
        .filter_map(|cell| cell.raw_value.as_ref());

    let Some(first) = found.next() else {
        return false;
    };

    let mut count = 1;
    let mut differs = false;
    for value in found {
        count += 1;
        differs |= value != first;
    }

    count >= 2 && differs
}

/// How favorable values are judged for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ranking {
    HigherIsBetter,
    LowerIsBetter,
    /// Fewer is better, computed by swapping the higher-is-better result
    FewerIsBetter,
    Unranked,
}

/// Assemble a row and fill in the difference and best/worst fields.
pub(crate) fn build_row(
    id: String,
    field: String,
    category: RowCategory,
    field_type: FieldType,
    values: Vec<CellValue>,
    ranking: Ranking,
) -> ComparisonRow {
    let has_difference = detect_difference(&values);

    let best_worst = if field_type.is_comparable() {
        let numbers: Vec<Option<f64>> = values.iter().map(CellValue::as_number).collect();
        match ranking {
            Ranking::HigherIsBetter => calculate_best_worst(&numbers, true),
            Ranking::LowerIsBetter => calculate_best_worst(&numbers, false),
            Ranking::FewerIsBetter => calculate_best_worst(&numbers, true).inverted(),
            Ranking::Unranked => BestWorst::default(),
        }
    } else {
        BestWorst::default()
    };

    ComparisonRow {
        id,
        field,
        category,
        field_type,
        values,
        has_difference,
        best_index: best_worst.best_index,
        worst_index: best_worst.worst_index,
        coverage_type: None,
        is_sub_row: false,
        is_gap: false,
        gap_severity: None,
        is_conflict: false,
        conflict_severity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> CellValue {
        CellValue::number(value.to_string(), value)
    }

    #[test]
    fn test_best_worst_excludes_nulls() {
        let result = calculate_best_worst(&[Some(100.0), Some(200.0), None], true);
        assert_eq!(result.best_index, Some(1));
        assert_eq!(result.worst_index, Some(0));
    }

    #[test]
    fn test_best_worst_all_equal() {
        let result = calculate_best_worst(&[Some(100.0), Some(100.0)], true);
        assert_eq!(result, BestWorst::default());
    }

    #[test]
    fn test_best_worst_needs_two_values() {
        assert_eq!(calculate_best_worst(&[Some(100.0)], true), BestWorst::default());
        assert_eq!(calculate_best_worst(&[Some(100.0), None], true), BestWorst::default());
        assert_eq!(calculate_best_worst(&[], true), BestWorst::default());
    }

    #[test]
    fn test_best_worst_lower_is_better() {
        let result = calculate_best_worst(&[Some(500.0), Some(2500.0), Some(1000.0)], false);
        assert_eq!(result.best_index, Some(0));
        assert_eq!(result.worst_index, Some(1));
    }

    #[test]
    fn test_best_worst_first_tie_wins() {
        let result = calculate_best_worst(&[Some(5.0), Some(9.0), Some(9.0), Some(5.0)], true);
        assert_eq!(result.best_index, Some(1));
        assert_eq!(result.worst_index, Some(0));
    }

    #[test]
    fn test_detect_difference() {
        assert!(detect_difference(&[number(1.0), number(2.0)]));
        assert!(!detect_difference(&[number(1.0), number(1.0)]));
        assert!(!detect_difference(&[number(1.0), CellValue::not_found()]));
        assert!(!detect_difference(&[]));
    }

    #[test]
    fn test_detect_difference_uses_raw_values() {
        // Same display text, different values
        let a = CellValue::number("$1M".to_string(), 1_000_000.0);
        let b = CellValue::number("$1M".to_string(), 1_250_000.0);
        assert!(detect_difference(&[a, b]));

        // Different display text, same value
        let c = CellValue::text("Acme".to_string(), "acme".to_string());
        let d = CellValue::text("ACME".to_string(), "acme".to_string());
        assert!(!detect_difference(&[c, d]));
    }

    #[test]
    fn test_build_row_skips_best_worst_for_text() {
        let row = build_row(
            "carrier".to_string(),
            "Carrier".to_string(),
            RowCategory::Basic,
            FieldType::Text,
            vec![
                CellValue::text("A".to_string(), "A".to_string()),
                CellValue::text("B".to_string(), "B".to_string()),
            ],
            Ranking::HigherIsBetter,
        );

        assert!(row.has_difference);
        assert_eq!(row.best_index, None);
        assert_eq!(row.worst_index, None);
    }

    #[test]
    fn test_fewer_is_better_swaps() {
        let row = build_row(
            "exclusion-count".to_string(),
            "Exclusion Count".to_string(),
            RowCategory::Exclusion,
            FieldType::Count,
            vec![number(3.0), number(7.0)],
            Ranking::FewerIsBetter,
        );

        assert_eq!(row.best_index, Some(0));
        assert_eq!(row.worst_index, Some(1));
    }
}
