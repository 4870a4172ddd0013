//! Markdown pipe-table handling.
//!
//! Tables are lifted out of the prose before splitting so that a table always
//! lands in exactly one chunk, and each lifted table gets a short summary.

mod extract;
mod summary;

pub use extract::{extract_tables_with_placeholders, ExtractedTables};
pub use summary::{
    generate_table_summary, generate_table_summary_with, DEFAULT_SUMMARY_MAX_COLUMNS,
};

/// Split a pipe-table line into trimmed cells.
///
/// Returns `None` for lines that cannot be table rows. Outer pipes are
/// optional, as in GitHub-flavored markdown.
pub(crate) fn split_cells(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    if !trimmed.contains('|') || trimmed == "|" {
        return None;
    }

    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    Some(inner.split('|').map(str::trim).collect())
}

/// Whether every cell is an alignment delimiter like `---`, `:--` or `:-:`.
pub(crate) fn is_delimiter_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-')
                && cell
                    .chars()
                    .all(|c| c == '-' || c == ':' || c.is_whitespace())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells_with_outer_pipes() {
        assert_eq!(
            split_cells("| Coverage | Limit |"),
            Some(vec!["Coverage", "Limit"])
        );
    }

    #[test]
    fn test_split_cells_without_outer_pipes() {
        assert_eq!(split_cells("a | b | c"), Some(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_split_cells_rejects_plain_text() {
        assert_eq!(split_cells("no pipes here"), None);
        assert_eq!(split_cells("  |  "), None);
    }

    #[test]
    fn test_delimiter_row_alignment() {
        assert!(is_delimiter_row(&["---", ":---", "---:", ":-:"]));
        assert!(!is_delimiter_row(&["---", "abc"]));
        assert!(!is_delimiter_row(&["::"]));
    }
}
