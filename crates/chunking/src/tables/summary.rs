//! Short descriptions of markdown tables for table chunks.

use super::{is_delimiter_row, split_cells};

/// Column names listed before the rest are folded into "and K more columns".
pub const DEFAULT_SUMMARY_MAX_COLUMNS: usize = 5;

/// Summarize a raw markdown table, listing up to five column names.
///
/// ```
/// use quotewise_chunking::generate_table_summary;
///
/// let table = "| Coverage | Limit |\n|---|---|\n| GL | $1M |";
/// assert_eq!(generate_table_summary(table), "2 columns (Coverage, Limit) × 1 rows");
/// ```
pub fn generate_table_summary(table_text: &str) -> String {
    generate_table_summary_with(table_text, DEFAULT_SUMMARY_MAX_COLUMNS)
}

/// Summarize a raw markdown table, listing up to `max_columns` column names.
///
/// Input without a header and delimiter row still gets a generic description.
pub fn generate_table_summary_with(table_text: &str, max_columns: usize) -> String {
    let lines: Vec<&str> = table_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let header = lines.first().and_then(|line| split_cells(line));
    let delimiter = lines.get(1).and_then(|line| split_cells(line));

    let (header, delimiter) = match (header, delimiter) {
        (Some(header), Some(delimiter)) if is_delimiter_row(&delimiter) => (header, delimiter),
        _ => return format!("Table with {} lines", lines.len()),
    };

    let column_count = header.len().max(delimiter.len());
    let row_count = lines.len() - 2;

    let names: Vec<String> = header
        .iter()
        .take(max_columns)
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                format!("Column {}", i + 1)
            } else {
                (*name).to_string()
            }
        })
        .collect();

    let mut listed = names.join(", ");
    if column_count > max_columns {
        listed.push_str(&format!(", and {} more columns", column_count - max_columns));
    }

    format!("{} columns ({}) × {} rows", column_count, listed, row_count)
}
