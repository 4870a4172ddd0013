//! Pipe-table detection and placeholder substitution.

use indexmap::IndexMap;

use super::{is_delimiter_row, split_cells};

/// Prose with tables swapped out for `{{TABLE_n}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTables {
    /// Input text with every detected table replaced by its placeholder
    pub text_with_placeholders: String,

    /// Placeholder → raw table text, in document order
    pub tables: IndexMap<String, String>,

    /// Where each table sat in both offset spaces, same order as `tables`
    pub(crate) spans: Vec<TableSpan>,
}

/// Byte positions of one table before and after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableSpan {
    pub placeholder: String,
    pub placeholder_start: usize,
    pub placeholder_end: usize,
    pub original_start: usize,
}

struct Line<'a> {
    start: usize,
    text: &'a str,
}

/// Detect markdown pipe tables and replace each with a placeholder.
///
/// A table is a header row, a delimiter row with the same column count, and
/// any number of following rows with that column count. Text without tables
/// passes through unchanged with an empty map.
pub fn extract_tables_with_placeholders(text: &str) -> ExtractedTables {
    let lines = split_lines(text);

    let mut result = ExtractedTables::default();
    let mut cursor = 0;
    let mut i = 0;

    while i < lines.len() {
        let Some(end_line) = table_end(&lines, i) else {
            i += 1;
            continue;
        };

        let start = lines[i].start;
        let last = &lines[end_line - 1];
        let end = last.start + last.text.len();

        let placeholder = format!("{{{{TABLE_{}}}}}", result.tables.len());

        result
            .text_with_placeholders
            .push_str(&text[cursor..start]);
        let placeholder_start = result.text_with_placeholders.len();
        result.text_with_placeholders.push_str(&placeholder);

        result.spans.push(TableSpan {
            placeholder: placeholder.clone(),
            placeholder_start,
            placeholder_end: result.text_with_placeholders.len(),
            original_start: start,
        });
        result
            .tables
            .insert(placeholder, text[start..end].to_string());

        cursor = end;
        i = end_line;
    }

    result.text_with_placeholders.push_str(&text[cursor..]);

    tracing::debug!(
        "Extracted {} tables from {} bytes",
        result.tables.len(),
        text.len()
    );

    result
}

/// If a table starts at `lines[start]`, return the index one past its last row.
fn table_end(lines: &[Line<'_>], start: usize) -> Option<usize> {
    let header = split_cells(lines[start].text)?;
    let delimiter = split_cells(lines.get(start + 1)?.text)?;

    if delimiter.len() != header.len() || !is_delimiter_row(&delimiter) {
        return None;
    }

    let columns = header.len();
    let mut end = start + 2;
    while let Some(line) = lines.get(end) {
        match split_cells(line.text) {
            Some(cells) if cells.len() == columns => end += 1,
            _ => break,
        }
    }

    Some(end)
}

/// Split into lines with their byte offsets, line endings excluded.
fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let body = body.strip_suffix('\r').unwrap_or(body);
        lines.push(Line {
            start: offset,
            text: body,
        });
        offset += raw.len();
    }

    lines
}
