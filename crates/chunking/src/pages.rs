//! Page marker detection and offset → page lookup.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::PageMarker;

/// Page used for content before the first marker or when there are none.
pub const DEFAULT_PAGE: u32 = 1;

fn page_marker_regex() -> &'static Regex {
    static PAGE_MARKER: OnceLock<Regex> = OnceLock::new();
    PAGE_MARKER.get_or_init(|| {
        Regex::new(r"(?i)---\s*PAGE\s+(\d+)\s*---").expect("page marker pattern is valid")
    })
}

/// Find `--- PAGE N ---` markers emitted by the document parser.
///
/// Matching is case-insensitive and tolerant of extra whitespace. Markers
/// with a page number that does not fit in `u32` are skipped.
pub fn extract_page_markers(markdown: &str) -> Vec<PageMarker> {
    page_marker_regex()
        .captures_iter(markdown)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let page_number = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some(PageMarker {
                page_number,
                start_index: whole.start(),
                end_index: whole.end(),
            })
        })
        .collect()
}

/// Sorted markers for resolving byte offsets to page numbers.
#[derive(Debug, Clone)]
pub(crate) struct PageIndex {
    markers: Vec<PageMarker>,
}

impl PageIndex {
    pub fn new(markers: &[PageMarker]) -> Self {
        let mut markers = markers.to_vec();
        markers.sort_by_key(|marker| marker.start_index);
        Self { markers }
    }

    /// Page of the last marker starting at or before `offset`.
    pub fn page_at(&self, offset: usize) -> u32 {
        let idx = self
            .markers
            .partition_point(|marker| marker.start_index <= offset);

        if idx == 0 {
            DEFAULT_PAGE
        } else {
            self.markers[idx - 1].page_number
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(page_number: u32, start_index: usize) -> PageMarker {
        PageMarker {
            page_number,
            start_index,
            end_index: start_index + 14,
        }
    }

    #[test]
    fn test_extract_page_markers() {
        let text = "--- PAGE 1 ---\n\nIntro\n\n--- page 2 ---\n\nMore\n\n---PAGE   10---";
        let markers = extract_page_markers(text);

        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0], PageMarker { page_number: 1, start_index: 0, end_index: 14 });
        assert_eq!(markers[1].page_number, 2);
        assert_eq!(&text[markers[1].start_index..markers[1].end_index], "--- page 2 ---");
        assert_eq!(markers[2].page_number, 10);
    }

    #[test]
    fn test_no_markers_defaults_to_first_page() {
        let index = PageIndex::new(&[]);
        assert_eq!(index.page_at(0), 1);
        assert_eq!(index.page_at(10_000), 1);
    }

    #[test]
    fn test_page_at_boundaries() {
        let index = PageIndex::new(&[marker(1, 0), marker(2, 100), marker(3, 250)]);

        assert_eq!(index.page_at(0), 1);
        assert_eq!(index.page_at(99), 1);
        assert_eq!(index.page_at(100), 2);
        assert_eq!(index.page_at(249), 2);
        assert_eq!(index.page_at(250), 3);
        assert_eq!(index.page_at(9_999), 3);
    }

    #[test]
    fn test_before_first_marker_is_page_one() {
        let index = PageIndex::new(&[marker(2, 50)]);
        assert_eq!(index.page_at(10), 1);
        assert_eq!(index.page_at(50), 2);
    }

    #[test]
    fn test_unsorted_markers() {
        let index = PageIndex::new(&[marker(3, 200), marker(1, 0), marker(2, 100)]);
        assert_eq!(index.page_at(150), 2);
    }
}
