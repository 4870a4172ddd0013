//! Chunk and page marker types.

use serde::{Deserialize, Serialize};

/// Kind of content a chunk holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Prose, possibly carrying overlap from the previous text chunk
    Text,
    /// A whole markdown table, never split
    Table,
}

/// Spatial position of a chunk on its page.
///
/// Markdown input carries no layout, so the pipeline always leaves this unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A contiguous span of document content assigned to one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Chunk text (raw table text for table chunks)
    pub content: String,

    /// Position in the output sequence (0-indexed, contiguous)
    pub chunk_index: usize,

    /// Page the chunk starts on (1-indexed)
    pub page_number: u32,

    /// Estimated token count of `content`
    pub token_count: usize,

    /// Text or table
    pub chunk_type: ChunkType,

    /// Human-readable description, only set for table chunks
    pub summary: Option<String>,

    /// Always `None` for markdown input
    pub bounding_box: Option<BoundingBox>,
}

impl Chunk {
    pub fn is_table(&self) -> bool {
        self.chunk_type == ChunkType::Table
    }
}

/// Where a page boundary falls in the raw markdown, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMarker {
    pub page_number: u32,
    pub start_index: usize,
    pub end_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_serializes_camel_case() {
        let chunk = Chunk {
            content: "| a |".to_string(),
            chunk_index: 2,
            page_number: 3,
            token_count: 2,
            chunk_type: ChunkType::Table,
            summary: Some("1 columns (a) × 0 rows".to_string()),
            bounding_box: None,
        };

        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["chunkIndex"], 2);
        assert_eq!(json["pageNumber"], 3);
        assert_eq!(json["chunkType"], "table");
        assert!(json["boundingBox"].is_null());
    }

    #[test]
    fn test_page_marker_deserializes() {
        let marker: PageMarker =
            serde_json::from_str(r#"{"pageNumber": 2, "startIndex": 40, "endIndex": 54}"#).unwrap();
        assert_eq!(marker.page_number, 2);
        assert_eq!(marker.start_index, 40);
    }
}
