//! Markdown chunking for document retrieval and citation.
//!
//! Turns parsed document markdown (with page markers) into an ordered
//! sequence of chunks:
//! - Tables are lifted out first and always become a single `table` chunk
//! - Prose is split recursively (paragraph → line → sentence → hard cut)
//! - Consecutive text chunks share a word-aligned token overlap
//! - Each chunk gets the page it starts on and a contiguous index

mod overlap;
mod pages;
mod pipeline;
mod splitter;
mod tables;
mod tokens;
mod types;

pub use pages::{extract_page_markers, DEFAULT_PAGE};
pub use pipeline::{
    chunk_markdown, ChunkOptions, ChunkPipeline, DEFAULT_OVERLAP_TOKENS, DEFAULT_TARGET_TOKENS,
};
pub use splitter::recursive_character_text_splitter;
pub use tables::{
    extract_tables_with_placeholders, generate_table_summary, generate_table_summary_with,
    ExtractedTables, DEFAULT_SUMMARY_MAX_COLUMNS,
};
pub use tokens::{estimate_token_count, CHARS_PER_TOKEN};
pub use types::{BoundingBox, Chunk, ChunkType, PageMarker};
