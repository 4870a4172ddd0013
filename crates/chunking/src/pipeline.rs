//! Chunking pipeline orchestrator.

use quotewise_core::{AppError, AppResult, ChunkingSettings};
use serde::{Deserialize, Serialize};

use crate::{
    overlap::overlap_tail,
    pages::PageIndex,
    splitter::split_with_offsets,
    tables::{
        extract_tables_with_placeholders, generate_table_summary_with, ExtractedTables,
        DEFAULT_SUMMARY_MAX_COLUMNS,
    },
    tokens::{estimate_token_count, tokens_to_chars},
    types::{Chunk, ChunkType, PageMarker},
};

/// Default target chunk size in estimated tokens.
pub const DEFAULT_TARGET_TOKENS: usize = 400;

/// Default overlap between consecutive text chunks in estimated tokens.
pub const DEFAULT_OVERLAP_TOKENS: usize = 50;

/// Configuration for the chunking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChunkOptions {
    /// Target chunk size in tokens (≈4 chars per token)
    pub target_tokens: usize,

    /// Tokens of the previous text chunk repeated at the start of the next
    pub overlap_tokens: usize,

    /// Column names listed in a table summary
    pub summary_max_columns: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            target_tokens: DEFAULT_TARGET_TOKENS,
            overlap_tokens: DEFAULT_OVERLAP_TOKENS,
            summary_max_columns: DEFAULT_SUMMARY_MAX_COLUMNS,
        }
    }
}

impl ChunkOptions {
    /// Apply config overrides on top of the defaults.
    pub fn from_settings(settings: &ChunkingSettings) -> Self {
        let defaults = Self::default();
        Self {
            target_tokens: settings.target_tokens.unwrap_or(defaults.target_tokens),
            overlap_tokens: settings.overlap_tokens.unwrap_or(defaults.overlap_tokens),
            summary_max_columns: settings
                .summary_max_columns
                .unwrap_or(defaults.summary_max_columns),
        }
    }

    /// Check that the target is positive and the overlap is smaller than it.
    pub fn validate(&self) -> AppResult<()> {
        if self.target_tokens == 0 {
            return Err(AppError::Config(
                "targetTokens must be greater than zero".to_string(),
            ));
        }

        if self.overlap_tokens >= self.target_tokens {
            return Err(AppError::Config(format!(
                "overlapTokens ({}) must be smaller than targetTokens ({})",
                self.overlap_tokens, self.target_tokens
            )));
        }

        Ok(())
    }

    /// Clamp invalid values instead of failing, logging what changed.
    fn normalized(mut self) -> Self {
        if self.target_tokens == 0 {
            tracing::warn!("targetTokens of 0 is invalid, using 1");
            self.target_tokens = 1;
        }

        if self.overlap_tokens >= self.target_tokens {
            let clamped = self.target_tokens - 1;
            tracing::warn!(
                "overlapTokens {} is not smaller than targetTokens {}, using {}",
                self.overlap_tokens,
                self.target_tokens,
                clamped
            );
            self.overlap_tokens = clamped;
        }

        self
    }
}

/// Intermediate piece before overlap, pages and indices are applied.
#[derive(Debug)]
enum Piece {
    Text { start: usize, text: String },
    Table { start: usize, raw: String },
}

/// Markdown → chunk pipeline.
#[derive(Debug, Clone)]
pub struct ChunkPipeline {
    options: ChunkOptions,
}

impl ChunkPipeline {
    /// Create a new pipeline. Invalid options are clamped, never rejected.
    pub fn new(options: ChunkOptions) -> Self {
        Self {
            options: options.normalized(),
        }
    }

    pub fn options(&self) -> &ChunkOptions {
        &self.options
    }

    /// Turn document markdown into ordered text and table chunks.
    ///
    /// Never fails: malformed tables stay in the prose and blank input gives
    /// an empty result.
    pub fn process(&self, markdown: &str, page_markers: &[PageMarker]) -> Vec<Chunk> {
        if markdown.trim().is_empty() {
            return Vec::new();
        }

        // 1. Lift tables out of the prose
        let extracted = extract_tables_with_placeholders(markdown);

        // 2. Split prose regions between tables
        let pieces = self.collect_pieces(&extracted);

        tracing::debug!(
            "Split into {} pieces ({} tables)",
            pieces.len(),
            extracted.tables.len()
        );

        // 3. Overlap, pages and indices
        let pages = PageIndex::new(page_markers);
        let chunks = self.assemble(pieces, &pages);

        tracing::info!(
            "Chunking complete: {} chunks created from {} bytes",
            chunks.len(),
            markdown.len()
        );

        chunks
    }

    fn collect_pieces(&self, extracted: &ExtractedTables) -> Vec<Piece> {
        let budget = tokens_to_chars(self.options.target_tokens);
        let placeholder_text = &extracted.text_with_placeholders;

        let mut pieces = Vec::new();
        let mut placeholder_cursor = 0;
        let mut original_cursor = 0;

        for span in &extracted.spans {
            let Some(raw) = extracted.tables.get(&span.placeholder) else {
                continue;
            };

            push_prose(
                &mut pieces,
                &placeholder_text[placeholder_cursor..span.placeholder_start],
                original_cursor,
                budget,
            );

            pieces.push(Piece::Table {
                start: span.original_start,
                raw: raw.clone(),
            });

            placeholder_cursor = span.placeholder_end;
            original_cursor = span.original_start + raw.len();
        }

        push_prose(
            &mut pieces,
            &placeholder_text[placeholder_cursor..],
            original_cursor,
            budget,
        );

        pieces
    }

    fn assemble(&self, pieces: Vec<Piece>, pages: &PageIndex) -> Vec<Chunk> {
        let overlap_chars = tokens_to_chars(self.options.overlap_tokens);
        let mut chunks: Vec<Chunk> = Vec::with_capacity(pieces.len());
        let mut previous_text: Option<String> = None;

        for piece in pieces {
            let chunk_index = chunks.len();

            let chunk = match piece {
                Piece::Table { start, raw } => Chunk {
                    summary: Some(generate_table_summary_with(
                        &raw,
                        self.options.summary_max_columns,
                    )),
                    token_count: estimate_token_count(&raw),
                    content: raw,
                    chunk_index,
                    page_number: pages.page_at(start),
                    chunk_type: ChunkType::Table,
                    bounding_box: None,
                },
                Piece::Text { start, text } => {
                    // Overlap comes from the previous text chunk, never a table
                    let content = match previous_text
                        .as_deref()
                        .and_then(|previous| overlap_tail(previous, overlap_chars))
                    {
                        Some(tail) => format!("{} {}", tail, text),
                        None => text.clone(),
                    };
                    previous_text = Some(text);

                    Chunk {
                        token_count: estimate_token_count(&content),
                        content,
                        chunk_index,
                        page_number: pages.page_at(start),
                        chunk_type: ChunkType::Text,
                        summary: None,
                        bounding_box: None,
                    }
                }
            };

            chunks.push(chunk);
        }

        chunks
    }
}

/// Split one prose region and record each segment's original offset.
fn push_prose(pieces: &mut Vec<Piece>, region: &str, original_base: usize, budget: usize) {
    for segment in split_with_offsets(region, budget) {
        let trimmed = segment.text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let leading = segment.text.len() - segment.text.trim_start().len();
        pieces.push(Piece::Text {
            start: original_base + segment.start + leading,
            text: trimmed.to_string(),
        });
    }
}

/// Chunk markdown with the given options.
///
/// # Example
/// ```
/// use quotewise_chunking::{chunk_markdown, ChunkOptions, ChunkType};
///
/// let markdown = "Policy summary.\n\n| Coverage | Limit |\n|---|---|\n| GL | $1M |";
/// let chunks = chunk_markdown(markdown, &[], &ChunkOptions::default());
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1].chunk_type, ChunkType::Table);
/// ```
pub fn chunk_markdown(markdown: &str, page_markers: &[PageMarker], options: &ChunkOptions) -> Vec<Chunk> {
    ChunkPipeline::new(options.clone()).process(markdown, page_markers)
}
