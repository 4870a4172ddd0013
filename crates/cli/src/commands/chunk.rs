//! Chunk command handler.

use clap::Args;
use quotewise_chunking::{extract_page_markers, ChunkOptions, ChunkPipeline, Chunk, PageMarker};
use quotewise_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

use super::{print_json, read_json};

/// Split a markdown document into retrieval chunks
#[derive(Args, Debug)]
pub struct ChunkCommand {
    /// Markdown file to chunk
    pub file: PathBuf,

    /// JSON file with page markers (detected from `--- PAGE n ---` lines if omitted)
    #[arg(long)]
    pub markers: Option<PathBuf>,

    /// Target chunk size in tokens
    #[arg(long)]
    pub target_tokens: Option<usize>,

    /// Overlap between consecutive text chunks in tokens
    #[arg(long)]
    pub overlap_tokens: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChunkCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chunk command for {:?}", self.file);

        let options = self.options(config);
        options.validate()?;

        let markdown = tokio::fs::read_to_string(&self.file).await?;

        let markers = match &self.markers {
            Some(path) => {
                let markers: Vec<PageMarker> = read_json(path).await?;
                check_markers(&markers)?;
                markers
            }
            None => extract_page_markers(&markdown),
        };
        tracing::debug!("Using {} page markers", markers.len());

        let chunks = ChunkPipeline::new(options).process(&markdown, &markers);

        if self.json {
            print_json(&chunks)?;
        } else {
            print_chunks(&chunks);
        }

        Ok(())
    }

    fn options(&self, config: &AppConfig) -> ChunkOptions {
        let mut options = ChunkOptions::from_settings(&config.chunking);
        if let Some(target) = self.target_tokens {
            options.target_tokens = target;
        }
        if let Some(overlap) = self.overlap_tokens {
            options.overlap_tokens = overlap;
        }
        options
    }
}

fn check_markers(markers: &[PageMarker]) -> AppResult<()> {
    match markers.iter().find(|m| m.end_index < m.start_index) {
        Some(marker) => Err(AppError::InvalidInput(format!(
            "page marker for page {} ends before it starts ({} < {})",
            marker.page_number, marker.end_index, marker.start_index
        ))),
        None => Ok(()),
    }
}

fn print_chunks(chunks: &[Chunk]) {
    println!("{} chunks", chunks.len());
    println!();

    for chunk in chunks {
        let kind = if chunk.is_table() { "table" } else { "text" };
        println!(
            "#{} page {} {} ({} tokens)",
            chunk.chunk_index, chunk.page_number, kind, chunk.token_count
        );
        if let Some(summary) = &chunk.summary {
            println!("  summary: {}", summary);
        }
        let preview = chunk.content.lines().next().unwrap_or_default();
        println!("  {}", truncate(preview, 80));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
