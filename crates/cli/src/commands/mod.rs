//! Command handlers for the quotewise CLI.

pub mod chunk;
pub mod compare;

pub use chunk::ChunkCommand;
pub use compare::CompareCommand;

use quotewise_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and parse a JSON input file, naming the file in any error.
pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let contents = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&contents)
        .map_err(|e| AppError::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
