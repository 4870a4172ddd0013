//! Compare command handler.

use clap::Args;
use quotewise_compare::{
    ComparisonEngine, ComparisonPolicy, ComparisonTableData, DocumentSummary, QuoteExtraction,
};
use quotewise_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

use super::{print_json, read_json};

/// Compare extracted quotes side by side
#[derive(Args, Debug)]
pub struct CompareCommand {
    /// JSON file holding an array of quote extractions
    pub extractions: PathBuf,

    /// JSON file holding document summaries, one per extraction
    #[arg(long)]
    pub documents: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CompareCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing compare command for {:?}", self.extractions);

        let policy = ComparisonPolicy::from_settings(&config.comparison);
        policy.validate()?;

        let extractions: Vec<QuoteExtraction> = read_json(&self.extractions).await?;

        let documents: Option<Vec<DocumentSummary>> = match &self.documents {
            Some(path) => Some(read_json(path).await?),
            None => None,
        };

        if let Some(documents) = &documents {
            if documents.len() != extractions.len() {
                return Err(AppError::InvalidInput(format!(
                    "{} documents given for {} extractions",
                    documents.len(),
                    extractions.len()
                )));
            }
        }

        let table = ComparisonEngine::new(policy).build(&extractions, documents.as_deref());

        if self.json {
            print_json(&table)?;
        } else {
            print_summary(&table);
        }

        Ok(())
    }
}

fn print_summary(table: &ComparisonTableData) {
    if table.document_count == 0 {
        println!("No quotes to compare");
        return;
    }

    println!("Comparing {} quotes: {}", table.document_count, table.headers.join(", "));
    println!();

    for row in table.rows.iter().filter(|row| row.has_difference) {
        let cells: Vec<String> = row
            .values
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let marker = if row.best_index == Some(i) {
                    " (best)"
                } else if row.worst_index == Some(i) {
                    " (worst)"
                } else {
                    ""
                };
                format!("{}{}", cell.display_value, marker)
            })
            .collect();
        println!("{}: {}", row.field, cells.join(" | "));
    }

    if !table.gaps.is_empty() {
        println!();
        println!("Coverage gaps:");
        for gap in &table.gaps {
            println!(
                "- [{:?}] {} missing from {}",
                gap.severity,
                gap.field,
                header_list(table, &gap.documents_missing)
            );
        }
    }

    if !table.conflicts.is_empty() {
        println!();
        println!("Conflicts:");
        for conflict in &table.conflicts {
            println!("- [{:?}] {}", conflict.severity, conflict.description);
        }
    }

    let analysis = &table.gap_analysis;
    if !analysis.limit_concerns.is_empty() || !analysis.endorsement_gaps.is_empty() {
        println!();
        println!("Gap analysis:");
        for concern in &analysis.limit_concerns {
            println!(
                "- {}: {}",
                header_list(table, &[concern.document_index]),
                concern.description
            );
        }
        for gap in &analysis.endorsement_gaps {
            println!("- {}", gap.reason);
        }
    }

    println!();
    println!("Overall risk score: {}/100", analysis.overall_risk_score);
}

fn header_list(table: &ComparisonTableData, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| table.headers.get(i).map(String::as_str).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_extractions_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(
            &path,
            r#"[
                {"carrierName": "Acme", "coverages": [{"type": "property", "deductible": 500}]},
                {"carrierName": "Beta", "coverages": [{"type": "property", "deductible": 2500}]}
            ]"#,
        )
        .unwrap();

        let extractions: Vec<QuoteExtraction> = read_json(&path).await.unwrap();
        let table = ComparisonEngine::default().build(&extractions, None);

        assert_eq!(table.headers, vec!["Acme", "Beta"]);
        assert_eq!(table.conflicts.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(&path, r#"{"carrierName": "not an array"}"#).unwrap();

        let result: AppResult<Vec<QuoteExtraction>> = read_json(&path).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_document_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let quotes = dir.path().join("quotes.json");
        let documents = dir.path().join("documents.json");
        std::fs::write(&quotes, r#"[{}, {}]"#).unwrap();
        std::fs::write(&documents, r#"[{"id": "a", "filename": "a.pdf"}]"#).unwrap();

        let cmd = CompareCommand {
            extractions: quotes,
            documents: Some(documents),
            json: true,
        };

        let result = cmd.execute(&AppConfig::default()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
