//! Import and export link commands

use std::path::Path;

use colored::Colorize;

use crate::errors::{Result, SmartlinkError};
use crate::services::{ImportMode, LinkService};
use crate::storage::LinkMap;

pub async fn export_links(service: &LinkService, file_path: Option<String>) -> Result<()> {
    let document = service.export_links().await?;

    let Some(output_path) = file_path else {
        println!("{}", document);
        return Ok(());
    };

    tokio::fs::write(&output_path, document.as_bytes())
        .await
        .map_err(|e| {
            SmartlinkError::file_operation(format!(
                "Failed to write export file '{}': {}",
                output_path, e
            ))
        })?;

    let count = service.store().count().await?;
    println!(
        "{} Exported {} smart links to: {}",
        "✓".bold().green(),
        count.to_string().green(),
        output_path.cyan()
    );

    Ok(())
}

pub async fn import_links(service: &LinkService, file_path: String, overwrite: bool) -> Result<()> {
    if !Path::new(&file_path).exists() {
        return Err(SmartlinkError::file_operation(format!(
            "Import file not found: {}",
            file_path
        )));
    }

    let content = tokio::fs::read_to_string(&file_path).await.map_err(|e| {
        SmartlinkError::file_operation(format!("Failed to read '{}': {}", file_path, e))
    })?;
    let document: LinkMap = serde_json::from_str(&content).map_err(|e| {
        SmartlinkError::serialization(format!("'{}' is not a link document: {}", file_path, e))
    })?;

    let mode = ImportMode::from_overwrite_flag(overwrite);
    let result = service.import_links(document, mode).await?;

    println!(
        "{} Import finished: {} imported, {} skipped, {} failed",
        "✓".bold().green(),
        result.success.to_string().green(),
        result.skipped.to_string().yellow(),
        result.failed.to_string().red()
    );
    for error in &result.errors {
        println!("    {} {}: {}", "✗".red(), error.id.cyan(), error.message);
    }

    Ok(())
}
