//! Generate config command

use std::path::Path;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::{Result, SmartlinkError};

/// Write a sample configuration to `output_path`, or print it when absent.
pub async fn config_generate(output_path: Option<String>, force: bool) -> Result<()> {
    let sample = StaticConfig::generate_sample_config();

    let Some(path) = output_path else {
        println!("{}", sample);
        return Ok(());
    };

    if !force && Path::new(&path).exists() {
        return Err(SmartlinkError::config(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );
    tokio::fs::write(&path, sample.as_bytes())
        .await
        .map_err(|e| SmartlinkError::config(format!("Unable to write {}: {}", path, e)))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {} {}",
        "Please edit the configuration file and restart the service".yellow(),
        "🔧".blue()
    );

    Ok(())
}
