//! CLI interface module
//!
//! Administrative commands working on the same link document as the server.

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::{Result, SmartlinkError};
use crate::runtime::lifetime::startup::open_link_service;
use crate::system::PidLock;
use commands::{config_management, create_link, delete_link, export_links, import_links, list_links};

/// Whether a command rewrites the document.
fn is_mutating(cmd: &Commands) -> bool {
    matches!(
        cmd,
        Commands::Create { .. } | Commands::Delete { .. } | Commands::Import { .. }
    )
}

/// Take the document lock for a mutating command.
///
/// A running server keeps the document in memory and would overwrite any
/// change made behind its back, so writes are refused while it holds the lock.
fn lock_for_write(config: &StaticConfig) -> Result<Option<PidLock>> {
    if config.storage.backend != "file" {
        return Ok(None);
    }
    PidLock::acquire(&config.storage.data_file)
        .map(Some)
        .map_err(|e| {
            SmartlinkError::lockfile(format!(
                "{}. Stop the server or use the HTTP API instead",
                e.message()
            ))
        })
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<()> {
    let cmd = match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => return config_management::config_generate(output_path, force).await,
        Commands::Serve => {
            return Err(SmartlinkError::config(
                "`serve` starts the server and is not a CLI command",
            ));
        }
        other => other,
    };

    let lock = if is_mutating(&cmd) {
        lock_for_write(config)?
    } else {
        None
    };

    let result = async {
        let service = open_link_service(config).await?;

        let outcome = match cmd {
            Commands::List { json } => list_links(&service, json).await,
            Commands::Create {
                title,
                artist,
                platforms,
            } => create_link(&service, title, artist, platforms).await,
            Commands::Delete { link_id } => delete_link(&service, link_id).await,
            Commands::Export { file_path } => export_links(&service, file_path).await,
            Commands::Import {
                file_path,
                overwrite,
            } => import_links(&service, file_path, overwrite).await,
            Commands::Serve | Commands::Config { .. } => Ok(()),
        };

        service.store().close().await?;
        outcome
    }
    .await;

    if let Some(lock) = lock {
        lock.release();
    }
    result
}
