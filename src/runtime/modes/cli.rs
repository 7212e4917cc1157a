//! CLI mode
//!
//! Delegates to the actual CLI implementation.

use crate::cli::Commands;
use crate::config::get_config;
use crate::errors::Result;

/// Run one CLI command against the configured store.
pub async fn run_cli(cmd: Commands) -> Result<()> {
    let config = get_config();
    crate::interfaces::cli::run_cli_command(cmd, &config).await
}
