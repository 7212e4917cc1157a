//! Command-line interface definitions using clap
//!
//! Defines the CLI structure for smartlinker using clap's derive macros.

use clap::{Parser, Subcommand};

/// Smartlinker - multi-platform music smart links
#[derive(Parser, Debug)]
#[command(name = "smartlinker")]
#[command(version)]
#[command(about = "Smart links that send listeners to the music platform of their choice", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// List all smart links
    List {
        /// Output the raw document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a smart link
    ///
    /// Usage: create --title "Song" --artist "Artist" --platform "Spotify=https://..."
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: String,

        /// Platform entry as NAME=URL, repeatable
        #[arg(long = "platform", short = 'p', required = true, value_parser = parse_platform_arg)]
        platforms: Vec<(String, String)>,
    },

    /// Delete a smart link
    Delete {
        /// Link id to delete
        link_id: String,
    },

    /// Export all links as JSON
    Export {
        /// Output file path (default: stdout)
        file_path: Option<String>,
    },

    /// Import links from an exported JSON document
    Import {
        /// Input file path
        file_path: String,

        /// Overwrite links whose id already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse `NAME=URL`. Splits on the first `=` since URLs may contain more.
pub fn parse_platform_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() && !url.trim().is_empty() => {
            Ok((name.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected NAME=URL, got '{}'", raw)),
    }
}
