//! Smartlinker - multi-platform music smart links
//!
//! One short link per release, resolving to a landing page that lists every
//! streaming platform the release is on, with view and per-platform click
//! counts kept in a single JSON document.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line administration (default)
//!
//! # Architecture
//! - `storage`: The link document and its backends
//! - `services`: Link management rules and landing page rendering
//! - `api`: HTTP routes
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging and the PID lockfile

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
