//! HTTP API

pub mod services;
