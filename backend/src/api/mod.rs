//! HTTP API module.
//!
//! This module provides the HTTP server, response types and log streaming
//! around the matrix engine.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{router, serve, start_server, AppState};
pub use types::*;
pub use logs::*;
