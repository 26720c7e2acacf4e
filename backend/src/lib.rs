//! # Matrixops - arbitrary-precision matrix transformations
//!
//! Takes a rectangular grid of decimal integer tokens (usually an uploaded
//! CSV file) and transposes, flattens, sums or multiplies it. Integers have
//! no fixed width; sums and products never overflow.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV upload │────▶│   Parser    │────▶│   Matrix    │────▶│  Text body  │
//! │ (multipart) │     │  (auto-enc) │     │   engine    │     │ or "error"  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matrixops::{flatten, invert, multiply, sum};
//!
//! let m = [["1", "2", "3"], ["4", "5", "6"]];
//! assert_eq!(invert(&m).unwrap(), vec![vec!["1", "4"], vec!["2", "5"], vec!["3", "6"]]);
//! assert_eq!(flatten(&m).unwrap(), "1,2,3,4,5,6\n");
//! assert_eq!(sum(&m).unwrap(), "21");
//! assert_eq!(multiply(&m).unwrap(), "720");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`matrix`] - The engine: validation, transpose, flatten, sum, product
//! - [`parser`] - CSV decoding with encoding detection
//! - [`config`] - Server configuration from the environment
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod matrix;

// Ingestion
pub mod parser;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    CsvError,
    ErrorKind,
    MatrixError,
    MatrixResult,
    ServerError,
};

// =============================================================================
// Re-exports - Engine
// =============================================================================

pub use matrix::{
    flatten,
    invert,
    multiply,
    render_rows,
    sum,
    validate,
    Dimensions,
    Operation,
};

pub use matrix::number::{canonical, parse_integer};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    parse_bytes,
    parse_file,
    CsvOptions,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::ServerConfig;

// Server
pub mod server {
    pub use crate::api::server::{router, serve, start_server};
}
