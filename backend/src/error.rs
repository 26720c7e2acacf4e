//! Error types for the matrix operations service.
//!
//! - [`MatrixError`] - Engine errors (shape, token, separator, empty row)
//! - [`CsvError`] - CSV ingestion errors
//! - [`ConfigError`] - Environment configuration errors
//! - [`ServerError`] - HTTP transport errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! The `Display` text of [`MatrixError`] is part of the wire contract:
//! HTTP clients receive it verbatim after an `error ` prefix.

use thiserror::Error;

// =============================================================================
// Engine Errors
// =============================================================================

/// Errors raised by the matrix engine.
///
/// Every operation stops at the first offending row or cell in row-major
/// order and returns exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A row's length differs from the first row (transpose, flatten, validate).
    #[error("invalid matrix: inconsistent rows and columns")]
    InconsistentShape,

    /// A row's length differs from the first row (sum, multiply).
    #[error("invalid matrix: inconsistent row length at row {row}")]
    InconsistentRowLength { row: usize },

    /// A cell does not parse as a base-10 signed integer.
    #[error("invalid number at position [{row},{col}]")]
    InvalidNumber { row: usize, col: usize },

    /// A cell contains a comma or newline and would corrupt flattened output.
    #[error("invalid character in matrix at position [{row},{col}]: value contains comma or newline")]
    InvalidCharacter { row: usize, col: usize },

    /// Rows are present but have zero width (sum, multiply).
    #[error("invalid matrix: empty row found")]
    EmptyRow,
}

/// Taxonomy class of a [`MatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    InvalidNumber,
    InvalidCharacter,
    EmptyRow,
}

impl MatrixError {
    /// Zero-based `(row, col)` of the offending cell, for cell-level errors.
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            MatrixError::InvalidNumber { row, col } | MatrixError::InvalidCharacter { row, col } => {
                Some((row, col))
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::InconsistentShape | MatrixError::InconsistentRowLength { .. } => {
                ErrorKind::Shape
            }
            MatrixError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            MatrixError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            MatrixError::EmptyRow => ErrorKind::EmptyRow,
        }
    }
}

// =============================================================================
// CSV Ingestion Errors
// =============================================================================

/// Errors while turning uploaded bytes into a string grid.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (unterminated quote, ragged record, ...).
    #[error("{0}")]
    Parse(#[from] csv::Error),

    /// Bytes could not be decoded as text.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Delimiter is not a single ASCII byte.
    #[error("delimiter must be a single ASCII character: '{0}'")]
    Delimiter(char),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading server configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to a value that does not parse.
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upload could not be decoded into a grid.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Malformed multipart body.
    #[error("multipart error: {0}")]
    Multipart(String),

    /// No `file` field in the multipart form.
    #[error("no such file")]
    MissingFile,

    /// Bind or accept failure.
    #[error("server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for engine operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for CSV ingestion.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
