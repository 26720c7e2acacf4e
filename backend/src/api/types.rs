//! Response bodies.
//!
//! Operation endpoints answer in plain text so existing clients can read
//! results and errors without a JSON layer.

use serde::{Deserialize, Serialize};

use crate::matrix::Operation;

/// Plain-text body for any failure: `error <message>`, no trailing newline.
pub fn error_body(error: impl std::fmt::Display) -> String {
    format!("error {}", error)
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// `"POST /sum"` style route descriptions
    pub endpoints: Vec<String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        let mut endpoints: Vec<String> = Operation::ALL
            .iter()
            .map(|op| format!("POST /{}", op))
            .collect();
        endpoints.push("GET /api/logs (SSE)".to_string());

        Self {
            status: "ok".to_string(),
            service: "matrixops".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    #[test]
    fn test_error_body_format() {
        let body = error_body(MatrixError::InvalidNumber { row: 0, col: 1 });
        assert_eq!(body, "error invalid number at position [0,1]");
    }

    #[test]
    fn test_health_lists_operations() {
        let health = HealthResponse::ok();
        assert_eq!(health.status, "ok");
        assert!(health.endpoints.contains(&"POST /multiply".to_string()));
        assert_eq!(health.endpoints.len(), Operation::ALL.len() + 1);
    }
}
