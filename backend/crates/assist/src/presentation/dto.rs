//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Code explanation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainCodeRequest {
    pub code: String,
    pub language: Option<String>,
}

/// Code explanation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainCodeResponse {
    pub success: bool,
    pub explanation: String,
    pub language: String,
}

/// AI assist request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAssistRequest {
    pub code: String,
    /// Free-text label for what the student is working on
    pub challenge: String,
    /// "hint", "debug" or "explain"; anything else falls back to hint
    pub use_case: Option<String>,
    pub language: Option<String>,
}

/// AI assist response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAssistResponse {
    pub success: bool,
    /// Formatted Markdown message with emoji framing
    pub message: String,
    pub use_case: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
