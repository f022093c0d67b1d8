use serde::{Deserialize, Serialize};

/// Service health report.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    /// Number of entries in the loaded FAQ catalog.
    pub catalog_entries: usize,
    pub llm: LlmStatusDto,
    pub speech_available: bool,
}

/// Fallback backend availability.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatusDto {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
