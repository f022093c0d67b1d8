use serde::{Deserialize, Serialize};

use crate::faq::FaqMatch;
use crate::models::FaqEntry;

/// Query parameters for listing catalog entries.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FaqListParams {
    /// Restrict results to a single category (case-insensitive).
    pub category: Option<String>,
}

/// Request body for scoring a query against the catalog.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqMatchRequest {
    pub query: String,
}

/// Best catalog match for a query, if any cleared the no-match floor.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqMatchDto {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<FaqEntry>,
}

impl From<Option<FaqMatch>> for FaqMatchDto {
    fn from(hit: Option<FaqMatch>) -> Self {
        match hit {
            Some(hit) => Self {
                matched: true,
                confidence: Some(hit.confidence),
                entry: Some(hit.entry),
            },
            None => Self {
                matched: false,
                confidence: None,
                entry: None,
            },
        }
    }
}
