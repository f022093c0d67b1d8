use serde::{Deserialize, Serialize};

/// One question/answer/category record from the FAQ catalog.
///
/// Entries are loaded once at startup and never mutated; identity is catalog
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}
