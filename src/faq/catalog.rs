use std::path::Path;

use crate::error::{ConciergeError, Result};
use crate::models::FaqEntry;

/// Catalog JSON shipped inside the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/faq.json");

/// The fixed question/answer/category catalog the matcher scores against.
///
/// Loaded once at startup, either from the bundled JSON or from a file
/// override, and never mutated afterwards. Entry identity is catalog order.
#[derive(Debug, Clone)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
}

impl FaqCatalog {
    /// Load the catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let entries: Vec<FaqEntry> = serde_json::from_str(BUNDLED_CATALOG)?;
        Self::from_entries(entries)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<FaqEntry> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    /// Build a catalog from in-memory entries, validating them first.
    pub fn from_entries(entries: Vec<FaqEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ConciergeError::Catalog(
                "FAQ catalog must contain at least one entry".to_string(),
            ));
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.question.trim().is_empty() {
                return Err(ConciergeError::Catalog(format!(
                    "FAQ entry {index} has an empty question"
                )));
            }
            if entry.answer.trim().is_empty() {
                return Err(ConciergeError::Catalog(format!(
                    "FAQ entry {index} has an empty answer"
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
