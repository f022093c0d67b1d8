mod catalog;
mod matcher;

pub use catalog::FaqCatalog;
pub use matcher::{FaqMatch, FaqMatcher, MIN_MATCH_CONFIDENCE};
