mod faq;
mod message;
mod profile;

pub use faq::FaqEntry;
pub use message::{ChatMessage, MessageRole, MessageSource};
pub use profile::UserProfile;
