mod chat;
mod faq;
mod health;

pub use chat::{CreateSessionRequest, SendMessageRequest, SendMessageResponse, SessionDto};
pub use faq::{FaqListParams, FaqMatchDto, FaqMatchRequest};
pub use health::{HealthDto, LlmStatusDto};
