pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod faq;
pub mod llm;
pub mod models;
pub mod speech;
