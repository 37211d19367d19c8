//! HTTP request handlers

pub mod chat;
pub mod health;

pub use chat::{chat, ChatResponse};
pub use health::{health, HealthResponse};
