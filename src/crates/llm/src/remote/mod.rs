//! Clients for hosted completion APIs.

pub mod openai;

pub use openai::OpenAiClient;
