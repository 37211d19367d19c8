//! # Chat relay
//!
//! A small stateless HTTP service that accepts `{"message": "..."}`, sends it
//! to an OpenAI-compatible chat-completion API behind the Zest Tasks
//! assistant prompt, and answers `{"text": "..."}`.
//!
//! ```rust,no_run
//! use chat_relay::{create_router, AppState, RelayConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RelayConfig::load()?;
//! let app = create_router(AppState::from_config(&config)?);
//!
//! let listener = tokio::net::TcpListener::bind(config.socket_addr().await?).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;

pub use api::{create_router, AppState, ErrorResponse, RelayError};
pub use config::{RelayConfig, RelayConfigError};
