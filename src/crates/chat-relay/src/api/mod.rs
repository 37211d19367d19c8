//! HTTP API of the chat relay

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::{ErrorResponse, RelayError, RelayResult};
pub use routes::{create_router, AppState};
