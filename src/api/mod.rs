//! API layer - HTTP handlers and routing
//!
//! Decodes requests into service calls and encodes results into the
//! `{status, message, data}` envelope.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
