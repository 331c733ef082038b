//! Product Listing API
//!
//! Password-gated CRUD for product listings over HTTP, backed by SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Product entity, merge set, projection, password value object
//! - **services**: Product lifecycle rules
//! - **infra**: Database lifecycle and the product store
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Response envelope
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 3000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Product, ProductResponse, ProductStatus};
pub use errors::{AppError, AppResult};
pub use infra::Database;
