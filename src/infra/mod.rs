//! Infrastructure layer - External systems integration
//!
//! Database connection lifecycle, SeaORM entities, and the product store.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{ProductRepository, ProductStore};

#[cfg(test)]
pub use repositories::MockProductRepository;
