//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod product_repository;

pub use product_repository::{ProductRepository, ProductStore};

// Export mock for unit tests
#[cfg(test)]
pub use product_repository::MockProductRepository;
