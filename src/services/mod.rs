//! Application services layer - Use cases and business logic.
//!
//! Services enforce the product rules (uniqueness, password gate, merge
//! semantics) and depend on the repository trait, not on SeaORM.

mod product_service;

pub use product_service::{ProductManager, ProductService};
