//! Domain layer - Core business entities and logic
//!
//! The product entity, its input/merge types, the client-facing projection,
//! and the hashed password value object. Nothing here touches storage or
//! HTTP.

pub mod password;
pub mod product;

pub use password::Password;
pub use product::{
    CreateProduct, NewProduct, Product, ProductChanges, ProductResponse, ProductStatus,
};
