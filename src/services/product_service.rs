//! Product service - lifecycle and mutation-guard rules for products.
//!
//! Stateless: every call goes through the injected repository, so any number
//! of instances may serve the same store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateProduct, NewProduct, Password, Product, ProductChanges, ProductStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ProductRepository;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a product. Names are unique; status starts as `FOR_SALE`.
    async fn create_product(&self, input: CreateProduct) -> AppResult<Product>;

    /// List every product, newest first
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Get a single product by ID
    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    /// Apply a partial update after checking the product password
    async fn update_product(
        &self,
        id: Uuid,
        password: &str,
        changes: ProductChanges,
    ) -> AppResult<Product>;

    /// Permanently delete a product after checking its password.
    /// Returns the record as it was before deletion.
    async fn delete_product(&self, id: Uuid, password: &str) -> AppResult<Product>;
}

/// Concrete implementation of ProductService using a repository.
pub struct ProductManager {
    repo: Arc<dyn ProductRepository>,
}

impl ProductManager {
    /// Create new product service instance with repository
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Load a product with its secret and check the supplied password.
    ///
    /// The lookup comes first, so an unknown id is `NotFound` whatever the
    /// password. An empty password never matches.
    async fn authorize(&self, id: Uuid, password: &str) -> AppResult<Product> {
        let product = self
            .repo
            .find_by_id_with_secret(id)
            .await?
            .ok_or_not_found()?;

        if password.is_empty() || !product.password_matches(password) {
            tracing::warn!("Password mismatch for product {}", id);
            return Err(AppError::Unauthorized);
        }

        Ok(product)
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(&self, input: CreateProduct) -> AppResult<Product> {
        input.validate()?;

        if self.repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::conflict("Product name"));
        }

        let new_product = NewProduct {
            name: input.name,
            description: input.description,
            manager: input.manager,
            password: Password::new(&input.password)?,
            status: ProductStatus::default(),
        };

        // The store's unique constraint still catches a racing create
        let product = self.repo.insert(new_product).await?;
        tracing::info!("Product {} created", product.id);

        Ok(product)
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.repo.list_newest_first().await
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_product(
        &self,
        id: Uuid,
        password: &str,
        changes: ProductChanges,
    ) -> AppResult<Product> {
        self.authorize(id, password).await?;
        let changes = changes.without_blank_fields();

        if changes.is_empty() {
            tracing::debug!("Product {} update carries no fields", id);
        }

        if let Some(name) = &changes.name {
            if let Some(holder) = self.repo.find_by_name(name).await? {
                if holder.id != id {
                    return Err(AppError::conflict("Product name"));
                }
            }
        }

        let product = self.repo.update(id, changes).await?.ok_or_not_found()?;
        tracing::info!("Product {} updated", product.id);

        Ok(product)
    }

    async fn delete_product(&self, id: Uuid, password: &str) -> AppResult<Product> {
        self.authorize(id, password).await?;

        let product = self.repo.delete(id).await?.ok_or_not_found()?;
        tracing::info!("Product {} deleted", product.id);

        Ok(product)
    }
}
