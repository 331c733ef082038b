//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Password, Product, ProductStatus};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub manager: String,
    /// Argon2 PHC string, never the plain text
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert database model to domain entity.
    ///
    /// The password hash is carried over only when `include_secret` is set.
    pub fn into_product(self, include_secret: bool) -> AppResult<Product> {
        let status = self.status.parse::<ProductStatus>().map_err(|_| {
            AppError::internal(format!(
                "Product {} has unknown status '{}' in storage",
                self.id, self.status
            ))
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            manager: self.manager,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            password: include_secret.then(|| Password::from_hash(self.password_hash)),
        })
    }
}
