//! Product store: persistence of product records.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::product::{current_timestamp, next_timestamp};
use crate::domain::{NewProduct, Product, ProductChanges};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Entity name reported when the unique name constraint is hit
const NAME_CONFLICT: &str = "Product name";

/// Product repository trait for dependency injection.
///
/// Query methods never load the password hash unless their name says so
/// (`*_with_secret`).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new record; id and timestamps are assigned here.
    /// A taken name is reported as `Conflict`.
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    /// Find product by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Find product by ID (secret stripped)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Find product by ID with its password hash loaded
    async fn find_by_id_with_secret(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Apply the supplied fields and stamp `updated_at`.
    /// Returns `None` if the record does not exist.
    async fn update(&self, id: Uuid, changes: ProductChanges) -> AppResult<Option<Product>>;

    /// Permanently remove a record, returning it as it was before removal.
    async fn delete(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// All products, most recently created first. Records created in the
    /// same microsecond are ordered by descending id.
    async fn list_newest_first(&self) -> AppResult<Vec<Product>>;
}

/// SeaORM-backed implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<Option<product::Model>> {
        ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let now = current_timestamp();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            description: Set(product.description),
            manager: Set(product.manager),
            password_hash: Set(product.password.into_string()),
            status: Set(product.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, NAME_CONFLICT))?;

        model.into_product(false)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let result = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(|model| model.into_product(false)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        self.find_model(id)
            .await?
            .map(|model| model.into_product(false))
            .transpose()
    }

    async fn find_by_id_with_secret(&self, id: Uuid) -> AppResult<Option<Product>> {
        self.find_model(id)
            .await?
            .map(|model| model.into_product(true))
            .transpose()
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> AppResult<Option<Product>> {
        let txn = self.db.begin().await?;

        let Some(existing) = ProductEntity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let updated_at = next_timestamp(existing.updated_at);
        let mut active: ActiveModel = existing.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(manager) = changes.manager {
            active.manager = Set(manager);
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(updated_at);

        // Removed by a concurrent delete after the read
        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => return Err(AppError::from_db(e, NAME_CONFLICT)),
        };
        txn.commit().await?;

        model.into_product(false).map(Some)
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Product>> {
        let txn = self.db.begin().await?;

        let Some(existing) = ProductEntity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let result = ProductEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            // A concurrent delete got there first
            return Ok(None);
        }
        txn.commit().await?;

        existing.into_product(false).map(Some)
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models
            .into_iter()
            .map(|model| model.into_product(false))
            .collect()
    }
}
