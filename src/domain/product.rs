//! Product domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Password;
use crate::config::{STATUS_FOR_SALE, STATUS_SOLD_OUT};
use crate::errors::{AppError, AppResult};

/// Sale status of a product.
///
/// Any status may be changed to any other; there are no transition rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    ForSale,
    SoldOut,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::ForSale => STATUS_FOR_SALE,
            ProductStatus::SoldOut => STATUS_SOLD_OUT,
        }
    }
}

impl FromStr for ProductStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_FOR_SALE => Ok(ProductStatus::ForSale),
            STATUS_SOLD_OUT => Ok(ProductStatus::SoldOut),
            other => Err(AppError::validation(format!(
                "Unknown product status: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product domain entity
///
/// `password` is only populated when the record was loaded with its secret
/// for a credential check. It is never serialized; see [`ProductResponse`].
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub manager: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub password: Option<Password>,
}

impl Product {
    /// Check a supplied password against the stored secret.
    ///
    /// Always false when the secret was not loaded.
    pub fn password_matches(&self, plain_text: &str) -> bool {
        self.password
            .as_ref()
            .map(|stored| stored.verify(plain_text))
            .unwrap_or(false)
    }
}

/// Validated input for the create operation.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub manager: String,
    pub password: String,
}

impl CreateProduct {
    /// Every field is required; blank values count as missing.
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("manager", &self.manager)?;
        require("password", &self.password)
    }
}

/// Record handed to the store for insertion. Timestamps and id are
/// assigned by the store; status starts at its default.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub manager: String,
    pub password: Password,
    pub status: ProductStatus,
}

/// Merge set for a partial update.
///
/// `None` means "not supplied, leave unchanged". A supplied value always
/// replaces the stored one. The password is not part of the merge set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager: Option<String>,
    pub status: Option<ProductStatus>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.manager.is_none()
            && self.status.is_none()
    }

    /// Drop blank text fields. A required field cannot be cleared, so an
    /// empty value leaves the stored one in place.
    pub fn without_blank_fields(self) -> Self {
        Self {
            name: non_blank(self.name),
            description: non_blank(self.description),
            manager: non_blank(self.manager),
            status: self.status,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Current time at the precision the store keeps (microseconds).
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`.
/// Strictly later than `previous`, even if the clock has not moved on.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = current_timestamp();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Product projection returned to clients. Has no password field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Unique product identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "A very useful widget")]
    pub description: String,
    /// Person responsible for the listing
    #[schema(example = "Al")]
    pub manager: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            manager: product.manager,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(password: Option<Password>) -> Product {
        let now = current_timestamp();
        Product {
            id: Uuid::new_v4(),
            name: "Widget".to_string(),
            description: "d".to_string(),
            manager: "Al".to_string(),
            status: ProductStatus::ForSale,
            created_at: now,
            updated_at: now,
            password,
        }
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        assert_eq!("FOR_SALE".parse::<ProductStatus>().unwrap(), ProductStatus::ForSale);
        assert_eq!("SOLD_OUT".parse::<ProductStatus>().unwrap(), ProductStatus::SoldOut);
        assert_eq!(ProductStatus::SoldOut.to_string(), "SOLD_OUT");
        assert!("sold_out".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_status_defaults_to_for_sale() {
        assert_eq!(ProductStatus::default(), ProductStatus::ForSale);
    }

    #[test]
    fn test_status_json_representation() {
        let json = serde_json::to_string(&ProductStatus::SoldOut).unwrap();
        assert_eq!(json, "\"SOLD_OUT\"");

        let parsed: ProductStatus = serde_json::from_str("\"FOR_SALE\"").unwrap();
        assert_eq!(parsed, ProductStatus::ForSale);
        assert!(serde_json::from_str::<ProductStatus>("\"DISCONTINUED\"").is_err());
    }

    #[test]
    fn test_response_never_contains_password() {
        let product = sample_product(Some(Password::new("pw").unwrap()));
        let value = serde_json::to_value(ProductResponse::from(product)).unwrap();

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(!keys.contains(&"password"));
        assert!(keys.contains(&"createdAt"));
        assert!(keys.contains(&"updatedAt"));
        assert_eq!(value["status"], "FOR_SALE");
    }

    #[test]
    fn test_password_matches_requires_loaded_secret() {
        let with_secret = sample_product(Some(Password::new("pw").unwrap()));
        assert!(with_secret.password_matches("pw"));
        assert!(!with_secret.password_matches("nope"));

        let stripped = sample_product(None);
        assert!(!stripped.password_matches("pw"));
    }

    #[test]
    fn test_create_validation_names_missing_field() {
        let input = CreateProduct {
            name: "Widget".to_string(),
            description: "d".to_string(),
            manager: "   ".to_string(),
            password: "pw".to_string(),
        };

        match input.validate() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("manager")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_changes_drop_blank_fields() {
        assert!(ProductChanges::default().is_empty());

        let changes = ProductChanges {
            name: Some(String::new()),
            description: Some("  ".to_string()),
            manager: Some("Bo".to_string()),
            status: Some(ProductStatus::SoldOut),
        }
        .without_blank_fields();

        assert_eq!(
            changes,
            ProductChanges {
                manager: Some("Bo".to_string()),
                status: Some(ProductStatus::SoldOut),
                ..Default::default()
            }
        );

        let blanks_only = ProductChanges {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blanks_only.without_blank_fields().is_empty());
    }

    #[test]
    fn test_next_timestamp_strictly_increases() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(next_timestamp(future) > future);

        let past = Utc::now() - Duration::seconds(60);
        assert!(next_timestamp(past) > past);
    }
}
