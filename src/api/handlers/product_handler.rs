//! Product handlers.

use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{OptionalJson, ProductIdPath, ValidatedJson};
use crate::api::AppState;
use crate::config::{
    MSG_PRODUCTS_LISTED, MSG_PRODUCT_CREATED, MSG_PRODUCT_DELETED, MSG_PRODUCT_FOUND,
    MSG_PRODUCT_UPDATED,
};
use crate::domain::{CreateProduct, ProductChanges, ProductResponse, ProductStatus};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    #[schema(example = "A very useful widget")]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "manager is required"))]
    #[schema(example = "Al")]
    pub manager: String,
    /// Credential required for later updates and deletion
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "pw")]
    pub password: String,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            manager: req.manager,
            password: req.password,
        }
    }
}

/// Product update request. Omitted, `null` or blank fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Widget Pro")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProductStatus>,
    pub manager: Option<String>,
    /// Product password set at creation
    #[serde(default)]
    #[schema(example = "pw")]
    pub password: String,
}

impl UpdateProductRequest {
    fn into_parts(self) -> (String, ProductChanges) {
        let changes = ProductChanges {
            name: self.name,
            description: self.description,
            manager: self.manager,
            status: self.status,
        };
        (self.password, changes)
    }
}

/// Product deletion request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteProductRequest {
    /// Product password set at creation
    #[serde(default)]
    #[schema(example = "pw")]
    pub password: String,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "A product with this name already exists")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.create_product(payload.into()).await?;

    Ok(ApiResponse::created(
        ProductResponse::from(product),
        MSG_PRODUCT_CREATED,
    ))
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products ordered by creation time, newest first", body = Vec<ProductResponse>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let products = state.product_service.list_products().await?;

    Ok(ApiResponse::ok(
        products.into_iter().map(ProductResponse::from).collect(),
        MSG_PRODUCTS_LISTED,
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (UUID)")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.get_product(id).await?;

    Ok(ApiResponse::ok(ProductResponse::from(product), MSG_PRODUCT_FOUND))
}

/// Update a product (password required)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (UUID)")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product after the update", body = ProductResponse),
        (status = 400, description = "Malformed body or unknown status"),
        (status = 401, description = "Password missing or does not match"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Another product already has this name")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
    OptionalJson(payload): OptionalJson<UpdateProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let (password, changes) = payload.into_parts();
    let product = state
        .product_service
        .update_product(id, &password, changes)
        .await?;

    Ok(ApiResponse::ok(ProductResponse::from(product), MSG_PRODUCT_UPDATED))
}

/// Delete a product (password required)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (UUID)")
    ),
    request_body = DeleteProductRequest,
    responses(
        (status = 200, description = "The deleted product", body = ProductResponse),
        (status = 401, description = "Password missing or does not match"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
    OptionalJson(payload): OptionalJson<DeleteProductRequest>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state
        .product_service
        .delete_product(id, &payload.password)
        .await?;

    Ok(ApiResponse::ok(ProductResponse::from(product), MSG_PRODUCT_DELETED))
}
