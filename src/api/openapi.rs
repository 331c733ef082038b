//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::product_handler;
use crate::domain::{ProductResponse, ProductStatus};

/// OpenAPI documentation for the product listing API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Listing API",
        version = "0.1.0",
        description = "Create, list, read, update and delete product listings. \
                       Updates and deletes are gated by the password set at creation.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
    ),
    components(
        schemas(
            ProductStatus,
            ProductResponse,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            product_handler::DeleteProductRequest,
        )
    ),
    tags(
        (name = "Products", description = "Product listing operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_product_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/products"));
        assert!(doc.paths.paths.contains_key("/products/{id}"));
    }
}
