use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
    error::{ErrorData, FieldError},
    models::Product,
    response::{ApiResponse, Meta},
    routes::{health, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::decrement_stock,
        products::increment_stock
    ),
    components(
        schemas(
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            DeletedProduct,
            ErrorData,
            FieldError,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<DeletedProduct>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
