use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    routing::{get, put},
};

use crate::{
    dto::products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::{resource_path::ResourcePath, validated_json::ValidatedJson},
    models::Product,
    response::{ApiResponse, Meta, Negotiated, ResponseFormat},
    state::AppState,
};

const PRODUCT: &str = "Product";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/decrement-stock/{id}/{quantity}", put(decrement_stock))
        .route("/add-to-stock/{id}/{quantity}", put(increment_stock))
}

fn ensure_positive_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::BadRequest(
            "Quantity must be greater than zero.".into(),
        ));
    }
    Ok(())
}

async fn reload(state: &AppState, id: i32) -> AppResult<Product> {
    state
        .products
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> AppResult<Negotiated<ProductList>> {
    let items = state.products.get_all().await?;
    let meta = Meta::with_total(items.len() as u64);
    Ok(Negotiated::new(
        format,
        ApiResponse::success(
            "Products",
            ProductList { items },
            Some(meta),
        ),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    format: ResponseFormat,
    ResourcePath(id): ResourcePath<i32>,
) -> AppResult<Negotiated<Product>> {
    let product = reload(&state, id).await?;
    Ok(Negotiated::new(
        format,
        ApiResponse::success("Product", product, None),
    ))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    format: ResponseFormat,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Negotiated<Product>)> {
    let product = state.products.create(payload.into_new_product()).await?;
    let location = format!("/api/products/{}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Negotiated::new(
            format,
            ApiResponse::success("Product created", product, Some(Meta::empty())),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    format: ResponseFormat,
    ResourcePath(id): ResourcePath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Negotiated<Product>> {
    let mut product = reload(&state, id).await?;
    payload.apply_to(&mut product);

    if !state.products.update(product).await? {
        return Err(AppError::NotFound(PRODUCT));
    }

    let product = reload(&state, id).await?;
    Ok(Negotiated::new(
        format,
        ApiResponse::success(
            "Updated",
            product,
            Some(Meta::empty()),
        ),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<DeletedProduct>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    format: ResponseFormat,
    ResourcePath(id): ResourcePath<i32>,
) -> AppResult<Negotiated<DeletedProduct>> {
    if !state.products.delete(id).await? {
        return Err(AppError::NotFound(PRODUCT));
    }

    Ok(Negotiated::new(
        format,
        ApiResponse::success(
            "Product deleted successfully",
            DeletedProduct { product_id: id },
            Some(Meta::empty()),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/decrement-stock/{id}/{quantity}",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("quantity" = i32, Path, description = "Units to remove, must be positive")
    ),
    responses(
        (status = 200, description = "Stock decremented", body = ApiResponse<Product>),
        (status = 400, description = "Invalid quantity, unknown product or insufficient stock"),
    ),
    tag = "Products"
)]
pub async fn decrement_stock(
    State(state): State<AppState>,
    format: ResponseFormat,
    ResourcePath((id, quantity)): ResourcePath<(i32, i32)>,
) -> AppResult<Negotiated<Product>> {
    ensure_positive_quantity(quantity)?;

    if !state.products.decrement_stock(id, quantity).await? {
        return Err(AppError::BadRequest(
            "The product does not exist or there is insufficient stock.".into(),
        ));
    }

    let product = reload(&state, id).await?;
    Ok(Negotiated::new(
        format,
        ApiResponse::success(
            "Stock decremented",
            product,
            Some(Meta::empty()),
        ),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/add-to-stock/{id}/{quantity}",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("quantity" = i32, Path, description = "Units to add, must be positive")
    ),
    responses(
        (status = 200, description = "Stock incremented", body = ApiResponse<Product>),
        (status = 400, description = "Invalid quantity or stock would overflow"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn increment_stock(
    State(state): State<AppState>,
    format: ResponseFormat,
    ResourcePath((id, quantity)): ResourcePath<(i32, i32)>,
) -> AppResult<Negotiated<Product>> {
    ensure_positive_quantity(quantity)?;

    if !state.products.increment_stock(id, quantity).await? {
        // The write is refused both for a missing row and for an overflowing level.
        reload(&state, id).await?;
        return Err(AppError::BadRequest(
            "Stock cannot exceed the maximum storable quantity.".into(),
        ));
    }

    let product = reload(&state, id).await?;
    Ok(Negotiated::new(
        format,
        ApiResponse::success(
            "Stock incremented",
            product,
            Some(Meta::empty()),
        ),
    ))
}
