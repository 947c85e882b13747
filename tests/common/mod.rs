#![allow(dead_code)]

use products_api::{
    db::{create_orm_conn, run_migrations},
    models::NewProduct,
    services::product_service::ProductService,
    state::AppState,
};
use rust_decimal::Decimal;

/// Fresh in-memory database with the products schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub async fn setup_service() -> anyhow::Result<ProductService> {
    Ok(setup_state().await?.products)
}

pub fn new_product(name: &str, price: Decimal, stock: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        stock,
    }
}
