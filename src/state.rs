use sea_orm::DatabaseConnection;

use crate::services::product_service::ProductService;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub products: ProductService,
}

impl AppState {
    pub fn new(orm: DatabaseConnection) -> Self {
        let products = ProductService::new(orm.clone());
        Self { orm, products }
    }
}
