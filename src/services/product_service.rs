use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;

use crate::{
    entity::products::{ActiveModel, Column, Entity as Products},
    error::AppResult,
    models::{NewProduct, Product},
};

/// Store-backed product operations.
///
/// Expected outcomes such as a missing row or insufficient stock come back as
/// `None` / `false`; the error side only carries store failures.
#[derive(Clone)]
pub struct ProductService {
    orm: DatabaseConnection,
}

impl ProductService {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }

    pub async fn create(&self, product: NewProduct) -> AppResult<Product> {
        let now = Utc::now();
        let active = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            stock: Set(product.stock),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = active.insert(&self.orm).await?;
        tracing::info!(product_id = model.id, "product created");
        Ok(model.into())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let product = Products::find_by_id(id)
            .one(&self.orm)
            .await?
            .map(Product::from);
        Ok(product)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Product>> {
        let items = Products::find()
            .order_by_asc(Column::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(Product::from)
            .collect();
        Ok(items)
    }

    /// Overwrites the mutable fields of the row with `product.id`.
    ///
    /// `id` and `created_at` are never written. Returns `false` when no row has
    /// that id; the check and the write are one statement.
    pub async fn update(&self, product: Product) -> AppResult<bool> {
        let changes = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            stock: Set(product.stock),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };
        let result = Products::update_many()
            .set(changes)
            .filter(Column::Id.eq(product.id))
            .exec(&self.orm)
            .await?;

        let updated = result.rows_affected > 0;
        if updated {
            tracing::info!(product_id = product.id, "product updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = Products::delete_by_id(id).exec(&self.orm).await?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(product_id = id, "product deleted");
        }
        Ok(deleted)
    }

    /// Removes `quantity` units unless that would take stock below zero.
    ///
    /// A missing product and insufficient stock both return `false` and leave
    /// the row untouched.
    pub async fn decrement_stock(&self, id: i32, quantity: i32) -> AppResult<bool> {
        let result = Products::update_many()
            .col_expr(Column::Stock, Expr::col(Column::Stock).sub(quantity))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(id))
            .filter(Column::Stock.gte(quantity))
            .exec(&self.orm)
            .await?;

        let decremented = result.rows_affected > 0;
        if decremented {
            tracing::info!(product_id = id, quantity, "stock decremented");
        } else {
            tracing::debug!(product_id = id, quantity, "stock decrement rejected");
        }
        Ok(decremented)
    }

    /// Adds `quantity` units. Returns `false` without writing when the product
    /// is missing or the new level would not fit in an `i32`.
    pub async fn increment_stock(&self, id: i32, quantity: i32) -> AppResult<bool> {
        let result = Products::update_many()
            .col_expr(Column::Stock, Expr::col(Column::Stock).add(quantity))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(id))
            .filter(Column::Stock.lte(i32::MAX.saturating_sub(quantity)))
            .exec(&self.orm)
            .await?;

        let incremented = result.rows_affected > 0;
        if incremented {
            tracing::info!(product_id = id, quantity, "stock incremented");
        } else {
            tracing::debug!(product_id = id, quantity, "stock increment rejected");
        }
        Ok(incremented)
    }
}
