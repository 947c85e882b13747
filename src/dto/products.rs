use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{NewProduct, Product};

/// Largest stock level accepted when updating a product. Creation has no cap.
pub const MAX_UPDATE_STOCK: i32 = 10_000;

/// Prices are stored as DECIMAL(18, 2).
const PRICE_SCALE: u32 = 2;
const PRICE_INTEGER_DIGITS: u32 = 16;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    #[serde(default)]
    #[schema(max_length = 100)]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "valid_price"))]
    #[serde(default)]
    #[schema(value_type = f64, minimum = 0, multiple_of = 0.01)]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    #[serde(default)]
    #[schema(minimum = 0)]
    pub stock: i32,
}

impl CreateProductRequest {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description.unwrap_or_default(),
            price: self.price,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "not_blank")
    )]
    #[serde(default)]
    #[schema(max_length = 100)]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "valid_price"))]
    #[serde(default)]
    #[schema(value_type = f64, minimum = 0, multiple_of = 0.01)]
    pub price: Decimal,
    #[validate(range(min = 0, max = 10000, message = "Stock must be between 0 and 10000"))]
    #[serde(default)]
    #[schema(minimum = 0, maximum = 10000)]
    pub stock: i32,
}

impl UpdateProductRequest {
    /// Overwrites every mutable field of `product`. An absent description clears it.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.description = self.description.unwrap_or_default();
        product.price = self.price;
        product.stock = self.stock;
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedProduct {
    pub product_id: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Product name is required".into()));
    }
    Ok(())
}

fn valid_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("range")
            .with_message("Price must be a non-negative value".into()));
    }
    if value.normalize().scale() > PRICE_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("Price must have at most 2 decimal places".into()));
    }
    if value.trunc() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return Err(ValidationError::new("precision")
            .with_message("Price must have at most 16 integer digits".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreateProductRequest {
        serde_json::from_value(body).expect("valid create payload")
    }

    fn update(body: serde_json::Value) -> UpdateProductRequest {
        serde_json::from_value(body).expect("valid update payload")
    }

    #[test]
    fn create_accepts_minimal_payload() {
        let req = create(json!({ "name": "Widget", "price": 10.5, "stock": 3 }));
        assert!(req.validate().is_ok());

        let new_product = req.into_new_product();
        assert_eq!(new_product.description, "");
        assert_eq!(new_product.price, Decimal::new(105, 1));
    }

    #[test]
    fn create_rejects_blank_name_and_negative_values() {
        let req = create(json!({ "name": "   ", "price": -1, "stock": -5 }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn name_limit_counts_characters() {
        let ok = create(json!({ "name": "é".repeat(100), "price": 1, "stock": 0 }));
        assert!(ok.validate().is_ok());

        let too_long = create(json!({ "name": "a".repeat(101), "price": 1, "stock": 0 }));
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn zero_price_is_allowed() {
        let req = create(json!({ "name": "Freebie", "price": 0, "stock": 1 }));
        assert!(req.validate().is_ok());
    }

    // Creation has no stock ceiling while update caps it; both are pinned here.
    #[test]
    fn stock_ceiling_applies_to_update_only() {
        let created = create(json!({ "name": "Bulk", "price": 1, "stock": 20000 }));
        assert!(created.validate().is_ok());

        let updated = update(json!({ "name": "Bulk", "price": 1, "stock": 20000 }));
        let errors = updated.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock"));

        let at_cap = update(json!({ "name": "Bulk", "price": 1, "stock": MAX_UPDATE_STOCK }));
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn missing_name_is_reported_as_a_field_error() {
        let req = create(json!({ "price": 1, "stock": 1 }));
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn price_must_fit_two_decimal_places() {
        let ok = create(json!({ "name": "Cent", "price": 10.55, "stock": 1 }));
        assert!(ok.validate().is_ok());

        let fractional = create(json!({ "name": "Fraction", "price": 10.555, "stock": 1 }));
        assert!(fractional.validate().unwrap_err().field_errors().contains_key("price"));
    }

    #[test]
    fn price_must_fit_sixteen_integer_digits() {
        let largest = create(json!({ "name": "Max", "price": 9999999999999999_u64, "stock": 1 }));
        assert!(largest.validate().is_ok());

        let too_big = create(json!({ "name": "Huge", "price": 10000000000000000_u64, "stock": 1 }));
        assert!(too_big.validate().unwrap_err().field_errors().contains_key("price"));
    }
}
