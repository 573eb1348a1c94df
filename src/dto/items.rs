use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_non_negative_price;
use crate::entities::{item, supplier};

/// Body of `POST /api/items` and `PUT /api/items/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[validate(length(min = 2, max = 100))]
    #[schema(example = "Pallet jack")]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(required, custom = "validate_non_negative_price")]
    #[schema(value_type = f64, example = 349.99)]
    pub price: Option<Decimal>,
    #[validate(required)]
    pub supplier_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSupplierDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub supplier_id: i32,
    pub supplier: Option<ItemSupplierDto>,
}

impl ItemDto {
    pub fn from_model(item: item::Model, supplier: Option<supplier::Model>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            supplier_id: item.supplier_id,
            supplier: supplier.map(|s| ItemSupplierDto {
                id: s.id,
                name: s.name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_supplier_are_required() {
        let req: ItemRequest = serde_json::from_value(serde_json::json!({
            "name": "Crate"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("supplier_id"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let req: ItemRequest = serde_json::from_value(serde_json::json!({
            "name": "Crate",
            "price": -1.5,
            "supplierId": 1
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn free_item_is_valid() {
        let req: ItemRequest = serde_json::from_value(serde_json::json!({
            "name": "Sample",
            "description": "Promotional",
            "price": 0,
            "supplierId": 3
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.price, Some(Decimal::ZERO));
    }
}
