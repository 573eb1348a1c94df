use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::repositories::stock_repository::StockDetails;

/// Body of `POST /api/stocks`. Posting a pair that already has a row adds
/// to its quantity.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockRequest {
    #[validate(required)]
    pub item_id: Option<i32>,
    #[validate(required)]
    pub shelf_id: Option<i32>,
    #[validate(required, range(min = 1))]
    #[schema(minimum = 1, example = 12)]
    pub quantity: Option<i32>,
}

/// Body of `PUT /api/stocks/{id}/quantity`; replaces the quantity
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockQuantityRequest {
    #[validate(required, range(min = 0))]
    #[schema(minimum = 0)]
    pub quantity: Option<i32>,
}

/// Query of `GET /api/stocks`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StockQuery {
    pub shelf_id: Option<i32>,
    pub item_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItemDto {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockShelfDto {
    pub id: i32,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockDto {
    pub id: i32,
    pub item_id: i32,
    pub item: Option<StockItemDto>,
    pub shelf_id: i32,
    pub shelf: Option<StockShelfDto>,
    pub quantity: i32,
    pub last_updated: DateTime<Utc>,
}

impl From<StockDetails> for StockDto {
    fn from(details: StockDetails) -> Self {
        let StockDetails { stock, item, shelf } = details;
        Self {
            id: stock.id,
            item_id: stock.item_id,
            item: item.map(|i| StockItemDto {
                id: i.id,
                name: i.name,
                price: i.price,
            }),
            shelf_id: stock.shelf_id,
            shelf: shelf.map(|s| StockShelfDto {
                id: s.id,
                code: s.code,
            }),
            quantity: stock.quantity,
            last_updated: stock.last_updated,
        }
    }
}
