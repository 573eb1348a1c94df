use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::repositories::shelf_repository::ShelfDetails;

/// Shown for stock rows whose item no longer resolves
const MISSING_ITEM_NAME: &str = "N/A";

/// Body of `POST /api/shelves`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShelfRequest {
    #[validate(length(min = 1, max = 20))]
    #[schema(example = "A-01")]
    pub code: String,
    #[validate(required)]
    pub warehouse_id: Option<i32>,
}

/// Body of `PUT /api/shelves/{id}`; a shelf never changes warehouse
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShelfRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
}

/// Query of `GET /api/shelves`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShelfQuery {
    /// Only shelves of this warehouse
    pub warehouse_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelfWarehouseDto {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelfStockDto {
    pub id: i32,
    pub item_id: i32,
    pub item_name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShelfDto {
    pub id: i32,
    pub code: String,
    pub warehouse_id: i32,
    pub warehouse: Option<ShelfWarehouseDto>,
    pub stocks: Vec<ShelfStockDto>,
}

impl From<ShelfDetails> for ShelfDto {
    fn from(details: ShelfDetails) -> Self {
        let ShelfDetails {
            shelf,
            warehouse,
            stocks,
        } = details;

        Self {
            id: shelf.id,
            code: shelf.code,
            warehouse_id: shelf.warehouse_id,
            warehouse: warehouse.map(|w| ShelfWarehouseDto {
                id: w.id,
                name: w.name,
                location: w.location,
            }),
            stocks: stocks
                .into_iter()
                .map(|(stock, item)| ShelfStockDto {
                    id: stock.id,
                    item_id: stock.item_id,
                    item_name: item
                        .map(|i| i.name)
                        .unwrap_or_else(|| MISSING_ITEM_NAME.to_string()),
                    quantity: stock.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{item, shelf, stock};
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn stock_without_item_shows_placeholder_name() {
        let now = Utc::now();
        let details = ShelfDetails {
            shelf: shelf::Model {
                id: 2,
                code: "B-07".into(),
                warehouse_id: 1,
            },
            warehouse: None,
            stocks: vec![
                (
                    stock::Model {
                        id: 10,
                        item_id: 5,
                        shelf_id: 2,
                        quantity: 3,
                        last_updated: now,
                    },
                    Some(item::Model {
                        id: 5,
                        name: "Bolt".into(),
                        description: None,
                        price: Decimal::ONE,
                        supplier_id: 1,
                    }),
                ),
                (
                    stock::Model {
                        id: 11,
                        item_id: 6,
                        shelf_id: 2,
                        quantity: 1,
                        last_updated: now,
                    },
                    None,
                ),
            ],
        };

        let dto = ShelfDto::from(details);
        assert_eq!(dto.stocks[0].item_name, "Bolt");
        assert_eq!(dto.stocks[1].item_name, "N/A");
        assert!(dto.warehouse.is_none());
    }

    #[test]
    fn empty_code_is_rejected() {
        let req = UpdateShelfRequest { code: String::new() };
        assert!(req.validate().is_err());
        let req = UpdateShelfRequest {
            code: "X".repeat(21),
        };
        assert!(req.validate().is_err());
    }
}
