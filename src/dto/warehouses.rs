use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::{shelf, warehouse};

/// Body of `POST /api/warehouses` and `PUT /api/warehouses/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    #[validate(length(min = 2, max = 100))]
    #[schema(example = "North DC")]
    pub name: String,
    #[validate(length(max = 200))]
    #[schema(example = "Hamburg, Gate 4")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseShelfDto {
    pub id: i32,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDto {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub shelves: Vec<WarehouseShelfDto>,
}

impl WarehouseDto {
    pub fn from_model(warehouse: warehouse::Model, shelves: Vec<shelf::Model>) -> Self {
        Self {
            id: warehouse.id,
            name: warehouse.name,
            location: warehouse.location,
            shelves: shelves
                .into_iter()
                .map(|shelf| WarehouseShelfDto {
                    id: shelf.id,
                    code: shelf.code,
                })
                .collect(),
        }
    }
}
