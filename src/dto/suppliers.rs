use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_phone_number;
use crate::entities::{item, supplier};

/// Body of `POST /api/suppliers` and `PUT /api/suppliers/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRequest {
    #[validate(length(min = 2, max = 100))]
    #[schema(example = "Acme Components")]
    pub name: String,
    #[validate(length(max = 100))]
    pub contact_name: Option<String>,
    #[validate(email, length(max = 100))]
    #[schema(example = "orders@acme.example")]
    pub email: String,
    #[validate(length(max = 20), custom = "validate_phone_number")]
    pub phone_number: Option<String>,
}

/// Item as listed under its supplier
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierItemDto {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDto {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub items: Vec<SupplierItemDto>,
}

impl SupplierDto {
    pub fn from_model(supplier: supplier::Model, items: Vec<item::Model>) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            contact_name: supplier.contact_name,
            email: supplier.email,
            phone_number: supplier.phone_number,
            items: items
                .into_iter()
                .map(|item| SupplierItemDto {
                    id: item.id,
                    name: item.name,
                    price: item.price,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, phone: Option<&str>) -> SupplierRequest {
        SupplierRequest {
            name: name.into(),
            contact_name: None,
            email: email.into(),
            phone_number: phone.map(Into::into),
        }
    }

    #[test]
    fn accepts_a_complete_supplier() {
        assert!(request("Acme", "sales@acme.example", Some("+44 20 7946 0958"))
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        assert!(request("A", "sales@acme.example", None).validate().is_err());
        assert!(request("Acme", "not-an-email", None).validate().is_err());
        assert!(request("Acme", "sales@acme.example", Some("ext. 12#"))
            .validate()
            .is_err());
        assert!(request("Acme", "sales@acme.example", Some(&"1".repeat(21)))
            .validate()
            .is_err());
    }

    #[test]
    fn serializes_camel_case_with_numeric_price() {
        let dto = SupplierDto {
            id: 1,
            name: "Acme".into(),
            contact_name: Some("Wile".into()),
            email: "sales@acme.example".into(),
            phone_number: None,
            items: vec![SupplierItemDto {
                id: 4,
                name: "Anvil".into(),
                price: Decimal::new(1250, 2),
            }],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["contactName"], "Wile");
        assert_eq!(json["items"][0]["price"], 12.5);
    }
}
