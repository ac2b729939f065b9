//! Product model and related payloads

use serde::{Deserialize, Serialize};

use super::Category;
use crate::validation::{ProductErrors, ProductInput, validate_product};

/// Product entity as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "productName", alias = "name")]
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// Product create/update payload
///
/// Only obtainable from a [`ProductInput`] that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(rename = "productName")]
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: String,
}

impl TryFrom<ProductInput> for ProductDraft {
    type Error = ProductErrors;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        let errors = validate_product(&input);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Validation guarantees both are present
        let (Some(price), Some(quantity)) = (input.price, input.quantity) else {
            return Err(errors);
        };

        Ok(Self {
            product_name: input.name.trim().to_string(),
            price,
            quantity,
            description: input.description.filter(|d| !d.is_empty()),
            category_id: input.category_id.trim().to_string(),
        })
    }
}

/// One page of the product listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub content: Vec<Product>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based index of this page
    pub number: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ProductField;

    fn laptop() -> ProductInput {
        ProductInput {
            name: "Laptop Dell".to_string(),
            price: Some(150000.0),
            quantity: Some(20),
            description: None,
            category_id: "1".to_string(),
        }
    }

    #[test]
    fn test_draft_from_valid_input() {
        let draft = ProductDraft::try_from(laptop()).unwrap();
        let body = serde_json::to_value(&draft).unwrap();

        assert_eq!(body["productName"], "Laptop Dell");
        assert_eq!(body["price"], 150000.0);
        assert_eq!(body["quantity"], 20);
        assert_eq!(body["category_id"], "1");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_draft_rejects_invalid_input() {
        let mut input = laptop();
        input.price = Some(0.0);
        input.category_id = String::new();

        let errors = ProductDraft::try_from(input).unwrap_err();
        assert!(errors.contains_key(&ProductField::Price));
        assert!(errors.contains_key(&ProductField::Category));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_product_page_wire_format() {
        let page: ProductPage = serde_json::from_value(serde_json::json!({
            "content": [{
                "id": 3,
                "productName": "Laptop Dell",
                "price": 150000,
                "quantity": 20,
                "category": {"id": 1, "name": "Laptop"}
            }],
            "totalElements": 11,
            "totalPages": 2,
            "number": 0,
            "size": 10
        }))
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].product_name, "Laptop Dell");
        assert_eq!(page.content[0].description, None);
        assert_eq!(page.total_elements, 11);
        assert_eq!(page.total_pages, 2);
    }
}
