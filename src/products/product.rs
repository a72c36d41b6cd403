use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::ProductQueryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Product {
    #[serde(rename = "product_name")]
    #[schemars(description = "Product name")]
    pub name: String,
    #[serde(rename = "product_details")]
    #[schemars(description = "Product details")]
    pub details: String,
    // USD; negative prices are accepted as-is
    #[schemars(description = "Price in USD")]
    pub price: f64,
}

impl Product {
    pub fn new(name: &str, details: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            details: details.to_string(),
            price,
        }
    }
}

/// Products extracted from a single model reply, in the order the model gave them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductList {
    #[schemars(description = "Products matching the query")]
    pub products: Vec<Product>,
}

impl ProductList {
    /// Strictly parse raw model output. Anything other than a bare
    /// `{"products": [...]}` object is rejected as a whole.
    pub fn parse(raw: &str) -> Result<Self, ProductQueryError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Sample reply embedded in the prompt so the model can copy its shape.
    pub fn example() -> Self {
        Self {
            products: vec![
                Product::new(
                    "Galaxy S24 Ultra",
                    "Latest flagship smartphone with advanced camera features.",
                    1199.99,
                ),
                Product::new(
                    "Galaxy A54",
                    "Mid-range Android smartphone with a large display and quad-camera setup.",
                    499.99,
                ),
            ],
        }
    }

    /// JSON Schema of the wire format, suitable for Ollama's `format` parameter.
    pub fn json_schema() -> serde_json::Value {
        schema_for!(ProductList).to_value()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The trailing `limit` products, in list order.
    pub fn last(&self, limit: usize) -> &[Product] {
        let start = self.products.len().saturating_sub(limit);
        &self.products[start..]
    }
}
