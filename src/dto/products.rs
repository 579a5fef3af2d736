use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{Product, ProductFields};

/// Body of both create and update: an update replaces every field.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct ProductRequest {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "brand must not be blank"))]
    pub brand: String,
    #[validate(custom(function = "not_blank", message = "model must not be blank"))]
    pub model: String,
    #[validate(
        custom(function = "not_blank", message = "specification must not be blank"),
        length(max = 300, message = "specification must be at most 300 characters")
    )]
    pub specification: String,
    #[validate(custom(function = "positive_price", message = "price must be greater than zero"))]
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
}

impl From<ProductRequest> for ProductFields {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            brand: request.brand,
            model: request.model,
            specification: request.specification,
            price: request.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if !value.is_sign_positive() || value.is_zero() {
        return Err(ValidationError::new("non_positive"));
    }
    Ok(())
}
