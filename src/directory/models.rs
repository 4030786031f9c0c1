use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One entry of a reseller's personalized price list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogEntry {
    pub product_id: i32,
    pub price: Decimal,
}

/// Reseller account with its personalized catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reseller {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub catalog: Vec<CatalogEntry>,
}

/// Ingredient of a product, quantity per single unit produced
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// Product with its recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// Request DTO for updating a reseller's contact data.
///
/// The update propagates into the snapshot of all future orders as part of
/// the same operation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResellerRequest {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Phone must be at least 6 digits"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
}
