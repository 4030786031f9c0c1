use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// One product/quantity pair to ship
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManifestLine {
    pub product_name: String,
    pub quantity: i32,
}

/// Per-reseller shipment manifest for the current day.
///
/// One entry per reseller; if a reseller has several orders due today,
/// their line sets are concatenated into the same entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Manifest {
    pub reseller_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub lines: Vec<ManifestLine>,
}

/// Ingredient quantity required for the day's total production of a product
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientRequirement {
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
}

/// Total quantity of one product to produce today, with its scaled
/// ingredient requirements
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductionLine {
    pub product_name: String,
    pub quantity: i32,
    pub ingredients: Vec<IngredientRequirement>,
}
