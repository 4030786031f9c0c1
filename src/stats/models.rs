use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Total quantity sold of one product over the statistics window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductSales {
    pub product_name: String,
    pub quantity: i64,
}

/// Revenue attributed to one delivery date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevenueBucket {
    pub delivery_date: NaiveDate,
    pub revenue: Decimal,
}

/// Number of orders due on one delivery date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderCountBucket {
    pub delivery_date: NaiveDate,
    pub orders: i64,
}

/// Sales statistics response: three independent aggregations over the same
/// order window, each sorted and limited on its own
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesStats {
    pub best_sellers: Vec<ProductSales>,
    pub revenue_by_date: Vec<RevenueBucket>,
    pub orders_by_date: Vec<OrderCountBucket>,
}
