use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::orders::cutoff;

/// Domain model representing an order in the database.
///
/// The reseller contact data is a snapshot captured at creation time so the
/// shipment manifest needs no join; the directory cascade keeps it in sync
/// for future deliveries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub reseller_id: i32,
    pub reseller_name: String,
    pub reseller_email: String,
    pub reseller_phone: String,
    pub reseller_address: String,
    pub delivery_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn reseller_snapshot(&self) -> ResellerSnapshot {
        ResellerSnapshot {
            id: self.reseller_id,
            name: self.reseller_name.clone(),
            email: self.reseller_email.clone(),
            phone: self.reseller_phone.clone(),
            address: self.reseller_address.clone(),
        }
    }
}

/// Denormalized reseller contact data carried on each order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResellerSnapshot {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Domain model representing a line within an order.
///
/// `unit_price` and `product_name` are snapshots: once a line for a product
/// exists on an order, catalog changes never retroactively affect it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLine {
    pub id: i32,
    pub order_id: Uuid,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Request DTO for one ordered product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineRequest {
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Request DTO for batch order creation: one order per delivery date,
/// all sharing the same line set
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrdersRequest {
    #[validate(length(min = 1, message = "At least one delivery date is required"))]
    pub delivery_dates: Vec<NaiveDate>,
    #[validate(length(min = 1, message = "Order must contain at least one product"))]
    pub lines: Vec<LineRequest>,
}

/// Request DTO for replacing an order's lines.
/// The delivery date is fixed at creation and cannot be changed.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "Order must contain at least one product"))]
    pub lines: Vec<LineRequest>,
}

/// Response DTO for an order line
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        let subtotal = line.unit_price * Decimal::from(line.quantity);
        Self {
            product_id: line.product_id,
            product_name: line.product_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal,
        }
    }
}

/// Response DTO for an order with derived fields.
///
/// `editable` is a fresh cutoff evaluation, never stored; `total` is the sum
/// of the line subtotals. The reseller snapshot is attached only for
/// admin-scoped listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reseller: Option<ResellerSnapshot>,
    pub delivery_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub editable: bool,
    pub total: Decimal,
    pub lines: Vec<OrderLineResponse>,
}

impl OrderResponse {
    /// Assemble a response from the stored order and its lines
    pub fn from_parts(order: Order, lines: Vec<OrderLine>, with_reseller: bool) -> Self {
        let editable = cutoff::is_modifiable(order.delivery_date);
        Self::from_parts_at(order, lines, with_reseller, editable)
    }

    fn from_parts_at(
        order: Order,
        lines: Vec<OrderLine>,
        with_reseller: bool,
        editable: bool,
    ) -> Self {
        let total = lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();

        Self {
            id: order.id,
            reseller: with_reseller.then(|| order.reseller_snapshot()),
            delivery_date: order.delivery_date,
            created_at: order.created_at,
            editable,
            total,
            lines: lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        Order {
            id: Uuid::new_v4(),
            reseller_id: 1,
            reseller_name: "Poli".to_string(),
            reseller_email: "poli@market.it".to_string(),
            reseller_phone: "3475264874".to_string(),
            reseller_address: "via San Giuseppe 35, Spiazzo".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn line(order_id: Uuid, product_id: i32, price: Decimal, quantity: i32) -> OrderLine {
        OrderLine {
            id: product_id,
            order_id,
            product_id,
            product_name: format!("product-{}", product_id),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_total_sums_line_subtotals() {
        let order = sample_order();
        let lines = vec![
            line(order.id, 1, dec!(1.30), 3),
            line(order.id, 2, dec!(2.50), 2),
        ];

        let response = OrderResponse::from_parts_at(order, lines, false, true);

        assert_eq!(response.total, dec!(8.90));
        assert_eq!(response.lines[0].subtotal, dec!(3.90));
        assert_eq!(response.lines[1].subtotal, dec!(5.00));
    }

    #[test]
    fn test_reseller_snapshot_only_when_requested() {
        let order = sample_order();
        let with = OrderResponse::from_parts_at(order.clone(), vec![], true, true);
        let without = OrderResponse::from_parts_at(order, vec![], false, true);

        assert!(with.reseller.is_some());
        assert_eq!(with.reseller.unwrap().name, "Poli");
        assert!(without.reseller.is_none());
    }
}
