// Pure rollup of the statistics window.
//
// The caller passes the orders already filtered to the window (delivery
// date up to the start-of-tomorrow anchor); the three aggregations here are
// independent of each other and of the database.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::orders::models::{Order, OrderLine};
use crate::stats::models::{OrderCountBucket, ProductSales, RevenueBucket, SalesStats};

/// Number of entries each aggregation is limited to.
pub const BUCKET_LIMIT: usize = 6;

/// Compute the sales statistics over one window of orders.
///
/// Best sellers are the top products by summed quantity (name breaks ties
/// deterministically); revenue and order-count buckets are keyed by delivery
/// date, newest first. Each list is limited to [`BUCKET_LIMIT`] entries on
/// its own.
pub fn build_sales_stats(orders: &[(Order, Vec<OrderLine>)]) -> SalesStats {
    let mut quantity_by_product: HashMap<&str, i64> = HashMap::new();
    let mut revenue_by_date: BTreeMap<chrono::NaiveDate, Decimal> = BTreeMap::new();
    let mut count_by_date: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();

    for (order, lines) in orders {
        *count_by_date.entry(order.delivery_date).or_default() += 1;
        for line in lines {
            *quantity_by_product
                .entry(line.product_name.as_str())
                .or_default() += i64::from(line.quantity);
            *revenue_by_date.entry(order.delivery_date).or_default() +=
                line.unit_price * Decimal::from(line.quantity);
        }
    }

    let mut best_sellers: Vec<ProductSales> = quantity_by_product
        .into_iter()
        .map(|(product_name, quantity)| ProductSales {
            product_name: product_name.to_string(),
            quantity,
        })
        .collect();
    best_sellers.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    best_sellers.truncate(BUCKET_LIMIT);

    let revenue_by_date: Vec<RevenueBucket> = revenue_by_date
        .into_iter()
        .rev()
        .take(BUCKET_LIMIT)
        .map(|(delivery_date, revenue)| RevenueBucket {
            delivery_date,
            revenue,
        })
        .collect();

    let orders_by_date: Vec<OrderCountBucket> = count_by_date
        .into_iter()
        .rev()
        .take(BUCKET_LIMIT)
        .map(|(delivery_date, orders)| OrderCountBucket {
            delivery_date,
            orders,
        })
        .collect();

    SalesStats {
        best_sellers,
        revenue_by_date,
        orders_by_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn order(day: u32) -> Order {
        Order {
            id: Uuid::new_v4(),
            reseller_id: 1,
            reseller_name: "Poli".to_string(),
            reseller_email: "poli@market.it".to_string(),
            reseller_phone: "3475264874".to_string(),
            reseller_address: "via Roma 1, Trento".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn line(order_id: Uuid, name: &str, price: Decimal, quantity: i32) -> OrderLine {
        OrderLine {
            id: 0,
            order_id,
            product_id: 0,
            product_name: name.to_string(),
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_best_sellers_sorted_by_quantity_and_capped() {
        let o = order(10);
        let lines: Vec<OrderLine> = (1..=8)
            .map(|i| line(o.id, &format!("product-{}", i), dec!(1.00), i))
            .collect();

        let stats = build_sales_stats(&[(o, lines)]);

        assert_eq!(stats.best_sellers.len(), BUCKET_LIMIT);
        assert_eq!(stats.best_sellers[0].product_name, "product-8");
        assert_eq!(stats.best_sellers[0].quantity, 8);
        // The two smallest sellers fall off the list.
        assert!(stats
            .best_sellers
            .iter()
            .all(|p| p.product_name != "product-1" && p.product_name != "product-2"));
    }

    #[test]
    fn test_best_sellers_sum_across_orders() {
        let a = order(10);
        let b = order(11);
        let stats = build_sales_stats(&[
            (a.clone(), vec![line(a.id, "Bread", dec!(1.30), 3)]),
            (b.clone(), vec![line(b.id, "Bread", dec!(1.30), 2)]),
        ]);

        assert_eq!(stats.best_sellers.len(), 1);
        assert_eq!(stats.best_sellers[0].quantity, 5);
    }

    #[test]
    fn test_revenue_buckets_newest_first() {
        let a = order(10);
        let b = order(12);
        let stats = build_sales_stats(&[
            (a.clone(), vec![line(a.id, "Bread", dec!(1.30), 2)]),
            (
                b.clone(),
                vec![
                    line(b.id, "Bread", dec!(1.30), 1),
                    line(b.id, "Mantovana", dec!(2.50), 2),
                ],
            ),
        ]);

        assert_eq!(stats.revenue_by_date.len(), 2);
        assert_eq!(
            stats.revenue_by_date[0].delivery_date,
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()
        );
        assert_eq!(stats.revenue_by_date[0].revenue, dec!(6.30));
        assert_eq!(stats.revenue_by_date[1].revenue, dec!(2.60));
    }

    #[test]
    fn test_order_counts_per_date_capped_at_limit() {
        let orders: Vec<(Order, Vec<OrderLine>)> = (1..=9)
            .map(|day| {
                let o = order(day);
                let l = vec![line(o.id, "Bread", dec!(1.30), 1)];
                (o, l)
            })
            .collect();

        let stats = build_sales_stats(&orders);

        assert_eq!(stats.orders_by_date.len(), BUCKET_LIMIT);
        // Newest date first, oldest three dropped.
        assert_eq!(
            stats.orders_by_date[0].delivery_date,
            NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
        );
        assert_eq!(
            stats.orders_by_date[BUCKET_LIMIT - 1].delivery_date,
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
        );
        assert!(stats.orders_by_date.iter().all(|b| b.orders == 1));
    }

    #[test]
    fn test_empty_window_yields_empty_stats() {
        let stats = build_sales_stats(&[]);
        assert!(stats.best_sellers.is_empty());
        assert!(stats.revenue_by_date.is_empty());
        assert!(stats.orders_by_date.is_empty());
    }
}
