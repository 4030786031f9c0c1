// Pure aggregation over the day's order set.
//
// Both views receive the qualifying orders (already filtered to today's
// calendar date) with their lines, so they can be tested without a database.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::directory::models::Product;
use crate::orders::models::{Order, OrderLine};
use crate::reports::models::{IngredientRequirement, Manifest, ManifestLine, ProductionLine};

/// Group today's orders strictly by reseller, concatenating the line sets
/// of all of a reseller's qualifying orders into one manifest entry.
/// Entries come out ordered by reseller id.
pub fn build_manifests(orders: &[(Order, Vec<OrderLine>)]) -> Vec<Manifest> {
    let mut by_reseller: BTreeMap<i32, Manifest> = BTreeMap::new();

    for (order, lines) in orders {
        let entry = by_reseller
            .entry(order.reseller_id)
            .or_insert_with(|| Manifest {
                reseller_id: order.reseller_id,
                name: order.reseller_name.clone(),
                email: order.reseller_email.clone(),
                phone: order.reseller_phone.clone(),
                address: order.reseller_address.clone(),
                lines: Vec::new(),
            });

        entry.lines.extend(lines.iter().map(|l| ManifestLine {
            product_name: l.product_name.clone(),
            quantity: l.quantity,
        }));
    }

    by_reseller.into_values().collect()
}

/// Compute the day's production requirements.
///
/// Quantities are accumulated into per-product-name buckets first; the
/// ingredient list is snapshotted when a product is first seen and its
/// per-unit quantities are scaled by the final accumulated quantity exactly
/// once, at the end. Scaling during accumulation would multiply the
/// ingredients again on every further order of the same product.
/// Entries come out ordered by product name.
pub fn build_production(
    orders: &[(Order, Vec<OrderLine>)],
    products: &HashMap<i32, Product>,
) -> Vec<ProductionLine> {
    struct Bucket {
        quantity: i32,
        per_unit: Vec<(String, Decimal, String)>,
    }

    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for (_, lines) in orders {
        for line in lines {
            let bucket = buckets
                .entry(line.product_name.clone())
                .or_insert_with(|| Bucket {
                    quantity: 0,
                    per_unit: products
                        .get(&line.product_id)
                        .map(|p| {
                            p.ingredients
                                .iter()
                                .map(|i| (i.name.clone(), i.quantity, i.unit.clone()))
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            bucket.quantity += line.quantity;
        }
    }

    buckets
        .into_iter()
        .map(|(product_name, bucket)| {
            let scale = Decimal::from(bucket.quantity);
            ProductionLine {
                product_name,
                quantity: bucket.quantity,
                ingredients: bucket
                    .per_unit
                    .into_iter()
                    .map(|(name, per_unit, unit)| IngredientRequirement {
                        name,
                        quantity: per_unit * scale,
                        unit,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::models::Ingredient;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn order(reseller_id: i32, name: &str) -> Order {
        Order {
            id: Uuid::new_v4(),
            reseller_id,
            reseller_name: name.to_string(),
            reseller_email: format!("{}@market.it", name.to_lowercase()),
            reseller_phone: "3475264874".to_string(),
            reseller_address: "via Roma 1, Trento".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn line(order_id: Uuid, product_id: i32, product_name: &str, quantity: i32) -> OrderLine {
        OrderLine {
            id: product_id,
            order_id,
            product_id,
            product_name: product_name.to_string(),
            unit_price: dec!(1.30),
            quantity,
        }
    }

    fn bread() -> Product {
        Product {
            id: 1,
            name: "Bread".to_string(),
            ingredients: vec![Ingredient {
                name: "flour".to_string(),
                quantity: dec!(100),
                unit: "g".to_string(),
            }],
        }
    }

    #[test]
    fn test_manifests_group_by_reseller_and_concatenate_lines() {
        let first = order(1, "Poli");
        let second = order(1, "Poli");
        let other = order(2, "Orvea");

        let orders = vec![
            (first.clone(), vec![line(first.id, 1, "Bread", 3)]),
            (
                second.clone(),
                vec![line(second.id, 2, "Mantovana", 2), line(second.id, 1, "Bread", 1)],
            ),
            (other.clone(), vec![line(other.id, 1, "Bread", 4)]),
        ];

        let manifests = build_manifests(&orders);

        assert_eq!(manifests.len(), 2);
        // Reseller 1 gets one entry with the lines of both orders, in order.
        assert_eq!(manifests[0].reseller_id, 1);
        assert_eq!(manifests[0].name, "Poli");
        assert_eq!(manifests[0].lines.len(), 3);
        assert_eq!(manifests[0].lines[0].product_name, "Bread");
        assert_eq!(manifests[0].lines[1].product_name, "Mantovana");
        assert_eq!(manifests[1].reseller_id, 2);
        assert_eq!(manifests[1].lines.len(), 1);
    }

    #[test]
    fn test_manifest_carries_contact_snapshot() {
        let o = order(5, "Poli");
        let manifests = build_manifests(&[(o.clone(), vec![line(o.id, 1, "Bread", 1)])]);

        assert_eq!(manifests[0].email, "poli@market.it");
        assert_eq!(manifests[0].phone, "3475264874");
        assert_eq!(manifests[0].address, "via Roma 1, Trento");
    }

    #[test]
    fn test_production_scales_ingredients_once_after_summing() {
        // Two orders for Bread (3 + 2), flour 100g per unit: expect exactly
        // one Bread entry with quantity 5 and 500g of flour.
        let a = order(1, "Poli");
        let b = order(2, "Orvea");
        let orders = vec![
            (a.clone(), vec![line(a.id, 1, "Bread", 3)]),
            (b.clone(), vec![line(b.id, 1, "Bread", 2)]),
        ];
        let products = HashMap::from([(1, bread())]);

        let production = build_production(&orders, &products);

        assert_eq!(production.len(), 1);
        assert_eq!(production[0].product_name, "Bread");
        assert_eq!(production[0].quantity, 5);
        assert_eq!(production[0].ingredients.len(), 1);
        assert_eq!(production[0].ingredients[0].name, "flour");
        assert_eq!(production[0].ingredients[0].quantity, dec!(500));
        assert_eq!(production[0].ingredients[0].unit, "g");
    }

    #[test]
    fn test_production_sums_across_lines_of_one_order() {
        let a = order(1, "Poli");
        let orders = vec![(
            a.clone(),
            vec![line(a.id, 1, "Bread", 2), line(a.id, 2, "Mantovana", 3)],
        )];
        let products = HashMap::from([
            (1, bread()),
            (
                2,
                Product {
                    id: 2,
                    name: "Mantovana".to_string(),
                    ingredients: vec![
                        Ingredient {
                            name: "flour".to_string(),
                            quantity: dec!(200),
                            unit: "g".to_string(),
                        },
                        Ingredient {
                            name: "butter".to_string(),
                            quantity: dec!(50),
                            unit: "g".to_string(),
                        },
                    ],
                },
            ),
        ]);

        let production = build_production(&orders, &products);

        assert_eq!(production.len(), 2);
        // Sorted by product name.
        assert_eq!(production[0].product_name, "Bread");
        assert_eq!(production[0].ingredients[0].quantity, dec!(200));
        assert_eq!(production[1].product_name, "Mantovana");
        assert_eq!(production[1].ingredients[0].quantity, dec!(600));
        assert_eq!(production[1].ingredients[1].quantity, dec!(150));
    }

    #[test]
    fn test_production_with_unknown_recipe_has_no_ingredients() {
        let a = order(1, "Poli");
        let orders = vec![(a.clone(), vec![line(a.id, 9, "Krapfen", 2)])];

        let production = build_production(&orders, &HashMap::new());

        assert_eq!(production.len(), 1);
        assert_eq!(production[0].quantity, 2);
        assert!(production[0].ingredients.is_empty());
    }

    #[test]
    fn test_empty_day_produces_empty_views() {
        assert!(build_manifests(&[]).is_empty());
        assert!(build_production(&[], &HashMap::new()).is_empty());
    }
}
