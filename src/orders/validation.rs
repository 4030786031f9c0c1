// Pure validation rules applied to order creation and update requests.
//
// Each function returns the first offending value, so callers can fail fast
// with a distinct error per rule. All checks operate on immutable slices;
// nothing here touches the database.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::directory::models::CatalogEntry;
use crate::orders::cutoff;
use crate::orders::models::{LineRequest, OrderLine};

/// A request line resolved against the reseller's catalog: personalized
/// price and product-name snapshot filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// First product id that appears more than once in the request, if any
pub fn find_duplicate_product(lines: &[LineRequest]) -> Option<i32> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .find(|l| !seen.insert(l.product_id))
        .map(|l| l.product_id)
}

/// First line with a non-positive quantity, if any
pub fn find_invalid_quantity(lines: &[LineRequest]) -> Option<i32> {
    lines.iter().find(|l| l.quantity <= 0).map(|l| l.quantity)
}

/// First delivery date that appears more than once in the request, if any
pub fn find_duplicate_date(dates: &[NaiveDate]) -> Option<NaiveDate> {
    let mut seen = HashSet::new();
    dates.iter().find(|d| !seen.insert(**d)).copied()
}

/// First requested date for which the reseller already has an order, if any.
/// Comparison is by calendar date; `existing` holds the reseller's stored
/// delivery dates.
pub fn find_conflicting_date(requested: &[NaiveDate], existing: &[NaiveDate]) -> Option<NaiveDate> {
    let taken: HashSet<NaiveDate> = existing.iter().copied().collect();
    requested.iter().find(|d| taken.contains(d)).copied()
}

/// First requested date already past its cutoff at instant `now`, if any
pub fn find_locked_date(requested: &[NaiveDate], now: DateTime<Tz>) -> Option<NaiveDate> {
    requested
        .iter()
        .find(|d| !cutoff::is_modifiable_at(**d, now))
        .copied()
}

/// Resolve request lines against the reseller's catalog.
///
/// Every line takes the personalized catalog price and the current product
/// name. Returns the first product id that is not orderable (absent from
/// the catalog or from the product collection).
pub fn resolve_lines(
    lines: &[LineRequest],
    catalog: &[CatalogEntry],
    product_names: &HashMap<i32, String>,
) -> Result<Vec<ResolvedLine>, i32> {
    let prices: HashMap<i32, Decimal> =
        catalog.iter().map(|c| (c.product_id, c.price)).collect();

    lines
        .iter()
        .map(|line| {
            let unit_price = prices.get(&line.product_id).ok_or(line.product_id)?;
            let product_name = product_names.get(&line.product_id).ok_or(line.product_id)?;
            Ok(ResolvedLine {
                product_id: line.product_id,
                product_name: product_name.clone(),
                unit_price: *unit_price,
                quantity: line.quantity,
            })
        })
        .collect()
}

/// Resolve request lines for an order update.
///
/// Lines whose product already exists on the order keep their original
/// `unit_price` and name snapshot; new products take the current catalog
/// price. Returns the first new product id that is not orderable.
pub fn merge_lines(
    lines: &[LineRequest],
    existing: &[OrderLine],
    catalog: &[CatalogEntry],
    product_names: &HashMap<i32, String>,
) -> Result<Vec<ResolvedLine>, i32> {
    let kept: HashMap<i32, &OrderLine> =
        existing.iter().map(|l| (l.product_id, l)).collect();
    let prices: HashMap<i32, Decimal> =
        catalog.iter().map(|c| (c.product_id, c.price)).collect();

    lines
        .iter()
        .map(|line| {
            if let Some(stored) = kept.get(&line.product_id) {
                return Ok(ResolvedLine {
                    product_id: line.product_id,
                    product_name: stored.product_name.clone(),
                    unit_price: stored.unit_price,
                    quantity: line.quantity,
                });
            }
            let unit_price = prices.get(&line.product_id).ok_or(line.product_id)?;
            let product_name = product_names.get(&line.product_id).ok_or(line.product_id)?;
            Ok(ResolvedLine {
                product_id: line.product_id,
                product_name: product_name.clone(),
                unit_price: *unit_price,
                quantity: line.quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Rome;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(product_id: i32, quantity: i32) -> LineRequest {
        LineRequest {
            product_id,
            quantity,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry {
                product_id: 1,
                price: dec!(1.30),
            },
            CatalogEntry {
                product_id: 2,
                price: dec!(2.50),
            },
        ]
    }

    fn names() -> HashMap<i32, String> {
        HashMap::from([(1, "Bread".to_string()), (2, "Mantovana".to_string())])
    }

    #[test]
    fn test_duplicate_product_is_reported() {
        let lines = vec![line(1, 2), line(2, 1), line(1, 4)];
        assert_eq!(find_duplicate_product(&lines), Some(1));
        assert_eq!(find_duplicate_product(&lines[..2]), None);
    }

    #[test]
    fn test_duplicate_date_is_reported() {
        let dates = vec![date(12), date(13), date(12)];
        assert_eq!(find_duplicate_date(&dates), Some(date(12)));
        assert_eq!(find_duplicate_date(&dates[..2]), None);
    }

    #[test]
    fn test_conflicting_date_is_reported() {
        let existing = vec![date(11), date(13)];
        assert_eq!(
            find_conflicting_date(&[date(12), date(13)], &existing),
            Some(date(13))
        );
        assert_eq!(find_conflicting_date(&[date(12)], &existing), None);
    }

    #[test]
    fn test_locked_date_is_reported() {
        let now = Rome.with_ymd_and_hms(2024, 5, 10, 20, 30, 0).unwrap();
        // Tomorrow is locked after 20:00; two days out is not.
        assert_eq!(find_locked_date(&[date(12), date(11)], now), Some(date(11)));
        assert_eq!(find_locked_date(&[date(12)], now), None);
    }

    #[test]
    fn test_resolve_lines_applies_catalog_prices() {
        let resolved = resolve_lines(&[line(1, 3), line(2, 1)], &catalog(), &names()).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].unit_price, dec!(1.30));
        assert_eq!(resolved[0].product_name, "Bread");
        assert_eq!(resolved[1].unit_price, dec!(2.50));
    }

    #[test]
    fn test_resolve_lines_rejects_unorderable_product() {
        let result = resolve_lines(&[line(1, 3), line(9, 1)], &catalog(), &names());
        assert_eq!(result, Err(9));
    }

    #[test]
    fn test_merge_preserves_price_of_existing_line() {
        let order_id = Uuid::new_v4();
        let existing = vec![OrderLine {
            id: 1,
            order_id,
            product_id: 1,
            product_name: "Bread".to_string(),
            unit_price: dec!(0.90), // older price, catalog now says 1.30
            quantity: 2,
        }];

        let resolved =
            merge_lines(&[line(1, 5), line(2, 1)], &existing, &catalog(), &names()).unwrap();

        // Product 1 keeps its original snapshot price, product 2 takes the
        // current catalog price.
        assert_eq!(resolved[0].unit_price, dec!(0.90));
        assert_eq!(resolved[0].quantity, 5);
        assert_eq!(resolved[1].unit_price, dec!(2.50));
    }

    #[test]
    fn test_merge_rejects_unorderable_new_product() {
        let result = merge_lines(&[line(9, 1)], &[], &catalog(), &names());
        assert_eq!(result, Err(9));
    }
}
