use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::models::{AuthenticatedAccount, Role};
use crate::directory::{ProductCatalog, ProductLookup};
use crate::orders::cutoff;
use crate::orders::models::{Order, OrderLine};
use crate::orders::repository::{OrderStore, OrdersRepository};
use crate::reports::aggregate;
use crate::reports::error::ReportError;
use crate::reports::models::{Manifest, ProductionLine};

/// Service producing the daily shipment and production views
#[derive(Clone)]
pub struct ReportService {
    orders_repo: OrdersRepository,
    products: ProductCatalog,
}

impl ReportService {
    pub fn new(orders_repo: OrdersRepository, products: ProductCatalog) -> Self {
        Self {
            orders_repo,
            products,
        }
    }

    /// Today's per-reseller shipment manifests. Readable by the
    /// administrator and the shipper.
    pub async fn daily_shipments(
        &self,
        account: &AuthenticatedAccount,
    ) -> Result<Vec<Manifest>, ReportError> {
        match account.role {
            Role::Admin | Role::Shipper => {}
            role => return Err(ReportError::RoleNotAllowed(role)),
        }

        let orders = self.todays_orders().await?;
        Ok(aggregate::build_manifests(&orders))
    }

    /// Today's production requirements with scaled ingredients. Readable by
    /// the administrator and the baker.
    pub async fn daily_production(
        &self,
        account: &AuthenticatedAccount,
    ) -> Result<Vec<ProductionLine>, ReportError> {
        match account.role {
            Role::Admin | Role::Baker => {}
            role => return Err(ReportError::RoleNotAllowed(role)),
        }

        let orders = self.todays_orders().await?;

        let product_ids: Vec<i32> = {
            let mut ids: Vec<i32> = orders
                .iter()
                .flat_map(|(_, lines)| lines.iter().map(|l| l.product_id))
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let products = self.products.find_by_ids(&product_ids).await?;

        Ok(aggregate::build_production(&orders, &products))
    }

    /// Orders due on today's Rome calendar date, paired with their lines
    async fn todays_orders(&self) -> Result<Vec<(Order, Vec<OrderLine>)>, ReportError> {
        let orders = self
            .orders_repo
            .find_by_delivery_date(cutoff::today())
            .await?;

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
        for line in self.orders_repo.find_lines_for(&order_ids).await? {
            lines_by_order.entry(line.order_id).or_default().push(line);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                (order, lines)
            })
            .collect())
    }
}
