use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::models::{AuthenticatedAccount, Role};
use crate::orders::cutoff;
use crate::orders::models::OrderLine;
use crate::orders::repository::{OrderStore, OrdersRepository};
use crate::stats::error::StatsError;
use crate::stats::models::SalesStats;
use crate::stats::rollup;

/// Service producing the administrator sales statistics
#[derive(Clone)]
pub struct StatsService {
    orders_repo: OrdersRepository,
}

impl StatsService {
    pub fn new(orders_repo: OrdersRepository) -> Self {
        Self { orders_repo }
    }

    /// Sales statistics over the window anchored at the start of tomorrow,
    /// looking backward. Administrator only.
    pub async fn sales_stats(
        &self,
        account: &AuthenticatedAccount,
    ) -> Result<SalesStats, StatsError> {
        if account.role != Role::Admin {
            return Err(StatsError::RoleNotAllowed(account.role));
        }

        let anchor = cutoff::start_of_tomorrow();
        let orders = self.orders_repo.find_due_up_to(anchor).await?;

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
        for line in self.orders_repo.find_lines_for(&order_ids).await? {
            lines_by_order.entry(line.order_id).or_default().push(line);
        }

        let window: Vec<_> = orders
            .into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                (order, lines)
            })
            .collect();

        Ok(rollup::build_sales_stats(&window))
    }
}
