use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::models::{AuthenticatedAccount, Role};
use crate::directory::{ProductCatalog, ProductLookup, ResellerDirectory, ResellerLookup};
use crate::orders::cutoff;
use crate::orders::error::OrderError;
use crate::orders::models::{
    CreateOrdersRequest, LineRequest, OrderResponse, ResellerSnapshot, UpdateOrderRequest,
};
use crate::orders::repository::{OrderStore, OrdersRepository};
use crate::orders::validation;

/// Service for the order lifecycle: cutoff-gated creation, role-scoped
/// listing, line updates and deletion.
///
/// Generic over the persistence and lookup seams; the application wires the
/// PostgreSQL implementations, the tests an in-memory store.
#[derive(Clone)]
pub struct OrderService<S = OrdersRepository, D = ResellerDirectory, P = ProductCatalog> {
    orders_repo: S,
    directory: D,
    products: P,
}

impl<S, D, P> OrderService<S, D, P>
where
    S: OrderStore,
    D: ResellerLookup,
    P: ProductLookup,
{
    pub fn new(orders_repo: S, directory: D, products: P) -> Self {
        Self {
            orders_repo,
            directory,
            products,
        }
    }

    /// Create one order per requested delivery date, all sharing one
    /// validated line set.
    ///
    /// Checks run fail-fast in a fixed sequence, each with a distinct
    /// error: empty lines, duplicate product, duplicate date, date conflict
    /// with an existing order, cutoff violation, product not in the
    /// reseller's catalog. No write happens before every check has passed.
    ///
    /// Each date is persisted in its own transaction; if one insert fails,
    /// the already-persisted dates stay and the error reports exactly which
    /// ones they were.
    pub async fn create_orders(
        &self,
        account: &AuthenticatedAccount,
        request: CreateOrdersRequest,
    ) -> Result<Vec<OrderResponse>, OrderError> {
        if account.role != Role::Reseller {
            return Err(OrderError::RoleNotAllowed(account.role));
        }

        if request.lines.is_empty() {
            return Err(OrderError::EmptyLines);
        }
        if let Some(q) = validation::find_invalid_quantity(&request.lines) {
            return Err(OrderError::InvalidQuantity(q));
        }
        if let Some(product_id) = validation::find_duplicate_product(&request.lines) {
            return Err(OrderError::DuplicateProduct(product_id));
        }
        if let Some(date) = validation::find_duplicate_date(&request.delivery_dates) {
            return Err(OrderError::DuplicateDate(date));
        }

        let existing = self
            .orders_repo
            .delivery_dates_for(account.account_id)
            .await?;
        if let Some(date) = validation::find_conflicting_date(&request.delivery_dates, &existing) {
            return Err(OrderError::DateConflict(date));
        }

        if let Some(date) = validation::find_locked_date(&request.delivery_dates, cutoff::now_rome())
        {
            return Err(OrderError::CutoffLocked(date));
        }

        let reseller = self
            .directory
            .find_by_id(account.account_id)
            .await?
            .ok_or(OrderError::ResellerNotFound)?;

        let product_names = self.product_names(&request.lines).await?;
        let resolved = validation::resolve_lines(&request.lines, &reseller.catalog, &product_names)
            .map_err(OrderError::NotOrderable)?;

        let snapshot = ResellerSnapshot {
            id: reseller.id,
            name: reseller.name,
            email: reseller.email,
            phone: reseller.phone,
            address: reseller.address,
        };

        let mut responses = Vec::with_capacity(request.delivery_dates.len());
        let mut created = Vec::new();
        for date in &request.delivery_dates {
            match self.orders_repo.create(&snapshot, *date, &resolved).await {
                Ok((order, lines)) => {
                    created.push(*date);
                    responses.push(OrderResponse::from_parts(order, lines, false));
                }
                Err(err) => {
                    tracing::error!(
                        "Batch creation for reseller {} failed at date {}: {}",
                        snapshot.id,
                        date,
                        err
                    );
                    return Err(OrderError::PartialCreate {
                        created,
                        failed: *date,
                    });
                }
            }
        }

        tracing::info!(
            "Created {} order(s) for reseller {}",
            responses.len(),
            snapshot.id
        );
        Ok(responses)
    }

    /// Role-scoped listing: admin sees every order with the reseller
    /// snapshot attached, a reseller sees only its own, other roles are
    /// rejected.
    pub async fn list_orders(
        &self,
        account: &AuthenticatedAccount,
    ) -> Result<Vec<OrderResponse>, OrderError> {
        let (orders, with_reseller) = match account.role {
            Role::Admin => (self.orders_repo.find_all().await?, true),
            Role::Reseller => (
                self.orders_repo.find_by_reseller(account.account_id).await?,
                false,
            ),
            role => return Err(OrderError::RoleNotAllowed(role)),
        };

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            let lines = self.orders_repo.find_lines(order.id).await?;
            responses.push(OrderResponse::from_parts(order, lines, with_reseller));
        }

        Ok(responses)
    }

    /// Replace the line set of one order. The delivery date is fixed at
    /// creation and is not part of the update payload.
    ///
    /// Lines for products already on the order keep their original price
    /// snapshot; new products take the current catalog price.
    pub async fn update_order(
        &self,
        order_id: Uuid,
        account: &AuthenticatedAccount,
        request: UpdateOrderRequest,
    ) -> Result<OrderResponse, OrderError> {
        if account.role != Role::Reseller {
            return Err(OrderError::RoleNotAllowed(account.role));
        }

        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !cutoff::is_modifiable(order.delivery_date) {
            return Err(OrderError::CutoffLocked(order.delivery_date));
        }
        if order.reseller_id != account.account_id {
            return Err(OrderError::Forbidden);
        }
        if request.lines.is_empty() {
            return Err(OrderError::EmptyLines);
        }
        if let Some(q) = validation::find_invalid_quantity(&request.lines) {
            return Err(OrderError::InvalidQuantity(q));
        }
        if let Some(product_id) = validation::find_duplicate_product(&request.lines) {
            return Err(OrderError::DuplicateProduct(product_id));
        }

        let existing_lines = self.orders_repo.find_lines(order_id).await?;
        let reseller = self
            .directory
            .find_by_id(account.account_id)
            .await?
            .ok_or(OrderError::ResellerNotFound)?;
        let product_names = self.product_names(&request.lines).await?;

        let resolved = validation::merge_lines(
            &request.lines,
            &existing_lines,
            &reseller.catalog,
            &product_names,
        )
        .map_err(OrderError::NotOrderable)?;

        let lines = self.orders_repo.replace_lines(order_id, &resolved).await?;

        tracing::info!("Updated lines of order {}", order_id);
        Ok(OrderResponse::from_parts(order, lines, false))
    }

    /// Delete one order. A reseller may delete only its own orders; the
    /// administrator may delete any. Both are gated by the cutoff on the
    /// stored delivery date.
    pub async fn delete_order(
        &self,
        order_id: Uuid,
        account: &AuthenticatedAccount,
    ) -> Result<(), OrderError> {
        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        match account.role {
            Role::Admin => {}
            Role::Reseller => {
                if order.reseller_id != account.account_id {
                    return Err(OrderError::Forbidden);
                }
            }
            role => return Err(OrderError::RoleNotAllowed(role)),
        }

        if !cutoff::is_modifiable(order.delivery_date) {
            return Err(OrderError::CutoffLocked(order.delivery_date));
        }

        self.orders_repo.delete(order_id).await?;

        tracing::info!("Deleted order {}", order_id);
        Ok(())
    }

    async fn product_names(
        &self,
        lines: &[LineRequest],
    ) -> Result<HashMap<i32, String>, OrderError> {
        let ids: Vec<i32> = lines.iter().map(|l| l.product_id).collect();
        let products = self.products.find_by_ids(&ids).await?;
        Ok(products
            .into_iter()
            .map(|(id, product)| (id, product.name))
            .collect())
    }
}
