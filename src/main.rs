pub mod auth;
pub mod db;
pub mod directory;
pub mod orders;
pub mod reports;
pub mod stats;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use directory::{ProductCatalog, ResellerDirectory};
use orders::{OrderService, OrdersRepository};
use reports::ReportService;
use stats::StatsService;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        orders::handlers::create_orders_handler,
        orders::handlers::list_orders_handler,
        orders::handlers::update_order_handler,
        orders::handlers::delete_order_handler,
        reports::handlers::get_shipments_handler,
        reports::handlers::get_production_handler,
        stats::handlers::get_stats_handler,
        directory::handlers::update_reseller_handler,
        directory::handlers::delete_reseller_handler,
        directory::handlers::delete_product_handler,
    ),
    components(
        schemas(
            orders::models::CreateOrdersRequest,
            orders::models::UpdateOrderRequest,
            orders::models::LineRequest,
            orders::models::OrderResponse,
            orders::models::OrderLineResponse,
            orders::models::ResellerSnapshot,
            reports::models::Manifest,
            reports::models::ManifestLine,
            reports::models::ProductionLine,
            reports::models::IngredientRequirement,
            stats::models::SalesStats,
            stats::models::ProductSales,
            stats::models::RevenueBucket,
            stats::models::OrderCountBucket,
            directory::models::UpdateResellerRequest,
            directory::models::Ingredient,
        )
    ),
    tags(
        (name = "orders", description = "Cutoff-gated order lifecycle"),
        (name = "reports", description = "Daily shipment and production views"),
        (name = "stats", description = "Administrator sales statistics"),
        (name = "directory", description = "Reseller and product cascade operations")
    ),
    info(
        title = "Bakery Order API",
        version = "1.0.0",
        description = "Order management backend for a bakery: reseller orders \
            against personalized catalogs, daily cutoff rules, shipment and \
            production views, sales statistics"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService,
    pub report_service: ReportService,
    pub stats_service: StatsService,
    pub directory: ResellerDirectory,
    pub products: ProductCatalog,
}

/// Creates and configures the application router
fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let orders_repo = OrdersRepository::new(db.clone());
    let directory = ResellerDirectory::new(db.clone());
    let products = ProductCatalog::new(db);

    let state = AppState {
        order_service: OrderService::new(
            orders_repo.clone(),
            directory.clone(),
            products.clone(),
        ),
        report_service: ReportService::new(orders_repo.clone(), products.clone()),
        stats_service: StatsService::new(orders_repo),
        directory,
        products,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Order lifecycle
        .route("/api/orders", post(orders::create_orders_handler))
        .route("/api/orders", get(orders::list_orders_handler))
        .route("/api/orders/:id", patch(orders::update_order_handler))
        .route("/api/orders/:id", delete(orders::delete_order_handler))
        // Daily views
        .route("/api/reports/shipments", get(reports::get_shipments_handler))
        .route("/api/reports/production", get(reports::get_production_handler))
        // Statistics
        .route("/api/stats", get(stats::get_stats_handler))
        // Directory cascade operations
        .route("/api/resellers/:id", patch(directory::update_reseller_handler))
        .route("/api/resellers/:id", delete(directory::delete_reseller_handler))
        .route("/api/products/:id", delete(directory::delete_product_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Bakery API - Starting...");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let app = create_router(db_pool);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Bakery API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
