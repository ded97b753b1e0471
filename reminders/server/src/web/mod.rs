use axum::Router;
use axum::http::{Method, header};
use axum::response::{IntoResponse, Json, Response};
use migration::MigratorTrait;
use sea_orm::Database;
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::item::api::v1::{ItemsApiDoc, create_api_router};
use crate::item::gateway::{DatabaseTaskGateway, MemoryTaskGateway, TaskGateway};
use crate::item::{ItemServiceError, ItemState};

/// Picks the storage backend named by the configuration.
///
/// With a database URL the schema is migrated before the gateway is handed out.
#[tracing::instrument(skip(config))]
pub async fn connect_gateway(config: &Config) -> anyhow::Result<Arc<dyn TaskGateway>> {
    match &config.db_url {
        Some(db_url) => {
            let db = Database::connect(db_url).await?;
            migration::Migrator::up(&db, None).await?;
            tracing::info!("Database migrations applied successfully");
            Ok(Arc::new(DatabaseTaskGateway::new(db)))
        }
        None => {
            tracing::warn!("DB_URL is not set; items are kept in memory and lost on restart");
            Ok(Arc::new(MemoryTaskGateway::new()))
        }
    }
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let gateway = connect_gateway(&config).await?;
    let app = create_app(gateway);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the full application: item routes, health check and API docs,
/// wrapped in tracing, CORS and panic handling layers.
pub fn create_app(gateway: Arc<dyn TaskGateway>) -> Router {
    let item_router = create_api_router(ItemState::new(gateway));

    Router::new()
        .merge(item_router)
        .route("/health", axum::routing::get(health_check_handler))
        .route("/api-docs/openapi.json", axum::routing::get(openapi_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(AnyOrigin)
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ItemsApiDoc::openapi())
}

/// Turns a panic inside a handler into the generic internal error response.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        *message
    } else {
        "unknown panic payload"
    };
    tracing::error!("Request handler panicked: {}", detail);
    ItemServiceError::Internal.into_response()
}
