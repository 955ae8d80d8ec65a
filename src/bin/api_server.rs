use std::sync::Arc;

use contact_management::infra::config;
use contact_management::storage::{memory, postgres};
use contact_management::transport;
use contact_management::TokenIssuer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let token_issuer = Arc::new(TokenIssuer::new(config::AuthConfig::from_env()));

    // --- Storage initialization ---
    let backend = config::storage_backend();
    let (repos, pool) = match backend.as_str() {
        "memory" => {
            tracing::warn!("using in-process storage; data is lost on shutdown");
            (memory::repositories(), None)
        }
        _ => {
            let pool = postgres::connect(&config::database_url()).await?;
            postgres::ensure_schema(&pool).await?;
            tracing::info!("connected to Postgres, schema ensured");
            (postgres::repositories(pool.clone()), Some(pool))
        }
    };

    let app_state = transport::http::AppState::new(repos, token_issuer, pool);

    // --- API server ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
