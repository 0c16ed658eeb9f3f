//! CRM Backend - customer/product/order service with a GraphQL API
//!
//! This is the main entry point for the CRM backend.
//! All operations are exposed via GraphQL at /graphql.

mod api;
mod config;
mod db;
mod graphql;

use std::net::SocketAddr;

use axum::Router;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::graphql::CrmSchema;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub schema: CrmSchema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting CRM Backend");
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    db.migrate().await?;
    tracing::info!("Database migrations applied");

    // Build GraphQL schema
    let schema = graphql::build_schema(db.clone());
    tracing::info!("GraphQL schema built");

    let state = AppState { db, schema };

    // Build router - GraphQL is the primary API
    let app = Router::new()
        // Health endpoints
        .merge(api::health::router())
        // GraphQL endpoint (handles all queries and mutations)
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GraphQL query/mutation handler
async fn graphql_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    // Check if this is a browser request (accepts HTML)
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
            .into_response()
    } else {
        // Return a helpful JSON error for non-browser requests
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}
