//! Local HTTP runner for the create-user function.
//!
//! ## Endpoints
//!
//! - `POST /invoke` - Run one invocation; an optional JSON body is the event
//! - `GET /health` - Health check

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use user_fn::{CreateUserHandler, HandlerConfig, SeaOrmStore, UserStore, telemetry};

const LOCAL_BIND_ADDR: &str = "LOCAL_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    let _sentry_guard = telemetry::init();

    let config = HandlerConfig::from_env()?;
    let store = Arc::new(SeaOrmStore::connect(&config.database).await?);
    let handler = CreateUserHandler::new(store.clone(), config.profile);

    let addr = std::env::var(LOCAL_BIND_ADDR)
        .ok()
        .filter(|addr| !addr.is_empty())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, function = %handler.profile().name, "Local runner listening");

    let served = axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await?;
    served?;
    Ok(())
}

fn router(handler: CreateUserHandler) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/health", get(|| async { "ok" }))
        .with_state(handler)
}

async fn invoke(State(handler): State<CreateUserHandler>, body: Bytes) -> Response {
    let event: Option<Value> = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice(&body) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring request body that is not JSON");
                None
            }
        }
    };

    let envelope = handler.handle(event.as_ref()).await;
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        envelope.body,
    )
        .into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
