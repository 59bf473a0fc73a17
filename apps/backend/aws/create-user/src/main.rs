//! AWS Lambda entry point for the create-user function.
//!
//! The connection pool is opened during the init phase, shared by every
//! invocation of this execution environment and closed when Lambda
//! signals shutdown.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use user_fn::{
    CreateUserHandler, HandlerConfig, ResponseEnvelope, SeaOrmStore, UserStore, telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _sentry_guard = telemetry::init();

    let config = HandlerConfig::from_env()?;
    tracing::info!(function = %config.profile.name, "Starting create-user Lambda");

    let store = Arc::new(SeaOrmStore::connect(&config.database).await?);
    let handler = CreateUserHandler::new(store.clone(), config.profile);

    lambda_runtime::spawn_graceful_shutdown_handler(move || async move {
        if let Err(err) = store.close().await {
            tracing::error!(error = %err, "Failed to close database connection");
        }
    })
    .await;

    run(service_fn(|event: LambdaEvent<Value>| invocation_handler(&handler, event))).await
}

async fn invocation_handler(
    handler: &CreateUserHandler,
    event: LambdaEvent<Value>,
) -> Result<ResponseEnvelope, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Invocation received");

    let payload = (!event.payload.is_null()).then_some(&event.payload);
    Ok(handler.handle(payload).await)
}
