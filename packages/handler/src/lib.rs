//! Core of the create-user function.
//!
//! A single invocation creates one `User` row through the injected
//! [`store::UserStore`] and answers with a [`response::ResponseEnvelope`].
//! Every failure is folded into a `500` envelope by [`handler::CreateUserHandler`],
//! so the runtimes wrapping this crate never see an error from an invocation.

pub mod config;
pub mod entity;
pub mod error;
pub mod handler;
pub mod response;
pub mod store;
pub mod telemetry;

pub use config::{ConfigError, DatabaseConfig, FunctionProfile, HandlerConfig};
pub use error::StoreError;
pub use handler::CreateUserHandler;
pub use response::ResponseEnvelope;
pub use store::{NewUser, SeaOrmStore, UserStore};
