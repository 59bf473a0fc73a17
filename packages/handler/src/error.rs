use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Failure of the data store while serving an invocation.
///
/// There is one kind of failure at the handler boundary; the variants only
/// decide which public message ends up in the response body.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] DbErr),

    /// Rejection carrying a message from a store that is not ORM backed.
    #[error("{0}")]
    Rejected(String),

    /// The store failed without anything to report.
    #[error("data store failed without a message")]
    Unspecified,
}

impl StoreError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Message to surface to the caller, if the failure carries one.
    pub fn message(&self) -> Option<String> {
        match self {
            StoreError::Database(err) => Some(database_message(err)),
            StoreError::Rejected(msg) => Some(msg.clone()),
            StoreError::Unspecified => None,
        }
    }
}

/// The driver's own text, without sea-orm's category prefix.
fn database_message(err: &DbErr) -> String {
    match err {
        DbErr::Custom(msg) => msg.clone(),
        DbErr::Conn(runtime) | DbErr::Exec(runtime) | DbErr::Query(runtime) => match runtime {
            RuntimeErr::Internal(msg) => msg.clone(),
            RuntimeErr::SqlxError(sqlx_err) => sqlx_err.to_string(),
            #[allow(unreachable_patterns)]
            _ => err.to_string(),
        },
        other => other.to_string(),
    }
}
