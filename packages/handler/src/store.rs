use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;
use crate::entity::user;
use crate::error::StoreError;

/// Field values of the record to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Data store the handler writes to.
///
/// Implementations are created once per process and shared by every invocation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<user::Model, StoreError>;

    /// Release pooled resources. Called once on shutdown.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// [`UserStore`] backed by a sea-orm connection pool.
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut opt = ConnectOptions::new(config.url.to_owned());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .sqlx_logging(config.sqlx_logging);

        let db = Database::connect(opt).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Connected to database"
        );

        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }
}

#[async_trait]
impl UserStore for SeaOrmStore {
    #[tracing::instrument(
        name = "SeaOrmStore::create_user",
        skip(self, user),
        fields(email = %user.email)
    )]
    async fn create_user(&self, user: NewUser) -> Result<user::Model, StoreError> {
        let model = user::ActiveModel {
            name: Set(Some(user.name)),
            email: Set(user.email),
            ..Default::default()
        };

        let created = model.insert(&self.db).await?;
        tracing::debug!(id = created.id, "User created");
        Ok(created)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.db.close_by_ref().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
