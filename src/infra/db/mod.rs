//! Database connection lifecycle.
//!
//! One connection pool is opened at process start, shared by the store, and
//! closed at shutdown.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

pub mod migrations;

pub use migrations::Migrator;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection and create the schema if it does not exist yet.
    ///
    /// Accepts a URL or fully built `ConnectOptions`.
    pub async fn connect(options: impl Into<ConnectOptions>) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(options).await?;

        Migrator::up(&connection, None).await?;
        tracing::info!("Database connected and schema ready");

        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the pool. Every clone of the connection shares it, so this
    /// ends all database access for the process.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.connection.clone().close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
