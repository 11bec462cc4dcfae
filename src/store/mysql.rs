//! MySQL connection scoping
//!
//! Every repository call opens a fresh connection through here and closes it
//! before returning, on success and error paths alike. No pool is kept.

use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};

use crate::config::DatabaseConfig;

use super::errors::{StoreError, StoreResult};

/// Open one connection for the duration of a single statement.
pub(crate) async fn connect(config: &DatabaseConfig) -> StoreResult<MySqlConnection> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    MySqlConnection::connect_with(&options)
        .await
        .map_err(StoreError::connection)
}

/// Close the connection, ignoring shutdown errors; the statement outcome is
/// what callers report.
pub(crate) async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "connection close failed");
    }
}
