//! Connection lifecycle.
//!
//! One connection is opened at startup and closed once the work is done.
//! There is no reconnection and no retry; pooling and timeouts are the
//! driver's defaults.

use mongodb::Client;
use mongodb::options::ClientOptions;
use secrecy::ExposeSecret;
use tracing::{error, info};

use crate::backend::{DocumentStore, StoreError};
use crate::config::StoreConfig;
use crate::mongo::MongoStore;

/// Open a connection and verify it with a ping.
///
/// Logs `database connected` on success and `database connection error` on
/// failure.
///
/// # Errors
///
/// Returns `StoreError::Mongo` if the connection string is invalid or the
/// server cannot be reached.
pub async fn connect(config: &StoreConfig) -> Result<MongoStore, StoreError> {
    match open(config).await {
        Ok(store) => {
            info!(
                uri = %config.redacted_uri(),
                database = %config.database,
                "database connected"
            );
            Ok(store)
        }
        Err(e) => {
            error!(uri = %config.redacted_uri(), error = %e, "database connection error");
            Err(e)
        }
    }
}

async fn open(config: &StoreConfig) -> Result<MongoStore, StoreError> {
    let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
    options.app_name.clone_from(&config.app_name);

    let client = Client::with_options(options)?;
    let store = MongoStore::new(client, &config.database);
    store.ping().await?;
    Ok(store)
}

/// Close the connection.
pub async fn disconnect<S: DocumentStore>(store: S) {
    let backend = store.backend();
    store.shutdown().await;
    info!(backend, "database disconnected");
}
