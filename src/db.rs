//! # Database connection module
//!
//! Owns the MongoDB connection for the rental store: configuration read from
//! the process environment, the once-initialized client/database/collection
//! bundle, and the idempotent `connect` entry point.
//!
//! ## Configuration
//!
//! - `MONGODB_URI_CONNECTION_STRING`: MongoDB connection string
//! - `MONGODB_URI_DATABASE_NAME`: database holding the rentals collection
//! - `MONGODB_URI_COLLECTION_NAME`: name of the rentals collection
//!
//! ## Usage
//!
//! The application bootstrap builds one [`RentalStore`] and shares it by
//! reference (or `Arc`) with whatever consumes it; the store itself holds the
//! connection state, so there is no process-global.

use {
    mongodb::{
        Client, Collection, Database,
        bson::{Document, doc},
    },
    std::env,
    tokio::sync::OnceCell,
    tracing::info,
};

use crate::errors::StoreError;

/// Connection parameters for the rental store. Values are optional here;
/// [`RentalStore::connect`] reports the missing-params error when any of them
/// is absent.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub connection_url: Option<String>,
    pub database_name: Option<String>,
    pub collection_name: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            connection_url: env::var("MONGODB_URI_CONNECTION_STRING").ok(),
            database_name: env::var("MONGODB_URI_DATABASE_NAME").ok(),
            collection_name: env::var("MONGODB_URI_COLLECTION_NAME").ok(),
        }
    }

    // Empty values count the same as unset ones.
    fn require(&self) -> Result<(&str, &str, &str), StoreError> {
        match (
            self.connection_url.as_deref(),
            self.database_name.as_deref(),
            self.collection_name.as_deref(),
        ) {
            (Some(url), Some(database), Some(collection))
                if !url.is_empty() && !database.is_empty() && !collection.is_empty() =>
            {
                Ok((url, database, collection))
            }
            _ => Err(StoreError::MissingConfig),
        }
    }
}

/// The client/database/collection bundle. The three handles are populated
/// together on the first successful connect; a partially connected state
/// cannot be observed.
#[derive(Clone)]
pub struct ConnectionHandle {
    pub client: Client,
    pub database: Database,
    pub collection: Collection<Document>,
}

/// What a successful [`RentalStore::connect`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectAction {
    Established,
    AlreadyConnected,
}

/// Data access for the rentals collection.
///
/// Construct once with [`RentalStore::new`] or [`RentalStore::from_env`],
/// call [`RentalStore::connect`], then use the CRUD operations. The handle is
/// never torn down; it lives as long as the store.
pub struct RentalStore {
    config: StoreConfig,
    handle: OnceCell<ConnectionHandle>,
}

impl RentalStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            handle: OnceCell::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.handle.get().is_some()
    }

    /// The live connection bundle, for collaborators that need direct access
    /// to the client or database (for example a controller storing images).
    pub fn handle(&self) -> Option<&ConnectionHandle> {
        self.handle.get()
    }

    pub(crate) fn collection(&self) -> Result<&Collection<Document>, StoreError> {
        self.handle
            .get()
            .map(|handle| &handle.collection)
            .ok_or(StoreError::NotConnected)
    }

    /// Open the connection if it is not open yet.
    ///
    /// Missing configuration and driver failures both come back as `Err`
    /// values; this method never panics. Calling it again after a success is
    /// a no-op that reports [`ConnectAction::AlreadyConnected`].
    pub async fn connect(&self) -> Result<ConnectAction, StoreError> {
        let (url, database_name, collection_name) = self.config.require()?;

        if self.handle.get().is_some() {
            info!("Already connected");
            return Ok(ConnectAction::AlreadyConnected);
        }

        // Initialization is serialized by the once-cell, so concurrent first
        // connects cannot produce divergent handles. A caller that loses the
        // race still reports Established; the handle is the same either way.
        self.handle
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(url).await?;

                // The driver connects lazily; ping so an unreachable server
                // fails here instead of on the first data operation.
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 })
                    .await?;

                let database = client.database(database_name);

                let collections = database.list_collection_names().await?;
                if !collections.iter().any(|name| name == collection_name) {
                    database.create_collection(collection_name).await?;
                }

                let collection = database.collection::<Document>(collection_name);

                Ok::<_, StoreError>(ConnectionHandle {
                    client,
                    database,
                    collection,
                })
            })
            .await?;

        info!("(Re)Established connection to database");
        Ok(ConnectAction::Established)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> StoreConfig {
        StoreConfig {
            connection_url: Some("mongodb://localhost:27017".to_string()),
            database_name: Some("rentals_test".to_string()),
            collection_name: Some("rentals".to_string()),
        }
    }

    #[test]
    fn require_accepts_a_complete_config() {
        let config = full_config();
        let (url, database, collection) = config.require().unwrap();

        assert_eq!(url, "mongodb://localhost:27017");
        assert_eq!(database, "rentals_test");
        assert_eq!(collection, "rentals");
    }

    #[test]
    fn require_rejects_any_missing_value() {
        let missing_url = StoreConfig {
            connection_url: None,
            ..full_config()
        };
        let missing_database = StoreConfig {
            database_name: None,
            ..full_config()
        };
        let missing_collection = StoreConfig {
            collection_name: None,
            ..full_config()
        };

        for config in [missing_url, missing_database, missing_collection] {
            assert!(matches!(config.require(), Err(StoreError::MissingConfig)));
        }
    }

    #[test]
    fn require_treats_empty_values_as_missing() {
        let config = StoreConfig {
            connection_url: Some(String::new()),
            ..full_config()
        };
        assert!(matches!(config.require(), Err(StoreError::MissingConfig)));
    }

    #[tokio::test]
    async fn connect_without_config_reports_missing_params() {
        let store = RentalStore::new(StoreConfig::default());
        let err = store.connect().await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required params to begin database connection"
        );
        assert!(!store.is_connected());
    }
}
