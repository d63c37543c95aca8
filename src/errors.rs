use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing required params to begin database connection")]
    MissingConfig,
    #[error("Database connection has not been established")]
    NotConnected,
    #[error("Invalid rental id {id:?}")]
    InvalidId {
        id: String,
        #[source]
        source: mongodb::bson::oid::Error,
    },
    #[error("Stored rental document has no _id field")]
    MissingDocumentId,
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}
