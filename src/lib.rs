//! # rental-store - MongoDB-backed data access for rental listings
//!
//! One component, the [`RentalStore`]: it opens and memoizes the database
//! connection, exposes CRUD operations against a single collection, and
//! translates the storage-layer `_id` into the public string `id` on
//! everything it returns. Routing, image handling, and authentication belong
//! to the layers embedding this crate.
//!
//! ## Environment Variables
//!
//! - `MONGODB_URI_CONNECTION_STRING`: MongoDB connection string
//! - `MONGODB_URI_DATABASE_NAME`: database holding the rentals collection
//! - `MONGODB_URI_COLLECTION_NAME`: name of the rentals collection

pub mod cli;
pub mod db;
pub mod errors;
pub mod models;
pub mod rentals;

pub use db::{ConnectAction, ConnectionHandle, RentalStore, StoreConfig};
pub use errors::StoreError;
pub use models::Rental;
