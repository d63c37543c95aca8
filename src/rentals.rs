//! # Rental operations
//!
//! The five data operations on the rentals collection. All of them assume a
//! prior successful [`RentalStore::connect`] and surface
//! [`StoreError::NotConnected`] otherwise; unlike `connect`, they propagate
//! failures to the caller instead of containing them.

use {
    futures::TryStreamExt,
    mongodb::{
        bson::{Document, doc},
        results::{DeleteResult, InsertOneResult, UpdateResult},
    },
    tracing::debug,
};

use crate::{
    db::RentalStore,
    errors::StoreError,
    models::{Rental, parse_rental_id},
};

impl RentalStore {
    /// Fetch every rental, translated to the public shape. An empty
    /// collection yields an empty vec.
    pub async fn get_rentals(&self) -> Result<Vec<Rental>, StoreError> {
        let collection = self.collection()?;

        let mut cursor = collection.find(doc! {}).await?;
        let mut rentals = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            rentals.push(Rental::from_document(document)?);
        }

        debug!(?rentals, "fetched rentals");
        Ok(rentals)
    }

    /// Fetch one rental by its public id. An empty id short-circuits to
    /// `None` without querying; a miss is `None`, not an error.
    pub async fn get_rental_by_id(&self, id: &str) -> Result<Option<Rental>, StoreError> {
        if id.is_empty() {
            return Ok(None);
        }

        let oid = parse_rental_id(id)?;
        let document = self.collection()?.find_one(doc! { "_id": oid }).await?;

        document.map(Rental::from_document).transpose()
    }

    /// Delete at most one rental by its public id. An empty id
    /// short-circuits to `None`; deleting an id that matches nothing is a
    /// `deleted_count == 0` outcome, not an error.
    pub async fn delete_rental_by_id(
        &self,
        id: &str,
    ) -> Result<Option<DeleteResult>, StoreError> {
        if id.is_empty() {
            return Ok(None);
        }

        let oid = parse_rental_id(id)?;
        let result = self.collection()?.delete_one(doc! { "_id": oid }).await?;

        Ok(Some(result))
    }

    /// Insert a new rental document as given; the store generates the
    /// identifier. No shape validation happens here.
    pub async fn add_rental(&self, rental: Document) -> Result<InsertOneResult, StoreError> {
        let result = self.collection()?.insert_one(rental).await?;
        Ok(result)
    }

    /// Partial update: `$set` the provided fields on the document named by
    /// `rental.id`. Identifier keys are never written; fields not present in
    /// the update are left untouched.
    pub async fn update_rental(&self, rental: &Rental) -> Result<UpdateResult, StoreError> {
        let oid = parse_rental_id(&rental.id)?;
        let result = self
            .collection()?
            .update_one(doc! { "_id": oid }, doc! { "$set": rental.set_document() })
            .await?;

        Ok(result)
    }
}
