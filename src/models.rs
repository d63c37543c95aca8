use {
    mongodb::bson::{Bson, Document, oid::ObjectId},
    serde::{Deserialize, Serialize},
};

use crate::errors::StoreError;

/// A rental listing as callers see it: a string `id` plus whatever fields the
/// document carries (name, description, price, image reference, ...). The
/// extra fields are opaque to this crate and pass through unchanged.
///
/// Serializes flat, so the JSON shape is `{"id": "...", "name": "...", ...}`
/// with no `_id` key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Rental {
    pub id: String,
    #[serde(flatten)]
    pub fields: Document,
}

impl Rental {
    /// Translate a stored document into the public shape: the `_id` field is
    /// removed and its string form becomes `id`.
    pub fn from_document(mut document: Document) -> Result<Self, StoreError> {
        let id = match document.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(Bson::String(raw)) => raw,
            Some(other) => other.to_string(),
            None => return Err(StoreError::MissingDocumentId),
        };

        Ok(Self {
            id,
            fields: document,
        })
    }

    /// The fields an update writes. Identifier keys never travel in the
    /// update document.
    pub fn set_document(&self) -> Document {
        let mut fields = self.fields.clone();
        fields.remove("id");
        fields.remove("_id");
        fields
    }
}

/// Parse a caller-supplied id into the storage identifier. Every operation
/// that targets a specific document goes through this one path.
pub fn parse_rental_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|source| StoreError::InvalidId {
        id: id.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use {super::*, mongodb::bson::doc, serde_json::json};

    #[test]
    fn translation_replaces_object_id_with_hex_string() {
        let oid = ObjectId::new();
        let rental =
            Rental::from_document(doc! { "_id": oid, "name": "Cabin", "price": 100 }).unwrap();

        assert_eq!(rental.id, oid.to_hex());
        assert!(!rental.fields.contains_key("_id"));
        assert_eq!(rental.fields.get_str("name").unwrap(), "Cabin");
        assert_eq!(rental.fields.get_i32("price").unwrap(), 100);
    }

    #[test]
    fn translation_keeps_string_ids_as_is() {
        let rental = Rental::from_document(doc! { "_id": "custom-key", "price": 1 }).unwrap();
        assert_eq!(rental.id, "custom-key");
    }

    #[test]
    fn translation_rejects_documents_without_an_id() {
        let result = Rental::from_document(doc! { "name": "Cabin" });
        assert!(matches!(result, Err(StoreError::MissingDocumentId)));
    }

    #[test]
    fn rental_serializes_flat() {
        let rental =
            Rental::from_document(doc! { "_id": ObjectId::new(), "name": "Cabin", "price": 100 })
                .unwrap();
        let value = serde_json::to_value(&rental).unwrap();

        assert_eq!(value["id"], json!(rental.id));
        assert_eq!(value["name"], json!("Cabin"));
        assert_eq!(value["price"], json!(100));
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn rental_deserializes_from_flat_json() {
        let rental: Rental =
            serde_json::from_str(r#"{"id": "abc123", "name": "Cabin", "price": 100}"#).unwrap();

        assert_eq!(rental.id, "abc123");
        assert_eq!(rental.fields.get_str("name").unwrap(), "Cabin");
    }

    #[test]
    fn set_document_strips_identifier_keys() {
        let rental = Rental {
            id: ObjectId::new().to_hex(),
            fields: doc! { "id": "stray", "_id": "stray", "price": 150 },
        };
        let fields = rental.set_document();

        assert!(!fields.contains_key("id"));
        assert!(!fields.contains_key("_id"));
        assert_eq!(fields.get_i32("price").unwrap(), 150);
    }

    #[test]
    fn id_parsing_round_trips() {
        let oid = ObjectId::new();
        assert_eq!(parse_rental_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn id_parsing_rejects_malformed_input() {
        for bad in ["", "nope", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(
                parse_rental_id(bad),
                Err(StoreError::InvalidId { .. })
            ));
        }
    }
}
