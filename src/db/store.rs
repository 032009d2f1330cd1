use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// The two collections the marketplace keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Jobs,
    Bids,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Bids => "bids",
        }
    }
}

/// Selection of documents within a collection
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document
    All,

    /// The document with this `_id`
    Id(ObjectId),

    /// Documents whose string field at a dotted path equals `value`
    FieldEq { path: &'static str, value: String },
}

impl Filter {
    pub fn field_eq(path: &'static str, value: impl Into<String>) -> Self {
        Filter::FieldEq {
            path,
            value: value.into(),
        }
    }

    /// Render the filter as a MongoDB query document
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Id(id) => doc! { "_id": *id },
            Filter::FieldEq { path, value } => {
                let mut query = Document::new();
                query.insert(*path, value.as_str());
                query
            }
        }
    }
}

/// Summary of an insert, shaped like the driver's JSON result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Summary of an update or upsert
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

/// Summary of a delete
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Find/insert/update/delete-by-filter access to a document database.
///
/// Every operation is atomic for a single document only. Implementations
/// must be shareable across actix workers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    /// `$set` every field of `fields` on the first matching document.
    ///
    /// With `upsert`, a filter that matches nothing creates a new document
    /// built from the filter's equality and `fields`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError>;

    /// Round trip to the server, used for readiness
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release connections; called once during shutdown
    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_render_as_query_documents() {
        assert_eq!(Filter::All.to_document(), Document::new());

        let id = ObjectId::new();
        assert_eq!(Filter::Id(id).to_document(), doc! { "_id": id });

        let filter = Filter::field_eq("buyer.email", "ada@example.com");
        assert_eq!(filter.to_document(), doc! { "buyer.email": "ada@example.com" });
    }

    #[test]
    fn outcomes_serialize_in_camel_case() {
        let outcome = UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["matchedCount"], 0);
        assert!(json["upsertedId"].is_null());
    }
}
