use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::store::{
    Collection, DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome,
};

/// In-process document store with the same filter and upsert rules as MongoDB.
///
/// Used by route-level tests in place of a live database.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    unreachable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ping` fail as a dropped connection would
    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_document()?.get(segment)?;
    }
    Some(current)
}

fn matches(document: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Id(id) => document.get_object_id("_id").ok() == Some(*id),
        Filter::FieldEq { path, value } => {
            lookup(document, path).and_then(Bson::as_str) == Some(value.as_str())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let mut collections = self.collections.lock().unwrap();
        collections.entry(collection).or_default().push(document);
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id.to_hex(),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| matches(d, &filter)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
                upserted_count: 0,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
                upserted_count: 0,
            });
        }

        let id = match filter {
            Filter::Id(id) => id,
            _ => ObjectId::new(),
        };
        let mut created = Document::new();
        created.insert("_id", id);
        for (key, value) in fields {
            created.insert(key, value);
        }
        documents.push(created);

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id.to_hex()),
            upserted_count: 1,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection).or_default();
        let deleted_count = match documents.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
            return Err(StoreError::Database(refused.into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn finds_by_nested_field() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Jobs, doc! { "title": "a", "buyer": { "email": "x@example.com" } })
            .await
            .unwrap();
        store
            .insert_one(Collection::Jobs, doc! { "title": "b", "buyer": { "email": "y@example.com" } })
            .await
            .unwrap();

        let found = store
            .find(Collection::Jobs, Filter::field_eq("buyer.email", "x@example.com"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("title").unwrap(), "a");

        let bids = store.find(Collection::Bids, Filter::All).await.unwrap();
        assert!(bids.is_empty());
    }

    #[actix_web::test]
    async fn upsert_by_id_creates_document_with_that_id() {
        let store = MemoryStore::new();
        let id = ObjectId::new();

        let outcome = store
            .update_one(Collection::Jobs, Filter::Id(id), doc! { "title": "new" }, true)
            .await
            .unwrap();
        assert_eq!(outcome.upserted_id, Some(id.to_hex()));
        assert_eq!(outcome.matched_count, 0);

        let outcome = store
            .update_one(Collection::Jobs, Filter::Id(id), doc! { "title": "new" }, true)
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
        assert_eq!(outcome.upserted_id, None);
    }

    #[actix_web::test]
    async fn update_without_upsert_is_a_no_op_for_unknown_id() {
        let store = MemoryStore::new();
        let outcome = store
            .update_one(Collection::Bids, Filter::Id(ObjectId::new()), doc! { "status": "x" }, false)
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 0);
        assert!(store.find(Collection::Bids, Filter::All).await.unwrap().is_empty());
    }
}
