use mongodb::bson::{oid::ObjectId, Document};
use tracing::debug;

use crate::db::store::{
    Collection, DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome,
};

/// Repository for job posting documents
pub struct JobRepository;

impl JobRepository {
    pub async fn find_all(store: &dyn DocumentStore) -> Result<Vec<Document>, StoreError> {
        debug!("Fetching all jobs");
        store.find(Collection::Jobs, Filter::All).await
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: ObjectId,
    ) -> Result<Option<Document>, StoreError> {
        debug!("Fetching job id={}", id);
        store.find_one(Collection::Jobs, Filter::Id(id)).await
    }

    /// Jobs selected by an ownership filter such as `buyer.email`
    pub async fn find_owned(
        store: &dyn DocumentStore,
        owner: Filter,
    ) -> Result<Vec<Document>, StoreError> {
        debug!("Fetching jobs matching {:?}", owner);
        store.find(Collection::Jobs, owner).await
    }

    pub async fn create(
        store: &dyn DocumentStore,
        job: Document,
    ) -> Result<InsertOutcome, StoreError> {
        debug!("Inserting job with {} fields", job.len());
        let outcome = store.insert_one(Collection::Jobs, job).await?;
        debug!("Job created with id={}", outcome.inserted_id);
        Ok(outcome)
    }

    /// Overwrite the supplied fields of a job, creating it when the id is unknown
    pub async fn upsert(
        store: &dyn DocumentStore,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        debug!("Upserting job id={} with {} fields", id, fields.len());
        store
            .update_one(Collection::Jobs, Filter::Id(id), fields, true)
            .await
    }

    pub async fn delete(
        store: &dyn DocumentStore,
        id: ObjectId,
    ) -> Result<DeleteOutcome, StoreError> {
        debug!("Deleting job id={}", id);
        store.delete_one(Collection::Jobs, Filter::Id(id)).await
    }
}
