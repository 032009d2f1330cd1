use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::errors::ServiceError;
use crate::api::payload::{documents_to_json, document_to_json, into_document, parse_id};
use crate::auth::policy::Owner;
use crate::db::job_repository::JobRepository;
use crate::db::store::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};

/// Job posting operations; each one is a single store call
pub struct JobService {
    store: Arc<dyn DocumentStore>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_jobs(&self) -> Result<Vec<Value>, ServiceError> {
        let jobs = JobRepository::find_all(self.store.as_ref()).await?;
        info!("Service: Listed {} jobs", jobs.len());
        Ok(documents_to_json(jobs))
    }

    /// Fetch one job; an unknown id is `None`, not an error
    pub async fn get_job(&self, id: &str) -> Result<Option<Value>, ServiceError> {
        let id = parse_id(id)?;
        let job = JobRepository::find_by_id(self.store.as_ref(), id).await?;
        if job.is_none() {
            info!("Service: No job with id={}", id);
        }
        Ok(job.map(document_to_json))
    }

    /// Jobs posted by an authorized owner
    pub async fn list_owned_jobs(&self, owner: &Owner) -> Result<Vec<Value>, ServiceError> {
        let jobs = JobRepository::find_owned(self.store.as_ref(), owner.filter()).await?;
        info!("Service: Listed {} jobs posted by {}", jobs.len(), owner.email);
        Ok(documents_to_json(jobs))
    }

    pub async fn create_job(&self, body: Map<String, Value>) -> Result<InsertOutcome, ServiceError> {
        let job = into_document(body)?;
        let outcome = JobRepository::create(self.store.as_ref(), job).await?;
        info!("Service: Job created with id={}", outcome.inserted_id);
        Ok(outcome)
    }

    /// Overwrite the supplied fields of a job.
    ///
    /// An id with no document creates one (upsert); the outcome's
    /// `upsertedId` tells the two cases apart.
    pub async fn update_job(
        &self,
        id: &str,
        body: Map<String, Value>,
    ) -> Result<UpdateOutcome, ServiceError> {
        let id = parse_id(id)?;
        let fields = into_document(body)?;
        let outcome = JobRepository::upsert(self.store.as_ref(), id, fields).await?;

        match &outcome.upserted_id {
            Some(created) => warn!("Service: Update of unknown job created id={}", created),
            None => info!(
                "Service: Job id={} updated (matched={}, modified={})",
                id, outcome.matched_count, outcome.modified_count
            ),
        }
        Ok(outcome)
    }

    pub async fn delete_job(&self, id: &str) -> Result<DeleteOutcome, ServiceError> {
        let id = parse_id(id)?;
        let outcome = JobRepository::delete(self.store.as_ref(), id).await?;
        info!("Service: Deleted {} job(s) with id={}", outcome.deleted_count, id);
        Ok(outcome)
    }
}
