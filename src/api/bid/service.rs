use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::errors::ServiceError;
use crate::api::payload::{documents_to_json, into_document, parse_id};
use crate::auth::policy::Owner;
use crate::db::bid_repository::BidRepository;
use crate::db::store::{DocumentStore, InsertOutcome, UpdateOutcome};

/// Bid operations; each one is a single store call
pub struct BidService {
    store: Arc<dyn DocumentStore>,
}

impl BidService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create_bid(&self, body: Map<String, Value>) -> Result<InsertOutcome, ServiceError> {
        let bid = into_document(body)?;
        let outcome = BidRepository::create(self.store.as_ref(), bid).await?;
        info!("Service: Bid created with id={}", outcome.inserted_id);
        Ok(outcome)
    }

    /// Bids visible to an authorized owner: placed by them or directed at
    /// them, depending on the owner's field
    pub async fn list_owned_bids(&self, owner: &Owner) -> Result<Vec<Value>, ServiceError> {
        let bids = BidRepository::find_owned(self.store.as_ref(), owner.filter()).await?;
        info!(
            "Service: Listed {} bids where {}={}",
            bids.len(),
            owner.field.path(),
            owner.email
        );
        Ok(documents_to_json(bids))
    }

    pub async fn update_status(
        &self,
        id: &str,
        body: Map<String, Value>,
    ) -> Result<UpdateOutcome, ServiceError> {
        let id = parse_id(id)?;
        let fields = into_document(body)?;
        let outcome = BidRepository::update_status(self.store.as_ref(), id, fields).await?;
        info!(
            "Service: Bid id={} status update (matched={}, modified={})",
            id, outcome.matched_count, outcome.modified_count
        );
        Ok(outcome)
    }
}
