use mongodb::bson::{oid::ObjectId, Document};
use tracing::debug;

use crate::db::store::{
    Collection, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome,
};

/// Repository for bid documents
pub struct BidRepository;

impl BidRepository {
    pub async fn create(
        store: &dyn DocumentStore,
        bid: Document,
    ) -> Result<InsertOutcome, StoreError> {
        debug!("Inserting bid with {} fields", bid.len());
        let outcome = store.insert_one(Collection::Bids, bid).await?;
        debug!("Bid created with id={}", outcome.inserted_id);
        Ok(outcome)
    }

    /// Bids selected by an ownership filter (`email` or `buyerEmail`)
    pub async fn find_owned(
        store: &dyn DocumentStore,
        owner: Filter,
    ) -> Result<Vec<Document>, StoreError> {
        debug!("Fetching bids matching {:?}", owner);
        store.find(Collection::Bids, owner).await
    }

    /// Merge status fields into an existing bid; unknown ids match nothing
    pub async fn update_status(
        store: &dyn DocumentStore,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        debug!("Updating status of bid id={}", id);
        store
            .update_one(Collection::Bids, Filter::Id(id), fields, false)
            .await
    }
}
