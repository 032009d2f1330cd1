use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Database};
use tracing::{debug, info};

use super::store::{
    Collection, DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreError, UpdateOutcome,
};

/// Document store backed by a MongoDB deployment
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub fn new(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(collection.name())
    }
}

/// Render an id the way clients see it: ObjectIds as hex, anything else as-is
fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        debug!("find on {} with {:?}", collection.name(), filter);
        let cursor = self.collection(collection).find(filter.to_document()).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        debug!("find_one on {} with {:?}", collection.name(), filter);
        let document = self
            .collection(collection)
            .find_one(filter.to_document())
            .await?;
        Ok(document)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), doc! { "$set": fields })
            .upsert(upsert)
            .await?;

        let upserted_id = result.upserted_id.as_ref().map(id_to_string);
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter.to_document())
            .await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn close(&self) {
        info!("Shutting down MongoDB client...");
        self.client.clone().shutdown().await;
    }
}
