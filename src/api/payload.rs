use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use super::errors::ServiceError;

/// Parse a path id into the store's id type
pub fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::InvalidId(id.to_string()))
}

/// Turn a client JSON object into a document to store.
///
/// `_id` is dropped; identity is always assigned by the store.
pub fn into_document(mut body: Map<String, Value>) -> Result<Document, ServiceError> {
    body.remove("_id");
    bson::to_document(&body).map_err(|e| ServiceError::InvalidPayload(e.to_string()))
}

/// Render a stored value as plain JSON, with ObjectIds as hex strings
fn to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, to_json(value)))
            .collect(),
    )
}

pub fn documents_to_json(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_json).collect()
}
