use mongodb::bson::{Bson, Document};

use crate::domain::{fields, DomainError};

/// Converts a stored record into relaxed extended JSON with a string `_id`.
pub fn record_to_json(mut record: Document) -> serde_json::Value {
    let id = record.remove(fields::ID).map(|id| match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    });

    let mut value = Bson::Document(record).into_relaxed_extjson();
    if let (Some(id), Some(object)) = (id, value.as_object_mut()) {
        object.insert(fields::ID.to_string(), serde_json::Value::String(id));
    }
    value
}

/// Converts a payload received as JSON back into BSON. Extended JSON wrappers
/// such as `{"$date": ...}` and `{"$oid": ...}` are restored to their BSON
/// types, so a payload read through [`record_to_json`] is written back
/// unchanged.
pub fn payload_to_bson(payload: serde_json::Value) -> Result<Bson, DomainError> {
    Bson::try_from(payload)
        .map_err(|e| DomainError::validation(format!("payload is not storable: {e}")))
}
