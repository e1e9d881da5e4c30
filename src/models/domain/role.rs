use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Read-only role document, referenced by `User::role_id`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}
