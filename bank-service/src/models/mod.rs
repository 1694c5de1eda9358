use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

/// A bank-details document as stored in the `bank_details` collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct BankDetails {
    /// Assigned by the store on insert; absent until then.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub holder_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone_no: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub account_type: String,
}

/// Reads a string field that may be `null`, treating `null` like an absent field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl BankDetails {
    pub fn new(
        holder_name: impl Into<String>,
        phone_no: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            holder_name: holder_name.into(),
            phone_no: phone_no.into(),
            account_type: account_type.into(),
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}
