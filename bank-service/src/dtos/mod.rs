//! Request and response bodies for the bank record API.
//!
//! Every external JSON shape is declared here; handlers never touch untyped JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{null_as_empty, BankDetails};

pub const MSG_CREATED: &str = "Bank details created successfully";
pub const MSG_UPDATED: &str = "Bank details updated successfully";
pub const MSG_DELETED: &str = "Bank details deleted successfully";

/// Body accepted by create and update.
///
/// Only a JSON object is accepted. Absent or `null` fields become the empty
/// string, so an update replaces every field rather than merging.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(try_from = "Map<String, Value>")]
pub struct BankDetailsPayload {
    /// Accepted for compatibility with clients that echo records back; never used.
    pub id: Option<String>,
    pub holder_name: String,
    pub phone_no: String,
    pub account_type: String,
}

#[derive(Deserialize)]
struct PayloadFields {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    holder_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    phone_no: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    account_type: String,
}

impl TryFrom<Map<String, Value>> for BankDetailsPayload {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: PayloadFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            id: fields.id,
            holder_name: fields.holder_name,
            phone_no: fields.phone_no,
            account_type: fields.account_type,
        })
    }
}

impl BankDetailsPayload {
    pub fn into_record(self) -> BankDetails {
        BankDetails::new(self.holder_name, self.phone_no, self.account_type)
    }
}

/// A record as returned to clients; `id` is the 24-character hex identifier.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BankDetailsResponse {
    pub id: String,
    pub holder_name: String,
    pub phone_no: String,
    pub account_type: String,
}

impl From<BankDetails> for BankDetailsResponse {
    fn from(record: BankDetails) -> Self {
        Self {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            holder_name: record.holder_name,
            phone_no: record.phone_no,
            account_type: record.account_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BankMutationResponse {
    pub message: String,
    pub bank: BankDetailsResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
