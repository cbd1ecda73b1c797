//! Location lookup record.

use serde::{Deserialize, Serialize};

/// A place, keyed by pincode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country: String,
    pub state: String,
    pub district: String,
    pub pincode: i64,
}
