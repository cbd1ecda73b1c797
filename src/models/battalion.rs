//! Battalion record.

use serde::{Deserialize, Serialize};

/// A military unit.
///
/// The store keys battalions by their captain's soldier id; there is no
/// battalion identifier of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battalion {
    pub name: String,
    pub captain_id: i64,
    pub total_capacity: i64,
    pub year: i64,
}
