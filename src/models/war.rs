//! War records.

use serde::{Deserialize, Serialize};

/// Whether a war is over or still being fought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarStatus {
    /// Stored as 0
    #[default]
    Past,
    /// Stored as any non-zero flag, normally 1
    Ongoing,
}

impl WarStatus {
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 {
            WarStatus::Past
        } else {
            WarStatus::Ongoing
        }
    }
}

/// A war, identified by its date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct War {
    pub date_no: String,
    pub status: WarStatus,
    pub pincode: i64,
}

/// All wars split by status, each side in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarPartition {
    pub past_wars: Vec<War>,
    pub ongoing_wars: Vec<War>,
}

impl WarPartition {
    pub fn from_wars(wars: Vec<War>) -> Self {
        let (past_wars, ongoing_wars) = wars
            .into_iter()
            .partition(|war| war.status == WarStatus::Past);
        Self {
            past_wars,
            ongoing_wars,
        }
    }
}
