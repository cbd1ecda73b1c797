//! Soldier records and the records keyed by a soldier id.

use serde::{Deserialize, Serialize};

use super::Location;

/// A member of military personnel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Soldier {
    pub id: i64,
    pub name: String,
    pub rank: String,
    pub sex: String,
    pub height: i64,
    pub weight: i64,
    pub chest: i64,
    pub squad_no: String,
    pub birth_place_pincode: i64,
    /// Formatted as `dd MMMM yyyy` when stored as a timestamp
    pub date_of_joining: String,
    pub basic_pay: i64,
    pub medal_count: i64,
}

/// Current status of a soldier, 1:1 with [`Soldier`] by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldierStatus {
    pub id: i64,
    pub alive: bool,
    pub pincode: i64,
    pub war_date_ref: String,
}

impl Default for SoldierStatus {
    fn default() -> Self {
        Self {
            id: 0,
            alive: true,
            pincode: 0,
            war_date_ref: String::new(),
        }
    }
}

/// A posting held by a soldier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: i64,
    pub date: String,
    pub pincode: i64,
}

/// A recorded visit by a soldier to a location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visited {
    pub soldier_id: i64,
    pub date: String,
    pub pincode: i64,
    pub reason: String,
}

/// Everything the soldier detail screen shows for one soldier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldierDetail {
    pub soldier: Soldier,
    pub status: Option<SoldierStatus>,
    pub postings: Vec<Posting>,
    pub visits: Vec<Visited>,
    pub birth_location: Option<Location>,
}
