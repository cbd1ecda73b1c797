//! Weapon and inventory records.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WEAPON_CATEGORY: &str = "Assault Rifle";
pub const DEFAULT_WEAPON_DESCRIPTION: &str =
    "Iconic, rugged, weapon known for reliability and impact.";

/// A weapon model held in the armoury.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub weapon_id: i64,
    pub name: String,
    pub manufacturer: String,
    pub manufacturer_date: String,
    pub caliber: f64,
    /// Effective range in metres
    pub range: i64,
    pub total: i64,
    pub image_url: String,
    pub category: String,
    pub description: String,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            weapon_id: 0,
            name: String::new(),
            manufacturer: String::new(),
            manufacturer_date: String::new(),
            caliber: 0.0,
            range: 0,
            total: 0,
            image_url: String::new(),
            category: DEFAULT_WEAPON_CATEGORY.to_string(),
            description: DEFAULT_WEAPON_DESCRIPTION.to_string(),
        }
    }
}

/// An inventory entry pointing at a weapon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: i64,
    pub weapon_id: i64,
}
