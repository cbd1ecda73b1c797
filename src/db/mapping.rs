//! Document-to-record mapping.
//!
//! Holds every collection name and every historical field spelling used by
//! the store. Field variant lists are in priority order.

use super::fields::{as_flag, Fields};
use super::{Document, MappingError};
use crate::models::{
    Battalion, Inventory, Location, Medal, Posting, Soldier, SoldierStatus, Visited, War,
    WarStatus, Weapon, DEFAULT_WEAPON_CATEGORY, DEFAULT_WEAPON_DESCRIPTION,
};

/// Collection names in the document store.
pub mod collections {
    pub const SOLDIER: &str = "soldier";
    pub const SOLDIER_STATUS: &str = "SoldierStatus";
    pub const POSTING: &str = "posting";
    pub const VISITED: &str = "visited";
    pub const LOCATION: &str = "Location";
    pub const BATTALION: &str = "Battalion";
    pub const WEAPON: &str = "weapon";
    pub const INVENTORY: &str = "Inventory";
    pub const WAR: &str = "war";
    pub const MEDAL: &str = "Medals";
}

/// Fields used as query keys.
pub mod keys {
    pub const SOLDIER_ID: &str = "id";
    /// Posting -> soldier link, probed in order; the first non-empty result wins
    pub const POSTING_SOLDIER: &[&str] = &["id", "soldier_id", "soldId"];
    /// Status -> soldier link, probed in order
    pub const STATUS_SOLDIER: &[&str] = &["ID", "id", "soldier_id"];
    pub const VISIT_SOLDIER: &str = "sold_id";
    pub const LOCATION_PINCODE: &str = "pincode";
    pub const BATTALION_CAPTAIN: &str = "captain_id";
    pub const WEAPON_ID: &str = "weapon_id";
    pub const INVENTORY_ID: &str = "ID";
    pub const WAR_DATE: &str = "DateNo";
    pub const MEDAL_NAME: &str = "Name";
}

mod soldier {
    pub const ID: &[&str] = &["id", "ID"];
    pub const NAME: &[&str] = &["name", "Name"];
    pub const RANK: &[&str] = &["rank", "Rank"];
    pub const SEX: &[&str] = &["sex", "Sex"];
    pub const HEIGHT: &[&str] = &["height", "Height"];
    pub const WEIGHT: &[&str] = &["weight", "Weight"];
    pub const CHEST: &[&str] = &["chest", "Chest"];
    pub const SQUAD_NO: &[&str] = &["squadNo", "SquadNo"];
    pub const BIRTH_PLACE_PINCODE: &[&str] = &["birthPlacePincode", "BirthPlacePincode"];
    pub const DATE_OF_JOINING: &[&str] = &["DOJ", "doj"];
    pub const BASIC_PAY: &[&str] = &["basic_pay", "basicPay", "BasicPay", "BASIC_PAY", "basic"];
    pub const MEDALS: &[&str] = &["medals", "Medals"];
}

mod status {
    pub const ID: &[&str] = &["ID", "id"];
    pub const ALIVE: &[&str] = &["Alive", "alive"];
    pub const PINCODE: &[&str] = &["Pincode", "pincode"];
    pub const WAR_DATE: &[&str] = &["war_date_no", "warDateNo"];
}

mod posting {
    pub const ID: &[&str] = &["posting_id", "postingId", "id"];
    pub const DATE: &[&str] = &["start_date", "startDate", "date", "Date"];
    pub const PINCODE: &[&str] = &["pincode", "Pincode", "location"];
}

mod visited {
    pub const SOLDIER_ID: &[&str] = &["sold_id", "soldId"];
    pub const DATE: &[&str] = &["date", "Date"];
    pub const PINCODE: &[&str] = &["pincode", "Pincode"];
    pub const REASON: &[&str] = &["reason", "Reason"];
}

mod location {
    pub const COUNTRY: &[&str] = &["Country", "country"];
    pub const STATE: &[&str] = &["State", "state"];
    pub const DISTRICT: &[&str] = &["district", "District"];
    pub const PINCODE: &[&str] = &["pincode", "Pincode"];
}

mod battalion {
    pub const NAME: &[&str] = &["battalion_name", "Battalion_name", "name"];
    pub const CAPTAIN_ID: &[&str] = &["captain_id", "captainId"];
    pub const TOTAL_CAPACITY: &[&str] = &["total_capacity", "totalCapacity", "capacity"];
    pub const YEAR: &[&str] = &["year", "Year"];
}

mod weapon {
    pub const ID: &[&str] = &["weapon_id", "weaponId"];
    pub const NAME: &[&str] = &["name", "Name"];
    pub const MANUFACTURER: &[&str] = &["Manufacturer", "manufacturer"];
    pub const MANUFACTURER_DATE: &[&str] =
        &["Manufacturer date", "manufacturerDate", "manufacturer_date"];
    pub const CALIBER: &[&str] = &["caliber", "Caliber"];
    pub const RANGE: &[&str] = &["range", "Range"];
    pub const TOTAL: &[&str] = &["total", "Total"];
    pub const IMAGE_URL: &[&str] = &["imageURL", "imageUrl", "image_url"];
    pub const CATEGORY: &[&str] = &["category", "Category"];
    pub const DESCRIPTION: &[&str] = &["description", "Description"];
}

mod inventory {
    pub const ID: &[&str] = &["ID", "id"];
    pub const WEAPON_ID: &[&str] = &["weapon_id", "weaponId"];
}

mod war {
    pub const DATE_NO: &[&str] = &["DateNo", "dateNo", "date_no"];
    pub const STATUS: &[&str] = &["Status", "status"];
    pub const PINCODE: &[&str] = &["pincode", "Pincode"];
}

mod medal {
    pub const NAME: &[&str] = &["Name", "name"];
}

pub fn soldier_from_document(document: &Document) -> Result<Soldier, MappingError> {
    let f = Fields::of(document)?;
    Ok(Soldier {
        id: f.int(soldier::ID),
        name: f.text(soldier::NAME),
        rank: f.text(soldier::RANK),
        sex: f.text(soldier::SEX),
        height: f.int(soldier::HEIGHT),
        weight: f.int(soldier::WEIGHT),
        chest: f.int(soldier::CHEST),
        squad_no: f.text(soldier::SQUAD_NO),
        birth_place_pincode: f.int(soldier::BIRTH_PLACE_PINCODE),
        date_of_joining: f.date(soldier::DATE_OF_JOINING),
        basic_pay: f.int(soldier::BASIC_PAY),
        medal_count: f.int(soldier::MEDALS),
    })
}

pub fn status_from_document(document: &Document) -> Result<SoldierStatus, MappingError> {
    let f = Fields::of(document)?;
    Ok(SoldierStatus {
        id: f.int(status::ID),
        alive: f.first(status::ALIVE, as_flag).unwrap_or(true),
        pincode: f.int(status::PINCODE),
        war_date_ref: f.date(status::WAR_DATE),
    })
}

pub fn posting_from_document(document: &Document) -> Result<Posting, MappingError> {
    let f = Fields::of(document)?;
    Ok(Posting {
        id: f.int(posting::ID),
        date: f.date(posting::DATE),
        pincode: f.int(posting::PINCODE),
    })
}

pub fn visit_from_document(document: &Document) -> Result<Visited, MappingError> {
    let f = Fields::of(document)?;
    Ok(Visited {
        soldier_id: f.int(visited::SOLDIER_ID),
        date: f.date(visited::DATE),
        pincode: f.int(visited::PINCODE),
        reason: f.text(visited::REASON),
    })
}

pub fn location_from_document(document: &Document) -> Result<Location, MappingError> {
    let f = Fields::of(document)?;
    Ok(Location {
        country: f.text(location::COUNTRY),
        state: f.text(location::STATE),
        district: f.text(location::DISTRICT),
        pincode: f.int(location::PINCODE),
    })
}

pub fn battalion_from_document(document: &Document) -> Result<Battalion, MappingError> {
    let f = Fields::of(document)?;
    Ok(Battalion {
        name: f.text(battalion::NAME),
        captain_id: f.int(battalion::CAPTAIN_ID),
        total_capacity: f.int(battalion::TOTAL_CAPACITY),
        year: f.int(battalion::YEAR),
    })
}

pub fn weapon_from_document(document: &Document) -> Result<Weapon, MappingError> {
    let f = Fields::of(document)?;
    Ok(Weapon {
        weapon_id: f.int(weapon::ID),
        name: f.text(weapon::NAME),
        manufacturer: f.text(weapon::MANUFACTURER),
        manufacturer_date: f.date(weapon::MANUFACTURER_DATE),
        caliber: f.float(weapon::CALIBER),
        range: f.int(weapon::RANGE),
        total: f.int(weapon::TOTAL),
        image_url: f.text(weapon::IMAGE_URL),
        category: f.text_or(weapon::CATEGORY, DEFAULT_WEAPON_CATEGORY),
        description: f.text_or(weapon::DESCRIPTION, DEFAULT_WEAPON_DESCRIPTION),
    })
}

pub fn inventory_from_document(document: &Document) -> Result<Inventory, MappingError> {
    let f = Fields::of(document)?;
    Ok(Inventory {
        id: f.int(inventory::ID),
        weapon_id: f.int(inventory::WEAPON_ID),
    })
}

pub fn war_from_document(document: &Document) -> Result<War, MappingError> {
    let f = Fields::of(document)?;
    Ok(War {
        date_no: f.date(war::DATE_NO),
        status: WarStatus::from_flag(f.int(war::STATUS)),
        pincode: f.int(war::PINCODE),
    })
}

pub fn medal_from_document(document: &Document) -> Result<Medal, MappingError> {
    let f = Fields::of(document)?;
    Ok(Medal {
        name: f.text(medal::NAME),
    })
}

/// Map a batch, dropping (and logging) documents that cannot be mapped.
pub fn map_all<T>(
    collection: &str,
    documents: &[Document],
    map: fn(&Document) -> Result<T, MappingError>,
) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match map(document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection, "Skipping document: {}", e);
                None
            }
        })
        .collect()
}

/// First document of a result set that maps cleanly.
pub fn map_first<T>(
    collection: &str,
    documents: &[Document],
    map: fn(&Document) -> Result<T, MappingError>,
) -> Option<T> {
    documents.iter().find_map(|document| match map(document) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(collection, "Skipping document: {}", e);
            None
        }
    })
}
