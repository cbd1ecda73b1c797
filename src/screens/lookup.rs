//! Single-record lookups keyed by a value typed into a search field.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{Inventory, Location, Medal, War};

use super::{parse_id, require_non_blank, Screen};

pub const INVALID_PINCODE: &str = "Please enter a valid pincode";
pub const BLANK_WAR_DATE: &str = "Please enter a war date";
pub const BLANK_MEDAL_NAME: &str = "Please enter a medal name";
pub const INVALID_INVENTORY_ID: &str = "Please enter a valid inventory ID";

pub struct LookupScreen {
    repo: Repository,
    location: Screen<Location>,
    war: Screen<War>,
    medal: Screen<Medal>,
    inventory: Screen<Inventory>,
}

impl LookupScreen {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            location: Screen::new(),
            war: Screen::new(),
            medal: Screen::new(),
            inventory: Screen::new(),
        }
    }

    pub async fn location_by_pincode(&self, input: &str) -> Result<Location, AppError> {
        self.location
            .run(async {
                let pincode = parse_id(input, INVALID_PINCODE)?;
                self.repo
                    .find_location_by_pincode(pincode)
                    .await
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Location with pincode {} not found", pincode))
                    })
            })
            .await
    }

    pub async fn war_by_date(&self, input: &str) -> Result<War, AppError> {
        self.war
            .run(async {
                let date = require_non_blank(input, BLANK_WAR_DATE)?;
                self.repo
                    .find_war_by_date(date)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("War on {} not found", date)))
            })
            .await
    }

    pub async fn medal_by_name(&self, input: &str) -> Result<Medal, AppError> {
        self.medal
            .run(async {
                let name = require_non_blank(input, BLANK_MEDAL_NAME)?;
                self.repo
                    .find_medal_by_name(name)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("Medal {} not found", name)))
            })
            .await
    }

    pub async fn inventory_by_id(&self, input: &str) -> Result<Inventory, AppError> {
        self.inventory
            .run(async {
                let id = parse_id(input, INVALID_INVENTORY_ID)?;
                self.repo
                    .find_inventory_by_id(id)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("Inventory with ID {} not found", id)))
            })
            .await
    }
}

// Views for embedding front-ends; HTTP handlers only use returned results.
#[allow(dead_code)]
impl LookupScreen {
    pub fn location(&self) -> &Screen<Location> {
        &self.location
    }

    pub fn war(&self) -> &Screen<War> {
        &self.war
    }

    pub fn medal(&self) -> &Screen<Medal> {
        &self.medal
    }

    pub fn inventory(&self) -> &Screen<Inventory> {
        &self.inventory
    }
}
