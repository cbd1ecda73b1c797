//! Weapon detail screen.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::Weapon;

use super::{parse_id, Screen};

pub const INVALID_WEAPON_ID: &str = "Please enter a valid weapon ID";

/// Weapon detail by weapon id.
pub struct WeaponScreen {
    repo: Repository,
    weapon: Screen<Weapon>,
}

impl WeaponScreen {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            weapon: Screen::new(),
        }
    }

    pub async fn load_by_id(&self, input: &str) -> Result<Weapon, AppError> {
        self.weapon
            .run(async {
                let id = parse_id(input, INVALID_WEAPON_ID)?;
                self.repo
                    .find_weapon_by_id(id)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("Weapon with ID {} not found", id)))
            })
            .await
    }
}

// Views for embedding front-ends; HTTP handlers only use returned results.
#[allow(dead_code)]
impl WeaponScreen {
    pub fn weapon(&self) -> &Screen<Weapon> {
        &self.weapon
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::mapping::collections;
    use crate::db::MemoryDocumentStore;
    use crate::models::DEFAULT_WEAPON_CATEGORY;
    use serde_json::json;

    async fn screen() -> WeaponScreen {
        let store = MemoryDocumentStore::new();
        store
            .insert_all(
                collections::WEAPON,
                vec![json!({"weapon_id": 3, "name": "INSAS", "caliber": 5.56, "Range": "400"})],
            )
            .await;
        WeaponScreen::new(Repository::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_load_by_id() {
        let screen = screen().await;
        let weapon = screen.load_by_id("3").await.unwrap();
        assert_eq!(weapon.name, "INSAS");
        assert_eq!(weapon.caliber, 5.56);
        assert_eq!(weapon.range, 400);
        assert_eq!(weapon.category, DEFAULT_WEAPON_CATEGORY);
    }

    #[tokio::test]
    async fn test_invalid_and_missing_weapons() {
        let screen = screen().await;
        assert_eq!(
            screen.load_by_id("").await,
            Err(AppError::Validation(INVALID_WEAPON_ID.to_string()))
        );
        assert_eq!(
            screen.load_by_id("12").await,
            Err(AppError::NotFound("Weapon with ID 12 not found".to_string()))
        );
        assert_eq!(
            screen.weapon().snapshot().error.as_deref(),
            Some("Weapon with ID 12 not found")
        );
    }
}
