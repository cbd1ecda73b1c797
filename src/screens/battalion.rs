//! Battalion list and captain lookup screen.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::Battalion;

use super::{parse_id, Screen};

pub const INVALID_CAPTAIN_ID: &str = "Please enter a valid captain ID";

/// Battalion list and lookup by commanding captain.
pub struct BattalionScreen {
    repo: Repository,
    battalions: Screen<Vec<Battalion>>,
    battalion: Screen<Battalion>,
}

impl BattalionScreen {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            battalions: Screen::new(),
            battalion: Screen::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Battalion>, AppError> {
        self.battalions
            .run(async { Ok(self.repo.list_battalions().await) })
            .await
    }

    pub async fn load_by_captain(&self, input: &str) -> Result<Battalion, AppError> {
        self.battalion
            .run(async {
                let captain_id = parse_id(input, INVALID_CAPTAIN_ID)?;
                self.repo
                    .find_battalion_by_captain_id(captain_id)
                    .await
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "Battalion with captain ID {} not found",
                            captain_id
                        ))
                    })
            })
            .await
    }
}

// Views for embedding front-ends; HTTP handlers only use returned results.
#[allow(dead_code)]
impl BattalionScreen {
    pub fn battalions(&self) -> &Screen<Vec<Battalion>> {
        &self.battalions
    }

    pub fn battalion(&self) -> &Screen<Battalion> {
        &self.battalion
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::mapping::collections;
    use crate::db::MemoryDocumentStore;
    use serde_json::json;

    async fn screen() -> BattalionScreen {
        let store = MemoryDocumentStore::new();
        store
            .insert_all(
                collections::BATTALION,
                vec![
                    json!({"battalion_name": "13 JAK RIF", "captain_id": 7, "total_capacity": 800}),
                    json!({"battalion_name": "18 Grenadiers", "captainId": 8, "Year": 1976}),
                ],
            )
            .await;
        BattalionScreen::new(Repository::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_list_battalions() {
        let screen = screen().await;
        let battalions = screen.list().await.unwrap();
        assert_eq!(battalions.len(), 2);
        assert_eq!(battalions[1].captain_id, 8);
        assert_eq!(battalions[1].year, 1976);
    }

    #[tokio::test]
    async fn test_load_by_captain() {
        let screen = screen().await;
        let battalion = screen.load_by_captain("7").await.unwrap();
        assert_eq!(battalion.name, "13 JAK RIF");
        assert_eq!(battalion.total_capacity, 800);

        // Only the query key spelling is searched
        assert!(matches!(
            screen.load_by_captain("8").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            screen.load_by_captain("x").await,
            Err(AppError::Validation(_))
        ));
    }
}
