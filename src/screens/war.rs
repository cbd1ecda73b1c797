//! War overview screen.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::WarPartition;

use super::Screen;

/// Past and ongoing wars.
pub struct WarScreen {
    repo: Repository,
    wars: Screen<WarPartition>,
}

impl WarScreen {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            wars: Screen::new(),
        }
    }

    pub async fn load(&self) -> Result<WarPartition, AppError> {
        self.wars
            .run(async { Ok(self.repo.list_wars_partitioned().await) })
            .await
    }
}

// Views for embedding front-ends; HTTP handlers only use returned results.
#[allow(dead_code)]
impl WarScreen {
    pub fn wars(&self) -> &Screen<WarPartition> {
        &self.wars
    }
}
