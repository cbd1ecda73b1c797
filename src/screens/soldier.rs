//! Soldier search screen.

use crate::db::{sample, Repository, VISIT_SAMPLE_SIZE};
use crate::errors::AppError;
use crate::models::{Soldier, SoldierDetail};

use super::{parse_id, require_non_blank, Screen};

pub const INVALID_SOLDIER_ID: &str = "Please enter a valid soldier ID";
pub const BLANK_SOLDIER_NAME: &str = "Please enter a soldier name";

/// Soldier search: lookup by id with full detail, or by name prefix.
pub struct SoldierScreen {
    repo: Repository,
    detail: Screen<SoldierDetail>,
    results: Screen<Vec<Soldier>>,
}

impl SoldierScreen {
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            detail: Screen::new(),
            results: Screen::new(),
        }
    }

    /// Load a soldier and everything shown alongside it.
    ///
    /// Sub-queries run one after another: soldier, status, postings, visits,
    /// then the birth location.
    pub async fn search_by_id(&self, input: &str) -> Result<SoldierDetail, AppError> {
        self.detail
            .run(async {
                let id = parse_id(input, INVALID_SOLDIER_ID)?;
                let soldier = self.repo.find_soldier_by_id(id).await.ok_or_else(|| {
                    AppError::NotFound(format!("Soldier with ID {} not found", id))
                })?;

                let status = self.repo.find_status_for_soldier(id).await;
                let postings = self.repo.find_postings_for_soldier(id).await;
                let visits = shown_visits(self.repo.find_visits_for_soldier(id).await);
                let birth_location = self
                    .repo
                    .find_location_by_pincode(soldier.birth_place_pincode)
                    .await;

                tracing::debug!(
                    id,
                    postings = postings.len(),
                    visits = visits.len(),
                    "Loaded soldier detail"
                );

                Ok(SoldierDetail {
                    soldier,
                    status,
                    postings,
                    visits,
                    birth_location,
                })
            })
            .await
    }

    pub async fn search_by_name(&self, input: &str) -> Result<Vec<Soldier>, AppError> {
        self.results
            .run(async {
                let name = require_non_blank(input, BLANK_SOLDIER_NAME)?;
                let soldiers = self.repo.search_soldiers_by_name_prefix(name).await;
                if soldiers.is_empty() {
                    return Err(AppError::NotFound(format!(
                        "No soldiers found matching {}",
                        name
                    )));
                }
                Ok(soldiers)
            })
            .await
    }
}

fn shown_visits<T>(visits: Vec<T>) -> Vec<T> {
    if visits.len() > VISIT_SAMPLE_SIZE {
        sample(visits, VISIT_SAMPLE_SIZE)
    } else {
        visits
    }
}

// Views for embedding front-ends; HTTP handlers only use returned results.
#[allow(dead_code)]
impl SoldierScreen {
    pub fn detail(&self) -> &Screen<SoldierDetail> {
        &self.detail
    }

    pub fn results(&self) -> &Screen<Vec<Soldier>> {
        &self.results
    }

    /// Reset both views to their initial state.
    pub fn clear(&self) {
        self.detail.clear();
        self.results.clear();
    }
}
