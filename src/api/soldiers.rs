//! Soldier API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{respond, ApiResult};
use crate::models::{Soldier, SoldierDetail};
use crate::screens::SoldierScreen;
use crate::AppState;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Maximum number of soldiers (default: configured list limit).
    pub limit: Option<usize>,
}

/// Name search query parameters.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

/// GET /api/soldiers - List soldiers in retrieval order.
pub async fn list_soldiers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Soldier>> {
    let limit = query.limit.unwrap_or(state.config.soldier_list_limit);
    respond(Ok(state.repo.list_soldiers(limit).await))
}

/// GET /api/soldiers/search?name= - Soldiers whose name contains the input.
pub async fn search_soldiers(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Vec<Soldier>> {
    let screen = SoldierScreen::new(state.repo.clone());
    respond(screen.search_by_name(&query.name).await)
}

/// GET /api/soldiers/:id - Soldier with status, postings, visits and birthplace.
pub async fn get_soldier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SoldierDetail> {
    let screen = SoldierScreen::new(state.repo.clone());
    respond(screen.search_by_id(&id).await)
}
