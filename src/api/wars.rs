//! War API endpoints.

use axum::extract::{Path, State};

use super::{respond, ApiResult};
use crate::models::{War, WarPartition};
use crate::screens::{LookupScreen, WarScreen};
use crate::AppState;

/// GET /api/wars - All wars, split into past and ongoing.
pub async fn list_wars(State(state): State<AppState>) -> ApiResult<WarPartition> {
    let screen = WarScreen::new(state.repo.clone());
    respond(screen.load().await)
}

/// GET /api/wars/:date - War by its date key.
pub async fn get_war(State(state): State<AppState>, Path(date): Path<String>) -> ApiResult<War> {
    let screen = LookupScreen::new(state.repo.clone());
    respond(screen.war_by_date(&date).await)
}
