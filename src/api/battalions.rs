//! Battalion API endpoints.

use axum::extract::{Path, State};

use super::{respond, ApiResult};
use crate::models::Battalion;
use crate::screens::BattalionScreen;
use crate::AppState;

/// GET /api/battalions - List all battalions.
pub async fn list_battalions(State(state): State<AppState>) -> ApiResult<Vec<Battalion>> {
    let screen = BattalionScreen::new(state.repo.clone());
    respond(screen.list().await)
}

/// GET /api/battalions/:captain_id - Battalion commanded by a captain.
pub async fn get_battalion(
    State(state): State<AppState>,
    Path(captain_id): Path<String>,
) -> ApiResult<Battalion> {
    let screen = BattalionScreen::new(state.repo.clone());
    respond(screen.load_by_captain(&captain_id).await)
}
