//! Location and medal API endpoints.

use axum::extract::{Path, State};

use super::{respond, ApiResult};
use crate::models::{Location, Medal};
use crate::screens::LookupScreen;
use crate::AppState;

/// GET /api/locations/:pincode - Location by pincode.
pub async fn get_location(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> ApiResult<Location> {
    let screen = LookupScreen::new(state.repo.clone());
    respond(screen.location_by_pincode(&pincode).await)
}

/// GET /api/medals/:name - Medal by exact name.
pub async fn get_medal(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<Medal> {
    let screen = LookupScreen::new(state.repo.clone());
    respond(screen.medal_by_name(&name).await)
}
