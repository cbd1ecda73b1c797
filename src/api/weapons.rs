//! Weapon and inventory API endpoints.

use axum::extract::{Path, State};

use super::{respond, ApiResult};
use crate::models::{Inventory, Weapon};
use crate::screens::{LookupScreen, WeaponScreen};
use crate::AppState;

/// GET /api/weapons/:id - Weapon by weapon id.
pub async fn get_weapon(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Weapon> {
    let screen = WeaponScreen::new(state.repo.clone());
    respond(screen.load_by_id(&id).await)
}

/// GET /api/inventory/:id - Inventory entry by id.
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Inventory> {
    let screen = LookupScreen::new(state.repo.clone());
    respond(screen.inventory_by_id(&id).await)
}
