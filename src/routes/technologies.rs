//! Technology catalog routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::routes::auth::AuthUser;
use crate::services::technology::{self, TechnologyRow, normalize_name};
use crate::state::AppState;

/// `GET /api/technologies` — list the catalog. Public.
pub async fn list_technologies_rest(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechnologyRow>>, StatusCode> {
    let rows = technology::list_technologies(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct CreateTechnologyBody {
    pub name: String,
}

/// `POST /api/technologies` — add a catalog entry.
pub async fn create_technology_rest(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CreateTechnologyBody>,
) -> Result<(StatusCode, Json<TechnologyRow>), StatusCode> {
    let Some(name) = normalize_name(&body.name) else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let row = technology::add_technology(&state.pool, &name)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((StatusCode::CREATED, Json(row)))
}
