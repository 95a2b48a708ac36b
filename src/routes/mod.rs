//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the navigation states (server-rendered pages), the JSON
//! API, and the GitHub OAuth endpoints under a single Axum router. Static
//! assets are served under `/assets`; every URL nothing else matches
//! redirects to the project list.

pub mod auth;
pub mod pages;
pub mod projects;
pub mod technologies;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Resolve the static asset directory (`ASSETS_DIR` env override).
fn assets_dir() -> PathBuf {
    std::env::var("ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Navigation states. `/projects/new/edit` must be its own route so the
        // edit state can activate without an identifier (and without a fetch).
        .route("/projects", get(pages::project_list))
        .route("/projects/new/edit", get(pages::project_new))
        .route("/projects/{project_id}/edit", get(pages::project_edit))
        // GitHub OAuth + session endpoints.
        .route("/auth/github", get(auth::github_redirect))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        // JSON API.
        .route(
            "/api/projects",
            get(projects::list_projects_rest).post(projects::create_project_rest),
        )
        .route("/api/projects/export.jsonl", get(projects::export_jsonl))
        .route("/api/projects/import.jsonl", post(projects::import_jsonl))
        .route(
            "/api/projects/{id}",
            get(projects::get_project_rest)
                .patch(projects::update_project_rest)
                .delete(projects::delete_project_rest),
        )
        .route(
            "/api/technologies",
            get(technologies::list_technologies_rest).post(technologies::create_technology_rest),
        )
        .route("/healthz", get(healthz))
        .nest_service("/assets", ServeDir::new(assets_dir()))
        .fallback(pages::fallback_to_projects)
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
