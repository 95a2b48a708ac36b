//! Navigation states — URL patterns bound to view templates.
//!
//! DESIGN
//! ======
//! The site navigates like an old-school SPA state table: each state names a
//! view, the URL pattern that activates it, and the template shell it renders.
//! A state with a resolve step (the edit view) computes its value *before*
//! anything is written to the client; a failed resolve means the state never
//! activates. Unmatched URLs fall back to the project list.
//!
//! Templates are plain HTML files. The handler injects the resolved view
//! model as a JSON `<script>` bootstrap replacing a marker comment, and the
//! page's own script takes it from there.

use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};

use crate::routes::projects::project_error_to_status;
use crate::services::project;
use crate::state::AppState;

// =============================================================================
// STATE TABLE
// =============================================================================

/// A named application view bound to a URL pattern and a template file.
pub struct StateDef {
    pub name: &'static str,
    pub url: &'static str,
    pub template: &'static str,
}

/// Registered navigation states.
pub const STATES: &[StateDef] = &[
    StateDef { name: "projects", url: "/projects", template: "project_list.html" },
    StateDef {
        name: "projectEdit",
        url: "/projects/{project_id}/edit",
        template: "project_edit.html",
    },
];

pub(crate) fn state_by_name(name: &str) -> Option<&'static StateDef> {
    STATES.iter().find(|s| s.name == name)
}

// =============================================================================
// RENDERING
// =============================================================================

const BOOTSTRAP_MARKER: &str = "<!-- cvmaker:bootstrap -->";

/// Resolve the template directory (`TEMPLATES_DIR` env override).
fn templates_dir() -> PathBuf {
    std::env::var("TEMPLATES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/templates"))
}

/// Replace the bootstrap marker with the resolved view model.
/// `<` is escaped in the payload so data can never close the script tag.
pub(crate) fn inject_bootstrap(template: &str, state_name: &str, model: &serde_json::Value) -> String {
    let payload = serde_json::json!({ "state": state_name, "model": model })
        .to_string()
        .replace('<', "\\u003c");
    template.replace(
        BOOTSTRAP_MARKER,
        &format!(r#"<script id="bootstrap" type="application/json">{payload}</script>"#),
    )
}

async fn render_state(def: &StateDef, model: serde_json::Value) -> Result<Html<String>, StatusCode> {
    tracing::debug!(state = def.name, url = def.url, "activating state");
    let path = templates_dir().join(def.template);
    let template = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::error!(error = %e, template = def.template, "template read failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Html(inject_bootstrap(&template, def.name, &model)))
}

/// Parse a URL project identifier. Only numeric identifiers name stored
/// projects; anything else is a miss (the `new` form has its own route).
pub(crate) fn parse_project_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

// =============================================================================
// STATE HANDLERS
// =============================================================================

/// `GET /projects` — the project list state.
pub async fn project_list(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let projects = project::list_projects(&state.pool)
        .await
        .map_err(project_error_to_status)?;

    let def = state_by_name("projects").ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    render_state(def, serde_json::json!({ "projects": projects })).await
}

/// `GET /projects/:project_id/edit` — edit state for a stored project.
/// The project is resolved before the template is rendered.
pub async fn project_edit(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let id = parse_project_id(&project_id).ok_or(StatusCode::NOT_FOUND)?;
    let resolved = project::resolve_project(&state.pool, Some(id))
        .await
        .map_err(project_error_to_status)?;

    let def = state_by_name("projectEdit").ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    render_state(def, serde_json::json!({ "project": resolved })).await
}

/// `GET /projects/new/edit` — edit state for a not-yet-saved project.
/// Synthesizes the default (empty technology list) without a storage fetch.
pub async fn project_new(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let resolved = project::resolve_project(&state.pool, None)
        .await
        .map_err(project_error_to_status)?;

    let def = state_by_name("projectEdit").ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    render_state(def, serde_json::json!({ "project": resolved })).await
}

/// Any unmatched URL lands back on the project list.
pub async fn fallback_to_projects() -> Redirect {
    Redirect::temporary("/projects")
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
