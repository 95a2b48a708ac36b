//! Project REST routes — public reads, authenticated writes, JSONL snapshots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::routes::auth::AuthUser;
use crate::services::project::{self, NewProject, Project, ProjectPatch};
use crate::state::AppState;

pub(crate) fn project_error_to_status(err: project::ProjectError) -> StatusCode {
    match err {
        project::ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
        project::ProjectError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// `GET /api/projects` — list all projects. Public: the CV is readable by
/// anyone, only edits require a session.
pub async fn list_projects_rest(State(state): State<AppState>) -> Result<Json<Vec<Project>>, StatusCode> {
    let projects = project::list_projects(&state.pool)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(projects))
}

/// `GET /api/projects/:id` — fetch one project. Public.
pub async fn get_project_rest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, StatusCode> {
    let found = project::get_project(&state.pool, id)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(found))
}

#[derive(Deserialize)]
pub struct CreateProjectBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
}

/// `POST /api/projects` — create a project.
pub async fn create_project_rest(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<Project>), StatusCode> {
    let new = NewProject {
        name: body.name.unwrap_or_else(|| "Untitled Project".to_owned()),
        description: body.description.unwrap_or_default(),
        technologies: body.technologies.unwrap_or_default(),
    };
    let created = project::create_project(&state.pool, new, Some(auth.user.id))
        .await
        .map_err(project_error_to_status)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Deserialize)]
pub struct PatchProjectBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
}

/// `PATCH /api/projects/:id` — partial update.
pub async fn update_project_rest(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<PatchProjectBody>,
) -> Result<Json<Project>, StatusCode> {
    let patch = ProjectPatch {
        name: body.name,
        description: body.description,
        technologies: body.technologies,
    };
    let updated = project::update_project(&state.pool, id, patch)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/projects/:id` — delete one project.
pub async fn delete_project_rest(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    project::delete_project(&state.pool, id)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

// =============================================================================
// JSONL SNAPSHOTS
// =============================================================================

#[derive(Serialize)]
struct ExportMetaLine {
    #[serde(rename = "type")]
    line_type: &'static str,
    version: u8,
    exported_at_ms: u128,
    project_count: usize,
}

#[derive(Serialize)]
struct ExportProjectLine {
    #[serde(rename = "type")]
    line_type: &'static str,
    #[serde(flatten)]
    project: Project,
}

/// `GET /api/projects/export.jsonl` — download the CV's projects as NDJSON.
pub async fn export_jsonl(State(state): State<AppState>, _auth: AuthUser) -> Result<Response, StatusCode> {
    let projects = project::list_projects(&state.pool)
        .await
        .map_err(project_error_to_status)?;

    let exported_at_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());

    let mut lines = Vec::with_capacity(projects.len() + 1);
    let meta = ExportMetaLine {
        line_type: "cv_export_meta",
        version: 1,
        exported_at_ms,
        project_count: projects.len(),
    };
    let meta_line = serde_json::to_string(&meta).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    lines.push(format!("{meta_line}\n"));

    for p in projects {
        let line = ExportProjectLine { line_type: "project", project: p };
        let serialized = serde_json::to_string(&line).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        lines.push(format!("{serialized}\n"));
    }

    let stream = futures::stream::iter(
        lines
            .into_iter()
            .map(|line| Ok::<axum::body::Bytes, std::convert::Infallible>(axum::body::Bytes::from(line))),
    );
    let body = axum::body::Body::from_stream(stream);

    Ok((
        [
            (CONTENT_TYPE, "application/x-ndjson; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"cv-projects.jsonl\""),
        ],
        body,
    )
        .into_response())
}

/// Parse one import line. Meta lines and lines of unknown shape yield
/// `Ok(None)` so callers can count them as skipped.
pub(crate) fn parse_import_project_line(line: &str) -> Result<Option<Project>, serde_json::Error> {
    let value = serde_json::from_str::<serde_json::Value>(line)?;
    let Some(map) = value.as_object() else {
        return Ok(None);
    };

    let line_type = map.get("type").and_then(serde_json::Value::as_str);
    if line_type == Some("cv_export_meta") {
        return Ok(None);
    }
    if line_type != Some("project") && !map.contains_key("name") {
        return Ok(None);
    }

    let name = map
        .get("name")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Untitled Project")
        .to_owned();
    let description = map
        .get("description")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let technologies = map
        .get("technologies")
        .map(crate::services::project::technologies_from_json)
        .unwrap_or_default();
    let version = map
        .get("version")
        .and_then(serde_json::Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(1)
        .max(1);

    Ok(Some(Project {
        id: None,
        name,
        description,
        technologies,
        created_by: None,
        version,
    }))
}

#[derive(Deserialize)]
pub struct ImportJsonlBody {
    pub jsonl: String,
}

#[derive(Serialize)]
pub struct ImportJsonlResponse {
    pub imported: usize,
    pub skipped: usize,
}

/// `POST /api/projects/import.jsonl` — restore projects from an NDJSON snapshot.
pub async fn import_jsonl(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ImportJsonlBody>,
) -> Result<Json<ImportJsonlResponse>, StatusCode> {
    let mut projects = Vec::new();
    let mut skipped = 0_usize;

    for raw_line in body.jsonl.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_import_project_line(line) {
            Ok(Some(p)) => projects.push(p),
            Ok(None) | Err(_) => skipped = skipped.saturating_add(1),
        }
    }

    if projects.is_empty() {
        return Ok(Json(ImportJsonlResponse { imported: 0, skipped }));
    }

    let imported = project::insert_imported(&state.pool, &projects, Some(auth.user.id))
        .await
        .map_err(project_error_to_status)?;

    Ok(Json(ImportJsonlResponse { imported, skipped }))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
