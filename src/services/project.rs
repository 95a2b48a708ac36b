//! Project service — CRUD and the edit-view resolve.
//!
//! DESIGN
//! ======
//! Projects are the CV's portfolio entries. The `technologies` column is a
//! JSONB array of names so the set of tags stays free-form; the separate
//! `technologies` catalog table only feeds autocomplete.
//!
//! The edit view never renders without a project in hand: `resolve_project`
//! either fetches the stored row or synthesizes an unsaved default, and the
//! page handler awaits it before touching the template.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A CV project entry. Mirrors the `projects` table.
///
/// `id` is `None` for a project that has not been saved yet (the default the
/// edit view starts from when no identifier is in the URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub created_by: Option<Uuid>,
    pub version: i32,
}

impl Project {
    /// A fresh, unsaved project with an empty technology list.
    #[must_use]
    pub fn default_new() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            technologies: Vec::new(),
            created_by: None,
            version: 1,
        }
    }
}

/// Fields accepted when creating a project.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
}

/// Decode the JSONB `technologies` column into a list of names.
/// Anything that isn't an array of strings decodes as empty.
pub(crate) fn technologies_from_json(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

type ProjectTuple = (i64, String, String, serde_json::Value, Option<Uuid>, i32);

fn from_tuple((id, name, description, technologies, created_by, version): ProjectTuple) -> Project {
    Project {
        id: Some(id),
        name,
        description,
        technologies: technologies_from_json(&technologies),
        created_by,
        version,
    }
}

// =============================================================================
// RESOLVE
// =============================================================================

/// Resolve the project for the edit view.
///
/// With an identifier, delegates to [`get_project`]. Without one, synthesizes
/// an unsaved default with an empty technology list — no storage round trip.
///
/// # Errors
///
/// Returns `NotFound` if an identifier is given but names no stored project.
pub async fn resolve_project(pool: &PgPool, project_id: Option<i64>) -> Result<Project, ProjectError> {
    match project_id {
        Some(id) => get_project(pool, id).await,
        None => Ok(Project::default_new()),
    }
}

// =============================================================================
// CRUD
// =============================================================================

/// List all projects in CV order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_projects(pool: &PgPool) -> Result<Vec<Project>, ProjectError> {
    let rows = sqlx::query_as::<_, ProjectTuple>(
        "SELECT id, name, description, technologies, created_by, version
         FROM projects
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(from_tuple).collect())
}

/// Fetch one project by id.
///
/// # Errors
///
/// Returns `NotFound` if no row matches.
pub async fn get_project(pool: &PgPool, id: i64) -> Result<Project, ProjectError> {
    let row = sqlx::query_as::<_, ProjectTuple>(
        "SELECT id, name, description, technologies, created_by, version
         FROM projects
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProjectError::NotFound(id))?;

    Ok(from_tuple(row))
}

/// Create a new project.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_project(
    pool: &PgPool,
    new: NewProject,
    created_by: Option<Uuid>,
) -> Result<Project, ProjectError> {
    let technologies = serde_json::json!(new.technologies);
    let row = sqlx::query_as::<_, ProjectTuple>(
        "INSERT INTO projects (name, description, technologies, created_by)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, description, technologies, created_by, version",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(technologies)
    .bind(created_by)
    .fetch_one(pool)
    .await?;

    Ok(from_tuple(row))
}

/// Apply a partial update and bump the version.
///
/// # Errors
///
/// Returns `NotFound` if no row matches.
pub async fn update_project(pool: &PgPool, id: i64, patch: ProjectPatch) -> Result<Project, ProjectError> {
    let mut project = get_project(pool, id).await?;

    if let Some(name) = patch.name {
        project.name = name;
    }
    if let Some(description) = patch.description {
        project.description = description;
    }
    if let Some(technologies) = patch.technologies {
        project.technologies = technologies;
    }
    project.version = project.version.saturating_add(1);

    sqlx::query(
        "UPDATE projects
         SET name = $2, description = $3, technologies = $4, version = $5, updated_at = now()
         WHERE id = $1",
    )
    .bind(id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(serde_json::json!(project.technologies))
    .bind(project.version)
    .execute(pool)
    .await?;

    Ok(project)
}

/// Delete one project.
///
/// # Errors
///
/// Returns `NotFound` if no row matches.
pub async fn delete_project(pool: &PgPool, id: i64) -> Result<(), ProjectError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ProjectError::NotFound(id));
    }
    Ok(())
}

/// Insert a batch of imported projects. Ids are assigned by the database;
/// imported ids are never trusted.
///
/// # Errors
///
/// Returns a database error if any insert fails.
pub async fn insert_imported(
    pool: &PgPool,
    projects: &[Project],
    created_by: Option<Uuid>,
) -> Result<usize, ProjectError> {
    let mut inserted = 0_usize;
    for project in projects {
        sqlx::query(
            "INSERT INTO projects (name, description, technologies, created_by, version)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(serde_json::json!(project.technologies))
        .bind(created_by)
        .bind(project.version)
        .execute(pool)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
