//! Technology catalog — the flat list of tags offered when editing a project.

use sqlx::PgPool;

/// Row from the `technologies` table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TechnologyRow {
    pub id: i64,
    pub name: String,
}

/// Trim and validate a catalog name. Returns `None` for blank input.
pub(crate) fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() { None } else { Some(name.to_owned()) }
}

/// List the catalog, alphabetically.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_technologies(pool: &PgPool) -> Result<Vec<TechnologyRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, name FROM technologies ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| TechnologyRow { id, name })
        .collect())
}

/// Add a catalog entry, idempotently by name.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn add_technology(pool: &PgPool, name: &str) -> Result<TechnologyRow, sqlx::Error> {
    let row = sqlx::query_as::<_, (i64, String)>(
        "INSERT INTO technologies (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id, name",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(TechnologyRow { id: row.0, name: row.1 })
}

#[cfg(test)]
#[path = "technology_test.rs"]
mod tests;
