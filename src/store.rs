//! Program store: the persistence collaborator for generated programs
//!
//! The generation core in `generator` is pure and never touches the database;
//! this module stores finished `GeneratedProgram` documents keyed by an opaque
//! id and hands them back for display or regeneration. Payloads are kept as
//! JSON columns so a stored program replays byte-for-byte through `generate`
//! under the same algorithm version.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::models::program::{GeneratedProgram, StoredProgram};
use crate::tables::BUILDER_TYPE;

/// Save a generated program and return its opaque id
pub async fn save_program(pool: &SqlitePool, program: &GeneratedProgram) -> Result<String, String> {
    let input_json = serde_json::to_string(&program.input_data)
        .map_err(|e| format!("Failed to encode program inputs: {}", e))?;
    let calculated_json = serde_json::to_string(&program.calculated_data)
        .map_err(|e| format!("Failed to encode calculated data: {}", e))?;
    let weeks_json = serde_json::to_string(&program.weeks)
        .map_err(|e| format!("Failed to encode weeks: {}", e))?;
    let now = Utc::now().to_rfc3339();

    let row = sqlx::query(
        r#"
        INSERT INTO programs (
            id, name, builder_type, algorithm_version,
            duration_weeks, days_per_week,
            input_json, calculated_json, weeks_json,
            created_at, updated_at
        )
        VALUES (lower(hex(randomblob(16))), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&program.name)
    .bind(BUILDER_TYPE)
    .bind(&program.algorithm_version)
    .bind(program.input_data.duration_weeks)
    .bind(program.input_data.days_per_week)
    .bind(&input_json)
    .bind(&calculated_json)
    .bind(&weeks_json)
    .bind(&now)
    .bind(&now)
    .fetch_one(pool)
    .await
    .map_err(|e| format!("Failed to save program: {}", e))?;

    Ok(row.get("id"))
}

/// Load a stored program by id
pub async fn load_program(pool: &SqlitePool, id: &str) -> Result<StoredProgram, String> {
    let row = sqlx::query(
        r#"
        SELECT id, name, builder_type, algorithm_version,
               duration_weeks, days_per_week,
               input_json, calculated_json, weeks_json,
               created_at, updated_at
        FROM programs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| format!("Failed to load program: {}", e))?
    .ok_or_else(|| format!("Program not found: {}", id))?;

    Ok(stored_from_row(&row))
}

/// List stored programs, newest first
pub async fn list_programs(pool: &SqlitePool) -> Result<Vec<StoredProgram>, String> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, builder_type, algorithm_version,
               duration_weeks, days_per_week,
               input_json, calculated_json, weeks_json,
               created_at, updated_at
        FROM programs
        ORDER BY created_at DESC, id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| format!("Failed to list programs: {}", e))?;

    Ok(rows.iter().map(stored_from_row).collect())
}

/// Delete a stored program by id
pub async fn delete_program(pool: &SqlitePool, id: &str) -> Result<(), String> {
    let result = sqlx::query("DELETE FROM programs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| format!("Failed to delete program: {}", e))?;

    if result.rows_affected() == 0 {
        return Err(format!("Program not found: {}", id));
    }

    Ok(())
}

/// Rebuild the full program document from its stored JSON payloads
pub fn decode_program(stored: &StoredProgram) -> Result<GeneratedProgram, String> {
    Ok(GeneratedProgram {
        algorithm_version: stored.algorithm_version.clone(),
        name: stored.name.clone(),
        input_data: serde_json::from_str(&stored.input_json)
            .map_err(|e| format!("Failed to decode program inputs: {}", e))?,
        calculated_data: serde_json::from_str(&stored.calculated_json)
            .map_err(|e| format!("Failed to decode calculated data: {}", e))?,
        weeks: serde_json::from_str(&stored.weeks_json)
            .map_err(|e| format!("Failed to decode weeks: {}", e))?,
    })
}

fn stored_from_row(row: &sqlx::sqlite::SqliteRow) -> StoredProgram {
    let created_at: Option<String> = row.get("created_at");
    let updated_at: Option<String> = row.get("updated_at");

    StoredProgram {
        id: row.get("id"),
        name: row.get("name"),
        builder_type: row.get("builder_type"),
        algorithm_version: row.get("algorithm_version"),
        duration_weeks: row.get("duration_weeks"),
        days_per_week: row.get("days_per_week"),
        input_json: row.get("input_json"),
        calculated_json: row.get("calculated_json"),
        weeks_json: row.get("weeks_json"),
        created_at: created_at.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        }),
        updated_at: updated_at.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        }),
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
