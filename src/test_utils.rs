//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use sqlx::SqlitePool;

use crate::generator::generate;
use crate::models::program::{MovementInput, ProgramRequest};
use crate::tables::CalibrationTables;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed the database with generated test programs
/// Returns the ids of the saved programs
pub async fn seed_test_programs(pool: &SqlitePool, count: usize) -> Vec<String> {
  let tables = CalibrationTables::v1();
  let mut ids = Vec::new();

  for i in 0..count {
    let mut request = sample_request();
    request.name = Some(format!("Test Program {}", i + 1));

    let program = generate(&request, &tables).expect("Failed to generate test program");
    let id = crate::store::save_program(pool, &program)
      .await
      .expect("Failed to save test program");
    ids.push(id);
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a movement input for testing
pub fn sample_movement(name: &str, one_rm: f64, reps: i64, target_weight: f64) -> MovementInput {
  MovementInput {
    name: name.to_string(),
    one_rm,
    max_reps_at_80_percent: reps,
    target_weight,
  }
}

/// The reference two-movement request used throughout the tests
pub fn sample_request() -> ProgramRequest {
  ProgramRequest {
    name: None,
    description: None,
    movements: vec![
      sample_movement("Squat", 315.0, 12, 275.0),
      sample_movement("Bench Press", 225.0, 10, 185.0),
    ],
    duration_weeks: 8,
    days_per_week: 4,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify the programs table exists
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'programs'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_programs_returns_correct_count() {
    let pool = setup_test_db().await;

    let ids = seed_test_programs(&pool, 2).await;
    assert_eq!(ids.len(), 2);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM programs")
      .fetch_one(&pool)
      .await
      .expect("Failed to count programs");

    assert_eq!(count, 2);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let movement = sample_movement("Deadlift", 405.0, 8, 365.0);
    assert_eq!(movement.name, "Deadlift");
    assert_eq!(movement.max_reps_at_80_percent, 8);

    let request = sample_request();
    assert_eq!(request.movements.len(), 2);
    assert_eq!(request.duration_weeks, 8);
  }
}
