use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single movement/exercise input for a strength program.
/// `target_weight` is the 5x5 goal weight established by a prior ramp-up test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementInput {
  pub name: String,
  pub one_rm: f64,
  pub max_reps_at_80_percent: i64,
  pub target_weight: f64,
}

fn default_duration_weeks() -> i64 {
  8
}

fn default_days_per_week() -> i64 {
  4
}

/// Full generation request: movements plus configuration.
/// Embedded verbatim in the generated program for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequest {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  pub movements: Vec<MovementInput>,
  #[serde(default = "default_duration_weeks")]
  pub duration_weeks: i64,
  #[serde(default = "default_days_per_week")]
  pub days_per_week: i64,
}

/// Derived progression parameters for one movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementCalculation {
  pub weekly_jump_percent: i64,
  pub weekly_jump_lbs: i64,
  pub ramp_up_percent: i64,
  pub ramp_up_base_lbs: i64,
}

/// One exercise within one training day.
/// `weight_lbs` is None only on the test week, where the weight is whatever
/// the client works up to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
  pub exercise_name: String,
  pub sets: i64,
  pub reps: i64,
  pub weight_lbs: Option<f64>,
  pub percent_1rm: Option<i64>,
  #[serde(default)]
  pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLabel {
  Heavy,
  Light,
  Test,
}

impl std::fmt::Display for DayLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Heavy => write!(f, "heavy"),
      Self::Light => write!(f, "light"),
      Self::Test => write!(f, "test"),
    }
  }
}

/// One training day: one prescription per movement, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDay {
  pub day_number: i64,
  pub label: DayLabel,
  pub suggested_day_of_week: Option<String>,
  pub exercises: Vec<ExercisePrescription>,
}

/// Sets x reps pair for a week's working sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
  pub sets: i64,
  pub reps: i64,
}

/// One training week. `protocol` is None on the testing week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
  pub week_number: i64,
  pub phase_name: String,
  pub protocol: Option<Protocol>,
  pub days: Vec<ProgramDay>,
}

/// Complete generated program, immutable once produced.
/// Replaying `input_data` through the generator under the same algorithm
/// version reproduces `calculated_data` and `weeks` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedProgram {
  pub algorithm_version: String,
  pub name: String,
  pub input_data: ProgramRequest,
  pub calculated_data: BTreeMap<String, MovementCalculation>,
  pub weeks: Vec<ProgramWeek>,
}

/// Program row as persisted by the store (JSON payload columns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProgram {
  pub id: String,
  pub name: String,
  pub builder_type: String,
  pub algorithm_version: String,
  pub duration_weeks: i64,
  pub days_per_week: i64,
  pub input_json: String,
  pub calculated_json: String,
  pub weeks_json: String,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Calibration constants bundle published to preview runtimes.
/// A preview surface loads these and declares the version it implements, so a
/// drifted copy of the tables shows up as a version mismatch instead of a
/// silent off-by-a-few-pounds discrepancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationConstants {
  pub version: String,
  pub builder_type: String,
  pub weekly_jump_table: BTreeMap<i64, i64>,
  pub ramp_up_table: BTreeMap<i64, i64>,
  pub protocol_by_week: BTreeMap<i64, Protocol>,
}
