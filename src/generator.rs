//! Linear 5x5 strength program generation
//!
//! Single source of truth for program calculations. A preview surface may
//! mirror these calculations in another runtime for instant feedback, but the
//! authoritative program is always regenerated here at save time; the two are
//! kept honest by the algorithm version stamped on every output and published
//! with the calibration constants.
//!
//! Key principles:
//! - Pure and deterministic: same request + same table version = same program
//! - Calibration tables are injected, never global
//! - Rounding is pinned to round-half-away-from-zero
//! - Validation is all-or-nothing: no partially populated program escapes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::program::{
    CalculationConstants, DayLabel, ExercisePrescription, GeneratedProgram, MovementCalculation,
    MovementInput, ProgramDay, ProgramRequest, ProgramWeek, Protocol,
};
use crate::tables::{CalibrationTables, BUILDER_TYPE};

/// Light days use this fraction of the heavy day's weight
const LIGHT_DAY_FACTOR: f64 = 0.8;

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

/// A movement (or the movement list) fails the preconditions for a plausible
/// program. Every variant names the offending input.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("request contains no movements")]
    NoMovements,

    #[error("movement name must not be empty")]
    EmptyMovementName,

    #[error("duplicate movement name: {name}")]
    DuplicateMovement { name: String },

    #[error("{name}: non-positive one-rep max ({one_rm})")]
    NonPositiveOneRm { name: String, one_rm: f64 },

    #[error("{name}: non-positive target weight ({target_weight})")]
    NonPositiveTargetWeight { name: String, target_weight: f64 },

    #[error("{name}: weekly jump rounds to zero lbs, progression has no effect at this 1RM")]
    ZeroWeeklyJump { name: String },

    #[error("{name}: computed weight for week {week} is non-positive ({weight} lbs)")]
    NonPositiveWeekWeight { name: String, week: i64, weight: f64 },

    #[error("{name}: no calculation available for this movement")]
    MissingCalculation { name: String },
}

/// The requested schedule shape cannot host the periodization
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("duration_weeks must be at least {min} (got {weeks})")]
    DurationTooShort { weeks: i64, min: i64 },

    #[error("days_per_week must be between 1 and 7 (got {days})")]
    InvalidDaysPerWeek { days: i64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

// ---------------------------------------------------------------------------
/// Rounding
// ---------------------------------------------------------------------------

/// Round half away from zero. Pinned explicitly so preview and authoritative
/// runs agree to the pound regardless of a platform's default rounding;
/// `f64::round` implements exactly this rule.
fn round_lbs(value: f64) -> f64 {
    value.round()
}

fn round_percent(weight: f64, one_rm: f64) -> i64 {
    ((weight / one_rm) * 100.0).round() as i64
}

// ---------------------------------------------------------------------------
/// Movement Calculator
// ---------------------------------------------------------------------------

/// Derive progression parameters for one movement from its strength-test
/// results and the injected calibration tables.
pub fn calculate(
    movement: &MovementInput,
    tables: &CalibrationTables,
) -> Result<MovementCalculation, ValidationError> {
    if movement.name.trim().is_empty() {
        return Err(ValidationError::EmptyMovementName);
    }
    if movement.one_rm <= 0.0 {
        return Err(ValidationError::NonPositiveOneRm {
            name: movement.name.clone(),
            one_rm: movement.one_rm,
        });
    }
    if movement.target_weight <= 0.0 {
        return Err(ValidationError::NonPositiveTargetWeight {
            name: movement.name.clone(),
            target_weight: movement.target_weight,
        });
    }

    let weekly_jump_percent = tables.lookup_weekly_jump_percent(movement.max_reps_at_80_percent);
    let weekly_jump_lbs = round_lbs(movement.one_rm * weekly_jump_percent as f64 / 100.0) as i64;

    let ramp_up_percent = tables.lookup_ramp_up_percent(movement.max_reps_at_80_percent);
    let ramp_up_base_lbs = round_lbs(movement.one_rm * ramp_up_percent as f64 / 100.0) as i64;

    // A zero jump collapses the whole progression into a flat program
    if weekly_jump_lbs == 0 {
        return Err(ValidationError::ZeroWeeklyJump {
            name: movement.name.clone(),
        });
    }

    Ok(MovementCalculation {
        weekly_jump_percent,
        weekly_jump_lbs,
        ramp_up_percent,
        ramp_up_base_lbs,
    })
}

// ---------------------------------------------------------------------------
/// Phase Schedule: the periodization state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Linear progression toward the target weight, 5x5
    Building,
    /// One jump past target, 3x3
    Intensification,
    /// Two jumps past target, 2x2
    Peak,
    /// Terminal phase: single day, singles at the new max
    Testing,
}

/// Maps week numbers to phases for a given program duration.
///
/// The last three weeks are always intensification, peak, and testing; every
/// week before them builds toward the target. For the default 8-week duration
/// this is weeks 1-5 building, 6 intensification, 7 peak, 8 testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSchedule {
    duration_weeks: i64,
    building_weeks: i64,
}

impl PhaseSchedule {
    /// One building week plus the three terminal phases
    pub const MIN_DURATION_WEEKS: i64 = 4;

    pub fn new(duration_weeks: i64) -> Result<Self, ConfigurationError> {
        if duration_weeks < Self::MIN_DURATION_WEEKS {
            return Err(ConfigurationError::DurationTooShort {
                weeks: duration_weeks,
                min: Self::MIN_DURATION_WEEKS,
            });
        }
        Ok(Self {
            duration_weeks,
            building_weeks: duration_weeks - 3,
        })
    }

    /// The reference 8-week schedule
    pub fn default_eight_week() -> Self {
        Self {
            duration_weeks: 8,
            building_weeks: 5,
        }
    }

    pub fn duration_weeks(&self) -> i64 {
        self.duration_weeks
    }

    pub fn phase_for_week(&self, week: i64) -> Phase {
        if week <= self.building_weeks {
            Phase::Building
        } else if week == self.building_weeks + 1 {
            Phase::Intensification
        } else if week == self.building_weeks + 2 {
            Phase::Peak
        } else {
            Phase::Testing
        }
    }

    pub fn protocol_for_week(&self, week: i64) -> Protocol {
        match self.phase_for_week(week) {
            Phase::Building => Protocol { sets: 5, reps: 5 },
            Phase::Intensification => Protocol { sets: 3, reps: 3 },
            Phase::Peak => Protocol { sets: 2, reps: 2 },
            Phase::Testing => Protocol { sets: 1, reps: 1 },
        }
    }

    pub fn phase_name(&self, week: i64) -> String {
        match self.phase_for_week(week) {
            Phase::Building => format!("Building Phase - Week {}", week),
            Phase::Intensification => "Intensification Phase".to_string(),
            Phase::Peak => "Peak Phase".to_string(),
            Phase::Testing => "Testing Week".to_string(),
        }
    }

    /// Offset of the week's heavy weight from the target, in weekly jumps.
    /// None on the testing week, where no weight is prescribed.
    ///
    /// Building works backward from the target: the final building week lands
    /// exactly on it, earlier weeks sit one jump apart below it.
    pub fn jump_offset(&self, week: i64) -> Option<i64> {
        match self.phase_for_week(week) {
            Phase::Building => Some(-(self.building_weeks - week)),
            Phase::Intensification => Some(1),
            Phase::Peak => Some(2),
            Phase::Testing => None,
        }
    }
}

// ---------------------------------------------------------------------------
/// Week Assembler
// ---------------------------------------------------------------------------

fn suggested_day_of_week(day_number: i64) -> Option<String> {
    match day_number {
        1 => Some("Monday".to_string()),
        2 => Some("Wednesday".to_string()),
        3 => Some("Friday".to_string()),
        4 => Some("Saturday".to_string()),
        _ => None,
    }
}

/// Produce the day-by-day prescriptions for one week.
///
/// Each movement gets the same weight formula applied independently; movements
/// never interact. Odd day numbers are heavy, even day numbers run at 80% of
/// the heavy weight.
pub fn assemble_week(
    week_number: i64,
    movements: &[MovementInput],
    calculations: &BTreeMap<String, MovementCalculation>,
    schedule: &PhaseSchedule,
    days_per_week: i64,
) -> Result<ProgramWeek, ValidationError> {
    let phase = schedule.phase_for_week(week_number);
    let phase_name = schedule.phase_name(week_number);
    let protocol = schedule.protocol_for_week(week_number);

    if phase == Phase::Testing {
        return Ok(ProgramWeek {
            week_number,
            phase_name,
            protocol: None,
            days: vec![assemble_test_day(movements)],
        });
    }

    let mut days = Vec::with_capacity(days_per_week as usize);
    for day_number in 1..=days_per_week {
        let is_heavy = day_number % 2 == 1;
        let label = if is_heavy { DayLabel::Heavy } else { DayLabel::Light };

        let mut exercises = Vec::with_capacity(movements.len());
        for movement in movements {
            let calc = calculations.get(&movement.name).ok_or_else(|| {
                ValidationError::MissingCalculation {
                    name: movement.name.clone(),
                }
            })?;

            let offset = schedule
                .jump_offset(week_number)
                .unwrap_or(0) // non-testing weeks always carry an offset
                * calc.weekly_jump_lbs;
            let heavy_weight = movement.target_weight + offset as f64;

            // An implausible schedule, not something to clamp silently
            if heavy_weight <= 0.0 {
                return Err(ValidationError::NonPositiveWeekWeight {
                    name: movement.name.clone(),
                    week: week_number,
                    weight: heavy_weight,
                });
            }

            let weight = if is_heavy {
                heavy_weight
            } else {
                round_lbs(heavy_weight * LIGHT_DAY_FACTOR)
            };

            exercises.push(ExercisePrescription {
                exercise_name: movement.name.clone(),
                sets: protocol.sets,
                reps: protocol.reps,
                weight_lbs: Some(weight),
                percent_1rm: Some(round_percent(weight, movement.one_rm)),
                notes: String::new(),
            });
        }

        days.push(ProgramDay {
            day_number,
            label,
            suggested_day_of_week: suggested_day_of_week(day_number),
            exercises,
        });
    }

    Ok(ProgramWeek {
        week_number,
        phase_name,
        protocol: Some(protocol),
        days,
    })
}

/// Testing week: one day, one single per movement, weight left open for the
/// client to work up to a new max.
fn assemble_test_day(movements: &[MovementInput]) -> ProgramDay {
    let exercises = movements
        .iter()
        .map(|movement| ExercisePrescription {
            exercise_name: movement.name.clone(),
            sets: 1,
            reps: 1,
            weight_lbs: None,
            percent_1rm: Some(100),
            notes: format!("Test new 1RM. Previous: {} lbs", movement.one_rm),
        })
        .collect();

    ProgramDay {
        day_number: 1,
        label: DayLabel::Test,
        suggested_day_of_week: Some("Wednesday".to_string()),
        exercises,
    }
}

// ---------------------------------------------------------------------------
/// Program Generator
// ---------------------------------------------------------------------------

/// Generate the complete program for a request.
///
/// Fails fast on the first invalid movement or config field; nothing partial
/// is ever returned. The output embeds the verbatim request and the table
/// version, so it can be reproduced exactly by replaying both.
pub fn generate(
    request: &ProgramRequest,
    tables: &CalibrationTables,
) -> Result<GeneratedProgram, GenerationError> {
    if !(1..=7).contains(&request.days_per_week) {
        return Err(ConfigurationError::InvalidDaysPerWeek {
            days: request.days_per_week,
        }
        .into());
    }
    let schedule = PhaseSchedule::new(request.duration_weeks)?;

    if request.movements.is_empty() {
        return Err(ValidationError::NoMovements.into());
    }

    let mut calculated_data = BTreeMap::new();
    for movement in &request.movements {
        if calculated_data.contains_key(&movement.name) {
            return Err(ValidationError::DuplicateMovement {
                name: movement.name.clone(),
            }
            .into());
        }
        let calc = calculate(movement, tables)?;
        calculated_data.insert(movement.name.clone(), calc);
    }

    let mut weeks = Vec::with_capacity(schedule.duration_weeks() as usize);
    for week_number in 1..=schedule.duration_weeks() {
        weeks.push(assemble_week(
            week_number,
            &request.movements,
            &calculated_data,
            &schedule,
            request.days_per_week,
        )?);
    }

    let name = request
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-Week Linear Strength", request.duration_weeks));

    Ok(GeneratedProgram {
        algorithm_version: tables.version().to_string(),
        name,
        input_data: request.clone(),
        calculated_data,
        weeks,
    })
}

/// Calibration constants bundle for a preview runtime, keyed to the default
/// 8-week schedule. The preview declares the version it implements; any
/// mismatch against the authoritative tables is detectable instead of silent.
pub fn calculation_constants(tables: &CalibrationTables) -> CalculationConstants {
    let schedule = PhaseSchedule::default_eight_week();
    let protocol_by_week = (1..=schedule.duration_weeks())
        .map(|week| (week, schedule.protocol_for_week(week)))
        .collect();

    CalculationConstants {
        version: tables.version().to_string(),
        builder_type: BUILDER_TYPE.to_string(),
        weekly_jump_table: tables.weekly_jump_map(),
        ramp_up_table: tables.ramp_up_map(),
        protocol_by_week,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
