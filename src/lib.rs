//! Strength coaching engine
//!
//! Turns a client's strength-test results (1RM plus a rep-endurance test at
//! 80% of it) into a fully specified multi-week periodized program. The
//! generation core is pure and deterministic; the store persists finished
//! programs and hands them back for display or exact regeneration.

pub mod db;
pub mod generator;
pub mod models;
pub mod store;
pub mod tables;

#[cfg(test)]
pub mod test_utils;

pub use generator::{calculate, calculation_constants, generate};
pub use models::program::{GeneratedProgram, MovementInput, ProgramRequest};
pub use tables::CalibrationTables;
