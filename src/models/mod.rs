pub mod program;

pub use program::{GeneratedProgram, MovementInput, ProgramRequest, StoredProgram};
