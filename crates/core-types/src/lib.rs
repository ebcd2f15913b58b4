pub mod enums;
pub mod error;
pub mod expr;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ComparisonOp, SolveStatus};
pub use error::CoreError;
pub use expr::{Constraint, LinearExpr, LinearProgram, VarId, VariableDef, VariableSet};
pub use structs::{PlannedEconomy, Solution};
