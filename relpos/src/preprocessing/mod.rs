//! Checks applied to the loaded observation sets before matching.

pub mod validator;

pub use validator::{TemporalValidator, ValidationResult, ValidationStats};
