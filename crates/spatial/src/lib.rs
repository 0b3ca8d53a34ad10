//! Spatial Rules Engine.
//!
//! Relative-placement constraints ("put X before Y", "put X between Y and Z")
//! applied as a post-processing rewrite of a flat ordering of placement keys.
//! Rules that cannot be applied are skipped and reported, never fatal.

pub mod engine;
pub mod error;
pub mod validate;

pub use engine::{RuleApplication, SpatialRulesEngine, apply_rule};
pub use error::{FailureReason, RuleFailure, RuleViolation};
pub use validate::{
    ConflictKind, RuleConflict, RuleValidation, ValidationReport, detect_conflicts,
    validate_all_rules, validate_rule,
};
