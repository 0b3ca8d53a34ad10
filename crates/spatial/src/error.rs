use thiserror::Error;

/// A structural problem with a single rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Rule has no id")]
    MissingId,

    #[error("Rule has no target")]
    MissingTarget,

    #[error("'{rule_type}' rule requires a reference")]
    MissingReference { rule_type: &'static str },

    #[error("'between' rule requires a second reference")]
    MissingSecondReference,

    #[error("'wrap' rule requires a wrapper with a tag")]
    MissingWrapper,

    #[error("Target '{0}' cannot reference itself")]
    SelfReference(String),
}

/// Why a rule was skipped while rewriting an ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("target '{0}' is not in the ordering")]
    TargetNotFound(String),

    #[error("reference '{0}' is not in the ordering")]
    ReferenceNotFound(String),

    #[error("rule is invalid: {0}")]
    Invalid(RuleViolation),
}

/// A rule that could not be applied. The ordering before it was carried forward.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Spatial rule '{rule_id}' skipped: {reason}")]
pub struct RuleFailure {
    pub rule_id: String,
    pub reason: FailureReason,
}
