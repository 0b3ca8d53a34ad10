//! Structural validation and conflict detection for rule sets.

use crate::error::RuleViolation;
use itertools::Itertools;
use std::collections::BTreeMap;
use tessera_types::{SpatialRule, SpatialRuleType};

/// Result of validating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleValidation {
    pub valid: bool,
    pub errors: Vec<RuleViolation>,
}

impl RuleValidation {
    fn from_errors(errors: Vec<RuleViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Per-rule errors for a whole rule set, keyed by rule id. Valid rules are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: BTreeMap<String, Vec<RuleViolation>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// More than one rule moves the same target.
    DuplicateTarget,
    /// `A before B` together with `B before A`.
    CircularBefore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConflict {
    pub kind: ConflictKind,
    pub rule_ids: Vec<String>,
    pub message: String,
}

/// Checks the fields a rule needs for its type.
pub fn validate_rule(rule: &SpatialRule) -> RuleValidation {
    let mut errors = Vec::new();
    if rule.id.trim().is_empty() {
        errors.push(RuleViolation::MissingId);
    }
    if rule.target.trim().is_empty() {
        errors.push(RuleViolation::MissingTarget);
    }

    let reference = non_blank(rule.reference.as_deref());
    let reference2 = non_blank(rule.reference2.as_deref());

    match rule.rule_type {
        SpatialRuleType::Before | SpatialRuleType::After | SpatialRuleType::Between => {
            if reference.is_none() {
                errors.push(RuleViolation::MissingReference {
                    rule_type: rule.rule_type.as_str(),
                });
            }
            if rule.rule_type == SpatialRuleType::Between && reference2.is_none() {
                errors.push(RuleViolation::MissingSecondReference);
            }
            let self_referencing = [reference, reference2]
                .into_iter()
                .flatten()
                .any(|r| r == rule.target);
            if self_referencing {
                errors.push(RuleViolation::SelfReference(rule.target.clone()));
            }
        }
        SpatialRuleType::Wrap => {
            let has_tag = rule
                .wrapper
                .as_ref()
                .is_some_and(|w| !w.tag.trim().is_empty());
            if !has_tag {
                errors.push(RuleViolation::MissingWrapper);
            }
        }
    }

    RuleValidation::from_errors(errors)
}

/// Validates every rule, collecting errors per rule id.
pub fn validate_all_rules(rules: &[SpatialRule]) -> ValidationReport {
    let errors: BTreeMap<String, Vec<RuleViolation>> = rules
        .iter()
        .filter_map(|rule| {
            let validation = validate_rule(rule);
            (!validation.valid).then(|| (rule.id.clone(), validation.errors))
        })
        .collect();
    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Flags rules sharing a target and mutual `before` pairs.
///
/// Longer cycles through `after` or `between` chains are not detected.
pub fn detect_conflicts(rules: &[SpatialRule]) -> Vec<RuleConflict> {
    let mut conflicts = Vec::new();

    for target in rules.iter().map(|r| r.target.as_str()).unique() {
        let rule_ids: Vec<String> = rules
            .iter()
            .filter(|r| r.target == target)
            .map(|r| r.id.clone())
            .collect();
        if rule_ids.len() > 1 {
            conflicts.push(RuleConflict {
                kind: ConflictKind::DuplicateTarget,
                message: format!(
                    "Target '{}' is moved by multiple rules: {}",
                    target,
                    rule_ids.join(", ")
                ),
                rule_ids,
            });
        }
    }

    let befores = rules
        .iter()
        .filter(|r| r.rule_type == SpatialRuleType::Before);
    for (a, b) in befores.tuple_combinations() {
        let mutual = a.reference.as_deref() == Some(b.target.as_str())
            && b.reference.as_deref() == Some(a.target.as_str());
        if mutual {
            conflicts.push(RuleConflict {
                kind: ConflictKind::CircularBefore,
                rule_ids: vec![a.id.clone(), b.id.clone()],
                message: format!(
                    "Circular placement: '{}' before '{}' and '{}' before '{}'",
                    a.target, b.target, b.target, a.target
                ),
            });
        }
    }

    conflicts
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
