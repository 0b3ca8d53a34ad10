//! Rewrites a flat ordering so it satisfies a list of placement rules.

use crate::error::{FailureReason, RuleFailure};
use crate::validate::{self, RuleConflict, RuleValidation, ValidationReport};
use std::collections::HashMap;
use tessera_types::{CompositionConfig, SpatialRule, SpatialRuleType, WrapperDescriptor};

/// The rewritten ordering plus the rules that had to be skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleApplication {
    pub order: Vec<String>,
    pub failures: Vec<RuleFailure>,
}

/// Holds a working copy of a composition's spatial rules.
#[derive(Debug, Clone, Default)]
pub struct SpatialRulesEngine {
    rules: Vec<SpatialRule>,
}

impl SpatialRulesEngine {
    pub fn new(rules: Vec<SpatialRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &CompositionConfig) -> Self {
        Self::new(config.spatial_rules.clone())
    }

    pub fn rules(&self) -> &[SpatialRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<SpatialRule> {
        self.rules
    }

    /// Appends a rule. Invalid rules are kept but will be skipped when applied.
    pub fn add_rule(&mut self, rule: SpatialRule) -> RuleValidation {
        let validation = validate::validate_rule(&rule);
        if !validation.valid {
            log::warn!("Added invalid spatial rule '{}': {:?}", rule.id, validation.errors);
        }
        self.rules.push(rule);
        validation
    }

    pub fn remove_rule(&mut self, rule_id: &str) -> Option<SpatialRule> {
        let index = self.rules.iter().position(|r| r.id == rule_id)?;
        Some(self.rules.remove(index))
    }

    /// Replaces the rule with the same id. Returns false if there is none.
    pub fn update_rule(&mut self, rule: SpatialRule) -> bool {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => {
                *existing = rule;
                true
            }
            None => false,
        }
    }

    /// Rules that name `key` as target or reference.
    pub fn rules_for_module(&self, key: &str) -> Vec<&SpatialRule> {
        self.rules.iter().filter(|r| r.mentions(key)).collect()
    }

    pub fn validate_rule(rule: &SpatialRule) -> RuleValidation {
        validate::validate_rule(rule)
    }

    pub fn validate_all_rules(&self) -> ValidationReport {
        validate::validate_all_rules(&self.rules)
    }

    pub fn detect_conflicts(&self) -> Vec<RuleConflict> {
        validate::detect_conflicts(&self.rules)
    }

    /// Wrapper descriptors keyed by target, for valid `wrap` rules.
    pub fn wrappers(&self) -> HashMap<String, WrapperDescriptor> {
        self.rules
            .iter()
            .filter(|r| r.rule_type == SpatialRuleType::Wrap && validate::validate_rule(r).valid)
            .filter_map(|r| Some((r.target.clone(), r.wrapper.clone()?)))
            .collect()
    }

    /// Applies every rule in list order and returns the final ordering.
    pub fn apply_rules<S: AsRef<str>>(&self, order: &[S]) -> Vec<String> {
        self.apply_rules_with_report(order).order
    }

    /// Applies every rule in list order, reporting skipped rules.
    ///
    /// A rule that fails leaves the ordering from before it unchanged; later
    /// rules still run.
    pub fn apply_rules_with_report<S: AsRef<str>>(&self, order: &[S]) -> RuleApplication {
        let mut current: Vec<String> = order.iter().map(|s| s.as_ref().to_string()).collect();
        let mut failures = Vec::new();

        for rule in &self.rules {
            match apply_rule(rule, &current) {
                Ok(next) => current = next,
                Err(reason) => {
                    let failure = RuleFailure {
                        rule_id: rule.id.clone(),
                        reason,
                    };
                    log::warn!("{}", failure);
                    failures.push(failure);
                }
            }
        }

        RuleApplication {
            order: current,
            failures,
        }
    }
}

/// Applies one rule to `order`, returning the rewritten ordering.
pub fn apply_rule(rule: &SpatialRule, order: &[String]) -> Result<Vec<String>, FailureReason> {
    let validation = validate::validate_rule(rule);
    if let Some(violation) = validation.errors.into_iter().next() {
        return Err(FailureReason::Invalid(violation));
    }

    match rule.rule_type {
        // Wrapping is a tree transformation done by the serializer.
        SpatialRuleType::Wrap => Ok(order.to_vec()),
        SpatialRuleType::Before | SpatialRuleType::After => {
            let reference = rule.reference.as_deref().unwrap_or_default();
            let target_index = index_of(order, &rule.target)
                .ok_or_else(|| FailureReason::TargetNotFound(rule.target.clone()))?;
            if index_of(order, reference).is_none() {
                return Err(FailureReason::ReferenceNotFound(reference.to_string()));
            }

            let mut next = order.to_vec();
            let target = next.remove(target_index);
            // Removing the target shifts the reference when the target came first.
            let reference_index = index_of(&next, reference)
                .ok_or_else(|| FailureReason::ReferenceNotFound(reference.to_string()))?;
            let insert_at = if rule.rule_type == SpatialRuleType::Before {
                reference_index
            } else {
                reference_index + 1
            };
            next.insert(insert_at, target);
            Ok(next)
        }
        SpatialRuleType::Between => {
            let first = rule.reference.as_deref().unwrap_or_default();
            let second = rule.reference2.as_deref().unwrap_or_default();
            let first_index = index_of(order, first)
                .ok_or_else(|| FailureReason::ReferenceNotFound(first.to_string()))?;
            let second_index = index_of(order, second)
                .ok_or_else(|| FailureReason::ReferenceNotFound(second.to_string()))?;
            let target_index = index_of(order, &rule.target)
                .ok_or_else(|| FailureReason::TargetNotFound(rule.target.clone()))?;

            let lower = first_index.min(second_index);
            let mut next = order.to_vec();
            let target = next.remove(target_index);
            // Always lands directly after the lower reference.
            let insert_at = if target_index < lower { lower } else { lower + 1 };
            next.insert(insert_at, target);
            Ok(next)
        }
    }
}

fn index_of(order: &[String], key: &str) -> Option<usize> {
    order.iter().position(|k| k == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_types::WrapperDescriptor;

    fn order(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_before_moves_target_ahead_of_reference() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::before("r", "C", "A")]);
        assert_eq!(engine.apply_rules(&["A", "B", "C"]), order(&["C", "A", "B"]));
    }

    #[test]
    fn test_after_relocates_reference_after_removal() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::after("r", "A", "C")]);
        assert_eq!(engine.apply_rules(&["A", "B", "C"]), order(&["B", "C", "A"]));
    }

    #[test]
    fn test_before_when_target_precedes_reference() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::before("r", "A", "C")]);
        assert_eq!(engine.apply_rules(&["A", "B", "C", "D"]), order(&["B", "A", "C", "D"]));
    }

    #[test]
    fn test_between_inserts_after_lower_reference() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::between("r", "D", "A", "C")]);
        assert_eq!(
            engine.apply_rules(&["A", "B", "C", "D"]),
            order(&["A", "D", "B", "C"])
        );
    }

    #[test]
    fn test_between_with_swapped_references() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::between("r", "D", "C", "A")]);
        assert_eq!(
            engine.apply_rules(&["A", "B", "C", "D"]),
            order(&["A", "D", "B", "C"])
        );
    }

    #[test]
    fn test_between_when_target_precedes_both_references() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::between("r", "D", "A", "C")]);
        assert_eq!(
            engine.apply_rules(&["D", "A", "B", "C"]),
            order(&["A", "D", "B", "C"])
        );
    }

    #[test]
    fn test_applying_twice_is_idempotent() {
        let engine = SpatialRulesEngine::new(vec![
            SpatialRule::before("r1", "C", "A"),
            SpatialRule::after("r2", "E", "B"),
            SpatialRule::between("r3", "D", "A", "B"),
        ]);
        for start in [
            order(&["A", "B", "C", "D", "E"]),
            order(&["C", "A", "E", "B", "D"]),
        ] {
            let once = engine.apply_rules(&start);
            assert_eq!(once, order(&["C", "A", "D", "B", "E"]));
            let twice = engine.apply_rules(&once);
            assert_eq!(once, twice, "not idempotent from {:?}", start);
        }
    }

    #[test]
    fn test_single_rules_are_idempotent() {
        for rule in [
            SpatialRule::before("r", "C", "A"),
            SpatialRule::after("r", "A", "C"),
            SpatialRule::between("r", "D", "A", "C"),
        ] {
            let engine = SpatialRulesEngine::new(vec![rule]);
            let start = order(&["A", "B", "C", "D"]);
            let once = engine.apply_rules(&start);
            let twice = engine.apply_rules(&once);
            assert_eq!(once, twice, "not idempotent from {:?}", start);
        }
    }

    #[test]
    fn test_missing_reference_is_skipped_and_reported() {
        let engine = SpatialRulesEngine::new(vec![
            SpatialRule::before("missing", "C", "Z"),
            SpatialRule::before("ok", "C", "A"),
        ]);
        let result = engine.apply_rules_with_report(&["A", "B", "C"]);
        assert_eq!(result.order, order(&["C", "A", "B"]));
        assert_eq!(
            result.failures,
            vec![RuleFailure {
                rule_id: "missing".into(),
                reason: FailureReason::ReferenceNotFound("Z".into()),
            }]
        );
    }

    #[test]
    fn test_missing_target_is_skipped() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::after("r", "Q", "A")]);
        let result = engine.apply_rules_with_report(&["A", "B"]);
        assert_eq!(result.order, order(&["A", "B"]));
        assert_eq!(result.failures[0].reason, FailureReason::TargetNotFound("Q".into()));
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::before("r", "A", "A")]);
        let result = engine.apply_rules_with_report(&["B", "A"]);
        assert_eq!(result.order, order(&["B", "A"]));
        assert!(matches!(result.failures[0].reason, FailureReason::Invalid(_)));
    }

    #[test]
    fn test_wrap_leaves_order_unchanged() {
        let engine = SpatialRulesEngine::new(vec![SpatialRule::wrap(
            "w",
            "B",
            WrapperDescriptor::new("section"),
        )]);
        let result = engine.apply_rules_with_report(&["A", "B"]);
        assert_eq!(result.order, order(&["A", "B"]));
        assert!(result.failures.is_empty());
        assert_eq!(engine.wrappers()["B"].tag, "section");
    }

    #[test]
    fn test_rule_management() {
        let mut engine = SpatialRulesEngine::default();
        assert!(engine.add_rule(SpatialRule::before("r1", "C", "A")).valid);
        assert!(!engine.add_rule(SpatialRule::before("r2", "", "A")).valid);
        assert_eq!(engine.rules().len(), 2);

        assert!(engine.update_rule(SpatialRule::after("r1", "C", "B")));
        assert!(!engine.update_rule(SpatialRule::after("nope", "C", "B")));
        assert_eq!(engine.rules_for_module("B").len(), 1);

        assert_eq!(engine.remove_rule("r2").map(|r| r.id), Some("r2".to_string()));
        assert!(engine.remove_rule("r2").is_none());
        assert_eq!(engine.rules().len(), 1);
    }
}
