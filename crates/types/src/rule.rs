//! Relative-placement rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialRuleType {
    Before,
    After,
    Between,
    Wrap,
}

impl SpatialRuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialRuleType::Before => "before",
            SpatialRuleType::After => "after",
            SpatialRuleType::Between => "between",
            SpatialRuleType::Wrap => "wrap",
        }
    }
}

/// The containing element a `wrap` rule puts around its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapperDescriptor {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl WrapperDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_name: None,
            style: None,
        }
    }
}

/// Places `target` relative to one or two references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialRule {
    pub id: String,
    #[serde(rename = "type")]
    pub rule_type: SpatialRuleType,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Second reference, only meaningful for `between`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference2: Option<String>,
    /// Only meaningful for `wrap`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<WrapperDescriptor>,
}

impl SpatialRule {
    pub fn before(id: impl Into<String>, target: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::relative(id, SpatialRuleType::Before, target, reference)
    }

    pub fn after(id: impl Into<String>, target: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::relative(id, SpatialRuleType::After, target, reference)
    }

    pub fn between(
        id: impl Into<String>,
        target: impl Into<String>,
        reference: impl Into<String>,
        reference2: impl Into<String>,
    ) -> Self {
        Self {
            reference2: Some(reference2.into()),
            ..Self::relative(id, SpatialRuleType::Between, target, reference)
        }
    }

    pub fn wrap(id: impl Into<String>, target: impl Into<String>, wrapper: WrapperDescriptor) -> Self {
        Self {
            id: id.into(),
            rule_type: SpatialRuleType::Wrap,
            target: target.into(),
            reference: None,
            reference2: None,
            wrapper: Some(wrapper),
        }
    }

    fn relative(
        id: impl Into<String>,
        rule_type: SpatialRuleType,
        target: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rule_type,
            target: target.into(),
            reference: Some(reference.into()),
            reference2: None,
            wrapper: None,
        }
    }

    /// Returns true if `key` is the target or one of the references.
    pub fn mentions(&self, key: &str) -> bool {
        self.target == key
            || self.reference.as_deref() == Some(key)
            || self.reference2.as_deref() == Some(key)
    }
}
