//! Conditional visibility expressions.
//!
//! Conditions are a closed set of tagged variants. The legacy string grammar
//! (`"hasImage"`, `"bulletCount > 0"`) is parsed once, when a configuration is
//! loaded, into these variants. Anything outside the grammar is kept verbatim
//! as [`Condition::Unrecognized`], which evaluates as visible.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The module whose content the legacy `hasImage` keyword checks.
pub const IMAGE_MODULE_ID: &str = "image";

/// Fields of the image module's data that hold the image itself.
pub const IMAGE_CONTENT_FIELDS: &[&str] = &["url", "src"];

/// The legacy keyword for [`Condition::HasModuleWithContent`] on [`IMAGE_MODULE_ID`].
pub const HAS_IMAGE_KEYWORD: &str = "hasImage";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionParseError {
    #[error("Empty condition expression")]
    Empty,
    #[error("Unsupported comparison operator '{0}'")]
    UnknownOperator(String),
    #[error("Expression '{0}' does not match a supported condition")]
    Unsupported(String),
}

/// Comparison operators accepted by [`Condition::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==", alias = "===")]
    Eq,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Eq => "==",
        }
    }

    pub fn compare(&self, left: i64, right: i64) -> bool {
        match self {
            ComparisonOp::Gt => left > right,
            ComparisonOp::Ge => left >= right,
            ComparisonOp::Lt => left < right,
            ComparisonOp::Le => left <= right,
            ComparisonOp::Eq => left == right,
        }
    }
}

impl FromStr for ComparisonOp {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(ComparisonOp::Gt),
            ">=" => Ok(ComparisonOp::Ge),
            "<" => Ok(ComparisonOp::Lt),
            "<=" => Ok(ComparisonOp::Le),
            "==" | "===" => Ok(ComparisonOp::Eq),
            other => Err(ConditionParseError::UnknownOperator(other.to_string())),
        }
    }
}

/// A counter compared against an integer, e.g. `bulletCount > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub counter: String,
    pub op: ComparisonOp,
    pub value: i64,
}

/// A visibility condition evaluated against the render context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// True iff the module is enabled and its data has non-empty content.
    HasModuleWithContent(String),
    /// Compares a module-derived counter against a constant.
    Comparison(Comparison),
    /// An expression outside the supported grammar. Always evaluates as visible.
    Unrecognized(String),
}

impl Condition {
    pub fn has_image() -> Self {
        Condition::HasModuleWithContent(IMAGE_MODULE_ID.to_string())
    }

    pub fn comparison(counter: impl Into<String>, op: ComparisonOp, value: i64) -> Self {
        Condition::Comparison(Comparison {
            counter: counter.into(),
            op,
            value,
        })
    }

    /// Parses the legacy grammar, keeping unmatched input as `Unrecognized`.
    pub fn parse(expr: &str) -> Self {
        expr.parse()
            .unwrap_or_else(|_| Condition::Unrecognized(expr.to_string()))
    }
}

impl FromStr for Condition {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = s.trim();
        if expr.is_empty() {
            return Err(ConditionParseError::Empty);
        }
        if expr == HAS_IMAGE_KEYWORD {
            return Ok(Condition::has_image());
        }

        // `<counter> <op> <integer>`, whitespace around the operator optional.
        let unsupported = || ConditionParseError::Unsupported(expr.to_string());
        let counter_end = expr
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(expr.len());
        let (counter, rest) = expr.split_at(counter_end);
        let rest = rest.trim_start();
        let op_end = rest
            .find(|c: char| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '+')
            .unwrap_or(rest.len());
        let (op, value) = rest.split_at(op_end);
        if counter.is_empty() || op.is_empty() {
            return Err(unsupported());
        }
        let op: ComparisonOp = op.parse()?;
        let value: i64 = value.trim().parse().map_err(|_| unsupported())?;
        Ok(Condition::comparison(counter, op, value))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::HasModuleWithContent(id) if id == IMAGE_MODULE_ID => {
                write!(f, "{}", HAS_IMAGE_KEYWORD)
            }
            Condition::HasModuleWithContent(id) => write!(f, "hasModuleWithContent({})", id),
            Condition::Comparison(c) => write!(f, "{} {} {}", c.counter, c.op.as_str(), c.value),
            Condition::Unrecognized(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum TaggedCondition {
    HasModuleWithContent(String),
    Comparison(Comparison),
    Unrecognized(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionRepr {
    Expr(String),
    Tagged(TaggedCondition),
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = ConditionRepr::deserialize(deserializer).map_err(|_| {
            <D::Error as de::Error>::custom("expected a condition string or a tagged condition object")
        })?;
        Ok(match repr {
            ConditionRepr::Expr(expr) => Condition::parse(&expr),
            ConditionRepr::Tagged(TaggedCondition::HasModuleWithContent(id)) => {
                Condition::HasModuleWithContent(id)
            }
            ConditionRepr::Tagged(TaggedCondition::Comparison(c)) => Condition::Comparison(c),
            ConditionRepr::Tagged(TaggedCondition::Unrecognized(expr)) => {
                Condition::Unrecognized(expr)
            }
        })
    }
}

/// The `conditional` block of a render-order item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_if: Option<Condition>,
}

impl Conditional {
    pub fn show_if(condition: Condition) -> Self {
        Self {
            show_if: Some(condition),
            hide_if: None,
        }
    }

    pub fn hide_if(condition: Condition) -> Self {
        Self {
            show_if: None,
            hide_if: Some(condition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_has_image() {
        assert_eq!(Condition::parse("hasImage"), Condition::has_image());
        assert_eq!(Condition::parse("  hasImage "), Condition::has_image());
    }

    #[test]
    fn test_parse_comparisons() {
        assert_eq!(
            Condition::parse("bulletCount > 0"),
            Condition::comparison("bulletCount", ComparisonOp::Gt, 0)
        );
        assert_eq!(
            Condition::parse("textFieldCount === 3"),
            Condition::comparison("textFieldCount", ComparisonOp::Eq, 3)
        );
        assert_eq!(
            Condition::parse("bulletCount <= -1"),
            Condition::comparison("bulletCount", ComparisonOp::Le, -1)
        );
    }

    #[test]
    fn test_parse_comparisons_without_spaces() {
        assert_eq!(
            Condition::parse("bulletCount>0"),
            Condition::comparison("bulletCount", ComparisonOp::Gt, 0)
        );
        assert_eq!(
            Condition::parse("textFieldCount<=-2"),
            Condition::comparison("textFieldCount", ComparisonOp::Le, -2)
        );
        assert_eq!(
            Condition::parse("bulletCount>= 3"),
            Condition::comparison("bulletCount", ComparisonOp::Ge, 3)
        );
    }

    #[test]
    fn test_unmatched_grammar_is_kept_verbatim() {
        for expr in ["", "hasVideo", "bulletCount != 2", "bulletCount > two", "a > 1 && b"] {
            assert_eq!(Condition::parse(expr), Condition::Unrecognized(expr.to_string()));
        }
        assert_eq!(
            "bulletCount ~ 2".parse::<Condition>(),
            Err(ConditionParseError::UnknownOperator("~".into()))
        );
    }

    #[test]
    fn test_conditional_deserializes_strings_and_tags() {
        let conditional: Conditional = serde_json::from_value(json!({
            "showIf": "bulletCount >= 2",
            "hideIf": { "hasModuleWithContent": "logo" }
        }))
        .unwrap();
        assert_eq!(
            conditional.show_if,
            Some(Condition::comparison("bulletCount", ComparisonOp::Ge, 2))
        );
        assert_eq!(
            conditional.hide_if,
            Some(Condition::HasModuleWithContent("logo".into()))
        );
    }

    #[test]
    fn test_tagged_serialization_round_trips() {
        let condition = Condition::comparison("bulletCount", ComparisonOp::Lt, 4);
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            value,
            json!({ "comparison": { "counter": "bulletCount", "op": "<", "value": 4 } })
        );
        let back: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(back, condition);
    }

    #[test]
    fn test_display_uses_legacy_grammar() {
        assert_eq!(Condition::has_image().to_string(), "hasImage");
        assert_eq!(
            Condition::comparison("bulletCount", ComparisonOp::Ge, 1).to_string(),
            "bulletCount >= 1"
        );
    }
}
