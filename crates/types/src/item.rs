//! Declarative render-order items.

use crate::condition::Conditional;
use crate::flex::{AlignItems, FlexConfig, FlexDirection, JustifyContent, PositionConfig};
use serde::{Deserialize, Serialize};

/// Sentinel module id for a nested group.
pub const GROUP_MODULE_ID: &str = "__group__";

/// Sentinel module id for a fixed-size gap.
pub const SPACER_MODULE_ID: &str = "__spacer__";

/// Separator between a module id and a submodule id in placement keys.
pub const SUBMODULE_SEPARATOR: char = ':';

/// Layout of a nested group and its ordered children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    #[serde(default)]
    pub direction: FlexDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(default)]
    pub children: Vec<RenderOrderItem>,
}

/// One entry in the declarative ordering list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOrderItem {
    /// Stable identity for reordering UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub module_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex: Option<FlexConfig>,
    /// Extra inline CSS appended to the module wrapper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_style: Option<String>,
    /// Present iff `module_id == GROUP_MODULE_ID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_config: Option<GroupConfig>,
}

impl RenderOrderItem {
    pub fn module(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            ..Default::default()
        }
    }

    pub fn submodule(module_id: impl Into<String>, submodule_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            submodule_id: Some(submodule_id.into()),
            ..Default::default()
        }
    }

    pub fn group(config: GroupConfig) -> Self {
        Self {
            module_id: GROUP_MODULE_ID.to_string(),
            group_config: Some(config),
            ..Default::default()
        }
    }

    pub fn spacer(height: impl Into<String>) -> Self {
        Self {
            module_id: SPACER_MODULE_ID.to_string(),
            margin_top: Some(height.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_conditional(mut self, conditional: Conditional) -> Self {
        self.conditional = Some(conditional);
        self
    }

    pub fn with_margins(mut self, top: Option<&str>, bottom: Option<&str>) -> Self {
        self.margin_top = top.map(str::to_string);
        self.margin_bottom = bottom.map(str::to_string);
        self
    }

    pub fn with_flex(mut self, flex: FlexConfig) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn with_position(mut self, position: PositionConfig) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_custom_style(mut self, style: impl Into<String>) -> Self {
        self.custom_style = Some(style.into());
        self
    }

    pub fn is_group(&self) -> bool {
        self.module_id == GROUP_MODULE_ID
    }

    pub fn is_spacer(&self) -> bool {
        self.module_id == SPACER_MODULE_ID
    }

    pub fn is_module(&self) -> bool {
        !self.is_group() && !self.is_spacer()
    }

    /// The key spatial rules use to address this item.
    ///
    /// Modules are keyed by `moduleId` or `moduleId:submoduleId`. Groups and
    /// spacers are keyed by their stable `id` when they have one.
    pub fn placement_key(&self) -> String {
        if self.is_module() {
            return placement_key(&self.module_id, self.submodule_id.as_deref());
        }
        self.id.clone().unwrap_or_else(|| self.module_id.clone())
    }

    /// Children of a group item; empty for anything else.
    pub fn children(&self) -> &[RenderOrderItem] {
        match &self.group_config {
            Some(group) if self.is_group() => &group.children,
            _ => &[],
        }
    }
}

/// Builds a placement key from a module id and optional submodule id.
pub fn placement_key(module_id: &str, submodule_id: Option<&str>) -> String {
    match submodule_id {
        Some(sub) => format!("{}{}{}", module_id, SUBMODULE_SEPARATOR, sub),
        None => module_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_nested_group() {
        let item: RenderOrderItem = serde_json::from_value(json!({
            "moduleId": "__group__",
            "id": "header",
            "groupConfig": {
                "direction": "row",
                "gap": "12px",
                "alignItems": "center",
                "children": [
                    { "moduleId": "logo" },
                    { "moduleId": "textFields", "submoduleId": "field-0", "marginBottom": "8px" }
                ]
            }
        }))
        .unwrap();

        assert!(item.is_group());
        let group = item.group_config.as_ref().unwrap();
        assert_eq!(group.direction, FlexDirection::Row);
        assert_eq!(group.align_items, Some(AlignItems::Center));
        assert_eq!(item.children().len(), 2);
        assert_eq!(item.children()[1].margin_bottom.as_deref(), Some("8px"));
        assert_eq!(item.placement_key(), "header");
    }

    #[test]
    fn test_placement_keys() {
        assert_eq!(RenderOrderItem::module("bullets").placement_key(), "bullets");
        assert_eq!(
            RenderOrderItem::submodule("textFields", "field-1").placement_key(),
            "textFields:field-1"
        );
        assert_eq!(RenderOrderItem::spacer("20px").placement_key(), SPACER_MODULE_ID);
    }

    #[test]
    fn test_children_of_non_group_is_empty() {
        let mut item = RenderOrderItem::module("logo");
        item.group_config = Some(GroupConfig {
            children: vec![RenderOrderItem::module("stray")],
            ..Default::default()
        });
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let value = serde_json::to_value(RenderOrderItem::spacer("16px")).unwrap();
        assert_eq!(value, json!({ "moduleId": "__spacer__", "marginTop": "16px" }));
    }
}
