//! Render Tree
//! This crate defines the concrete, conditional-filtered tree built from a
//! render order, after visibility rules have been applied but before any
//! markup is produced.

use tessera_types::flex::{AlignItems, FlexConfig, FlexDirection, JustifyContent, PositionConfig};

/// Name of the synthetic group every tree hangs from.
pub const ROOT_NODE_NAME: &str = "root";

/// A module leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleNode {
    /// The module id as written in the render order, possibly instance-suffixed.
    pub module_id: String,
    pub submodule_id: Option<String>,
    /// Stable item identity carried over from the render order.
    pub item_id: Option<String>,
    pub position: Option<PositionConfig>,
    pub flex: Option<FlexConfig>,
    pub margin_top: Option<String>,
    pub margin_bottom: Option<String>,
    pub custom_style: Option<String>,
}

impl ModuleNode {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            ..Default::default()
        }
    }

    /// The key spatial rules use for this node.
    pub fn placement_key(&self) -> String {
        tessera_types::placement_key(&self.module_id, self.submodule_id.as_deref())
    }

    /// Leaf flex settings take priority over the ones carried by `position`.
    pub fn effective_flex(&self) -> FlexConfig {
        let from_position = self
            .position
            .as_ref()
            .map(|p| p.flex.clone())
            .unwrap_or_default();
        match &self.flex {
            Some(flex) => flex.or(&from_position),
            None => from_position,
        }
    }
}

/// A flex container with ordered children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupNode {
    pub name: String,
    pub direction: FlexDirection,
    pub gap: Option<String>,
    pub align_items: Option<AlignItems>,
    pub justify_content: Option<JustifyContent>,
    pub position: Option<PositionConfig>,
    pub flex: Option<FlexConfig>,
    pub margin_top: Option<String>,
    pub margin_bottom: Option<String>,
    pub children: Vec<RenderNode>,
}

impl GroupNode {
    /// The synthetic root: a column with no gap, sizing or stacking of its own.
    pub fn root(children: Vec<RenderNode>) -> Self {
        Self {
            name: ROOT_NODE_NAME.to_string(),
            direction: FlexDirection::Column,
            children,
            ..Default::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_NODE_NAME
    }
}

/// A fixed-size gap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpacerNode {
    pub height: Option<String>,
}

/// A node of the materialized render tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Module(ModuleNode),
    Group(GroupNode),
    Spacer(SpacerNode),
}

impl RenderNode {
    pub fn spacer(height: impl Into<String>) -> Self {
        RenderNode::Spacer(SpacerNode {
            height: Some(height.into()),
        })
    }

    /// Returns a string identifier for the node type.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderNode::Module(_) => "module",
            RenderNode::Group(_) => "group",
            RenderNode::Spacer(_) => "spacer",
        }
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Group(group) => &group.children,
            RenderNode::Module(_) | RenderNode::Spacer(_) => &[],
        }
    }

    pub fn as_module(&self) -> Option<&ModuleNode> {
        match self {
            RenderNode::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            RenderNode::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Visits this node and all descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RenderNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Module nodes in document order.
    pub fn modules(&self) -> Vec<&ModuleNode> {
        let mut modules = Vec::new();
        self.walk(&mut |node| {
            if let RenderNode::Module(module) = node {
                modules.push(module);
            }
        });
        modules
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(RenderNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> RenderNode {
        RenderNode::Group(GroupNode::root(vec![
            RenderNode::Module(ModuleNode::new("title")),
            RenderNode::spacer("12px"),
            RenderNode::Group(GroupNode {
                name: "columns".into(),
                direction: FlexDirection::Row,
                children: vec![
                    RenderNode::Module(ModuleNode::new("image")),
                    RenderNode::Module(ModuleNode {
                        submodule_id: Some("field-1".into()),
                        ..ModuleNode::new("textFields")
                    }),
                ],
                ..Default::default()
            }),
        ]))
    }

    #[test]
    fn test_root_has_no_sizing() {
        let root = GroupNode::root(vec![]);
        assert!(root.is_root());
        assert!(root.gap.is_none());
        assert!(root.flex.is_none());
        assert!(root.position.is_none());
    }

    #[test]
    fn test_modules_in_document_order() {
        let tree = sample_tree();
        let keys: Vec<String> = tree.modules().iter().map(|m| m.placement_key()).collect();
        assert_eq!(keys, vec!["title", "image", "textFields:field-1"]);
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_effective_flex_merges_position() {
        let node = ModuleNode {
            flex: Some(FlexConfig {
                grow: Some(1.0),
                ..Default::default()
            }),
            position: Some(PositionConfig {
                flex: FlexConfig {
                    grow: Some(3.0),
                    basis: Some("50%".into()),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..ModuleNode::new("image")
        };
        let flex = node.effective_flex();
        assert_eq!(flex.grow, Some(1.0));
        assert_eq!(flex.basis.as_deref(), Some("50%"));
    }
}
