//! The Composition Order Engine.
//!
//! Holds a working copy of the declarative render order and turns it, together
//! with a render context, into a render tree and then into markup.

use crate::conditions;
use crate::serialize::Serializer;
use tessera_traits::{ModuleError, ModuleRegistry};
use tessera_tree::{GroupNode, ModuleNode, RenderNode, SpacerNode};
use tessera_types::{CompositionConfig, RenderContext, RenderOrderItem};

#[derive(Debug, Clone, Default)]
pub struct CompositionOrderEngine {
    render_order: Vec<RenderOrderItem>,
}

impl CompositionOrderEngine {
    pub fn new(render_order: Vec<RenderOrderItem>) -> Self {
        Self { render_order }
    }

    pub fn from_config(config: &CompositionConfig) -> Self {
        Self::new(config.render_order.clone())
    }

    /// A flat default ordering with one item per enabled module.
    pub fn from_enabled_modules<S: AsRef<str>>(enabled_modules: &[S]) -> Self {
        Self::new(
            enabled_modules
                .iter()
                .map(|id| RenderOrderItem::module(id.as_ref()))
                .collect(),
        )
    }

    pub fn render_order(&self) -> &[RenderOrderItem] {
        &self.render_order
    }

    pub fn into_render_order(self) -> Vec<RenderOrderItem> {
        self.render_order
    }

    pub fn set_render_order(&mut self, render_order: Vec<RenderOrderItem>) {
        self.render_order = render_order;
    }

    pub fn add_item(&mut self, item: RenderOrderItem) {
        self.render_order.push(item);
    }

    /// Inserts at `index`. Out-of-range indices leave the order unchanged.
    pub fn insert_item(&mut self, index: usize, item: RenderOrderItem) -> bool {
        if index > self.render_order.len() {
            log::warn!(
                "Insert index {} out of range (len {})",
                index,
                self.render_order.len()
            );
            return false;
        }
        self.render_order.insert(index, item);
        true
    }

    pub fn remove_item(&mut self, index: usize) -> Option<RenderOrderItem> {
        if index >= self.render_order.len() {
            log::warn!(
                "Remove index {} out of range (len {})",
                index,
                self.render_order.len()
            );
            return None;
        }
        Some(self.render_order.remove(index))
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.render_order.len();
        if from >= len || to >= len {
            log::warn!("Move {} -> {} out of range (len {})", from, to, len);
            return false;
        }
        let item = self.render_order.remove(from);
        self.render_order.insert(to, item);
        true
    }

    /// Placement keys of every module item in document order, including
    /// those nested in groups. Conditions are not evaluated.
    pub fn module_keys(&self) -> Vec<String> {
        fn collect(items: &[RenderOrderItem], keys: &mut Vec<String>) {
            for item in items {
                if item.is_group() {
                    collect(item.children(), keys);
                } else if item.is_module() {
                    keys.push(item.placement_key());
                }
            }
        }
        let mut keys = Vec::new();
        collect(&self.render_order, &mut keys);
        keys
    }

    /// Builds the conditional-filtered render tree under a synthetic root group.
    pub fn build_render_tree(&self, context: &RenderContext) -> RenderNode {
        RenderNode::Group(GroupNode::root(build_children_nodes(
            &self.render_order,
            context,
        )))
    }

    /// Builds the render tree and serializes it with a default serializer.
    pub fn generate_html(
        &self,
        context: &RenderContext,
        registry: &dyn ModuleRegistry,
    ) -> Result<String, ModuleError> {
        self.generate_html_with(context, &Serializer::new(registry, context))
    }

    /// Builds the render tree and serializes it with a configured serializer.
    pub fn generate_html_with(
        &self,
        context: &RenderContext,
        serializer: &Serializer<'_>,
    ) -> Result<String, ModuleError> {
        let tree = self.build_render_tree(context);
        serializer.render_node(&tree)
    }
}

/// Turns a list of items into nodes, recursing into groups without a depth limit.
///
/// Items whose condition fails are dropped entirely. A module with a
/// `marginBottom` is followed by a synthetic spacer of that height.
pub fn build_children_nodes(items: &[RenderOrderItem], context: &RenderContext) -> Vec<RenderNode> {
    let mut nodes = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if let Some(conditional) = &item.conditional {
            if !conditions::is_visible(conditional, context) {
                log::debug!("Item '{}' suppressed by its condition", item.placement_key());
                continue;
            }
        }

        if item.is_group() {
            let group = item.group_config.clone().unwrap_or_default();
            nodes.push(RenderNode::Group(GroupNode {
                name: item
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("group-{}", index)),
                direction: group.direction,
                gap: group.gap,
                align_items: group.align_items,
                justify_content: group.justify_content,
                position: item.position.clone(),
                flex: item.flex.clone(),
                margin_top: item.margin_top.clone(),
                margin_bottom: item.margin_bottom.clone(),
                children: build_children_nodes(&group.children, context),
            }));
        } else if item.is_spacer() {
            nodes.push(RenderNode::Spacer(SpacerNode {
                height: item.margin_top.clone(),
            }));
        } else {
            nodes.push(RenderNode::Module(ModuleNode {
                module_id: item.module_id.clone(),
                submodule_id: item.submodule_id.clone(),
                item_id: item.id.clone(),
                position: item.position.clone(),
                flex: item.flex.clone(),
                margin_top: item.margin_top.clone(),
                margin_bottom: item.margin_bottom.clone(),
                custom_style: item.custom_style.clone(),
            }));
            if let Some(margin_bottom) = &item.margin_bottom {
                nodes.push(RenderNode::spacer(margin_bottom.clone()));
            }
        }
    }

    nodes
}
