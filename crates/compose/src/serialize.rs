//! Flattens a render tree into nested container markup.
//!
//! Every configuration problem (disabled or unregistered module, missing data,
//! unknown submodule index, hidden layer) renders as an empty string plus a log line.
//! Only an error raised by a module's own renderer is propagated.

use crate::style::{InlineStyle, escape_attr, sanitize_tag};
use itertools::Itertools;
use std::collections::HashMap;
use tessera_traits::{ModuleError, ModuleRegistry, StackingResolver};
use tessera_tree::{GroupNode, ModuleNode, RenderNode, SpacerNode};
use tessera_types::{PositionMode, RenderContext, WrapperDescriptor, parse_module_id};

/// Serializes render nodes against one registry and render context.
pub struct Serializer<'a> {
    registry: &'a dyn ModuleRegistry,
    context: &'a RenderContext,
    stacking: Option<&'a dyn StackingResolver>,
    wrappers: Option<&'a HashMap<String, WrapperDescriptor>>,
}

impl<'a> Serializer<'a> {
    pub fn new(registry: &'a dyn ModuleRegistry, context: &'a RenderContext) -> Self {
        Self {
            registry,
            context,
            stacking: None,
            wrappers: None,
        }
    }

    /// Resolves per-module stacking values and visibility through `stacking`.
    pub fn with_stacking(mut self, stacking: &'a dyn StackingResolver) -> Self {
        self.stacking = Some(stacking);
        self
    }

    /// Wraps module nodes whose placement key appears in `wrappers`.
    pub fn with_wrappers(mut self, wrappers: &'a HashMap<String, WrapperDescriptor>) -> Self {
        self.wrappers = Some(wrappers);
        self
    }

    pub fn render_node(&self, node: &RenderNode) -> Result<String, ModuleError> {
        match node {
            RenderNode::Module(module) => self.render_module(module),
            RenderNode::Group(group) => self.render_group(group),
            RenderNode::Spacer(spacer) => Ok(self.render_spacer(spacer)),
        }
    }

    pub fn render_module(&self, node: &ModuleNode) -> Result<String, ModuleError> {
        let module_id = node.module_id.as_str();

        if let Some(stacking) = self.stacking {
            if !stacking.is_visible(module_id) {
                log::debug!("Layer '{}' is hidden, skipping", module_id);
                return Ok(String::new());
            }
        }

        if !self.context.is_enabled(module_id) {
            log::debug!("Module '{}' is not enabled, skipping", module_id);
            return Ok(String::new());
        }

        let Some(module) = self.registry.resolve(module_id) else {
            log::warn!("Module '{}' is not registered, rendering nothing", module_id);
            return Ok(String::new());
        };
        let Some(data) = self.context.module_data(module_id) else {
            log::warn!("No data for module '{}', rendering nothing", module_id);
            return Ok(String::new());
        };

        let fragment = match node.submodule_id.as_deref() {
            Some(submodule_id) => {
                let Some(index) = submodule_index(submodule_id) else {
                    log::warn!(
                        "Submodule '{}' of '{}' has no numeric index, rendering nothing",
                        submodule_id,
                        module_id
                    );
                    return Ok(String::new());
                };
                match module.render_subfragment(index, data, self.context)? {
                    Some(fragment) => fragment,
                    None => {
                        log::warn!(
                            "Module '{}' has no submodule '{}', rendering nothing",
                            module_id,
                            submodule_id
                        );
                        return Ok(String::new());
                    }
                }
            }
            None => module.render_fragment(data, self.context)?,
        };

        if fragment.trim().is_empty() {
            return Ok(String::new());
        }

        let style = self.module_style(node);
        let slot = if style.is_empty() {
            fragment
        } else {
            let submodule_attr = node
                .submodule_id
                .as_deref()
                .map(|s| format!(" data-submodule=\"{}\"", escape_attr(s)))
                .unwrap_or_default();
            format!(
                "<div data-module=\"{}\"{} style=\"{}\">{}</div>",
                escape_attr(module_id),
                submodule_attr,
                escape_attr(&style.to_css()),
                fragment
            )
        };

        match self.wrappers.and_then(|w| w.get(&node.placement_key())) {
            Some(wrapper) => Ok(wrap(wrapper, &slot)),
            None => Ok(slot),
        }
    }

    /// Renders the group's children, eliding the container when all of them are empty.
    pub fn render_group(&self, group: &GroupNode) -> Result<String, ModuleError> {
        let mut fragments = Vec::with_capacity(group.children.len());
        for child in &group.children {
            let fragment = self.render_node(child)?;
            if !fragment.trim().is_empty() {
                fragments.push(fragment);
            }
        }
        if fragments.is_empty() {
            log::debug!("Group '{}' has no visible content, eliding", group.name);
            return Ok(String::new());
        }

        let mut style = InlineStyle::new();
        style
            .set("display", "flex")
            .set("flex-direction", group.direction.as_css())
            .set_opt("gap", group.gap.as_deref());
        if let Some(align) = group.align_items {
            style.set("align-items", align.as_css());
        }
        if let Some(justify) = group.justify_content {
            style.set("justify-content", justify.as_css());
        }
        style
            .set_opt("margin-top", group.margin_top.as_deref())
            .set_opt("margin-bottom", group.margin_bottom.as_deref());
        if let Some(flex) = &group.flex {
            apply_flex(&mut style, flex);
        }

        let class = if group.is_root() {
            "composition-root"
        } else {
            "composition-group"
        };
        Ok(format!(
            "<div class=\"{}\" data-group=\"{}\" style=\"{}\">\n{}\n</div>",
            class,
            escape_attr(&group.name),
            escape_attr(&style.to_css()),
            fragments.join("\n")
        ))
    }

    pub fn render_spacer(&self, spacer: &SpacerNode) -> String {
        match spacer.height.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            Some(height) => format!(
                "<div class=\"composition-spacer\" style=\"height: {}; flex-shrink: 0;\"></div>",
                escape_attr(height)
            ),
            None => String::new(),
        }
    }

    fn module_style(&self, node: &ModuleNode) -> InlineStyle {
        let mut style = InlineStyle::new();
        style
            .set_opt("margin-top", node.margin_top.as_deref())
            .set_opt("margin-bottom", node.margin_bottom.as_deref());
        apply_flex(&mut style, &node.effective_flex());

        if let Some(position) = node.position.as_ref().filter(|p| p.mode == PositionMode::Absolute) {
            style
                .set("position", "absolute")
                .set_opt("top", position.top.as_deref())
                .set_opt("right", position.right.as_deref())
                .set_opt("bottom", position.bottom.as_deref())
                .set_opt("left", position.left.as_deref());
        }

        if let Some(z_index) = self.stacking.and_then(|s| s.z_index_override(&node.module_id)) {
            if !style.contains("position") {
                style.set("position", "relative");
            }
            style.set("z-index", z_index.to_string());
        }

        style.push_raw(node.custom_style.as_deref());
        style
    }
}

/// The list index addressed by a submodule id such as `field-2` (zero-based).
pub fn submodule_index(submodule_id: &str) -> Option<usize> {
    parse_module_id(submodule_id)
        .instance
        .map(|n| n as usize)
        .or_else(|| submodule_id.trim().parse().ok())
}

fn apply_flex(style: &mut InlineStyle, flex: &tessera_types::FlexConfig) {
    if let Some(grow) = flex.grow {
        style.set("flex-grow", grow.to_string());
    }
    if let Some(shrink) = flex.shrink {
        style.set("flex-shrink", shrink.to_string());
    }
    style.set_opt("flex-basis", flex.basis.as_deref());
}

fn wrap(wrapper: &WrapperDescriptor, content: &str) -> String {
    let tag = sanitize_tag(&wrapper.tag);
    let attributes = [
        wrapper
            .class_name
            .as_deref()
            .map(|c| format!(" class=\"{}\"", escape_attr(c))),
        wrapper
            .style
            .as_deref()
            .map(|s| format!(" style=\"{}\"", escape_attr(s))),
    ]
    .into_iter()
    .flatten()
    .join("");
    format!("<{tag}{attributes}>{content}</{tag}>")
}
