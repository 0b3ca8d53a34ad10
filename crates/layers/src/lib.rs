//! Layer Controller.
//!
//! Owns the stacking state of every enabled module: its effective z-index,
//! visibility and lock flag. The layer list is kept in visual order, bottom
//! first, so index 0 is rendered underneath everything else.
//!
//! A controller is a working copy built from one composition's config slice.
//! Build a fresh one per composition run instead of sharing it between
//! graphics that render concurrently.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tessera_traits::{ModuleRegistry, StackingResolver};
use tessera_types::{CompositionConfig, LayerConfig, instance_display_name};

/// Spacing between recomputed stacking values, leaving room for manual insertion.
pub const Z_INDEX_STEP: i32 = 10;

static Z_INDEX_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)z-index\s*:\s*[^;}]*").expect("z-index declaration pattern is valid")
});

#[derive(Debug, Clone, Default)]
pub struct LayerController {
    layers: Vec<LayerConfig>,
    overrides: HashMap<String, i32>,
    baselines: HashMap<String, i32>,
    enabled: Vec<String>,
}

impl LayerController {
    /// Creates a controller with the given explicit overrides and no layers.
    pub fn new(overrides: HashMap<String, i32>) -> Self {
        Self {
            overrides,
            ..Default::default()
        }
    }

    /// Creates a controller seeded with a config's stored overrides.
    pub fn from_config(config: &CompositionConfig) -> Self {
        Self::new(config.overrides())
    }

    /// Rebuilds the layer list from scratch for `enabled_modules`.
    ///
    /// Each layer starts at the module's registry baseline unless an override
    /// exists, and the list is sorted ascending by stacking value.
    pub fn initialize_layers<S: AsRef<str>>(
        &mut self,
        enabled_modules: &[S],
        registry: &dyn ModuleRegistry,
    ) {
        self.enabled = enabled_modules.iter().map(|s| s.as_ref().to_string()).collect();
        self.baselines.clear();
        self.layers.clear();

        for id in &self.enabled {
            let module = registry.resolve(id);
            if module.is_none() {
                log::warn!("Layer for '{}' has no registered module, using baseline 0", id);
            }
            let baseline = module.as_ref().map(|m| m.z_index()).unwrap_or(0);
            let display_name = module
                .as_ref()
                .map(|m| instance_display_name(m.display_name(), id))
                .unwrap_or_else(|| id.clone());
            self.baselines.insert(id.clone(), baseline);

            let z_index = self.overrides.get(id).copied().unwrap_or(baseline);
            self.layers.push(LayerConfig::new(id.clone(), z_index, display_name));
        }

        self.sort_layers();
        log::debug!("Initialized {} layers", self.layers.len());
    }

    /// Layers in visual order, bottom first.
    pub fn layers(&self) -> &[LayerConfig] {
        &self.layers
    }

    pub fn layer(&self, module_id: &str) -> Option<&LayerConfig> {
        self.layers.iter().find(|l| l.module_id == module_id)
    }

    pub fn overrides(&self) -> &HashMap<String, i32> {
        &self.overrides
    }

    /// A copy of the layer list suitable for persisting in a config.
    pub fn export_layers(&self) -> Vec<LayerConfig> {
        self.layers.clone()
    }

    /// Baseline captured for `module_id` at initialization, or 0.
    pub fn baseline(&self, module_id: &str) -> i32 {
        self.baselines.get(module_id).copied().unwrap_or(0)
    }

    /// Effective stacking value: explicit override, then the layer entry,
    /// then the registry baseline, then 0.
    pub fn z_index(&self, module_id: &str) -> i32 {
        if let Some(z) = self.overrides.get(module_id) {
            return *z;
        }
        if let Some(layer) = self.layer(module_id) {
            return layer.z_index;
        }
        self.baseline(module_id)
    }

    /// Layers without an entry count as visible.
    pub fn is_visible(&self, module_id: &str) -> bool {
        self.layer(module_id).map(|l| l.visible).unwrap_or(true)
    }

    pub fn is_locked(&self, module_id: &str) -> bool {
        self.layer(module_id).map(|l| l.locked).unwrap_or(false)
    }

    /// Sets an explicit stacking value. Refused for locked layers.
    pub fn set_z_index(&mut self, module_id: &str, z_index: i32) -> bool {
        if self.is_locked(module_id) {
            log::warn!("Layer '{}' is locked, ignoring z-index change", module_id);
            return false;
        }
        self.overrides.insert(module_id.to_string(), z_index);
        if let Some(layer) = self.layers.iter_mut().find(|l| l.module_id == module_id) {
            layer.z_index = z_index;
        }
        self.sort_layers();
        true
    }

    /// Moves the layer at `from` to `to` and renumbers every layer.
    ///
    /// After the move each layer gets `index * Z_INDEX_STEP`, written back to
    /// the override map. This replaces earlier explicit values for all layers,
    /// not only the moved one.
    pub fn reorder_layers(&mut self, from: usize, to: usize) -> bool {
        let len = self.layers.len();
        if from >= len || to >= len {
            log::warn!("Layer reorder {} -> {} out of range (len {})", from, to, len);
            return false;
        }
        if self.layers[from].locked {
            log::warn!("Layer '{}' is locked, ignoring reorder", self.layers[from].module_id);
            return false;
        }
        if from == to {
            return true;
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.renumber_layers();
        true
    }

    /// Renumbers every layer as `index * Z_INDEX_STEP` in current visual order.
    pub fn auto_calculate_z_index(&mut self) {
        self.renumber_layers();
    }

    pub fn move_to_top(&mut self, module_id: &str) -> bool {
        let Some(max) = self.layers.iter().map(|l| l.z_index).max() else {
            return false;
        };
        self.move_to(module_id, max.saturating_add(Z_INDEX_STEP), "top")
    }

    pub fn move_to_bottom(&mut self, module_id: &str) -> bool {
        let Some(min) = self.layers.iter().map(|l| l.z_index).min() else {
            return false;
        };
        self.move_to(module_id, min.saturating_sub(Z_INDEX_STEP), "bottom")
    }

    /// Swaps the layer with the one above it. No-op for the topmost layer.
    pub fn move_up(&mut self, module_id: &str) -> bool {
        match self.position(module_id) {
            Some(index) if index + 1 < self.layers.len() => self.reorder_layers(index, index + 1),
            _ => false,
        }
    }

    /// Swaps the layer with the one below it. No-op for the bottom layer.
    pub fn move_down(&mut self, module_id: &str) -> bool {
        match self.position(module_id) {
            Some(index) if index > 0 => self.reorder_layers(index, index - 1),
            _ => false,
        }
    }

    pub fn set_visibility(&mut self, module_id: &str, visible: bool) -> bool {
        match self.layers.iter_mut().find(|l| l.module_id == module_id) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn toggle_visibility(&mut self, module_id: &str) -> bool {
        let visible = self.is_visible(module_id);
        self.set_visibility(module_id, !visible)
    }

    pub fn set_locked(&mut self, module_id: &str, locked: bool) -> bool {
        match self.layers.iter_mut().find(|l| l.module_id == module_id) {
            Some(layer) => {
                layer.locked = locked;
                true
            }
            None => false,
        }
    }

    pub fn toggle_lock(&mut self, module_id: &str) -> bool {
        let locked = self.is_locked(module_id);
        self.set_locked(module_id, !locked)
    }

    /// Copies visibility and lock flags from a persisted layer list.
    pub fn restore_layer_state(&mut self, saved: &[LayerConfig]) {
        for saved_layer in saved {
            if let Some(layer) = self
                .layers
                .iter_mut()
                .find(|l| l.module_id == saved_layer.module_id)
            {
                layer.visible = saved_layer.visible;
                layer.locked = saved_layer.locked;
            }
        }
    }

    /// Drops every override and returns each layer to its baseline.
    ///
    /// Visibility and lock flags survive the reset.
    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
        for layer in &mut self.layers {
            layer.z_index = self.baselines.get(&layer.module_id).copied().unwrap_or(0);
        }
        self.sort_layers();
    }

    /// Injects the effective stacking value into a module's own CSS.
    ///
    /// CSS is returned unchanged when the module renders at its baseline.
    /// Otherwise existing `z-index` declarations are rewritten; if there are
    /// none, an `!important` rule scoped to the module's classes is prepended.
    pub fn apply_css_override(&self, module_id: &str, css: &str) -> String {
        let z_index = self.z_index(module_id);
        if z_index == self.baseline(module_id) {
            return css.to_string();
        }
        if Z_INDEX_DECLARATION.is_match(css) {
            return Z_INDEX_DECLARATION
                .replace_all(css, format!("z-index: {}", z_index).as_str())
                .into_owned();
        }
        format!(
            ".{id}-container, .{id} {{ z-index: {z} !important; }}\n{css}",
            id = module_id,
            z = z_index,
            css = css
        )
    }

    fn move_to(&mut self, module_id: &str, z_index: i32, label: &str) -> bool {
        let Some(locked) = self.layer(module_id).map(|l| l.locked) else {
            log::warn!("Cannot move unknown layer '{}' to {}", module_id, label);
            return false;
        };
        if locked {
            log::warn!("Layer '{}' is locked, ignoring move to {}", module_id, label);
            return false;
        }
        self.set_z_index(module_id, z_index)
    }

    fn position(&self, module_id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.module_id == module_id)
    }

    fn renumber_layers(&mut self) {
        for (index, layer) in self.layers.iter_mut().enumerate() {
            layer.z_index = index as i32 * Z_INDEX_STEP;
            self.overrides.insert(layer.module_id.clone(), layer.z_index);
        }
    }

    fn sort_layers(&mut self) {
        self.layers.sort_by_key(|l| l.z_index);
    }
}

impl StackingResolver for LayerController {
    fn effective_z_index(&self, module_id: &str) -> i32 {
        self.z_index(module_id)
    }

    fn baseline_z_index(&self, module_id: &str) -> i32 {
        self.baseline(module_id)
    }

    fn is_visible(&self, module_id: &str) -> bool {
        LayerController::is_visible(self, module_id)
    }
}
