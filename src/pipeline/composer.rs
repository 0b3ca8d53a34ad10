// src/pipeline/composer.rs
use crate::document;
use crate::error::PipelineError;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use tessera_compose::{CompositionOrderEngine, Serializer};
use tessera_layers::LayerController;
use tessera_spatial::{RuleFailure, SpatialRulesEngine};
use tessera_traits::ModuleRegistry;
use tessera_types::{CompositionConfig, RenderContext, RenderOrderItem};

/// The output of one composition run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    pub html: String,
    /// Effective stacking value per enabled module.
    pub z_indices: BTreeMap<String, i32>,
    /// Spatial rules that were skipped during this run.
    pub rule_failures: Vec<RuleFailure>,
}

/// Runs compositions for one configuration against one module registry.
///
/// Engines are built fresh for every call from the stored config, so a
/// `Composer` can be shared between threads rendering different contexts.
#[derive(Debug, Clone)]
pub struct Composer {
    config: CompositionConfig,
    registry: Arc<dyn ModuleRegistry>,
}

impl Composer {
    pub fn new(config: CompositionConfig, registry: Arc<dyn ModuleRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn ModuleRegistry {
        self.registry.as_ref()
    }

    /// Produces the composed markup and stacking values for `context`.
    ///
    /// Spatial rules reorder the top-level items by placement key before the
    /// render tree is built. Layers are initialised from the enabled set,
    /// the stored overrides and the persisted visibility/lock flags.
    ///
    /// # Errors
    ///
    /// Only a failure inside a module's own renderer is returned.
    pub fn compose(&self, context: &RenderContext) -> Result<Composition, PipelineError> {
        let rules = SpatialRulesEngine::from_config(&self.config);
        let keys: Vec<String> = self
            .config
            .render_order
            .iter()
            .map(RenderOrderItem::placement_key)
            .collect();
        let application = rules.apply_rules_with_report(&keys);
        log::debug!("Top-level order: {}", application.order.iter().join(", "));
        let order = reorder_items(&self.config.render_order, &application.order);
        let engine = CompositionOrderEngine::new(order);

        let mut layers = LayerController::from_config(&self.config);
        layers.initialize_layers(&context.enabled_modules, self.registry());
        layers.restore_layer_state(&self.config.layers);

        let wrappers = rules.wrappers();
        let serializer = Serializer::new(self.registry(), context)
            .with_stacking(&layers)
            .with_wrappers(&wrappers);
        let html = engine.generate_html_with(context, &serializer)?;

        let z_indices = layers
            .layers()
            .iter()
            .map(|layer| (layer.module_id.clone(), layer.z_index))
            .collect();

        log::debug!(
            "Composed {} bytes of markup, {} rule failures",
            html.len(),
            application.failures.len()
        );
        Ok(Composition {
            html,
            z_indices,
            rule_failures: application.failures,
        })
    }

    /// Composes `context` and wraps the markup in a standalone HTML document.
    pub fn render_document(&self, context: &RenderContext) -> Result<String, PipelineError> {
        let composition = self.compose(context)?;
        Ok(document::wrap_document(&composition.html, context))
    }
}

/// Rebuilds `items` in the order given by `keys`.
///
/// Items sharing a placement key keep their relative order. Items whose key
/// is missing from `keys` are appended at the end.
fn reorder_items(items: &[RenderOrderItem], keys: &[String]) -> Vec<RenderOrderItem> {
    let mut by_key: HashMap<String, VecDeque<RenderOrderItem>> = HashMap::new();
    for item in items {
        by_key
            .entry(item.placement_key())
            .or_default()
            .push_back(item.clone());
    }

    let mut ordered = Vec::with_capacity(items.len());
    for key in keys {
        if let Some(item) = by_key.get_mut(key).and_then(VecDeque::pop_front) {
            ordered.push(item);
        }
    }
    // Whatever the key list did not cover stays, in its original order.
    for item in items {
        if let Some(rest) = by_key.get_mut(&item.placement_key())
            && let Some(item) = rest.pop_front()
        {
            ordered.push(item);
        }
    }
    ordered
}
