//! Module and ModuleRegistry traits.
//!
//! The engines never generate module content themselves. A module is consumed
//! only through this narrow contract: an id, a baseline stacking value and a
//! function that turns the module's data into a markup fragment.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use tessera_types::{ModuleData, RenderContext, parse_module_id};
use thiserror::Error;

/// Error type for module rendering and registration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModuleError {
    #[error("Module '{module}' failed to render: {message}")]
    RenderFailed { module: String, message: String },

    #[error("Invalid template for module '{module}': {message}")]
    InvalidTemplate { module: String, message: String },

    #[error("Module registry unavailable: {0}")]
    Registry(String),
}

impl ModuleError {
    pub fn render_failed(module: impl Into<String>, message: impl ToString) -> Self {
        ModuleError::RenderFailed {
            module: module.into(),
            message: message.to_string(),
        }
    }
}

/// A shared, reference-counted module implementation.
pub type SharedModule = Arc<dyn Module>;

/// An independently implemented visual content unit.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct Title;
///
/// impl Module for Title {
///     fn id(&self) -> &str { "title" }
///     fn z_index(&self) -> i32 { 20 }
///     fn render_fragment(&self, data: &ModuleData, _ctx: &RenderContext) -> Result<String, ModuleError> {
///         Ok(format!("<h1>{}</h1>", data["text"].as_str().unwrap_or_default()))
///     }
/// }
/// ```
pub trait Module: Send + Sync + Debug {
    /// The base id the module is registered under.
    fn id(&self) -> &str;

    /// The module's own stacking value, before any override.
    fn z_index(&self) -> i32 {
        0
    }

    /// Human-readable name shown in layer lists.
    fn display_name(&self) -> &str {
        self.id()
    }

    /// Renders the whole module.
    fn render_fragment(
        &self,
        data: &ModuleData,
        context: &RenderContext,
    ) -> Result<String, ModuleError>;

    /// Renders one addressable part of the module, e.g. a single field of a
    /// multi-field module.
    ///
    /// Returns `Ok(None)` when the module has no addressable parts or `index`
    /// is out of range; the caller renders nothing in that case.
    fn render_subfragment(
        &self,
        index: usize,
        data: &ModuleData,
        context: &RenderContext,
    ) -> Result<Option<String>, ModuleError> {
        let _ = (index, data, context);
        Ok(None)
    }
}

/// Maps module ids to their implementations.
pub trait ModuleRegistry: Send + Sync + Debug {
    /// Looks up a module by exact id.
    fn get_module(&self, id: &str) -> Option<SharedModule>;

    /// Ids of every registered module.
    fn module_ids(&self) -> Vec<String>;

    /// Looks up a module by exact id, falling back to the base id for
    /// instance-suffixed ids such as `textFields-2`.
    fn resolve(&self, id: &str) -> Option<SharedModule> {
        self.get_module(id).or_else(|| {
            let parsed = parse_module_id(id);
            if parsed.instance.is_some() {
                self.get_module(&parsed.base)
            } else {
                None
            }
        })
    }

    /// The registry-declared stacking value for `id`, if the module exists.
    fn baseline_z_index(&self, id: &str) -> Option<i32> {
        self.resolve(id).map(|module| module.z_index())
    }
}

/// A registry populated in memory before use.
#[derive(Debug, Default)]
pub struct InMemoryModuleRegistry {
    modules: RwLock<HashMap<String, SharedModule>>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under its own id, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::Registry` if the internal lock is poisoned.
    pub fn register(&self, module: impl Module + 'static) -> Result<(), ModuleError> {
        self.register_shared(Arc::new(module))
    }

    /// Registers an already shared module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::Registry` if the internal lock is poisoned.
    pub fn register_shared(&self, module: SharedModule) -> Result<(), ModuleError> {
        let mut modules = self
            .modules
            .write()
            .map_err(|_| ModuleError::Registry("module store lock poisoned".to_string()))?;
        let id = module.id().to_string();
        if modules.insert(id.clone(), module).is_some() {
            log::debug!("Replaced registered module '{}'", id);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.modules.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn get_module(&self, id: &str) -> Option<SharedModule> {
        self.modules.read().ok()?.get(id).cloned()
    }

    fn module_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .modules
            .read()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Badge;

    impl Module for Badge {
        fn id(&self) -> &str {
            "badge"
        }

        fn z_index(&self) -> i32 {
            40
        }

        fn render_fragment(
            &self,
            data: &ModuleData,
            _context: &RenderContext,
        ) -> Result<String, ModuleError> {
            Ok(format!("<span>{}</span>", data["label"].as_str().unwrap_or_default()))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = InMemoryModuleRegistry::new();
        assert!(registry.is_empty());
        registry.register(Badge).unwrap();

        let module = registry.get_module("badge").unwrap();
        assert_eq!(module.display_name(), "badge");
        let html = module
            .render_fragment(&json!({ "label": "NEW" }), &RenderContext::default())
            .unwrap();
        assert_eq!(html, "<span>NEW</span>");
        assert_eq!(registry.module_ids(), vec!["badge".to_string()]);
    }

    #[test]
    fn test_resolve_falls_back_to_base_id() {
        let registry = InMemoryModuleRegistry::new();
        registry.register(Badge).unwrap();

        assert!(registry.get_module("badge-2").is_none());
        assert_eq!(registry.resolve("badge-2").unwrap().id(), "badge");
        assert_eq!(registry.baseline_z_index("badge-3"), Some(40));
        assert!(registry.resolve("ribbon").is_none());
        assert_eq!(registry.baseline_z_index("ribbon"), None);
    }

    #[test]
    fn test_default_subfragment_is_unsupported() {
        let sub = Badge
            .render_subfragment(0, &json!({}), &RenderContext::default())
            .unwrap();
        assert!(sub.is_none());
    }
}
