//! The render context handed to every composition call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Opaque per-module configuration. Only module renderers interpret it.
pub type ModuleData = Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Identifiers (possibly instance-suffixed) currently active.
    #[serde(default)]
    pub enabled_modules: Vec<String>,
    /// Per-module data keyed by the same identifiers.
    #[serde(default)]
    pub all_modules_data: HashMap<String, ModuleData>,
    #[serde(default)]
    pub viewport_width: u32,
    #[serde(default)]
    pub viewport_height: u32,
    /// Passed through to module renderers untouched.
    #[serde(default)]
    pub base_url: String,
}

impl RenderContext {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Default::default()
        }
    }

    /// Enables `id` and stores its data.
    pub fn with_module(mut self, id: impl Into<String>, data: ModuleData) -> Self {
        let id = id.into();
        if !self.enabled_modules.contains(&id) {
            self.enabled_modules.push(id.clone());
        }
        self.all_modules_data.insert(id, data);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_modules.iter().any(|m| m == id)
    }

    pub fn module_data(&self, id: &str) -> Option<&ModuleData> {
        self.all_modules_data.get(id)
    }
}

/// Returns true if a data value carries anything renderable.
///
/// Strings must be non-blank, arrays and objects need at least one element
/// with content. Numbers and booleans always count; `null` never does.
pub fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(has_content),
        Value::Object(fields) => fields.values().any(has_content),
    }
}

/// Like [`has_content`], but numbers and booleans never count.
///
/// Module data often carries numeric style fields next to the real content,
/// so only non-blank strings make a value non-empty here.
pub fn has_text_content(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(has_text_content),
        Value::Object(fields) => fields.values().any(has_text_content),
    }
}
