#![allow(dead_code)]

pub mod fixtures;

use serde_json::Value;
use std::sync::{Arc, Mutex};
use tessera::{
    Composer, CompositionConfig, InMemoryModuleRegistry, Module, ModuleError, RenderContext,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A module that renders its data plainly and records every call it receives.
///
/// `{"text": "Hi"}` renders as `<p class="{id}">Hi</p>`; `{"items": [..]}`
/// renders the non-empty string items joined with commas. Subfragment `n`
/// renders item `n` as `<span class="{id}-item">..</span>`.
#[derive(Debug)]
pub struct RecordingModule {
    id: String,
    z_index: i32,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingModule {
    pub fn new(id: &str, z_index: i32) -> Self {
        Self {
            id: id.to_string(),
            z_index,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A module whose renderer always fails.
    pub fn failing(id: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(id, 0)
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn items(data: &Value) -> Vec<&str> {
        data.get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl Module for RecordingModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn render_fragment(&self, data: &Value, _context: &RenderContext) -> Result<String, ModuleError> {
        self.calls.lock().unwrap().push("fragment".to_string());
        if self.fail {
            return Err(ModuleError::render_failed(&self.id, "renderer exploded"));
        }
        let body = match data.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => Self::items(data)
                .into_iter()
                .filter(|item| !item.trim().is_empty())
                .collect::<Vec<_>>()
                .join(","),
        };
        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("<p class=\"{}\">{}</p>", self.id, body))
    }

    fn render_subfragment(
        &self,
        index: usize,
        data: &Value,
        _context: &RenderContext,
    ) -> Result<Option<String>, ModuleError> {
        self.calls.lock().unwrap().push(format!("subfragment {}", index));
        Ok(Self::items(data)
            .get(index)
            .map(|item| format!("<span class=\"{}-item\">{}</span>", self.id, item)))
    }
}

/// A registry of recording modules with the given ids and baselines.
pub fn registry(modules: &[(&str, i32)]) -> Arc<InMemoryModuleRegistry> {
    let registry = InMemoryModuleRegistry::new();
    for (id, z_index) in modules {
        registry.register(RecordingModule::new(id, *z_index)).unwrap();
    }
    Arc::new(registry)
}

/// A composer over the standard recording modules for a JSON config.
pub fn composer(config: Value) -> Composer {
    let config: CompositionConfig = serde_json::from_value(config).unwrap();
    Composer::new(config, registry(fixtures::STANDARD_MODULES))
}

/// Wraps fragments the way the composer wraps top-level output.
pub fn root(fragments: &[&str]) -> String {
    format!(
        "<div class=\"composition-root\" data-group=\"root\" style=\"display: flex; flex-direction: column;\">\n{}\n</div>",
        fragments.join("\n")
    )
}
