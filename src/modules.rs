//! Handlebars-backed modules loaded from a JSON manifest.
//!
//! A manifest lists one definition per module:
//!
//! ```json
//! {
//!   "modules": [
//!     { "id": "title", "zIndex": 50, "fragment": "<h1>{{text}}</h1>" },
//!     {
//!       "id": "bullets",
//!       "zIndex": 20,
//!       "fragment": "<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>",
//!       "itemsField": "items",
//!       "itemTemplate": "<p class=\"bullet\">{{item}}</p>"
//!     }
//!   ]
//! }
//! ```
//!
//! Fragments render against the module's data object, with `viewportWidth`,
//! `viewportHeight` and `baseUrl` added when the data does not define them.
//! Item templates render against `{ item, index, number }`.

use crate::error::PipelineError;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tessera_traits::{InMemoryModuleRegistry, Module, ModuleError};
use tessera_types::{ModuleData, RenderContext, has_content};

const FRAGMENT_TEMPLATE: &str = "fragment";
const ITEM_TEMPLATE: &str = "item";

/// One module entry in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    pub id: String,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub fragment: String,
    /// List field in the module data addressed by submodule indices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_template: Option<String>,
}

impl ModuleDefinition {
    pub fn new(id: impl Into<String>, z_index: i32, fragment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            z_index,
            display_name: None,
            fragment: fragment.into(),
            items_field: None,
            item_template: None,
        }
    }

    pub fn with_items(mut self, field: impl Into<String>, template: impl Into<String>) -> Self {
        self.items_field = Some(field.into());
        self.item_template = Some(template.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleManifest {
    #[serde(default)]
    pub modules: Vec<ModuleDefinition>,
}

impl ModuleManifest {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read module manifest from '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_json(&source)
    }

    /// Compiles every definition and registers it in a fresh registry.
    pub fn into_registry(self) -> Result<InMemoryModuleRegistry, PipelineError> {
        let registry = InMemoryModuleRegistry::new();
        for definition in self.modules {
            registry.register_shared(Arc::new(TemplateModule::new(definition)?))?;
        }
        log::debug!("Registered {} template modules", registry.len());
        Ok(registry)
    }
}

/// A module whose markup comes from handlebars templates.
pub struct TemplateModule {
    definition: ModuleDefinition,
    engine: Handlebars<'static>,
}

impl TemplateModule {
    /// Compiles the definition's templates.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Template` if a template does not compile or if
    /// only one of `itemsField` and `itemTemplate` is set.
    pub fn new(definition: ModuleDefinition) -> Result<Self, PipelineError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine
            .register_template_string(FRAGMENT_TEMPLATE, &definition.fragment)
            .map_err(|e| PipelineError::template(&definition.id, e))?;

        match (&definition.items_field, &definition.item_template) {
            (Some(_), Some(template)) => engine
                .register_template_string(ITEM_TEMPLATE, template)
                .map_err(|e| PipelineError::template(&definition.id, e))?,
            (None, None) => {}
            _ => {
                return Err(PipelineError::template(
                    &definition.id,
                    "itemsField and itemTemplate must be set together",
                ));
            }
        }

        Ok(Self { definition, engine })
    }

    pub fn definition(&self) -> &ModuleDefinition {
        &self.definition
    }

    fn fragment_data(data: &ModuleData, context: &RenderContext) -> Value {
        let mut value = match data {
            Value::Object(_) => data.clone(),
            other => json!({ "value": other }),
        };
        if let Value::Object(map) = &mut value {
            map.entry("viewportWidth").or_insert(json!(context.viewport_width));
            map.entry("viewportHeight").or_insert(json!(context.viewport_height));
            map.entry("baseUrl").or_insert(json!(context.base_url));
        }
        value
    }
}

impl fmt::Debug for TemplateModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateModule")
            .field("id", &self.definition.id)
            .field("z_index", &self.definition.z_index)
            .finish()
    }
}

impl Module for TemplateModule {
    fn id(&self) -> &str {
        &self.definition.id
    }

    fn z_index(&self) -> i32 {
        self.definition.z_index
    }

    fn display_name(&self) -> &str {
        self.definition
            .display_name
            .as_deref()
            .unwrap_or(&self.definition.id)
    }

    fn render_fragment(
        &self,
        data: &ModuleData,
        context: &RenderContext,
    ) -> Result<String, ModuleError> {
        self.engine
            .render(FRAGMENT_TEMPLATE, &Self::fragment_data(data, context))
            .map_err(|e| ModuleError::render_failed(&self.definition.id, e))
    }

    fn render_subfragment(
        &self,
        index: usize,
        data: &ModuleData,
        _context: &RenderContext,
    ) -> Result<Option<String>, ModuleError> {
        let Some(field) = self.definition.items_field.as_deref() else {
            return Ok(None);
        };
        let Some(item) = data
            .get(field)
            .and_then(Value::as_array)
            .and_then(|items| items.get(index))
        else {
            return Ok(None);
        };
        if !has_content(item) {
            return Ok(Some(String::new()));
        }

        let item_data = json!({ "item": item, "index": index, "number": index + 1 });
        self.engine
            .render(ITEM_TEMPLATE, &item_data)
            .map(Some)
            .map_err(|e| ModuleError::render_failed(&self.definition.id, e))
    }
}
