//! The aggregate, persisted composition configuration.

use crate::item::RenderOrderItem;
use crate::layer::LayerConfig;
use crate::rule::SpatialRule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the editor persists for one graphic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub render_order: Vec<RenderOrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index_overrides: Option<HashMap<String, i32>>,
    #[serde(default)]
    pub spatial_rules: Vec<SpatialRule>,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
    /// False while the config is an unmodified copy of its preset.
    #[serde(default)]
    pub is_custom: bool,
}

impl CompositionConfig {
    pub fn new(render_order: Vec<RenderOrderItem>) -> Self {
        Self {
            render_order,
            is_custom: true,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The override map, or an empty one when none was stored.
    pub fn overrides(&self) -> HashMap<String, i32> {
        self.z_index_overrides.clone().unwrap_or_default()
    }

    /// Flags the config as hand-edited.
    pub fn mark_custom(&mut self) {
        self.is_custom = true;
    }
}
