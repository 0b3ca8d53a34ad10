//! Per-module stacking state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    pub module_id: String,
    /// Higher values render on top.
    pub z_index: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked layers are excluded from reorder operations.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub display_name: String,
}

fn default_visible() -> bool {
    true
}

impl LayerConfig {
    pub fn new(module_id: impl Into<String>, z_index: i32, display_name: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            z_index,
            visible: true,
            locked: false,
            display_name: display_name.into(),
        }
    }
}
