//! Configuration data model for the tessera composition engine.
//!
//! Everything an editor persists for a graphic lives here as plain serde
//! types: the render order, spatial rules, layer state and the render context
//! passed into every composition call.

pub mod condition;
pub mod config;
pub mod context;
pub mod flex;
pub mod ids;
pub mod item;
pub mod layer;
pub mod rule;

pub use condition::{
    Comparison, ComparisonOp, Condition, ConditionParseError, Conditional, IMAGE_CONTENT_FIELDS,
    IMAGE_MODULE_ID,
};
pub use config::CompositionConfig;
pub use context::{ModuleData, RenderContext, has_content, has_text_content};
pub use flex::{AlignItems, FlexConfig, FlexDirection, JustifyContent, PositionConfig, PositionMode};
pub use ids::{
    ModuleInstance, base_module_id, create_instance_id, get_module_instances,
    get_next_instance_number, instance_display_name, parse_module_id,
};
pub use item::{GROUP_MODULE_ID, GroupConfig, RenderOrderItem, SPACER_MODULE_ID, placement_key};
pub use layer::LayerConfig;
pub use rule::{SpatialRule, SpatialRuleType, WrapperDescriptor};
